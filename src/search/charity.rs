/// Username fragments of charity and nonprofit thrift sellers.
pub const CHARITY_KEYWORDS: &[&str] = &[
    "goodwill",
    "salvationarmy",
    "salvation_army",
    "habitat",
    "habitatrestore",
    "habitatforhumanity",
    "nonprofit",
    "svdp",
    "stvincentdepaul",
    "vincentdepaul",
    "catholiccharities",
    "catholiccharity",
    "oxfam",
    "barnardos",
    "britishheartfoundation",
    "bhf",
    "redcross",
    "charity",
    "charities",
    "thriftstoreusa",
    "charitythrift",
    "nonprofitstore",
];

/// Whether a seller username looks like a charity store.
///
/// Plain case-insensitive substring containment, not word matching:
/// "mycharitystore123" counts.
pub fn is_charity(username: &str) -> bool {
    if username.is_empty() {
        return false;
    }
    let lower = username.to_lowercase();
    CHARITY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
