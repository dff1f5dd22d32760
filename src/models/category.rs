use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Browse categories offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    AllCategories,
    ActionFigures,
    Books,
    DvdBluRay,
    Fragrances,
    Furniture,
    Hats,
    Headphones,
    MensClothing,
    MensShoes,
    MusicCds,
    MusicCassettes,
    SportingGoods,
    VideoGames,
    CellPhones,
    Tablets,
    TechAccessories,
}

/// Which negative-keyword list a category pulls into the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionFamily {
    PhoneTablet,
    TechAccessory,
}

impl ExclusionFamily {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ExclusionFamily::PhoneTablet => &[
                "case",
                "cover",
                "keyboard",
                "manual",
                "guide",
                "screen",
                "protector",
                "folio",
                "box",
                "accessory",
                "cable",
                "cord",
                "charger",
                "pen",
                "for parts",
                "not working",
                "empty box",
            ],
            ExclusionFamily::TechAccessory => {
                &["broken", "defective", "not working", "for parts", "empty box"]
            }
        }
    }
}

/// Structured attribute constraint sent alongside the free-text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRule {
    pub name: &'static str,
    pub value: &'static str,
    /// Appended to the query text in case the aspect is not indexed.
    pub keyword: &'static str,
}

impl Category {
    pub const ALL: [Category; 17] = [
        Category::AllCategories,
        Category::ActionFigures,
        Category::Books,
        Category::DvdBluRay,
        Category::Fragrances,
        Category::Furniture,
        Category::Hats,
        Category::Headphones,
        Category::MensClothing,
        Category::MensShoes,
        Category::MusicCds,
        Category::MusicCassettes,
        Category::SportingGoods,
        Category::VideoGames,
        Category::CellPhones,
        Category::Tablets,
        Category::TechAccessories,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::AllCategories => "All Categories",
            Category::ActionFigures => "Action Figures & Accessories",
            Category::Books => "Books",
            Category::DvdBluRay => "DVD & Blu-ray",
            Category::Fragrances => "Fragrances",
            Category::Furniture => "Furniture",
            Category::Hats => "Hats",
            Category::Headphones => "Headphones",
            Category::MensClothing => "Men's Clothing",
            Category::MensShoes => "Men's Shoes",
            Category::MusicCds => "Music CDs",
            Category::MusicCassettes => "Music Cassettes",
            Category::SportingGoods => "Sporting Goods",
            Category::VideoGames => "Video Games & Consoles",
            Category::CellPhones => "Cell Phones & Smartphones",
            Category::Tablets => "Tablets & eBook Readers",
            Category::TechAccessories => "Tech Accessories",
        }
    }

    /// eBay category id, `None` when the category does not narrow the search.
    pub fn id(self) -> Option<&'static str> {
        match self {
            Category::AllCategories | Category::TechAccessories => None,
            Category::ActionFigures => Some("246"),
            Category::Books => Some("267"),
            Category::DvdBluRay => Some("617"),
            Category::Fragrances => Some("180345"),
            Category::Furniture => Some("3197"),
            Category::Hats => Some("52365"),
            Category::Headphones => Some("112529"),
            Category::MensClothing => Some("1059"),
            Category::MensShoes => Some("93427"),
            Category::MusicCds => Some("176984"),
            Category::MusicCassettes => Some("176983"),
            Category::SportingGoods => Some("888"),
            Category::VideoGames => Some("1249"),
            Category::CellPhones => Some("9355"),
            Category::Tablets => Some("171485"),
        }
    }

    pub fn exclusion_family(self) -> Option<ExclusionFamily> {
        match self {
            Category::CellPhones | Category::Tablets => Some(ExclusionFamily::PhoneTablet),
            Category::TechAccessories => Some(ExclusionFamily::TechAccessory),
            _ => None,
        }
    }

    pub fn aspect(self) -> Option<AspectRule> {
        match self {
            Category::MensShoes => Some(AspectRule {
                name: "US Shoe Size",
                value: "11",
                keyword: "11",
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SearchError::InvalidParameters(format!("unknown category '{wanted}'")))
    }
}
