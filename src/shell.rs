use crate::error::{SearchError, SearchResult};
use crate::models::{Category, SearchParameters, SellerTier, LIMIT_RANGE, MAX_PRICE_RANGE};
use crate::report::export::{default_file_name, export_to_path};
use crate::report::render::render_report;
use crate::search::SearchService;
use crate::session::Session;
use anyhow::Result;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "\
Commands:
  set <field> <value>   term | category | type | seller | rating | max | limit
  show                  print the current search parameters
  search                run the current search
  save                  save the current parameters
  saved                 list saved searches
  load <n>              make saved search <n> current
  delete <n>            delete saved search <n>
  export [path]         write the last results as CSV
  categories            list category names
  help                  show this text
  quit                  leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Set { field: String, value: String },
    Show,
    Search,
    Save,
    Saved,
    /// Zero-based index of the saved search
    Load(usize),
    Delete(usize),
    Export(Option<PathBuf>),
    Categories,
    Help,
    Quit,
}

/// Saved searches are numbered from 1 on screen.
fn parse_position(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a saved search number, got '{}'", arg.trim())),
    }
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        match word.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(f, v)| (f, v.trim()));
                if field.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                Ok(ShellCommand::Set {
                    field: field.to_ascii_lowercase(),
                    value: value.to_string(),
                })
            }
            "show" => Ok(ShellCommand::Show),
            "search" | "go" => Ok(ShellCommand::Search),
            "save" => Ok(ShellCommand::Save),
            "saved" | "list" => Ok(ShellCommand::Saved),
            "load" => parse_position(rest).map(ShellCommand::Load),
            "delete" | "del" => parse_position(rest).map(ShellCommand::Delete),
            "export" => Ok(ShellCommand::Export(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            "categories" => Ok(ShellCommand::Categories),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

fn parse_in_range(
    value: &str,
    what: &str,
    range: std::ops::RangeInclusive<u32>,
) -> SearchResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| range.contains(n))
        .ok_or_else(|| {
            SearchError::InvalidParameters(format!(
                "{what} must be a whole number in {}..={}",
                range.start(),
                range.end()
            ))
        })
}

/// Update one field of `params` from shell input.
pub fn apply_setting(params: &mut SearchParameters, field: &str, value: &str) -> SearchResult<()> {
    match field {
        "term" | "search" | "q" => params.search_term = value.trim().to_string(),
        "category" => params.category = value.parse()?,
        "type" | "listing-type" => params.listing_type = value.parse()?,
        "seller" | "seller-type" => params.seller_type = value.parse()?,
        "rating" | "ratings" => {
            params.seller_ratings = match value.trim().to_ascii_lowercase().as_str() {
                "" | "any" | "all" | "none" => Default::default(),
                list => list
                    .split(',')
                    .map(SellerTier::parse_selectable)
                    .collect::<SearchResult<_>>()?,
            }
        }
        "max" | "max-price" => {
            params.max_price = parse_in_range(value, "max price", MAX_PRICE_RANGE)?
        }
        "limit" => params.limit = parse_in_range(value, "limit", LIMIT_RANGE)?,
        other => {
            return Err(SearchError::InvalidParameters(format!("unknown field '{other}'")));
        }
    }
    Ok(())
}

fn describe(params: &SearchParameters) -> String {
    let ratings = if params.seller_ratings.is_empty() {
        "any".to_string()
    } else {
        params
            .seller_ratings
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "term: \"{}\"\n\
         category: {}\n\
         listing type: {}\n\
         seller type: {}\n\
         seller rating: {}\n\
         max price: ${}\n\
         limit: {}",
        params.search_term,
        params.category,
        params.listing_type,
        params.seller_type,
        ratings,
        params.max_price,
        params.limit
    )
}

/// Line-oriented front end over one `Session`
pub struct Shell<'a> {
    service: &'a SearchService,
    session: Session,
}

impl<'a> Shell<'a> {
    pub fn new(service: &'a SearchService) -> Self {
        Self {
            service,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands from stdin until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = std::io::stdout();

        info!("Interactive session using {}", self.service.source_name());
        writeln!(stdout, "{HELP}")?;

        loop {
            write!(stdout, "scout> ")?;
            stdout.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ShellCommand>() {
                Ok(command) => {
                    if !self.execute(command, &mut stdout).await? {
                        break;
                    }
                }
                Err(message) => writeln!(stdout, "{message}")?,
            }
        }
        Ok(())
    }

    /// Run one command; `Ok(false)` means the session should end.
    pub async fn execute<W: Write>(
        &mut self,
        command: ShellCommand,
        out: &mut W,
    ) -> Result<bool> {
        match command {
            ShellCommand::Set { field, value } => {
                match apply_setting(&mut self.session.current, &field, &value) {
                    Ok(()) => writeln!(out, "{field} updated")?,
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            ShellCommand::Show => writeln!(out, "{}", describe(&self.session.current))?,
            ShellCommand::Search => {
                if self.session.current.search_term.trim().is_empty() {
                    writeln!(out, "Set a search term first: set term <words>")?;
                    return Ok(true);
                }
                match self.service.run(&self.session.current).await {
                    Ok(report) => {
                        render_report(&report, out)?;
                        self.session.record_report(report);
                    }
                    Err(SearchError::AuthFailure(message)) => {
                        warn!("Authentication failed: {}", message);
                        writeln!(out, "❌ Unable to search - {message}")?;
                    }
                    Err(err) => writeln!(out, "❌ {err}")?,
                }
            }
            ShellCommand::Save => {
                if self.session.save_current() {
                    writeln!(out, "💾 Search saved!")?;
                } else {
                    writeln!(out, "Search already exists!")?;
                }
            }
            ShellCommand::Saved => {
                if self.session.saved().is_empty() {
                    writeln!(out, "No saved searches yet. Run a search and save it!")?;
                }
                for (i, saved) in self.session.saved().iter().enumerate() {
                    writeln!(out, "{}. {} (saved {})", i + 1, saved.name, saved.saved_at)?;
                }
            }
            ShellCommand::Load(index) => match self.session.load(index) {
                Some(params) => writeln!(out, "Search loaded!\n{}", describe(params))?,
                None => writeln!(out, "No saved search #{}", index + 1)?,
            },
            ShellCommand::Delete(index) => {
                if self.session.delete(index) {
                    writeln!(out, "Search deleted!")?;
                } else {
                    writeln!(out, "No saved search #{}", index + 1)?;
                }
            }
            ShellCommand::Export(path) => match self.session.last_report() {
                Some(report) => {
                    let path =
                        path.unwrap_or_else(|| PathBuf::from(default_file_name(Local::now())));
                    match export_to_path(&report.records, &path) {
                        Ok(written) => writeln!(
                            out,
                            "📥 Wrote {} row(s) to {}",
                            report.records.len(),
                            written.display()
                        )?,
                        Err(err) => {
                            warn!("Export failed: {:#}", err);
                            writeln!(out, "❌ {err:#}")?;
                        }
                    }
                }
                None => writeln!(out, "Nothing to export yet; run a search first")?,
            },
            ShellCommand::Categories => {
                for category in Category::ALL {
                    writeln!(out, "{category}")?;
                }
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}
