//! Search-criteria compilation.
//!
//! A [`SearchCriteria`] is an insertion-ordered mapping from criterion name
//! to value; [`SearchCriteria::compile`] turns it into protocol search
//! tokens. The compiled command is deterministic for a given entry order —
//! no ordering beyond insertion order is promised.

use chrono::NaiveDate;

use crate::{Error, Result};

/// Criteria that understand `UN`-negation when set to false.
const FLAG_CRITERIA: [&str; 5] = ["answered", "deleted", "draft", "flagged", "seen"];

/// Criterion that short-circuits compilation to a bare `ALL`.
const ALL: &str = "all";

/// Value of a single search criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionValue {
    /// Boolean criterion. `true` emits the name; `false` emits `UN<NAME>`
    /// for the flag criteria (answered, deleted, draft, flagged, seen) and
    /// nothing otherwise.
    Flag(bool),
    /// Free-text criterion, emitted as `<NAME> <value>`. The value is not
    /// quoted or escaped; that is the caller's responsibility.
    Text(String),
    /// Size criterion; a `Than` name suffix is stripped, so `largerThan`
    /// compiles to `LARGER <n>`.
    Size(u32),
    /// Date criterion, rendered `<d>-<Mon>-<year>` with English month
    /// abbreviations regardless of locale.
    Date(NaiveDate),
    /// Multiple values, concatenated with no separator. This reproduces
    /// long-standing observed behavior; see DESIGN.md before "fixing" it.
    TextList(Vec<String>),
    /// Header criterion, emitted as `HEADER <key> "<value>"`.
    Header {
        /// Header field name.
        name: String,
        /// Value the header must contain.
        value: String,
    },
}

/// Insertion-ordered search criteria mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    entries: Vec<(String, CriterionValue)>,
}

impl SearchCriteria {
    /// Creates an empty criteria set.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds a criterion, preserving insertion order.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: CriterionValue) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    /// True when no criteria have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compiles the criteria into search-command tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCriteria`] when no criteria were supplied; this
    /// fires before any token is produced.
    pub fn compile(&self) -> Result<CompiledSearchCommand> {
        if self.entries.is_empty() {
            return Err(Error::EmptyCriteria);
        }

        // `all: true` overrides everything else.
        let wants_all = self
            .entries
            .iter()
            .any(|(name, value)| name == ALL && *value == CriterionValue::Flag(true));
        if wants_all {
            return Ok(CompiledSearchCommand {
                tokens: vec!["ALL".to_string()],
            });
        }

        let tokens = self
            .entries
            .iter()
            .filter_map(|(name, value)| compile_entry(name, value))
            .collect();

        Ok(CompiledSearchCommand { tokens })
    }
}

fn compile_entry(name: &str, value: &CriterionValue) -> Option<String> {
    match value {
        CriterionValue::Flag(true) => Some(name.to_uppercase()),
        CriterionValue::Flag(false) => {
            if FLAG_CRITERIA.iter().any(|f| name.eq_ignore_ascii_case(f)) {
                Some(format!("UN{}", name.to_uppercase()))
            } else {
                None
            }
        }
        CriterionValue::Text(text) => Some(format!("{} {text}", name.to_uppercase())),
        CriterionValue::Size(n) => {
            let base = name.strip_suffix("Than").unwrap_or(name);
            Some(format!("{} {n}", base.to_uppercase()))
        }
        CriterionValue::Date(date) => {
            Some(format!("{} {}", name.to_uppercase(), date.format("%-d-%b-%Y")))
        }
        CriterionValue::TextList(values) => {
            Some(format!("{} {}", name.to_uppercase(), values.concat()))
        }
        CriterionValue::Header { name, value } => Some(format!("HEADER {name} \"{value}\"")),
    }
}

/// Ordered token sequence compiled from a [`SearchCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSearchCommand {
    tokens: Vec<String>,
}

impl CompiledSearchCommand {
    /// The compiled tokens, in criteria order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The full command text: verb plus space-joined tokens, trimmed.
    /// The caller appends CRLF before transmission.
    #[must_use]
    pub fn command_line(&self) -> String {
        format!("SEARCH {}", self.tokens.join(" "))
            .trim()
            .to_string()
    }
}

impl std::fmt::Display for CompiledSearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command_line())
    }
}
