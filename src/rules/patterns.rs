#![forbid(unsafe_code)]

//! Named regular expressions used by the `match` rule
//!
//! The built-in table is compiled once on first use and shared read-only
//! through an `Arc`. Callers that need extra patterns derive a new table with
//! [`PatternTable::extend`]; the shared table itself never changes.

use crate::error::RuleError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

/// One IPv4 octet, 0-255 without leading zeros
const IPV4_OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";

/// One IPv6 group
const IPV6_GROUP: &str = r"[0-9A-Fa-f]{1,4}";

static BUILTIN: LazyLock<Arc<PatternTable>> =
    LazyLock::new(|| Arc::new(PatternTable::compile_builtin()));

/// IPv6 address with optional zone, one branch per count of leading groups
///
/// With `k` explicit leading groups the rest of the address is either a run
/// of `:group` after `::`, an embedded IPv4 tail, or a bare trailing `::`.
fn ipv6_source(v4: &str) -> String {
    let h = IPV6_GROUP;
    let mut branches = vec![format!(r"(?:{h}:){{7}}(?:{h}|:)")];
    for k in (1..=6).rev() {
        let tail = if k == 6 {
            v4.to_string()
        } else {
            format!(r"(?::{h}){{0,{}}}:{v4}", 5 - k)
        };
        branches.push(format!(
            r"(?:{h}:){{{k}}}(?:(?::{h}){{1,{}}}|{tail}|:)",
            7 - k
        ));
    }
    branches.push(format!(r":(?:(?::{h}){{1,7}}|(?::{h}){{0,5}}:{v4}|:)"));
    format!("(?:{})(?:%[0-9A-Za-z]+)?", branches.join("|"))
}

/// Pattern sources for the built-in table, in `(name, regex)` form
fn builtin_sources() -> Vec<(&'static str, String)> {
    let v4 = format!(r"(?:{o}\.){{3}}{o}", o = IPV4_OCTET);
    let v6 = ipv6_source(&v4);

    vec![
        ("IPV4", format!("^{}$", v4)),
        ("IPV4CIDR", format!(r"^{}/(?:3[0-2]|[12]?[0-9])$", v4)),
        ("IPV6", format!("^{}$", v6)),
        (
            "IPV6CIDR",
            format!(r"^{}/(?:12[0-8]|1[01][0-9]|[1-9]?[0-9])$", v6),
        ),
        (
            "EMAIL",
            concat!(
                r#"^(?:[^<>()\[\]\\.,;:\s@"]+(?:\.[^<>()\[\]\\.,;:\s@"]+)*|".+")"#,
                r"@(?:\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\]",
                r"|(?:[a-zA-Z0-9\-]+\.)+[a-zA-Z]{2,})$"
            )
            .to_string(),
        ),
        ("PHONE", r"^[0-9+\-()._\[\]{}\\/ ]+$".to_string()),
        (
            "SITE",
            concat!(
                r"^https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,63}\b",
                r"[-a-zA-Z0-9@:%_+.~#?&/=]*$"
            )
            .to_string(),
        ),
        (
            "RFC_952",
            format!(
                concat!(
                    r"(?i)^(?:https?://)?",
                    r"(?:[a-z][a-z0-9\-]*(?:\.[a-z][a-z0-9\-]*)*|[0-9]+|{v4})",
                    r"(?::(?:6553[0-5]|655[0-2][0-9]|65[0-4][0-9]{{2}}|6[0-4][0-9]{{3}}|[0-5]?[0-9]{{1,4}}))?",
                    r"/?$"
                ),
                v4 = v4
            ),
        ),
        (
            "HOST",
            concat!(
                r"^(?:(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*",
                r"(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$"
            )
            .to_string(),
        ),
        (
            "LATIN_AND_DIGITS_SPECIAL_SYMBOLS",
            r"^[A-Za-z0-9_\s*#+!@$%^&()\-=]+$".to_string(),
        ),
        ("NUMBER", r"^[0-9]*$".to_string()),
        ("EMPTY_STRING", r"^$".to_string()),
        ("UNIX_PATH", r"^(?:/[^/ ]*)+/?$".to_string()),
    ]
}

/// A mapping from symbolic name to compiled regular expression
///
/// Names are case-sensitive; the built-in names are UPPER_SNAKE_CASE.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    patterns: BTreeMap<String, Regex>,
}

impl PatternTable {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shared built-in table
    pub fn builtin() -> Arc<PatternTable> {
        Arc::clone(&BUILTIN)
    }

    fn compile_builtin() -> Self {
        let mut patterns = BTreeMap::new();
        for (name, source) in builtin_sources() {
            match Regex::new(&source) {
                Ok(regex) => {
                    patterns.insert(name.to_string(), regex);
                }
                Err(e) => tracing::error!(pattern = name, error = %e, "built-in pattern failed to compile"),
            }
        }
        Self { patterns }
    }

    /// Compile a table from `(name, regex)` pairs
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` for the first pattern that fails to
    /// compile.
    pub fn from_sources<I, N, S>(sources: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
    {
        Self::empty().extend(sources)
    }

    /// Derive a new table containing this table's patterns plus `extra`
    ///
    /// A name already present is replaced in the derived table only.
    pub fn extend<I, N, S>(&self, extra: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
    {
        let mut patterns = self.patterns.clone();
        for (name, source) in extra {
            let name = name.into();
            let source = source.as_ref();
            let regex = Regex::new(source).map_err(|e| {
                RuleError::InvalidRegex(format!(
                    "Failed to compile pattern '{}' ({}): {}",
                    name, source, e
                ))
            })?;
            patterns.insert(name, regex);
        }
        Ok(Self { patterns })
    }

    /// Look up a pattern by exact name
    pub fn get(&self, name: &str) -> Option<&Regex> {
        self.patterns.get(name)
    }

    /// Pattern names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Iterate over `(name, regex)` pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.patterns.iter().map(|(name, regex)| (name.as_str(), regex))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Comma-separated list of names, used in error messages
    pub(crate) fn joined_names(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }
}
