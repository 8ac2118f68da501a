//! Extraction of role constants from IDL text.
//!
//! The IDL is not parsed. A single pattern picks out declarations of the form
//! `const unsigned long ROLE_<NAME> = <DIGITS>;` anywhere in the text and
//! everything else is ignored.
//!
//! `<DIGITS>` is ASCII `[0-9]+` only. Other Unicode decimal digits (which a
//! Unicode `\d` would accept) are not valid C++ literals and never match.

use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::GenError;
use crate::layout::LayoutError;

/// One `const unsigned long` declaration found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleEntry {
    /// Constant name with the prefix stripped (`[A-Z_]+`).
    pub name: String,
    /// Decimal value exactly as written in the source.
    pub value: String,
    /// 1-based source line of the declaration.
    pub line: usize,
}

/// Compiled declaration pattern for one constant prefix.
#[derive(Debug, Clone)]
pub struct DeclarationScanner {
    pattern: Regex,
}

impl DeclarationScanner {
    /// Build a scanner for declarations whose name starts with `prefix`.
    pub fn new(prefix: &str) -> Result<Self, LayoutError> {
        let source = format!(
            r"const unsigned long {}([A-Z_]+) = ([0-9]+);",
            regex::escape(prefix)
        );
        let pattern = Regex::new(&source).map_err(|e| LayoutError::InvalidField {
            field: "prefix".into(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Every non-overlapping declaration in `text`, left to right.
    ///
    /// Near misses (lowercase names, another prefix, non-decimal values) are
    /// skipped without comment.
    pub fn scan(&self, text: &str) -> Vec<RoleEntry> {
        let mut entries = Vec::new();
        let mut line = 1usize;
        let mut counted_to = 0usize;
        for caps in self.pattern.captures_iter(text) {
            let (Some(whole), Some(name), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            line += text[counted_to..whole.start()].matches('\n').count();
            counted_to = whole.start();
            entries.push(RoleEntry {
                name: name.as_str().to_string(),
                value: value.as_str().to_string(),
                line,
            });
        }
        entries
    }
}

/// Scan `text` for declarations using `prefix`.
///
/// Convenience over [`DeclarationScanner`] for one-off scans.
pub fn scan_declarations(text: &str, prefix: &str) -> Result<Vec<RoleEntry>, LayoutError> {
    Ok(DeclarationScanner::new(prefix)?.scan(text))
}

/// The ordered, non-empty set of roles extracted from one source.
///
/// Invariant: at least one entry, and no name appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    entries: Vec<RoleEntry>,
}

impl RoleTable {
    /// Scan `text` and check the table invariants.
    ///
    /// `origin` names the source in error messages (usually its path).
    pub fn from_source(text: &str, prefix: &str, origin: &str) -> Result<Self, GenError> {
        let entries = scan_declarations(text, prefix)?;
        debug!(origin, count = entries.len(), "scanned role declarations");
        Self::from_entries(entries, origin)
    }

    /// Wrap already-scanned entries, checking the table invariants.
    pub fn from_entries(entries: Vec<RoleEntry>, origin: &str) -> Result<Self, GenError> {
        if entries.is_empty() {
            return Err(GenError::NoDeclarations {
                origin: origin.to_string(),
            });
        }

        check_unique(&entries, origin)?;
        Ok(Self { entries })
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }

    /// The final declaration, which the sentinel aliases.
    pub fn last(&self) -> &RoleEntry {
        // Non-empty by construction.
        &self.entries[self.entries.len() - 1]
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_unique(entries: &[RoleEntry], origin: &str) -> Result<(), GenError> {
    let mut names: HashMap<&str, usize> = HashMap::new();
    let mut values: HashMap<&str, &RoleEntry> = HashMap::new();
    for entry in entries {
        if let Some(&first_line) = names.get(entry.name.as_str()) {
            return Err(GenError::DuplicateName {
                name: entry.name.clone(),
                origin: origin.to_string(),
                first_line,
                line: entry.line,
            });
        }
        names.insert(&entry.name, entry.line);

        if let Some(previous) = values.insert(numeric_key(&entry.value), entry) {
            warn!(
                origin,
                value = %entry.value,
                first = %previous.name,
                second = %entry.name,
                "two roles share a value"
            );
        }
    }
    Ok(())
}

// "007" and "7" are the same enumerator value.
fn numeric_key(value: &str) -> &str {
    let trimmed = value.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}
