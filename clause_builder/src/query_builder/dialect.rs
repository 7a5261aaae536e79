//! Placeholder dialects

use serde::{Deserialize, Serialize};

/// Placeholder convention of the target database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `?` for every bound value (MySQL)
    Positional,
    /// `$1`, `$2`, ... (PostgreSQL)
    Numbered,
}

impl Dialect {
    pub fn write_placeholder(self, ordinal: usize, out: &mut String) {
        match self {
            Dialect::Positional => out.push('?'),
            Dialect::Numbered => {
                out.push('$');
                out.push_str(&ordinal.to_string());
            }
        }
    }
}

/// Hands out placeholder ordinals while a query is rendered.
///
/// One cursor walks the whole clause sequence, so numbered placeholders
/// never repeat within a query.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderCursor {
    issued: usize,
}

impl PlaceholderCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next 1-based ordinal
    pub fn next_ordinal(&mut self) -> usize {
        self.issued += 1;
        self.issued
    }

    /// Issue the next placeholder for `dialect` and append it to `out`
    pub fn write_next(&mut self, dialect: Dialect, out: &mut String) {
        let ordinal = self.next_ordinal();
        dialect.write_placeholder(ordinal, out);
    }

    /// Number of placeholders issued so far
    pub fn issued(&self) -> usize {
        self.issued
    }
}
