//! Table name validation
//!
//! Table names are written into SQL text verbatim, so builders created
//! through the facade check them first.

use std::fmt;

use thiserror::Error;

/// Why a table name was refused
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("table name '{0}' may only contain ASCII letters, digits and underscores")]
    InvalidCharacters(String),

    #[error("table name '{name}' is {length} characters long, the limit is {max_length}")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("table name is empty")]
    Empty,

    #[error("table name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),

    #[error("table name '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

/// A validated table name that is safe to use in SQL queries.
///
/// Accepts `table` or `schema.table`; every part must be a plain identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    /// Shortest identifier limit among the supported engines (PostgreSQL)
    const MAX_LENGTH: usize = 63;

    /// Check `name` and wrap it
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }
        for part in name.splitn(2, '.') {
            Self::validate_identifier(part)?;
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the plain name
    pub fn into_string(self) -> String {
        self.0
    }

    fn validate_identifier(name: &str) -> Result<(), ValidationError> {
        let first_char = name.chars().next().ok_or(ValidationError::Empty)?;

        if name.len() > Self::MAX_LENGTH {
            return Err(ValidationError::TooLong {
                name: name.to_string(),
                length: name.len(),
                max_length: Self::MAX_LENGTH,
            });
        }

        if !first_char.is_ascii_alphabetic() && first_char != '_' {
            return Err(ValidationError::InvalidStartCharacter(name.to_string()));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }

        if Self::is_reserved_keyword(name) {
            return Err(ValidationError::ReservedKeyword(name.to_string()));
        }

        Ok(())
    }

    fn is_reserved_keyword(name: &str) -> bool {
        const RESERVED_KEYWORDS: &[&str] = &[
            // Clause keywords the builder emits
            "SELECT", "INSERT", "UPDATE", "DELETE", "FROM", "WHERE", "JOIN", "INNER", "LEFT",
            "RIGHT", "FULL", "OUTER", "ON", "AS", "AND", "OR", "NOT", "LIKE", "ORDER", "BY",
            "LIMIT", "OFFSET", "INTO", "VALUES", "SET",
            // Other SQL standard keywords
            "NULL", "TRUE", "FALSE", "CASE", "WHEN", "THEN", "ELSE", "END", "EXISTS", "IN",
            "BETWEEN", "GROUP", "HAVING", "UNION", "ALL", "DISTINCT", "CREATE", "DROP", "ALTER",
            "TABLE", "INDEX", "VIEW", "PRIMARY", "KEY", "FOREIGN", "REFERENCES", "UNIQUE",
            "CHECK", "DEFAULT", "CONSTRAINT", "COLUMN",
            // Engine specific
            "RETURNING", "USING", "ANALYZE", "DESC", "ASC",
        ];

        RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
    }
}

impl fmt::Display for ValidatedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ValidatedTableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
