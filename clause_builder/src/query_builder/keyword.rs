//! Clause keywords
//!
//! Every clause in a query starts with one of these keywords. The keyword also
//! decides how the clause is rendered, see [`ClauseCategory`].

use std::fmt;

/// SQL keyword that opens a clause
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    Insert,
    Update,
    Select,
    Delete,
    Where,
    And,
    Or,
    Like,
    OrderBy,
    /// Join with its uppercased prefix, e.g. `LEFT` for `LEFT JOIN`
    Join(String),
    Limit,
    Offset,
}

/// How a clause is turned into SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseCategory {
    /// INSERT, UPDATE, SELECT, DELETE
    Base,
    /// `<PREFIX> JOIN <target> ON <condition>`
    Join,
    /// `<KEYWORD> <column>=<placeholder>` and the LIKE variant
    Conditional,
    /// `<KEYWORD> <placeholder>`
    Paging,
    /// `<KEYWORD> <column> <value>` with the value inlined
    FreeForm,
}

impl Keyword {
    /// Build a join keyword from a free-form prefix such as `"left"`
    pub fn join(prefix: &str) -> Self {
        Keyword::Join(prefix.trim().to_uppercase())
    }

    pub fn category(&self) -> ClauseCategory {
        match self {
            Keyword::Insert | Keyword::Update | Keyword::Select | Keyword::Delete => {
                ClauseCategory::Base
            }
            Keyword::Join(_) => ClauseCategory::Join,
            Keyword::Where | Keyword::And | Keyword::Or | Keyword::Like => {
                ClauseCategory::Conditional
            }
            Keyword::Limit | Keyword::Offset => ClauseCategory::Paging,
            Keyword::OrderBy => ClauseCategory::FreeForm,
        }
    }

    /// Whether the clause binds its values through placeholders
    pub fn takes_placeholder(&self) -> bool {
        match self {
            Keyword::Insert
            | Keyword::Update
            | Keyword::Where
            | Keyword::And
            | Keyword::Or
            | Keyword::Like
            | Keyword::Limit
            | Keyword::Offset => true,
            Keyword::Select | Keyword::Delete | Keyword::OrderBy | Keyword::Join(_) => false,
        }
    }

    /// WHERE and LIKE share one occurrence counter on the builder
    pub fn counts_occurrence(&self) -> bool {
        matches!(self, Keyword::Where | Keyword::And | Keyword::Like)
    }

    pub fn to_sql(&self) -> String {
        match self {
            Keyword::Join(prefix) if prefix.is_empty() => "JOIN".to_string(),
            Keyword::Join(prefix) => format!("{} JOIN", prefix),
            other => other.static_sql().to_string(),
        }
    }

    fn static_sql(&self) -> &'static str {
        match self {
            Keyword::Insert => "INSERT",
            Keyword::Update => "UPDATE",
            Keyword::Select => "SELECT",
            Keyword::Delete => "DELETE",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Like => "LIKE",
            Keyword::OrderBy => "ORDER BY",
            Keyword::Join(_) => "JOIN",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_prefix_is_uppercased() {
        assert_eq!(Keyword::join("left").to_sql(), "LEFT JOIN");
        assert_eq!(Keyword::join(" full outer ").to_sql(), "FULL OUTER JOIN");
        assert_eq!(Keyword::join("").to_sql(), "JOIN");
    }

    #[test]
    fn test_categories() {
        assert_eq!(Keyword::Insert.category(), ClauseCategory::Base);
        assert_eq!(Keyword::Delete.category(), ClauseCategory::Base);
        assert_eq!(Keyword::join("inner").category(), ClauseCategory::Join);
        assert_eq!(Keyword::Like.category(), ClauseCategory::Conditional);
        assert_eq!(Keyword::Offset.category(), ClauseCategory::Paging);
        assert_eq!(Keyword::OrderBy.category(), ClauseCategory::FreeForm);
    }

    #[test]
    fn test_placeholder_flags() {
        assert!(Keyword::Where.takes_placeholder());
        assert!(Keyword::Update.takes_placeholder());
        assert!(!Keyword::Select.takes_placeholder());
        assert!(!Keyword::OrderBy.takes_placeholder());
        assert!(!Keyword::join("left").takes_placeholder());
    }

    #[test]
    fn test_or_does_not_count_as_occurrence() {
        assert!(Keyword::Where.counts_occurrence());
        assert!(Keyword::Like.counts_occurrence());
        assert!(!Keyword::Or.counts_occurrence());
    }
}
