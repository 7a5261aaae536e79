/// Common join prefixes.
///
/// `join` accepts any string as a prefix; this enum covers the usual ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    /// Rendered as `FULL OUTER`
    Full,
}

impl JoinType {
    /// Prefix placed before `JOIN`
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Full => "FULL OUTER",
        }
    }
}

impl AsRef<str> for JoinType {
    fn as_ref(&self) -> &str {
        self.to_sql()
    }
}
