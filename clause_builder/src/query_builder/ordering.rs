//! Sort directions for ORDER BY

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl AsRef<str> for SortOrder {
    fn as_ref(&self) -> &str {
        self.to_sql()
    }
}
