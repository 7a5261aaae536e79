//! Query builder
//!
//! Clause observations, their keywords and dialects, and the fluent
//! [`QueryBuilder`] that chains them.

pub mod builder;
pub mod dialect;
pub mod join;
pub mod keyword;
pub mod observation;
pub mod ordering;



pub use builder::{QueryBuilder, RenderedQuery};
pub use dialect::{Dialect, PlaceholderCursor};
pub use join::JoinType;
pub use keyword::{ClauseCategory, Keyword};
pub use observation::{ClauseObservation, Fragment};
pub use ordering::SortOrder;
