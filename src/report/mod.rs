//! Reporting utilities: the month × year aggregation and terminal formatting.

pub mod format;
pub mod summary;

pub use format::*;
pub use summary::*;
