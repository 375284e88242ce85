//! Single state/year incident maps.

pub mod extract;

pub use extract::*;
