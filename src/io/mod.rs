//! Input/output helpers.
//!
//! - year → file naming (`filename`)
//! - accident file loading (`ingest`)
//! - summary table exports (CSV/JSON) (`export`)

pub mod export;
pub mod filename;
pub mod ingest;

pub use export::*;
pub use filename::*;
pub use ingest::*;
