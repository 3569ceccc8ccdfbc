//! Save/load persistence
//!
//! Features:
//! - Flat line-per-field text record
//! - Save after every transition, atomic replace via temp file
//! - Strict parsing; a damaged record stops startup
//! - Record deleted once the game is won

pub mod record;
pub mod store;

pub use record::Snapshot;
pub use store::PersistenceStore;
