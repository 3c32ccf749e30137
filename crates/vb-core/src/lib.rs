//! verse-board/crates/vb-core/src/lib.rs
//!
//! Domain models, the storage port and the query service of verse-board.

pub mod error;
pub mod models;
pub mod service;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use service::*;
pub use traits::*;
