//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Serializes the [`Feed`](crate::models::Feed) and commits it to disk
//!
//! # Output Structure
//!
//! ```text
//! feeds/
//! └── json        # JSON Feed document, replaced on every run
//! ```

pub mod json;
