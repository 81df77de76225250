//! Listing page scrapers.
//!
//! Extraction is split in two stages: the fetched bytes are parsed into a
//! navigable document once, then independent structural queries run against
//! each repeated content block. No state is shared between blocks.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | SIC video listings | [`sic`] | HTML scraping | One `article` per episode |

pub mod sic;
