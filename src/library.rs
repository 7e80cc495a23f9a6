//! Music library: the artist → collection → album → tracks catalog.
//!
//! Nothing here is cached. Every query walks the library root again so the
//! catalog always reflects what is on disk right now.

mod duration;
mod model;
mod scan;

pub use duration::{DurationLookup, LoftyDurations};
pub use model::*;
pub use scan::Catalog;

#[cfg(test)]
mod tests;
