pub mod catalog;
pub mod error;
pub mod playback;
pub mod search;

#[cfg(test)]
mod testing;

pub use catalog::{Catalog, CatalogLoader, CatalogViews, LoadReport, SourceOutcome, ViewWindows};
pub use error::{InitializationError, ResolutionError};
pub use playback::PlaybackResolver;
pub use search::{SearchFederator, SearchOutcome, SearchResults};
