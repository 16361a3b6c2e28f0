pub mod playback;
pub mod record;
pub mod source;
pub mod source_ref;

pub use playback::{MetadataOverlay, PlaybackMetadata};
pub use record::UnifiedMovieRecord;
pub use source::SourceKind;
pub use source_ref::SourceRef;
