use reelhub_models::SourceKind;
use reelhub_sources::SourceError;
use thiserror::Error;

/// Playback could not produce a URL. Shown to the user; the catalog is unaffected.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("record {id} from {source_kind} has no usable source reference")]
    MissingReference { id: String, source_kind: SourceKind },

    #[error("record {id} has no playable video")]
    Unplayable { id: String },

    #[error("no configured source can locate files for record {id}")]
    NoFileLocator { id: String },

    #[error("file lookup failed: {0}")]
    Describe(#[from] SourceError),
}

/// The catalog load produced nothing usable
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("no catalog sources are configured")]
    NoSources,

    #[error("every catalog source failed to load: {}", .failures.join("; "))]
    AllSourcesFailed { failures: Vec<String> },
}
