pub mod capabilities;
pub mod channel_feed;
pub mod error;
pub mod factory;
pub mod metadata;
pub mod spreadsheet;
pub mod timestamps;
pub mod traits;
pub mod transport;
pub mod video_host;

pub use capabilities::{CapabilityRegistry, FileLocator, MetadataLookup};
pub use channel_feed::ChannelFeedClient;
pub use error::SourceError;
pub use factory::{SourceFactory, SourceFactoryRegistry};
pub use metadata::MetadataClient;
pub use spreadsheet::SpreadsheetClient;
pub use traits::{CatalogSource, SourceContribution};
pub use transport::{HttpTransport, JsonTransport};
pub use video_host::VideoHostClient;
