use serde::{Deserialize, Serialize};
use std::fmt;

/// The origin system a record was normalized from.
///
/// This is the only dispatch key for playback resolution. It is never
/// re-derived from a record's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Spreadsheet,
    VideoHost,
    ChannelFeed,
    MetadataEnrichment,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Spreadsheet,
        SourceKind::VideoHost,
        SourceKind::ChannelFeed,
        SourceKind::MetadataEnrichment,
    ];

    /// Prefix used to namespace source-native identifiers
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SourceKind::Spreadsheet => "sheet",
            SourceKind::VideoHost => "dood",
            SourceKind::ChannelFeed => "telegram",
            SourceKind::MetadataEnrichment => "tmdb",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Spreadsheet => "spreadsheet",
            SourceKind::VideoHost => "video-host",
            SourceKind::ChannelFeed => "channel-feed",
            SourceKind::MetadataEnrichment => "metadata-enrichment",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let mut prefixes: Vec<_> = SourceKind::ALL.iter().map(|k| k.id_prefix()).collect();
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), SourceKind::ALL.len());
    }

    #[test]
    fn test_serializes_as_kebab_case() {
        let json = serde_json::to_string(&SourceKind::MetadataEnrichment).unwrap();
        assert_eq!(json, "\"metadata-enrichment\"");
        assert_eq!(SourceKind::VideoHost.to_string(), "video-host");
    }
}
