use serde::{Deserialize, Serialize};

/// Source-specific payload needed to turn a record into a playable reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceRef {
    /// Already playable as-is
    DirectUrl { url: String },
    /// Video-host file code, templated into an embed URL
    FileCode { code: String },
    /// Channel-message file handle, resolved through the feed API
    ChannelFile { file_id: String },
    #[default]
    Unresolved,
}

impl SourceRef {
    pub fn direct_url(url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => SourceRef::DirectUrl { url },
            _ => SourceRef::Unresolved,
        }
    }

    pub fn file_code(code: impl Into<String>) -> Self {
        let code = code.into();
        if code.is_empty() {
            SourceRef::Unresolved
        } else {
            SourceRef::FileCode { code }
        }
    }

    pub fn channel_file(file_id: impl Into<String>) -> Self {
        let file_id = file_id.into();
        if file_id.is_empty() {
            SourceRef::Unresolved
        } else {
            SourceRef::ChannelFile { file_id }
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SourceRef::Unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_unresolved() {
        assert_eq!(SourceRef::direct_url(Some("  ".to_string())), SourceRef::Unresolved);
        assert_eq!(SourceRef::direct_url(None), SourceRef::Unresolved);
        assert_eq!(SourceRef::file_code(""), SourceRef::Unresolved);
        assert_eq!(SourceRef::channel_file(""), SourceRef::Unresolved);
        assert!(SourceRef::file_code("abc123").is_resolved());
    }
}
