//! In-memory catalog source for exercising the loader, resolver and search paths

use async_trait::async_trait;
use reelhub_models::{MetadataOverlay, SourceKind, SourceRef, UnifiedMovieRecord};
use reelhub_sources::{CapabilityRegistry, CatalogSource, FileLocator, MetadataLookup, SourceError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Barrier;

pub(crate) fn record(kind: SourceKind, native_id: &str, title: &str, timestamp: i64) -> UnifiedMovieRecord {
    UnifiedMovieRecord::new(kind, native_id, title).with_timestamp(timestamp)
}

pub(crate) fn sheet(native_id: &str, title: &str, timestamp: i64) -> UnifiedMovieRecord {
    record(SourceKind::Spreadsheet, native_id, title, timestamp)
        .with_source_ref(SourceRef::direct_url(Some(format!("https://cdn.example/{native_id}.mp4"))))
}

pub(crate) fn dood(code: &str, title: &str, timestamp: i64) -> UnifiedMovieRecord {
    record(SourceKind::VideoHost, code, title, timestamp).with_source_ref(SourceRef::file_code(code))
}

pub(crate) fn telegram(message_id: &str, file_id: &str, timestamp: i64) -> UnifiedMovieRecord {
    record(SourceKind::ChannelFeed, message_id, "Telegram Video", timestamp)
        .with_source_ref(SourceRef::channel_file(file_id))
}

pub(crate) struct FakeSource {
    name: String,
    kind: SourceKind,
    records: Result<Vec<UnifiedMovieRecord>, ()>,
    barrier: Option<Arc<Barrier>>,
    file_path: Option<Result<String, ()>>,
    search_hits: Option<Result<Vec<UnifiedMovieRecord>, ()>>,
    overlay: Result<Option<MetadataOverlay>, ()>,
    overlay_stalls: bool,
    describe_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(name: &str, kind: SourceKind, records: Vec<UnifiedMovieRecord>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            records: Ok(records),
            barrier: None,
            file_path: None,
            search_hits: None,
            overlay: Ok(None),
            overlay_stalls: false,
            describe_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(name: &str, kind: SourceKind) -> Self {
        let mut source = Self::new(name, kind, Vec::new());
        source.records = Err(());
        source
    }

    /// Block the fetch until every source sharing the barrier has started
    pub(crate) fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Act as a file locator; `Err` simulates the feed answering `ok: false`
    pub(crate) fn with_file_path(mut self, file_path: Result<&str, ()>) -> Self {
        self.file_path = Some(file_path.map(str::to_string));
        self
    }

    /// Act as a metadata lookup
    pub(crate) fn with_search_hits(mut self, hits: Result<Vec<UnifiedMovieRecord>, ()>) -> Self {
        self.search_hits = Some(hits);
        self
    }

    pub(crate) fn with_overlay(mut self, overlay: Result<Option<MetadataOverlay>, ()>) -> Self {
        if self.search_hits.is_none() {
            self.search_hits = Some(Ok(Vec::new()));
        }
        self.overlay = overlay;
        self
    }

    /// Overlay lookups never complete, like a metadata service that hangs
    pub(crate) fn with_stalled_overlay(mut self) -> Self {
        self = self.with_overlay(Ok(None));
        self.overlay_stalls = true;
        self
    }

    pub(crate) fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl CapabilityRegistry for FakeSource {
    fn as_file_locator(&self) -> Option<&dyn FileLocator> {
        self.file_path.as_ref().map(|_| self as &dyn FileLocator)
    }

    fn as_metadata_lookup(&self) -> Option<&dyn MetadataLookup> {
        self.search_hits.as_ref().map(|_| self as &dyn MetadataLookup)
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn lists_records(&self) -> bool {
        self.kind != SourceKind::MetadataEnrichment
    }

    async fn fetch_records(&self) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        self.records
            .clone()
            .map_err(|_| SourceError::Transport(format!("{} unreachable", self.name)))
    }
}

#[async_trait]
impl FileLocator for FakeSource {
    async fn describe_file(&self, file_id: &str) -> Result<String, SourceError> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        match &self.file_path {
            Some(Ok(path)) => Ok(format!("{path}/{file_id}")),
            _ => Err(SourceError::Rejected("Bad Request: file is too big".to_string())),
        }
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("https://files.example/file/botTOKEN/{file_path}")
    }
}

#[async_trait]
impl MetadataLookup for FakeSource {
    async fn search_titles(&self, _query: &str) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        match &self.search_hits {
            Some(Ok(hits)) => Ok(hits.clone()),
            _ => Err(SourceError::Timeout),
        }
    }

    async fn lookup_overlay(&self, _title: &str) -> Result<Option<MetadataOverlay>, SourceError> {
        if self.overlay_stalls {
            std::future::pending::<()>().await;
        }
        self.overlay.clone().map_err(|_| SourceError::Status(401))
    }
}
