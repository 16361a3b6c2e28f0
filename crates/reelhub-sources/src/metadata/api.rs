use reelhub_models::{MetadataOverlay, SourceKind, SourceRef, UnifiedMovieRecord};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl SearchHit {
    /// Year is the leading segment of `release_date` (`1999-03-31` → `1999`)
    pub fn year(&self) -> Option<String> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .map(str::trim)
            .filter(|y| !y.is_empty())
            .map(str::to_string)
    }

    /// One decimal place; a zero average means unrated
    pub fn rating(&self) -> Option<String> {
        self.vote_average
            .filter(|v| *v > 0.0)
            .map(|v| format!("{:.1}", v))
    }

    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", image_base.trim_end_matches('/'), p))
    }
}

pub fn search_url(search_endpoint: &str, api_key: &str, query: &str) -> String {
    format!(
        "{}?api_key={}&query={}",
        search_endpoint,
        urlencoding::encode(api_key),
        urlencoding::encode(query)
    )
}

pub fn map_search_hits(response: SearchResponse, image_base: &str) -> Vec<UnifiedMovieRecord> {
    response
        .results
        .into_iter()
        .filter_map(|hit| {
            let title = hit.title.clone().filter(|t| !t.trim().is_empty())?;
            Some(
                UnifiedMovieRecord::new(SourceKind::MetadataEnrichment, &hit.id.to_string(), title)
                    .with_year(hit.year())
                    .with_poster(hit.poster_url(image_base))
                    .with_rating(hit.rating())
                    .with_source_ref(SourceRef::Unresolved),
            )
        })
        .collect()
}

/// Overlay built from the first (best) hit
pub fn first_overlay(response: &SearchResponse, image_base: &str) -> Option<MetadataOverlay> {
    response.results.first().map(|hit| MetadataOverlay {
        year: hit.year(),
        rating: hit.rating(),
        poster: hit.poster_url(image_base),
    })
}
