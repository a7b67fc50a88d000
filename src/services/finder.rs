//! Domain service for turning remembered lyrics into track candidates.
//!
//! The upstream search is abstracted behind [`TrackSearch`] so handlers and
//! tests never depend on the Musixmatch wire format.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Literal text stored in a candidate slot that found no track. Stored and
/// compared as a string, never as SQL NULL.
pub const NO_MATCH: &str = "None";

/// A single track returned by the lyrics search, in upstream rating order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackHit {
    pub name: String,
    pub artist: String,
    pub genres: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Narrow seam over the lyrics-search upstream.
///
/// Implementations return the ordered hit list, already empty on upstream
/// rejection; `Err` is reserved for transport failures.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    async fn search_by_lyrics(&self, lyrics: &str) -> Result<Vec<TrackHit>, SearchError>;
}

pub struct SongFinder {
    search: Arc<dyn TrackSearch>,
}

impl SongFinder {
    #[must_use]
    pub fn new(search: Arc<dyn TrackSearch>) -> Self {
        Self { search }
    }

    /// Runs one search and fills the three candidate slots.
    ///
    /// Upstream failures of any kind degrade to an all-sentinel result
    /// instead of failing the lookup.
    pub async fn find_songs(
        &self,
        lyrics: &str,
        artist: Option<&str>,
        genre: Option<&str>,
    ) -> [String; 3] {
        let hits = match self.search.search_by_lyrics(lyrics).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Lyrics search failed, treating as no results: {}", e);
                Vec::new()
            }
        };

        select_candidates(&hits, artist, genre)
    }
}

/// Picks the three candidate slots from the raw hit list.
///
/// With no filters the slots are the first three distinct hits. Once any
/// filter narrows the result, only the first surviving hit is reported and
/// the remaining slots stay `"None"` regardless of how many others match.
/// Artist and genre comparisons are case-insensitive.
#[must_use]
pub fn select_candidates(
    hits: &[TrackHit],
    artist: Option<&str>,
    genre: Option<&str>,
) -> [String; 3] {
    let artist = normalized(artist);
    let genre = normalized(genre);

    let mut slots = [
        NO_MATCH.to_string(),
        NO_MATCH.to_string(),
        NO_MATCH.to_string(),
    ];

    if artist.is_none() && genre.is_none() {
        let mut distinct: Vec<String> = Vec::new();
        for hit in hits {
            let formatted = format_hit(hit);
            if distinct.contains(&formatted) {
                continue;
            }
            distinct.push(formatted);
            if distinct.len() == 3 {
                break;
            }
        }
        for (slot, song) in slots.iter_mut().zip(distinct) {
            *slot = song;
        }
        return slots;
    }

    let matched = hits.iter().find(|hit| {
        artist.is_none_or(|a| matches_filter(&hit.artist, a))
            && genre.is_none_or(|g| hit.genres.iter().any(|hg| matches_filter(hg, g)))
    });

    if let Some(hit) = matched {
        slots[0] = format_hit(hit);
    }

    slots
}

fn format_hit(hit: &TrackHit) -> String {
    format!("{} By: {}", hit.name, hit.artist)
}

fn normalized(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|s| !s.is_empty())
}

fn matches_filter(value: &str, filter: &str) -> bool {
    value.to_lowercase() == filter.to_lowercase()
}
