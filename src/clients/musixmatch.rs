use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::MusixmatchConfig;
use crate::services::{SearchError, TrackHit, TrackSearch};

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    header: ApiHeader,
    // Error payloads carry `"body": []` instead of an object, so the body is
    // kept raw here and decoded in a second step.
    #[serde(default)]
    body: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiHeader {
    status_code: i32,
}

#[derive(Debug, Default, Deserialize)]
struct ApiBody {
    #[serde(default)]
    track_list: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    track: TrackRecord,
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    track_name: String,
    artist_name: String,
    #[serde(default)]
    primary_genres: GenreList,
}

#[derive(Debug, Default, Deserialize)]
struct GenreList {
    #[serde(default)]
    music_genre_list: Vec<GenreEntry>,
}

#[derive(Debug, Deserialize)]
struct GenreEntry {
    music_genre: Genre,
}

#[derive(Debug, Deserialize)]
struct Genre {
    music_genre_name: String,
}

/// Client for the Musixmatch `track.search` endpoint.
#[derive(Clone)]
pub struct MusixmatchClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl MusixmatchClient {
    #[must_use]
    pub fn new(config: &MusixmatchConfig) -> Self {
        Self::with_shared_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &MusixmatchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        }
    }

    /// One best-effort search sorted by descending track rating.
    ///
    /// Non-200 responses and undecodable bodies come back as an empty hit
    /// list; only transport failures surface as errors.
    pub async fn track_search(&self, lyrics: &str) -> Result<Vec<TrackHit>, SearchError> {
        let url = format!(
            "{}/track.search?apikey={}&q_lyrics={}&q_track=&f_has_lyrics=1&s_track_rating=desc&page_size={}&page=1",
            self.base_url,
            self.api_key,
            urlencoding::encode(lyrics),
            self.page_size
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("Musixmatch search failed: HTTP {}", response.status());
            return Ok(Vec::new());
        }

        let raw = response.text().await?;
        Ok(parse_track_hits(&raw))
    }
}

#[async_trait]
impl TrackSearch for MusixmatchClient {
    async fn search_by_lyrics(&self, lyrics: &str) -> Result<Vec<TrackHit>, SearchError> {
        self.track_search(lyrics).await
    }
}

/// Decodes the search envelope, treating anything unexpected as "no results".
fn parse_track_hits(raw: &str) -> Vec<TrackHit> {
    let envelope: ApiEnvelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Undecodable Musixmatch response: {}", e);
            return Vec::new();
        }
    };

    if envelope.message.header.status_code != 200 {
        warn!(
            "Musixmatch reported status {} inside the response envelope",
            envelope.message.header.status_code
        );
        return Vec::new();
    }

    let Ok(body) = serde_json::from_value::<ApiBody>(envelope.message.body) else {
        return Vec::new();
    };

    body.track_list
        .into_iter()
        .map(|entry| TrackHit {
            name: entry.track.track_name,
            artist: entry.track.artist_name,
            genres: entry
                .track
                .primary_genres
                .music_genre_list
                .into_iter()
                .map(|g| g.music_genre.music_genre_name)
                .collect(),
        })
        .collect()
}
