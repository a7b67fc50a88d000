use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState, LookupDto, pages, validation};
use crate::db::NewLookup;

#[derive(Debug, Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub lyrics: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub genre: String,
}

pub async fn show_form() -> Html<String> {
    Html(pages::form_page(&pages::FormValues::default(), &[], None))
}

/// Validates the submission, runs the search, persists one row per valid
/// submission (identical lyrics included), and renders the result.
pub async fn submit_lookup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LookupForm>,
) -> Result<(StatusCode, Html<String>), ApiError> {
    let mut errors = Vec::new();

    let lyrics = match validation::validate_lyrics(&form.lyrics) {
        Ok(lyrics) => Some(lyrics),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let artist = match validation::validate_optional_filter(
        "artist_name",
        "Artist name",
        &form.artist_name,
    ) {
        Ok(artist) => artist,
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let genre = match validation::validate_optional_filter("genre", "Genre", &form.genre) {
        Ok(genre) => genre,
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let (Some(lyrics), true) = (lyrics, errors.is_empty()) else {
        let values = pages::FormValues {
            lyrics: &form.lyrics,
            artist_name: &form.artist_name,
            genre: &form.genre,
        };
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::form_page(&values, &errors, None)),
        ));
    };

    let candidates = state.finder().find_songs(lyrics, artist, genre).await;

    state
        .store()
        .add_lookup(NewLookup {
            lyrics,
            artist_name: artist.unwrap_or(""),
            genre: genre.unwrap_or(""),
            candidates: &candidates,
        })
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    info!("Lookup complete: {} -> {}", lyrics, candidates[0]);

    let values = pages::FormValues {
        lyrics,
        artist_name: artist.unwrap_or(""),
        genre: genre.unwrap_or(""),
    };

    Ok((
        StatusCode::OK,
        Html(pages::form_page(&values, &[], Some(&candidates))),
    ))
}

pub async fn list_lookups(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let records = state
        .store()
        .list_lookups()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Html(pages::db_page(&records)))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

pub async fn api_list_lookups(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<LookupDto>>>, ApiError> {
    let mut records = state
        .store()
        .list_lookups()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    if let Some(limit) = query.limit {
        let limit = validation::validate_limit(limit)?;
        records.truncate(limit);
    }

    let dtos: Vec<LookupDto> = records.into_iter().map(LookupDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}
