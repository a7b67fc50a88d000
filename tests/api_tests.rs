use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use tunebuddy::api::AppState;
use tunebuddy::config::Config;
use tunebuddy::db::NewLookup;
use tunebuddy::services::{SearchError, TrackHit, TrackSearch};

/// Canned Musixmatch ordering for "save your tears", mirroring what the live
/// endpoint returns for that query.
fn fixture_hits() -> Vec<TrackHit> {
    fn hit(name: &str, artist: &str, genres: &[&str]) -> TrackHit {
        TrackHit {
            name: name.to_string(),
            artist: artist.to_string(),
            genres: genres.iter().map(|g| (*g).to_string()).collect(),
        }
    }

    vec![
        hit(
            "Calling (Spider-Man: Across the Spider-Verse) (Metro Boomin & Swae Lee, NAV, feat. A Boogie Wit da Hoodie)",
            "Metro Boomin feat. Swae Lee, NAV & A Boogie Wit da Hoodie",
            &["Hip Hop/Rap"],
        ),
        hit("Here With Me", "d4vd", &["Alternative"]),
        hit(
            "Save Your Tears (with Ariana Grande) (Remix)",
            "The Weeknd feat. Ariana Grande",
            &["Pop"],
        ),
        hit("Save Your Tears", "The Weeknd", &["Pop", "Electronic"]),
    ]
}

struct StubSearch {
    hits: Vec<TrackHit>,
}

#[async_trait::async_trait]
impl TrackSearch for StubSearch {
    async fn search_by_lyrics(&self, _lyrics: &str) -> Result<Vec<TrackHit>, SearchError> {
        Ok(self.hits.clone())
    }
}

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A single pooled connection keeps every query on the same in-memory db.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = tunebuddy::api::create_app_state_with_search(
        config,
        Arc::new(StubSearch {
            hits: fixture_hits(),
        }),
    )
    .await
    .expect("Failed to create app state");

    (tunebuddy::api::router(state.clone()).await, state)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_home_page_renders_form() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<title>Home</title>"));
    assert!(body.contains("Find My Tune!"));
}

#[tokio::test]
async fn test_submit_without_filters_returns_top_three() {
    let (app, state) = spawn_app().await;

    let response = app
        .oneshot(form_post("lyrics=save+your+tears"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(
        "Save Your Tears (with Ariana Grande) (Remix) By: The Weeknd feat. Ariana Grande"
    ));
    assert!(body.contains("Here With Me By: d4vd"));

    let records = state.store().list_lookups().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].lyrics, "save your tears");
    assert_eq!(records[0].artist_name, "");
    assert_eq!(
        records[0].first_possible_song,
        "Calling (Spider-Man: Across the Spider-Verse) (Metro Boomin & Swae Lee, NAV, feat. A Boogie Wit da Hoodie) By: Metro Boomin feat. Swae Lee, NAV & A Boogie Wit da Hoodie"
    );
    assert_eq!(
        records[0].third_possible_song,
        "Save Your Tears (with Ariana Grande) (Remix) By: The Weeknd feat. Ariana Grande"
    );
}

#[tokio::test]
async fn test_submit_with_artist_filter_narrows_to_one_slot() {
    let (app, state) = spawn_app().await;

    let response = app
        .oneshot(form_post("lyrics=save+your+tears&artist_name=The+Weeknd"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Save Your Tears By: The Weeknd"));

    let records = state.store().list_lookups().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].artist_name, "The Weeknd");
    assert_eq!(records[0].first_possible_song, "Save Your Tears By: The Weeknd");
    assert_eq!(records[0].second_possible_song, "None");
    assert_eq!(records[0].third_possible_song, "None");
}

#[tokio::test]
async fn test_submit_with_unknown_artist_stores_all_sentinels() {
    let (app, state) = spawn_app().await;

    let response = app
        .oneshot(form_post("lyrics=save+your+tears&artist_name=Does+not+exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let records = state.store().list_lookups().await.unwrap();
    assert_eq!(records[0].first_possible_song, "None");
    assert_eq!(records[0].second_possible_song, "None");
    assert_eq!(records[0].third_possible_song, "None");
}

#[tokio::test]
async fn test_submit_invalid_lyrics_rejected_without_persisting() {
    let (app, state) = spawn_app().await;

    let response = app.oneshot(form_post("lyrics=ab")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await;
    assert!(body.contains("Lyrics must be between 3 and 150 characters"));

    assert_eq!(state.store().count_lookups().await.unwrap(), 0);
}

#[tokio::test]
async fn test_submit_overlong_filter_rejected_without_persisting() {
    let (app, state) = spawn_app().await;

    let long_artist = "a".repeat(51);
    let body = format!("lyrics=save+your+tears&artist_name={}", long_artist);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.store().count_lookups().await.unwrap(), 0);
}

#[tokio::test]
async fn test_repeated_submission_creates_separate_rows() {
    let (app, state) = spawn_app().await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(form_post("lyrics=save+your+tears"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(state.store().count_lookups().await.unwrap(), 2);
}

#[tokio::test]
async fn test_database_page_lists_stored_records() {
    let (app, state) = spawn_app().await;

    let first = [
        "Song 1".to_string(),
        "Song 2".to_string(),
        "Song 3".to_string(),
    ];
    let second = [
        "Song A".to_string(),
        "Song B".to_string(),
        "Song C".to_string(),
    ];

    state
        .store()
        .add_lookup(NewLookup {
            lyrics: "Hey there this is a test",
            artist_name: "Artist 1",
            genre: "Pop",
            candidates: &first,
        })
        .await
        .unwrap();
    state
        .store()
        .add_lookup(NewLookup {
            lyrics: "Hey there this is another test",
            artist_name: "Artist 2",
            genre: "Rock",
            candidates: &second,
        })
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/db").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<title>Database</title>"));
    assert!(body.contains("Hey there this is a test"));
    assert!(body.contains("Song 1"));
    assert!(body.contains("Song 2"));
    assert!(body.contains("Song 3"));
    assert!(body.contains("Hey there this is another test"));
    assert!(body.contains("Song A"));
    assert!(body.contains("Song B"));
    assert!(body.contains("Song C"));
}

#[tokio::test]
async fn test_api_lookups_returns_records_as_json() {
    let (app, state) = spawn_app().await;

    let candidates = [
        "Save Your Tears By: The Weeknd".to_string(),
        "None".to_string(),
        "None".to_string(),
    ];
    state
        .store()
        .add_lookup(NewLookup {
            lyrics: "save your tears",
            artist_name: "The Weeknd",
            genre: "",
            candidates: &candidates,
        })
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/lookups")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body_json["success"], true);
    assert_eq!(body_json["data"].as_array().unwrap().len(), 1);
    assert_eq!(body_json["data"][0]["lyrics"], "save your tears");
    assert_eq!(
        body_json["data"][0]["first_possible_song"],
        "Save Your Tears By: The Weeknd"
    );
    assert_eq!(body_json["data"][0]["second_possible_song"], "None");
}

#[tokio::test]
async fn test_api_lookups_rejects_bad_limit() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/lookups?limit=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_status_reports_lookup_count() {
    let (app, state) = spawn_app().await;

    let candidates = ["None".to_string(), "None".to_string(), "None".to_string()];
    state
        .store()
        .add_lookup(NewLookup {
            lyrics: "do re mi",
            artist_name: "",
            genre: "",
            candidates: &candidates,
        })
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body_json["success"], true);
    assert_eq!(body_json["data"]["total_lookups"], 1);
    assert!(body_json["data"]["version"].is_string());
}

#[tokio::test]
async fn test_clear_lookups_empties_store() {
    let (app, state) = spawn_app().await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(form_post("lyrics=save+your+tears"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(state.store().count_lookups().await.unwrap(), 2);
    assert_eq!(state.store().clear_lookups().await.unwrap(), 2);
    assert_eq!(state.store().count_lookups().await.unwrap(), 0);
}
