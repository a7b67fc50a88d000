use crate::entities::{lookups, prelude::*};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

/// Repository for lookup-record operations
pub struct LookupRepository {
    conn: DatabaseConnection,
}

impl LookupRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(r: lookups::Model) -> LookupRecord {
        LookupRecord {
            id: r.id as i64,
            lyrics: r.lyrics,
            artist_name: r.artist_name,
            genre: r.genre,
            first_possible_song: r.first_possible_song,
            second_possible_song: r.second_possible_song,
            third_possible_song: r.third_possible_song,
            created_at: r.created_at.unwrap_or_default(),
        }
    }

    pub async fn add(&self, lookup: NewLookup<'_>) -> Result<i64> {
        let active_model = lookups::ActiveModel {
            lyrics: Set(lookup.lyrics.to_string()),
            artist_name: Set(lookup.artist_name.to_string()),
            genre: Set(lookup.genre.to_string()),
            first_possible_song: Set(lookup.candidates[0].clone()),
            second_possible_song: Set(lookup.candidates[1].clone()),
            third_possible_song: Set(lookup.candidates[2].clone()),
            created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
            ..Default::default()
        };

        let res = Lookups::insert(active_model).exec(&self.conn).await?;
        info!("Recorded lookup for lyrics: {}", lookup.lyrics);
        Ok(res.last_insert_id as i64)
    }

    pub async fn list_all(&self) -> Result<Vec<LookupRecord>> {
        let rows = Lookups::find()
            .order_by_asc(lookups::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = Lookups::find().count(&self.conn).await?;
        Ok(count as i64)
    }

    /// Bulk delete for test teardown; the application never deletes rows.
    pub async fn clear(&self) -> Result<u64> {
        let res = Lookups::delete_many().exec(&self.conn).await?;
        Ok(res.rows_affected)
    }
}

// ============================================================================
// Data Types
// ============================================================================

/// Input for one lookup row. Candidate slots hold formatted track strings or
/// the sentinel `"None"`; absent artist/genre filters are empty strings.
#[derive(Debug, Clone)]
pub struct NewLookup<'a> {
    pub lyrics: &'a str,
    pub artist_name: &'a str,
    pub genre: &'a str,
    pub candidates: &'a [String; 3],
}

#[derive(Debug, Clone)]
pub struct LookupRecord {
    pub id: i64,
    pub lyrics: String,
    pub artist_name: String,
    pub genre: String,
    pub first_possible_song: String,
    pub second_possible_song: String,
    pub third_possible_song: String,
    pub created_at: String,
}
