use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupDto {
    pub id: i64,
    pub lyrics: String,
    pub artist_name: String,
    pub genre: String,
    pub first_possible_song: String,
    pub second_possible_song: String,
    pub third_possible_song: String,
    pub created_at: String,
}

impl From<crate::db::LookupRecord> for LookupDto {
    fn from(record: crate::db::LookupRecord) -> Self {
        Self {
            id: record.id,
            lyrics: record.lyrics,
            artist_name: record.artist_name,
            genre: record.genre,
            first_possible_song: record.first_possible_song,
            second_possible_song: record.second_possible_song,
            third_possible_song: record.third_possible_song,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub total_lookups: i64,
}
