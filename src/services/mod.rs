pub mod finder;

pub use finder::{NO_MATCH, SearchError, SongFinder, TrackHit, TrackSearch, select_candidates};
