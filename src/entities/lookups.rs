use sea_orm::entity::prelude::*;

/// One row per submitted lookup. The candidate columns hold either a
/// formatted `"<track> By: <artist>"` string or the literal text `"None"`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lookups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub lyrics: String,
    pub artist_name: String,
    pub genre: String,
    pub first_possible_song: String,
    pub second_possible_song: String,
    pub third_possible_song: String,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
