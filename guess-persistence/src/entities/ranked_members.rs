use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ranked_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub set_key: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub member: String,
    pub score: i32,
    pub completed_at_ms: i64,
    #[sea_orm(column_type = "Text")]
    pub payload: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
