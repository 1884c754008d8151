use anyhow::Result;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::{KeyValueStore, RankedMember, VersionedValue};
use crate::entities::{kv_entries, prelude::*, ranked_members};

/// Store backed by two tables: versioned key/value rows and ranked-set rows.
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_member(model: ranked_members::Model) -> RankedMember {
        RankedMember {
            member: model.member,
            score: model.score,
            completed_at_ms: model.completed_at_ms,
            payload: model.payload,
        }
    }

    async fn insert_new(&self, key: &str, value: &str) -> Result<bool> {
        let entry = kv_entries::ActiveModel {
            entry_key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value.to_string()),
            version: ActiveValue::Set(1),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        let inserted = KvEntries::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entries::Column::EntryKey)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted == 1)
    }

    async fn replace_version(&self, key: &str, value: &str, version: i64) -> Result<bool> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let result = KvEntries::update_many()
            .col_expr(kv_entries::Column::Value, Expr::value(value))
            .col_expr(kv_entries::Column::Version, Expr::value(version + 1))
            .col_expr(kv_entries::Column::UpdatedAt, Expr::value(now))
            .filter(kv_entries::Column::EntryKey.eq(key))
            .filter(kv_entries::Column::Version.eq(version))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[async_trait]
impl KeyValueStore for SqlStore {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>> {
        let entry = KvEntries::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|model| VersionedValue {
            value: model.value,
            version: model.version,
        }))
    }

    async fn set_if_version(
        &self,
        key: &str,
        value: &str,
        expected_version: Option<i64>,
    ) -> Result<bool> {
        match expected_version {
            None => self.insert_new(key, value).await,
            Some(version) => self.replace_version(key, value, version).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        KvEntries::delete_by_id(key.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn rank_upsert(&self, set_key: &str, member: RankedMember) -> Result<()> {
        let row = ranked_members::ActiveModel {
            set_key: ActiveValue::Set(set_key.to_string()),
            member: ActiveValue::Set(member.member),
            score: ActiveValue::Set(member.score),
            completed_at_ms: ActiveValue::Set(member.completed_at_ms),
            payload: ActiveValue::Set(member.payload),
        };

        RankedMembers::insert(row)
            .on_conflict(
                OnConflict::columns([
                    ranked_members::Column::SetKey,
                    ranked_members::Column::Member,
                ])
                .update_columns([
                    ranked_members::Column::Score,
                    ranked_members::Column::CompletedAtMs,
                    ranked_members::Column::Payload,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn rank_range(&self, set_key: &str, limit: Option<u64>) -> Result<Vec<RankedMember>> {
        let mut query = RankedMembers::find()
            .filter(ranked_members::Column::SetKey.eq(set_key))
            .order_by_desc(ranked_members::Column::Score)
            .order_by_asc(ranked_members::Column::CompletedAtMs)
            .order_by_asc(ranked_members::Column::Member);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query.all(&self.db).await?;
        Ok(rows.into_iter().map(Self::model_to_member).collect())
    }
}
