use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KvEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KvEntries::EntryKey)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(KvEntries::Value).text().not_null())
                    .col(
                        ColumnDef::new(KvEntries::Version)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(KvEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RankedMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RankedMembers::SetKey).string().not_null())
                    .col(ColumnDef::new(RankedMembers::Member).string().not_null())
                    .col(
                        ColumnDef::new(RankedMembers::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RankedMembers::CompletedAtMs)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RankedMembers::Payload).text().not_null())
                    .primary_key(
                        Index::create()
                            .col(RankedMembers::SetKey)
                            .col(RankedMembers::Member),
                    )
                    .to_owned(),
            )
            .await?;

        // Leaderboard reads scan one set in rank order
        manager
            .create_index(
                Index::create()
                    .name("idx_ranked_members_order")
                    .table(RankedMembers::Table)
                    .col(RankedMembers::SetKey)
                    .col(RankedMembers::Score)
                    .col(RankedMembers::CompletedAtMs)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RankedMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(KvEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum KvEntries {
    Table,
    EntryKey,
    Value,
    Version,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RankedMembers {
    Table,
    SetKey,
    Member,
    Score,
    CompletedAtMs,
    Payload,
}
