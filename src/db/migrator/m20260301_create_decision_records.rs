use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DecisionRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DecisionRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DecisionRecords::UserId).integer().null())
                    .col(ColumnDef::new(DecisionRecords::Income).big_integer().not_null())
                    .col(
                        ColumnDef::new(DecisionRecords::CreditScore)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DecisionRecords::LoanAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DecisionRecords::YearsEmployed)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DecisionRecords::VerdictA).boolean().not_null())
                    .col(ColumnDef::new(DecisionRecords::VerdictB).boolean().not_null())
                    .col(ColumnDef::new(DecisionRecords::VerdictC).boolean().not_null())
                    .col(ColumnDef::new(DecisionRecords::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_decision_records_created_at")
                    .table(DecisionRecords::Table)
                    .col(DecisionRecords::CreatedAt)
                    .col(DecisionRecords::Id)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_decision_records_user_created_at")
                    .table(DecisionRecords::Table)
                    .col(DecisionRecords::UserId)
                    .col(DecisionRecords::CreatedAt)
                    .col(DecisionRecords::Id)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DecisionRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DecisionRecords {
    Table,
    Id,
    UserId,
    Income,
    CreditScore,
    LoanAmount,
    YearsEmployed,
    VerdictA,
    VerdictB,
    VerdictC,
    CreatedAt,
}
