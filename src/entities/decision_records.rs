use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "decision_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Weak reference to `users.id`; no foreign key is enforced.
    pub user_id: Option<i64>,

    pub income: i64,

    pub credit_score: i64,

    pub loan_amount: i64,

    pub years_employed: i64,

    pub verdict_a: bool,

    pub verdict_b: bool,

    pub verdict_c: bool,

    /// RFC 3339, UTC, microsecond precision
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
