use anyhow::{Context, Result};
use chrono::SecondsFormat;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, Select, Statement, TransactionTrait, Value,
};

use crate::domain::stats::{ModelCounts, PairwiseAgreement};
use crate::domain::{
    DecisionId, DecisionRecord, DecisionStats, FeatureVector, Page, UserId, Verdicts,
};
use crate::entities::{decision_records, prelude::*};

// created_at is stamped as max(now, newest stored value) in the same statement,
// so stored timestamps never decrease in insertion order even if the clock does.
const INSERT_SQL: &str = r"
INSERT INTO decision_records (
    user_id, income, credit_score, loan_amount, years_employed,
    verdict_a, verdict_b, verdict_c, created_at
)
SELECT ?, ?, ?, ?, ?, ?, ?, ?, MAX(?, COALESCE(MAX(created_at), ''))
FROM decision_records
";

const STATS_SQL: &str = r"
SELECT
    COUNT(*) AS total,
    COUNT(CASE WHEN verdict_a = 1 THEN 1 END) AS approved_a,
    COUNT(CASE WHEN verdict_a = 0 THEN 1 END) AS rejected_a,
    COUNT(CASE WHEN verdict_b = 1 THEN 1 END) AS approved_b,
    COUNT(CASE WHEN verdict_b = 0 THEN 1 END) AS rejected_b,
    COUNT(CASE WHEN verdict_c = 1 THEN 1 END) AS approved_c,
    COUNT(CASE WHEN verdict_c = 0 THEN 1 END) AS rejected_c,
    COUNT(CASE WHEN verdict_a = 1 AND verdict_b = 1 AND verdict_c = 1 THEN 1 END) AS all_approved,
    COUNT(CASE WHEN verdict_a = 0 AND verdict_b = 0 AND verdict_c = 0 THEN 1 END) AS all_rejected,
    COUNT(CASE WHEN verdict_a = verdict_b THEN 1 END) AS agree_a_b,
    COUNT(CASE WHEN verdict_a = verdict_c THEN 1 END) AS agree_a_c,
    COUNT(CASE WHEN verdict_b = verdict_c THEN 1 END) AS agree_b_c,
    COUNT(CASE WHEN verdict_a = 1 OR verdict_b = 1 OR verdict_c = 1 THEN 1 END) AS approved_any
FROM decision_records
";

#[derive(Debug, FromQueryResult)]
struct StatsRow {
    total: i64,
    approved_a: i64,
    rejected_a: i64,
    approved_b: i64,
    rejected_b: i64,
    approved_c: i64,
    rejected_c: i64,
    all_approved: i64,
    all_rejected: i64,
    agree_a_b: i64,
    agree_a_c: i64,
    agree_b_c: i64,
    approved_any: i64,
}

fn as_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl From<StatsRow> for DecisionStats {
    fn from(row: StatsRow) -> Self {
        Self {
            total: as_count(row.total),
            model_a: ModelCounts {
                approved: as_count(row.approved_a),
                rejected: as_count(row.rejected_a),
            },
            model_b: ModelCounts {
                approved: as_count(row.approved_b),
                rejected: as_count(row.rejected_b),
            },
            model_c: ModelCounts {
                approved: as_count(row.approved_c),
                rejected: as_count(row.rejected_c),
            },
            all_approved: as_count(row.all_approved),
            all_rejected: as_count(row.all_rejected),
            agreement: PairwiseAgreement {
                a_b: as_count(row.agree_a_b),
                a_c: as_count(row.agree_a_c),
                b_c: as_count(row.agree_b_c),
            },
            approved_total: as_count(row.approved_any),
        }
    }
}

impl From<decision_records::Model> for DecisionRecord {
    fn from(model: decision_records::Model) -> Self {
        Self {
            id: DecisionId::new(model.id),
            user_id: model.user_id.map(UserId::new),
            income: model.income,
            credit_score: model.credit_score,
            loan_amount: model.loan_amount,
            years_employed: model.years_employed,
            verdict_a: model.verdict_a,
            verdict_b: model.verdict_b,
            verdict_c: model.verdict_c,
            created_at: model.created_at,
        }
    }
}

/// Append-only access to `decision_records`. There is no update or delete.
pub struct DecisionRepository {
    conn: DatabaseConnection,
}

impl DecisionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Writes one complete record in a single statement and returns its id.
    pub async fn insert(
        &self,
        user_id: Option<UserId>,
        features: &FeatureVector,
        verdicts: Verdicts,
    ) -> Result<DecisionId> {
        let [income, credit_score, loan_amount, years_employed] = features.truncated();
        let now = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let stmt = Statement::from_sql_and_values(
            self.conn.get_database_backend(),
            INSERT_SQL,
            [
                Value::from(user_id.map(|u| u.value())),
                Value::from(income),
                Value::from(credit_score),
                Value::from(loan_amount),
                Value::from(years_employed),
                Value::from(verdicts.verdict_a),
                Value::from(verdicts.verdict_b),
                Value::from(verdicts.verdict_c),
                Value::from(now),
            ],
        );

        let result = self
            .conn
            .execute(stmt)
            .await
            .context("Failed to insert decision record")?;

        let id = i64::try_from(result.last_insert_id())
            .context("Decision id does not fit in i64")?;
        Ok(DecisionId::new(id))
    }

    pub async fn get(&self, id: DecisionId) -> Result<Option<DecisionRecord>> {
        let row = DecisionRecords::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query decision by id")?;

        Ok(row.map(DecisionRecord::from))
    }

    fn newest_first() -> Select<DecisionRecords> {
        DecisionRecords::find()
            .order_by_desc(decision_records::Column::CreatedAt)
            .order_by_desc(decision_records::Column::Id)
    }

    pub async fn latest_for_user(&self, user_id: UserId) -> Result<Option<DecisionRecord>> {
        let row = Self::newest_first()
            .filter(decision_records::Column::UserId.eq(user_id.value()))
            .one(&self.conn)
            .await
            .context("Failed to query latest decision for user")?;

        Ok(row.map(DecisionRecord::from))
    }

    pub async fn list_for_user(&self, user_id: UserId, page: Page) -> Result<Vec<DecisionRecord>> {
        let rows = Self::newest_first()
            .filter(decision_records::Column::UserId.eq(user_id.value()))
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.conn)
            .await
            .context("Failed to list decisions for user")?;

        Ok(rows.into_iter().map(DecisionRecord::from).collect())
    }

    pub async fn list_all(&self, page: Page) -> Result<Vec<DecisionRecord>> {
        let rows = Self::newest_first()
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.conn)
            .await
            .context("Failed to list decisions")?;

        Ok(rows.into_iter().map(DecisionRecord::from).collect())
    }

    /// Computes every aggregate from one snapshot: a single statement inside
    /// a read transaction.
    pub async fn stats(&self) -> Result<DecisionStats> {
        let txn = self.conn.begin().await?;

        let row = StatsRow::find_by_statement(Statement::from_string(
            txn.get_database_backend(),
            STATS_SQL.to_string(),
        ))
        .one(&txn)
        .await
        .context("Failed to aggregate decisions")?
        .ok_or_else(|| anyhow::anyhow!("Aggregate query returned no row"))?;

        txn.commit().await?;

        Ok(DecisionStats::from(row))
    }
}
