use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::{DecisionId, DecisionRecord, DecisionStats, FeatureVector, Page, UserId, Verdicts};

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn decision_repo(&self) -> repositories::decision::DecisionRepository {
        repositories::decision::DecisionRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn insert_decision(
        &self,
        user_id: Option<UserId>,
        features: &FeatureVector,
        verdicts: Verdicts,
    ) -> Result<DecisionId> {
        self.decision_repo().insert(user_id, features, verdicts).await
    }

    pub async fn get_decision(&self, id: DecisionId) -> Result<Option<DecisionRecord>> {
        self.decision_repo().get(id).await
    }

    pub async fn latest_decision_for_user(&self, user_id: UserId) -> Result<Option<DecisionRecord>> {
        self.decision_repo().latest_for_user(user_id).await
    }

    pub async fn list_decisions_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<DecisionRecord>> {
        self.decision_repo().list_for_user(user_id, page).await
    }

    pub async fn list_decisions(&self, page: Page) -> Result<Vec<DecisionRecord>> {
        self.decision_repo().list_all(page).await
    }

    pub async fn decision_stats(&self) -> Result<DecisionStats> {
        self.decision_repo().stats().await
    }

    pub async fn create_user(
        &self,
        name: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<UserId> {
        self.user_repo().create(name, password, config).await
    }

    /// Resolves `name` to its lowest-id user and checks the password against
    /// that row only. `Ok(None)` means no user has this name.
    pub async fn verify_user_password(&self, name: &str, password: &str) -> Result<Option<(User, bool)>> {
        let Some((user, password_hash)) = self.user_repo().first_by_name_with_password(name).await?
        else {
            return Ok(None);
        };

        let is_valid = repositories::user::verify_password(password_hash, password).await?;
        Ok(Some((user, is_valid)))
    }
}
