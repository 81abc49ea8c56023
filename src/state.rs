use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::classifier::ClassifierGateway;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, DecisionService, QueryService, SeaOrmAuthService, SeaOrmDecisionService,
    SeaOrmQueryService, SeaOrmStatsService, StatsService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub gateway: Arc<ClassifierGateway>,

    pub decision_service: Arc<dyn DecisionService>,

    pub query_service: Arc<dyn QueryService>,

    pub stats_service: Arc<dyn StatsService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    /// Loads all three classifiers from the configured model files.
    /// Any load failure aborts startup.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let gateway = ClassifierGateway::load(&config.classifiers)?;
        Self::with_gateway(config, gateway).await
    }

    /// Builds the state around an already constructed gateway.
    pub async fn with_gateway(config: Config, gateway: ClassifierGateway) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let gateway = Arc::new(gateway);
        info!(models = ?gateway.model_names(), "Classifier gateway ready");

        let decision_service = Arc::new(SeaOrmDecisionService::new(store.clone(), gateway.clone()))
            as Arc<dyn DecisionService>;
        let query_service = Arc::new(SeaOrmQueryService::new(
            store.clone(),
            config.pagination.clone(),
        )) as Arc<dyn QueryService>;
        let stats_service = Arc::new(SeaOrmStatsService::new(
            store.clone(),
            gateway.model_names().map(str::to_string),
        )) as Arc<dyn StatsService>;
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            gateway,
            decision_service,
            query_service,
            stats_service,
            auth_service,
        })
    }
}
