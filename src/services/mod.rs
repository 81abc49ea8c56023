pub mod decision_service;
pub mod decision_service_impl;
pub use decision_service::{DecisionError, DecisionService};
pub use decision_service_impl::SeaOrmDecisionService;

pub mod query_service;
pub mod query_service_impl;
pub use query_service::{PageRequest, QueryError, QueryService};
pub use query_service_impl::SeaOrmQueryService;

pub mod stats_service;
pub mod stats_service_impl;
pub use stats_service::{StatsError, StatsService};
pub use stats_service_impl::SeaOrmStatsService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;
