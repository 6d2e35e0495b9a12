use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewScenario, Scenario};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage of named scenarios. Inputs are persisted as opaque records; no
/// derived figure is ever stored.
#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the name is taken.
    async fn create_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<Scenario, RepositoryError>;

    async fn get_scenario(&self, id: i64) -> Result<Scenario, RepositoryError>;

    async fn get_scenario_by_name(&self, name: &str) -> Result<Scenario, RepositoryError>;

    /// Replaces name and inputs and bumps `updated_at`.
    async fn update_scenario(&self, scenario: &Scenario) -> Result<(), RepositoryError>;

    async fn delete_scenario(&self, id: i64) -> Result<(), RepositoryError>;

    /// All scenarios ordered by name.
    async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError>;
}
