use std::str::FromStr;

use async_trait::async_trait;
use relocation_core::db::{DbConfig, RepositoryFactory};
use relocation_core::{RepositoryError, ScenarioRepository};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::repository::SqliteScenarioRepository;

const IN_MEMORY: &str = ":memory:";

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use relocation_core::db::RepositoryRegistry;
/// use relocation_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

fn connect_options(connection_string: &str) -> Result<SqliteConnectOptions, RepositoryError> {
    if connection_string == IN_MEMORY {
        return SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepositoryError::Configuration(e.to_string()));
    }
    Ok(SqliteConnectOptions::new()
        .filename(connection_string)
        .create_if_missing(true))
}

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection_string`, either a file path (created if
    /// missing) or `:memory:`, and applies migrations.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ScenarioRepository>, RepositoryError> {
        let options = connect_options(&config.connection_string)?;
        // Each in-memory connection would otherwise see its own database.
        let max_connections = if config.connection_string == IN_MEMORY { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let repo = SqliteScenarioRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        Ok(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use relocation_core::NewScenario;
    use relocation_core::db::{DbConfig, RepositoryFactory, RepositoryRegistry};

    use super::SqliteRepositoryFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteRepositoryFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn registry_opens_migrated_in_memory_repository() {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(SqliteRepositoryFactory));

        let repo = registry
            .create(&DbConfig::default())
            .await
            .expect("Should open in-memory repository");

        let inputs = serde_json::from_str(
            r#"{"origin_currency":"USD","destination":"PT","destination_currency":"EUR"}"#,
        )
        .expect("Should parse minimal inputs");
        repo.create_scenario(NewScenario {
            name: "minimal".to_string(),
            inputs,
        })
        .await
        .expect("Should create scenario");

        let scenarios = repo.list_scenarios().await.expect("Should list scenarios");
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "minimal");
    }
}
