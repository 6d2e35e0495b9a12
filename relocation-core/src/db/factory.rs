use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{RepositoryError, ScenarioRepository};

/// Where scenarios are stored.
///
/// `backend` names a registered [`RepositoryFactory`]; `connection_string`
/// is handed to that factory untouched.
///
/// | backend    | connection_string examples          |
/// |------------|-------------------------------------|
/// | `sqlite`   | `scenarios.db`, `:memory:`          |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

impl DbConfig {
    pub fn sqlite(connection_string: impl Into<String>) -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: connection_string.into(),
        }
    }
}

/// Opens a [`ScenarioRepository`] for one storage backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase identifier matched against [`DbConfig::backend`].
    fn backend_name(&self) -> &'static str;

    /// Opens the store, creating and migrating it if needed.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ScenarioRepository>, RepositoryError>;
}

/// Factories keyed by backend name.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factory, replacing any previous one with the same name.
    pub fn register(&mut self, factory: Box<dyn RepositoryFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a repository with the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] if no such backend is registered.
    /// * Whatever the factory itself returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ScenarioRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::{
        DbConfig, RepositoryError, RepositoryFactory, RepositoryRegistry, ScenarioRepository,
    };
    use crate::models::{NewScenario, Scenario};

    // Never called; the registry only needs something to hand back.
    struct StubRepository;

    #[async_trait]
    impl ScenarioRepository for StubRepository {
        async fn create_scenario(
            &self,
            _scenario: NewScenario,
        ) -> Result<Scenario, RepositoryError> {
            unimplemented!()
        }
        async fn get_scenario(&self, _id: i64) -> Result<Scenario, RepositoryError> {
            unimplemented!()
        }
        async fn get_scenario_by_name(&self, _name: &str) -> Result<Scenario, RepositoryError> {
            unimplemented!()
        }
        async fn update_scenario(&self, _scenario: &Scenario) -> Result<(), RepositoryError> {
            unimplemented!()
        }
        async fn delete_scenario(&self, _id: i64) -> Result<(), RepositoryError> {
            unimplemented!()
        }
        async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError> {
            unimplemented!()
        }
    }

    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RepositoryFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn ScenarioRepository>, RepositoryError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubRepository))
        }
    }

    struct FailingFactory;

    #[async_trait]
    impl RepositoryFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn ScenarioRepository>, RepositoryError> {
            Err(RepositoryError::Connection("disk unavailable".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn RepositoryFactory>, Arc<AtomicBool>) {
        let called = Arc::new(AtomicBool::new(false));
        let factory = StubFactory {
            name,
            called: called.clone(),
        };
        (Box::new(factory), called)
    }

    fn config(backend: &str) -> DbConfig {
        DbConfig {
            backend: backend.to_string(),
            connection_string: ":memory:".to_string(),
        }
    }

    #[test]
    fn default_config_is_in_memory_sqlite() {
        assert_eq!(DbConfig::default(), DbConfig::sqlite(":memory:"));
    }

    #[test]
    fn available_backends_are_sorted_and_deduplicated() {
        let mut registry = RepositoryRegistry::new();
        for name in ["sqlite", "postgres", "sqlite"] {
            registry.register(stub_factory(name).0);
        }

        assert_eq!(registry.available_backends(), vec!["postgres", "sqlite"]);
    }

    #[tokio::test]
    async fn create_dispatches_to_matching_factory_only() {
        let mut registry = RepositoryRegistry::new();
        let (sqlite, sqlite_called) = stub_factory("sqlite");
        let (postgres, postgres_called) = stub_factory("postgres");
        registry.register(sqlite);
        registry.register(postgres);

        let result = registry.create(&config("sqlite")).await;

        assert!(result.is_ok());
        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!postgres_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_is_a_configuration_error() {
        let mut registry = RepositoryRegistry::new();
        registry.register(stub_factory("sqlite").0);

        match registry.create(&config("postgres")).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert!(msg.contains("postgres"));
                assert!(msg.contains("sqlite"));
            }
            other => panic!("expected Configuration error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn factory_errors_propagate() {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(FailingFactory));

        assert_eq!(
            registry.create(&config("failing")).await.err(),
            Some(RepositoryError::Connection("disk unavailable".to_string()))
        );
    }
}
