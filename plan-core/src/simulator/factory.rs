use std::collections::HashMap;

use async_trait::async_trait;

use super::service::{Simulator, SimulatorError};

/// Backend-agnostic simulator configuration.
///
/// `backend` must match the [`SimulatorFactory::backend_name`] of a
/// registered factory.
///
/// | backend | notes                              |
/// |---------|------------------------------------|
/// | `local` | in-process projection and analysis |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"local"`).
    pub backend: String,
    /// Calendar year of the first projected year; the current year when unset.
    pub base_year: Option<i32>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            base_year: None,
        }
    }
}

/// One implementation per simulation backend, registered with a
/// [`SimulatorRegistry`] at startup.
#[async_trait]
pub trait SimulatorFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use simulator. Remote backends may open
    /// connections here.
    async fn create(
        &self,
        config: &SimulatorConfig,
    ) -> Result<Box<dyn Simulator>, SimulatorError>;
}

/// Registry of [`SimulatorFactory`] instances, keyed by backend name.
pub struct SimulatorRegistry {
    factories: HashMap<&'static str, Box<dyn SimulatorFactory>>,
}

impl SimulatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every backend shipped in this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::local::LocalSimulatorFactory));
        registry
    }

    /// Register a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn SimulatorFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`SimulatorError::Configuration`] when no factory is registered
    ///   for the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &SimulatorConfig,
    ) -> Result<Box<dyn Simulator>, SimulatorError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                SimulatorError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for SimulatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::models::{SimulationRequest, SimulationResult};

    use super::{Simulator, SimulatorConfig, SimulatorError, SimulatorFactory, SimulatorRegistry};

    // ── stub simulator ───────────────────────────────────────────────────
    // The tests only check routing, never call `simulate`.
    struct StubSimulator(&'static str);

    #[async_trait]
    impl Simulator for StubSimulator {
        fn name(&self) -> &'static str {
            self.0
        }
        async fn simulate(
            &self,
            _request: &SimulationRequest,
        ) -> Result<SimulationResult, SimulatorError> {
            unimplemented!()
        }
    }

    // ── stub factory ─────────────────────────────────────────────────────
    /// Flips `called` when `create` runs so tests can prove dispatch.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl SimulatorFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &SimulatorConfig,
        ) -> Result<Box<dyn Simulator>, SimulatorError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubSimulator(self.name)))
        }
    }

    /// Always fails, to check that factory errors reach the caller.
    struct FailingFactory;

    #[async_trait]
    impl SimulatorFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &SimulatorConfig,
        ) -> Result<Box<dyn Simulator>, SimulatorError> {
            Err(SimulatorError::Unavailable("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn SimulatorFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config(backend: &str) -> SimulatorConfig {
        SimulatorConfig {
            backend: backend.to_string(),
            base_year: None,
        }
    }

    // ── SimulatorConfig ──────────────────────────────────────────────────
    #[test]
    fn config_default_is_local_current_year() {
        let cfg = SimulatorConfig::default();
        assert_eq!(cfg.backend, "local");
        assert_eq!(cfg.base_year, None);
    }

    // ── registry construction ────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_backends() {
        assert!(SimulatorRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn builtin_registry_has_local_backend() {
        assert_eq!(SimulatorRegistry::with_builtin().available_backends(), vec!["local"]);
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = SimulatorRegistry::new();
        let (f1, _) = stub_factory("remote");
        let (f2, _) = stub_factory("local");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["local", "remote"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = SimulatorRegistry::new();
        let (old, _) = stub_factory("local");
        let (new, _) = stub_factory("local");
        reg.register(old);
        reg.register(new);
        assert_eq!(reg.available_backends(), vec!["local"]);
    }

    // ── dispatch ─────────────────────────────────────────────────────────
    #[tokio::test]
    async fn create_calls_matching_factory_only() {
        let mut reg = SimulatorRegistry::new();
        let (local, local_called) = stub_factory("local");
        let (remote, remote_called) = stub_factory("remote");
        reg.register(local);
        reg.register(remote);

        let simulator = reg.create(&config("remote")).await.unwrap();

        assert_eq!(simulator.name(), "remote");
        assert!(remote_called.load(Ordering::SeqCst));
        assert!(!local_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available() {
        let mut reg = SimulatorRegistry::new();
        let (f, _) = stub_factory("local");
        reg.register(f);

        match reg.create(&config("cloud")).await {
            Err(SimulatorError::Configuration(msg)) => {
                assert!(msg.contains("cloud"), "should name the requested backend");
                assert!(msg.contains("local"), "should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a simulator"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = SimulatorRegistry::new();
        reg.register(Box::new(FailingFactory));

        let result = reg.create(&config("failing")).await;

        assert!(matches!(
            result,
            Err(SimulatorError::Unavailable(msg)) if msg == "intentional failure"
        ));
    }
}
