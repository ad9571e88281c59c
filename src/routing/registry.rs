//! Registry of route modules, keyed by module key.
//!
//! # Responsibilities
//! - Map a module key (`admin/users`) to a descriptor constructor
//! - Load a descriptor asynchronously, optionally under a timeout
//!
//! # Design Decisions
//! - Keys are relative paths without the source extension, so a file and
//!   its registration agree regardless of which extension is on disk
//! - Registration happens once at startup; lookups never mutate
//! - A key registered twice is an error, not an override

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures_util::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

use crate::routing::descriptor::RouteDescriptor;
use crate::routing::BoxError;

type Loader<S> = Box<dyn Fn() -> BoxFuture<'static, Result<RouteDescriptor<S>, BoxError>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("route module `{key}` is already registered")]
    Duplicate { key: String },

    #[error("route module key must not be empty")]
    EmptyKey,
}

/// Failure to produce a descriptor for a route file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no route module registered for `{key}`")]
    NotRegistered { key: String },

    #[error("route module `{key}` failed to load: {source}")]
    Failed {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("route module `{key}` did not load within {timeout:?}")]
    TimedOut { key: String, timeout: Duration },
}

/// Route modules available to the assembler.
pub struct RouteRegistry<S = ()> {
    loaders: BTreeMap<String, Loader<S>>,
}

impl<S> RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            loaders: BTreeMap::new(),
        }
    }

    /// Register a synchronous descriptor constructor.
    pub fn register<F>(&mut self, key: &str, constructor: F) -> Result<(), RegistryError>
    where
        F: Fn() -> RouteDescriptor<S> + Send + Sync + 'static,
    {
        self.insert(
            key,
            Box::new(move || future::ready(Ok::<_, BoxError>(constructor())).boxed()),
        )
    }

    /// Register an asynchronous, fallible loader.
    pub fn register_async<F, Fut>(&mut self, key: &str, loader: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RouteDescriptor<S>, BoxError>> + Send + 'static,
    {
        self.insert(key, Box::new(move || loader().boxed()))
    }

    fn insert(&mut self, key: &str, loader: Loader<S>) -> Result<(), RegistryError> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        if self.loaders.contains_key(&key) {
            return Err(RegistryError::Duplicate { key });
        }
        self.loaders.insert(key, loader);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.loaders.contains_key(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    /// Load the descriptor registered under `key`.
    pub async fn load(
        &self,
        key: &str,
        timeout: Option<Duration>,
    ) -> Result<RouteDescriptor<S>, LoadError> {
        let key = normalize_key(key);
        let loader = self
            .loaders
            .get(&key)
            .ok_or_else(|| LoadError::NotRegistered { key: key.clone() })?;

        let pending = loader();
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| LoadError::TimedOut {
                    key: key.clone(),
                    timeout: limit,
                })?,
            None => pending.await,
        };

        result.map_err(|source| LoadError::Failed { key, source })
    }
}

impl<S> Default for RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for RouteRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("keys", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn normalize_key(key: &str) -> String {
    key.replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::descriptor::file_route;

    fn empty() -> RouteDescriptor {
        file_route(|r| r)
    }

    #[tokio::test]
    async fn test_register_and_load() {
        let mut registry = RouteRegistry::new();
        registry.register("admin/users", empty).unwrap();

        assert!(registry.contains("admin/users"));
        assert!(registry.contains("./admin/users"));
        assert_eq!(registry.len(), 1);
        assert!(registry.load("admin/users", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_module() {
        let registry: RouteRegistry = RouteRegistry::new();
        let err = registry.load("nope", None).await.unwrap_err();
        assert!(matches!(err, LoadError::NotRegistered { ref key } if key == "nope"));
    }

    #[test]
    fn test_duplicate_and_empty_keys() {
        let mut registry = RouteRegistry::new();
        registry.register("index", empty).unwrap();
        assert_eq!(
            registry.register("./index", empty),
            Err(RegistryError::Duplicate {
                key: "index".to_string()
            })
        );
        assert_eq!(registry.register("/", empty), Err(RegistryError::EmptyKey));
    }

    #[tokio::test]
    async fn test_async_loader_failure() {
        let mut registry: RouteRegistry = RouteRegistry::new();
        registry
            .register_async("broken", || async { Err::<RouteDescriptor, BoxError>("bad module".into()) })
            .unwrap();

        let err = registry.load("broken", None).await.unwrap_err();
        assert!(matches!(err, LoadError::Failed { .. }));
        assert_eq!(
            err.to_string(),
            "route module `broken` failed to load: bad module"
        );
    }

    #[tokio::test]
    async fn test_load_timeout() {
        let mut registry: RouteRegistry = RouteRegistry::new();
        registry
            .register_async("slow", || async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(empty())
            })
            .unwrap();

        let err = registry
            .load("slow", Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::TimedOut { .. }));
    }

    #[test]
    fn test_keys_sorted() {
        let mut registry = RouteRegistry::new();
        registry.register("json", empty).unwrap();
        registry.register("admin/index", empty).unwrap();
        registry.register("index", empty).unwrap();
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec!["admin/index", "index", "json"]
        );
    }
}
