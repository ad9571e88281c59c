//! Type-erased middleware for route sub-routers.
//!
//! # Responsibilities
//! - Hold any tower layer axum accepts behind one concrete type
//! - Apply a middleware list so the first entry runs first
//!
//! # Design Decisions
//! - An axum layer only wraps routes that already exist, so the list is
//!   applied after the sub-router's endpoints are registered
//! - Application order is reversed: the last layer applied is outermost

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::IntoResponse;
use axum::routing::Route;
use axum::Router;
use tower::{Layer, Service};

type ApplyFn<S> = dyn Fn(Router<S>) -> Router<S> + Send + Sync;

/// A middleware attached to a sub-router.
pub struct Middleware<S = ()> {
    name: &'static str,
    apply: Arc<ApplyFn<S>>,
}

impl<S> Middleware<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Wrap a tower layer, e.g. `axum::middleware::from_fn(auth)`.
    pub fn layer<L>(layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        Self {
            name: std::any::type_name::<L>(),
            apply: Arc::new(move |router: Router<S>| router.layer(layer.clone())),
        }
    }

    /// Arbitrary router transformation, e.g. a `route_layer` call.
    pub fn custom<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(Router<S>) -> Router<S> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(f),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, router: Router<S>) -> Router<S> {
        (self.apply)(router)
    }
}

impl<S> Clone for Middleware<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<S> fmt::Debug for Middleware<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").field("name", &self.name).finish()
    }
}

/// Apply `middlewares` to every endpoint on `router`; `middlewares[0]` runs first.
pub fn wrap<S>(router: Router<S>, middlewares: &[Middleware<S>]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    middlewares.iter().rev().fold(router, |router, m| m.apply(router))
}
