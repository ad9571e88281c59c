//! Route descriptors: what a route file exports.
//!
//! A descriptor pairs a setup function, which registers endpoints on a fresh
//! sub-router, with the middlewares that wrap those endpoints.

use std::fmt;

use axum::Router;

use crate::routing::middleware::{wrap, Middleware};
use crate::routing::BoxError;

/// Setup function registering endpoints on a sub-router.
pub type SetupFn<S> = Box<dyn FnOnce(Router<S>) -> Result<Router<S>, BoxError> + Send>;

/// A route file's handler and its middleware chain.
pub struct RouteDescriptor<S = ()> {
    handler: SetupFn<S>,
    middlewares: Vec<Middleware<S>>,
}

impl<S> RouteDescriptor<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Descriptor without middlewares.
    pub fn new<F>(setup: F) -> Self
    where
        F: FnOnce(Router<S>) -> Router<S> + Send + 'static,
    {
        Self::with_middlewares(Vec::new(), setup)
    }

    /// Descriptor whose middlewares wrap every endpoint `setup` registers,
    /// running in list order.
    pub fn with_middlewares<F>(middlewares: Vec<Middleware<S>>, setup: F) -> Self
    where
        F: FnOnce(Router<S>) -> Router<S> + Send + 'static,
    {
        Self::try_with_middlewares(middlewares, move |router| Ok(setup(router)))
    }

    /// Descriptor whose setup may fail.
    pub fn try_new<F>(setup: F) -> Self
    where
        F: FnOnce(Router<S>) -> Result<Router<S>, BoxError> + Send + 'static,
    {
        Self::try_with_middlewares(Vec::new(), setup)
    }

    pub fn try_with_middlewares<F>(middlewares: Vec<Middleware<S>>, setup: F) -> Self
    where
        F: FnOnce(Router<S>) -> Result<Router<S>, BoxError> + Send + 'static,
    {
        Self {
            handler: Box::new(setup),
            middlewares,
        }
    }

    pub fn middlewares(&self) -> &[Middleware<S>] {
        &self.middlewares
    }

    /// Run only the setup function against `router`.
    pub fn setup(self, router: Router<S>) -> Result<Router<S>, BoxError> {
        (self.handler)(router)
    }

    /// Build the isolated sub-router: fresh router, endpoints, then middlewares.
    pub fn build(self) -> Result<Router<S>, BoxError> {
        let Self {
            handler,
            middlewares,
        } = self;
        let router = handler(Router::new())?;
        if middlewares.is_empty() {
            Ok(router)
        } else {
            Ok(wrap(router, &middlewares))
        }
    }

    pub fn into_parts(self) -> (SetupFn<S>, Vec<Middleware<S>>) {
        (self.handler, self.middlewares)
    }
}

impl<S> fmt::Debug for RouteDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("middlewares", &self.middlewares)
            .finish_non_exhaustive()
    }
}

/// Shorthand for [`RouteDescriptor::new`].
pub fn file_route<S, F>(setup: F) -> RouteDescriptor<S>
where
    S: Clone + Send + Sync + 'static,
    F: FnOnce(Router<S>) -> Router<S> + Send + 'static,
{
    RouteDescriptor::new(setup)
}

/// Shorthand for [`RouteDescriptor::with_middlewares`].
pub fn file_route_with<S, F>(middlewares: Vec<Middleware<S>>, setup: F) -> RouteDescriptor<S>
where
    S: Clone + Send + Sync + 'static,
    F: FnOnce(Router<S>) -> Router<S> + Send + 'static,
{
    RouteDescriptor::with_middlewares(middlewares, setup)
}
