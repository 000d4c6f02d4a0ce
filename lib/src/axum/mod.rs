//! Helpers for serving and linking account pages with `axum`.
//!
//! Handlers themselves are up to the application. This module only makes
//! sure they end up at the paths the [`Registry`] knows about.

pub mod error;

use std::sync::Arc;

use axum::response::Redirect;
use axum::routing::MethodRouter;
use axum::Extension;

use crate::{Config, Page, Registry, Result};

pub type RegistryExt = Extension<Arc<Registry>>;

/// Router registering handlers by [`Page`] instead of by literal path.
///
/// ```
/// use std::sync::Arc;
///
/// use accounts::axum::PageRouter;
/// use accounts::{Page, Registry};
/// use axum::routing::get;
///
/// let router: axum::Router = PageRouter::new(Arc::new(Registry::new()))
///     .page(Page::Login, get(|| async { "log in" }))
///     .page(Page::Signup, get(|| async { "sign up" }))
///     .into_router();
/// ```
pub struct PageRouter<S = ()> {
    router: axum::Router<S>,
    registry: Arc<Registry>,
}

impl<S> PageRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            router: axum::Router::new(),
            registry,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(Registry::from_config(config)?)))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers a handler for the page at its registry path.
    ///
    /// # Panics
    ///
    /// Same as [`axum::Router::route`], registering the same page twice
    /// panics.
    pub fn page(mut self, page: Page, method_router: MethodRouter<S>) -> Self {
        let path = self.registry.get(page);
        tracing::debug!(page = page.name(), path, "registering page");
        self.router = self.router.route(path, method_router);
        self
    }

    /// Merges non-page routes into the router.
    pub fn merge(mut self, other: axum::Router<S>) -> Self {
        self.router = self.router.merge(other);
        self
    }

    /// Finishes the router, making the registry available to all handlers
    /// through [`RegistryExt`].
    pub fn into_router(self) -> axum::Router<S> {
        self.router.layer(Extension(self.registry))
    }
}

/// Redirect to the page as mounted in the registry.
pub fn redirect(registry: &Registry, page: Page) -> Redirect {
    Redirect::to(registry.get(page))
}

/// Redirect to the page with additional query parameters, e.g. the
/// location to come back to once the page is done.
pub fn redirect_with(registry: &Registry, page: Page, query: &[(&str, &str)]) -> Redirect {
    Redirect::to(&registry.link(page, query))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn app() -> axum::Router {
        let registry = Arc::new(Registry::with_base("/accounts").unwrap());
        PageRouter::new(registry)
            .page(Page::Login, get(|| async { "login" }))
            .page(
                Page::TwoFactorSetup,
                get(|Extension(registry): RegistryExt| async move {
                    registry.get(Page::TwoFactorVerify).to_string()
                }),
            )
            .merge(axum::Router::new().route("/", get(|| async { "home" })))
            .into_router()
    }

    #[tokio::test]
    async fn test_pages_served_at_registry_paths() {
        let response = app().oneshot(request("/accounts/login")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "login");

        let response = app().oneshot(request("/login")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app().oneshot(request("/")).await.unwrap();
        assert_eq!(body_string(response).await, "home");
    }

    #[tokio::test]
    async fn test_registry_extension_available() {
        let response = app()
            .oneshot(request("/accounts/two-factor/setup"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "/accounts/two-factor/verify");
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.pages.base = "auth".to_string();
        let router = PageRouter::<()>::from_config(&config).unwrap();
        assert_eq!(router.registry().get(Page::Recover), "/auth/recover");
    }

    #[test]
    fn test_from_config_rejects_capture_base() {
        for base in ["/*rest", "/:tenant", "/{tenant}"] {
            let mut config = Config::default();
            config.pages.base = base.to_string();
            let err = PageRouter::<()>::from_config(&config).err().unwrap();
            assert!(
                matches!(err.kind, crate::ErrorKind::InvalidPath(_)),
                "{base}"
            );
        }
    }

    #[test]
    fn test_redirects() {
        let registry = Registry::new();

        let response = redirect(&registry, Page::Verify).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/verify");

        let response =
            redirect_with(&registry, Page::Login, &[("redir", "/change-email")]).into_response();
        assert_eq!(
            response.headers()[header::LOCATION],
            "/login?redir=%2Fchange-email"
        );
    }
}
