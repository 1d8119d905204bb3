// Application handles the smoke checker can dispatch a GET through.

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use tower::{Service, ServiceExt};
use url::Url;

use super::error::CheckError;

/// Issue a GET for `path` and return the raw status code
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn get(&self, path: &str) -> Result<u16, CheckError>;

    /// Short human label used in logs and reports
    fn describe(&self) -> String;
}

/// In-process dispatch into a tower service, no socket involved
#[derive(Debug, Clone)]
pub struct InProcess<S> {
    service: S,
}

impl<S> InProcess<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

impl From<Router> for InProcess<Router> {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}

#[async_trait]
impl<S> Dispatch for InProcess<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + Sync + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + Send,
{
    async fn get(&self, path: &str) -> Result<u16, CheckError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .map_err(|e| CheckError::dispatch(path, e))?;

        // Each request gets its own clone so no service state is shared between checks
        let response = self
            .service
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| CheckError::dispatch(path, e))?;

        Ok(response.status().as_u16())
    }

    fn describe(&self) -> String {
        "in-process".to_string()
    }
}

/// Dispatch over the network to a running server
#[derive(Debug, Clone)]
pub struct Remote {
    client: reqwest::Client,
    base: Url,
}

impl Remote {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CheckError> {
        let base = Url::parse(base_url)?;

        // Redirects are reported as-is, matching in-process dispatch
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| CheckError::dispatch(base_url, e))?;

        Ok(Self { client, base })
    }

    /// Paths are absolute, so any path segment on the base URL is replaced.
    /// Scheme, host and port always come from the base, even for `//x` paths.
    pub fn url_for(&self, path: &str) -> Url {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let mut url = self.base.clone();
        url.set_path(path);
        url.set_query(query);
        url.set_fragment(None);
        url
    }
}

#[async_trait]
impl Dispatch for Remote {
    async fn get(&self, path: &str) -> Result<u16, CheckError> {
        let url = self.url_for(path);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CheckError::dispatch(path, e))?;

        Ok(response.status().as_u16())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_joins_paths_onto_origin() {
        let remote = Remote::new("http://127.0.0.1:3000/ignored/", Duration::from_secs(1)).unwrap();
        let url = remote.url_for("/api/status");
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/status");
    }

    #[test]
    fn remote_keeps_base_host_for_double_slash_paths() {
        let remote = Remote::new("http://127.0.0.1:3000", Duration::from_secs(1)).unwrap();
        let url = remote.url_for("//nonexistent/x");
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(3000));
        assert_eq!(url.path(), "//nonexistent/x");
    }

    #[test]
    fn remote_carries_query_string() {
        let remote = Remote::new("http://127.0.0.1:3000", Duration::from_secs(1)).unwrap();
        let url = remote.url_for("/api/status?verbose=1");
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/status?verbose=1");
    }

    #[test]
    fn remote_rejects_bad_base_url() {
        let err = Remote::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, CheckError::InvalidBaseUrl(_)));
    }

    #[tokio::test]
    async fn remote_connection_refused_is_dispatch_error() {
        let port = portpicker::pick_unused_port().expect("free port");
        let remote = Remote::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();

        let err = remote.get("/").await.unwrap_err();
        assert!(matches!(err, CheckError::DispatchError { .. }), "unexpected error: {}", err);
    }
}
