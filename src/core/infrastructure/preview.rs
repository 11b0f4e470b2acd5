use async_trait::async_trait;
use axum::{extract::State, response::Html, Router};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{NetworkError, Result, SyncError};

/// A running preview listener. It serves until the process is killed or the
/// handle is aborted.
pub struct PreviewHandle {
    url: String,
    task: JoinHandle<std::io::Result<()>>,
}

impl PreviewHandle {
    pub fn new(url: String, task: JoinHandle<std::io::Result<()>>) -> Self {
        Self { url, task }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn wait(self) -> Result<()> {
        self.task
            .await?
            .map_err(|e| SyncError::Internal(anyhow::anyhow!("Preview server stopped: {}", e)))
    }
}

#[async_trait]
pub trait PreviewServer: Send + Sync {
    /// Bind `port` and start serving `html` for every request path.
    async fn start(&self, html: String, port: u16) -> Result<PreviewHandle>;
}

struct PreviewState {
    html: String,
}

/// Loopback HTTP server backed by axum
#[derive(Debug, Default, Clone)]
pub struct HttpPreviewServer;

impl HttpPreviewServer {
    pub fn new() -> Self {
        HttpPreviewServer
    }
}

#[async_trait]
impl PreviewServer for HttpPreviewServer {
    async fn start(&self, html: String, port: u16) -> Result<PreviewHandle> {
        let state = Arc::new(PreviewState { html });

        let app = Router::new()
            .fallback(serve_body)
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| NetworkError::Bind { port, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| NetworkError::Bind { port, source })?;

        let url = format!("http://{}/", local_addr);
        info!(address = %local_addr, "Preview server started");

        let task = tokio::spawn(async move { axum::serve(listener, app).await });

        Ok(PreviewHandle::new(url, task))
    }
}

async fn serve_body(State(state): State<Arc<PreviewState>>) -> Html<String> {
    Html(state.html.clone())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_html_on_every_path() {
        let server = HttpPreviewServer::new();
        let handle = server.start("<h1>Preview</h1>".to_string(), 0).await.unwrap();
        assert!(handle.url().starts_with("http://127.0.0.1:"));

        let response = reqwest::get(handle.url()).await.unwrap();
        assert!(response.status().is_success());
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));
        assert_eq!(response.text().await.unwrap(), "<h1>Preview</h1>");

        let nested = reqwest::get(format!("{}favicon.ico", handle.url())).await.unwrap();
        assert_eq!(nested.text().await.unwrap(), "<h1>Preview</h1>");
    }

    #[tokio::test]
    async fn test_port_in_use_is_reported() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let result = HttpPreviewServer::new().start(String::new(), port).await;

        assert!(matches!(
            result,
            Err(SyncError::Network(NetworkError::Bind { port: p, .. })) if p == port
        ));
    }
}
