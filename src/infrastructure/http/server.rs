//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::info;

use super::middleware::log_failed_requests;
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 静态 Web UI 目录
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5060,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 创建带默认配置的服务器
    pub fn with_default_config(state: AppState) -> Self {
        Self::new(ServerConfig::default(), state)
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(std::time::Duration::from_secs(3600));

        let mut routes = create_routes();
        if let Some(dir) = &self.config.static_dir {
            info!(dir = %dir.display(), "Serving static files");
            routes = routes.fallback_service(ServeDir::new(dir));
        }

        // 请求体大小限制为 50MB
        routes
            .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
            .layer(middleware::from_fn(log_failed_requests))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use http::{header, Request, StatusCode};
    use tokio::sync::watch;
    use tower::util::ServiceExt;

    use crate::application::AudioStorePort;
    use crate::domain::audio::{read_wav_header, AudioClip, AudioKey};
    use crate::domain::document::{default_document, EditorState};
    use crate::infrastructure::adapters::FakeSynthClient;
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::{
        InMemoryAudioStore, InMemoryDocumentSession, InMemoryHoverMenus,
    };

    fn test_router() -> (Router, Arc<InMemoryAudioStore>, watch::Sender<bool>) {
        let store = InMemoryAudioStore::new().arc();
        let hover_menus = InMemoryHoverMenus::new().arc();
        let session = InMemoryDocumentSession::new(
            EditorState::new(default_document()),
            store.clone(),
            hover_menus.clone(),
        )
        .arc();
        let (ready_tx, ready_rx) = watch::channel(false);
        let state = AppState::new(
            session,
            store.clone(),
            hover_menus,
            Arc::new(FakeSynthClient::default()),
            EventPublisher::new().arc(),
            ready_rx,
        );
        let server = HttpServer::with_default_config(state);
        (server.build_router(), store, ready_tx)
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn get_json(router: &Router, uri: &str) -> serde_json::Value {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (_, bytes) = send(router, request).await;
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> serde_json::Value {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (_, bytes) = send(router, request).await;
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping_reports_readiness() {
        let (router, _, ready_tx) = test_router();
        assert_eq!(get_json(&router, "/api/ping").await["presets_ready"], false);

        ready_tx.send_replace(true);
        assert_eq!(get_json(&router, "/api/ping").await["presets_ready"], true);
    }

    #[tokio::test]
    async fn test_document_and_presets() {
        let (router, _, _) = test_router();

        let json = get_json(&router, "/api/document").await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["version"], 0);
        assert_eq!(json["data"]["document"]["type"], "doc");

        let json = get_json(&router, "/api/voice/list").await;
        assert_eq!(json["data"].as_array().unwrap().len(), 8);

        let json = get_json(&router, "/api/tone/list").await;
        assert_eq!(json["data"][0]["name"], "Neutral");
    }

    #[tokio::test]
    async fn test_generate_then_download() {
        let (router, store, _) = test_router();

        // "👋 Hello! ..." -> "Hello"
        let json = post_json(
            &router,
            "/api/voice/generate",
            serde_json::json!({
                "from": {"block": 1, "offset": 2},
                "to": {"block": 1, "offset": 7},
                "voice": "Puck",
                "tone": "Excited",
            }),
        )
        .await;
        assert_eq!(json["errno"], 0, "{}", json);
        assert_eq!(json["data"]["duration_ms"], 100);
        let key = json["data"]["audio_key"].as_str().unwrap().to_string();
        assert!(store.contains(&AudioKey::new(key.clone()).unwrap()));

        let request = Request::builder()
            .uri(format!("/api/audio/download/{}", key))
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"audio-{}.wav\"", key).as_str()
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(read_wav_header(&bytes).unwrap().data_size, 4800);
    }

    #[tokio::test]
    async fn test_empty_selection_is_business_error() {
        let (router, _, _) = test_router();
        let json = post_json(
            &router,
            "/api/voice/generate",
            serde_json::json!({
                "from": {"block": 1, "offset": 2},
                "to": {"block": 1, "offset": 2},
                "voice": "Puck",
                "tone": "Excited",
            }),
        )
        .await;
        assert_eq!(json["errno"], 400);
        assert_eq!(json["error"], "Please select some text first");
    }

    #[tokio::test]
    async fn test_hover_menu_playback() {
        let (router, store, _) = test_router();
        store.put(AudioKey::new("orus-surfer").unwrap(), AudioClip::wav(vec![7; 4]));

        let json = post_json(
            &router,
            "/api/highlight/enter",
            serde_json::json!({"highlight_id": "hl-1", "audio_key": "orus-surfer"}),
        )
        .await;
        assert_eq!(json["errno"], 0, "{}", json);
        assert_eq!(json["data"]["download_filename"], "audio-orus-surfer.wav");
        let playback_url = json["data"]["playback_url"].as_str().unwrap().to_string();
        let menu_id = json["data"]["menu_id"].as_str().unwrap().to_string();

        let request = Request::builder().uri(&playback_url).body(Body::empty()).unwrap();
        let (status, bytes) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, vec![7; 4]);

        let json = post_json(
            &router,
            "/api/highlight/leave",
            serde_json::json!({"menu_id": menu_id}),
        )
        .await;
        assert_eq!(json["data"]["outcome"], "closed");

        let json = get_json(&router, &playback_url).await;
        assert_eq!(json["errno"], 404);
    }

    #[tokio::test]
    async fn test_unknown_route_is_client_error() {
        let (router, _, _) = test_router();
        let request = Request::builder().uri("/api/nope").body(Body::empty()).unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
