//! Voice Cursor - 文本高亮与语音片段绑定服务
//!
//! - Domain: audio/, document/, voice/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, persistence, adapters, events

use std::sync::Arc;

use voice_cursor::application::{
    AudioStorePort, BootstrapPresetsCommand, BootstrapPresetsHandler, DocumentPersistencePort,
    DocumentSessionPort, PresetSourcePort,
};
use voice_cursor::config::{load_config, print_config, AppConfig};
use voice_cursor::domain::document::{default_document, extract_audio_keys, EditorState};
use voice_cursor::infrastructure::adapters::{
    FilePresetSource, GeminiClient, GeminiClientConfig, HttpPresetSource,
};
use voice_cursor::infrastructure::events::EventPublisher;
use voice_cursor::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voice_cursor::infrastructure::memory::{
    InMemoryAudioStore, InMemoryDocumentSession, InMemoryHoverMenus,
};
use voice_cursor::infrastructure::persistence::{SledStore, SledStoreConfig};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},voice_cursor={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 启动时的编辑状态：优先使用已保存的文档
fn initial_state(config: &AppConfig, sled: &SledStore) -> EditorState {
    if !config.storage.persist_document {
        return EditorState::new(default_document());
    }
    match sled.load_document() {
        Ok(Some(stored)) => {
            tracing::info!(version = stored.version, "Restored saved document");
            EditorState::with_version(stored.document, stored.version)
        }
        Ok(None) => EditorState::new(default_document()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load saved document, using default");
            EditorState::new(default_document())
        }
    }
}

fn preset_source(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn PresetSourcePort>>> {
    if !config.presets.enabled {
        return Ok(None);
    }
    if let Some(dir) = &config.presets.dir {
        return Ok(Some(Arc::new(FilePresetSource::new(dir))));
    }
    match &config.presets.base_url {
        Some(url) => Ok(Some(Arc::new(HttpPresetSource::new(
            url.clone(),
            config.presets.timeout_secs,
        )?))),
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Voice Cursor - 文本高亮语音服务");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.data_dir).await?;
    if let Some(parent) = std::path::Path::new(&config.storage.db_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 创建 Sled 存储并恢复音频片段
    let sled = SledStore::new(&SledStoreConfig {
        db_path: config.storage.db_path.clone(),
    })?
    .arc();
    let store = InMemoryAudioStore::with_persistence(sled.clone()).arc();
    let restored = store.restore();
    tracing::info!(restored, "Audio clips restored");

    // 创建文档会话
    let hover_menus = InMemoryHoverMenus::new().arc();
    let mut session =
        InMemoryDocumentSession::new(initial_state(&config, &sled), store.clone(), hover_menus.clone());
    if config.storage.persist_document {
        let persistence: Arc<dyn DocumentPersistencePort> = sled.clone();
        session = session.with_persistence(persistence);
    }
    let session = session.arc();

    // 丢弃启动文档不再引用的片段
    let keys = extract_audio_keys(&session.snapshot().document);
    let pruned = store.retain_only(&keys);
    if pruned > 0 {
        tracing::info!(pruned, "Unreferenced audio clips removed");
    }

    // 创建 Gemini 合成客户端
    if config.synth.api_key.is_empty() {
        tracing::warn!("Synth API key is not set, generation requests will be rejected upstream");
    }
    let synth_config = GeminiClientConfig::new(&config.synth.base_url, &config.synth.api_key)
        .with_model(&config.synth.model)
        .with_timeout(config.synth.timeout_secs);
    let synthesizer = Arc::new(GeminiClient::new(synth_config)?);

    // 创建事件发布器
    let event_publisher = EventPublisher::new().arc();

    // 加载预置音频（后台执行，完成后置位就绪标志）
    let readiness = match preset_source(&config)? {
        Some(source) => {
            let bootstrap = BootstrapPresetsHandler::new(
                session.clone(),
                store.clone(),
                source,
                event_publisher.clone(),
            );
            let readiness = bootstrap.readiness();
            tokio::spawn(async move {
                if let Err(e) = bootstrap.handle(BootstrapPresetsCommand { keys }).await {
                    tracing::error!(error = %e, "Preset bootstrap failed");
                }
            });
            readiness
        }
        None => {
            let (ready, readiness) = tokio::sync::watch::channel(true);
            drop(ready);
            tracing::info!("Preset loading disabled");
            readiness
        }
    };

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(&config.server.static_files.dir);
    }
    let state = AppState::new(
        session,
        store,
        hover_menus,
        synthesizer,
        event_publisher,
        readiness,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    if let Err(e) = sled.flush() {
        tracing::warn!(error = %e, "Failed to flush sled store");
    }
    tracing::info!("Server shutdown complete");

    Ok(())
}
