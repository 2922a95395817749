//! Walletfolio 主入口

use std::sync::Arc;

use anyhow::{anyhow, Result};
use walletfolio::{api, app_state::AppState, config::Config, infrastructure::logging};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载环境变量
    dotenvy::dotenv().ok();

    // 2. 配置文件优先（CONFIG_PATH），否则全部来自环境变量
    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => Config::from_env_and_file(Some(path.as_str()))?,
        Err(_) => Config::from_env()?,
    };
    config.validate()?;
    let config = Arc::new(config);

    // 3. 初始化日志；guard 需持有到进程退出
    let _log_guard = logging::init_logging(&config.logging)
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.storage.backend,
        "🚀 Starting Walletfolio"
    );

    // 4. 存储与服务
    let state = Arc::new(AppState::from_config(config.clone()).await?);
    let app = api::routes(state);

    // 5. 启动服务器
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!("🎉 Server listening on http://{}", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ctrl+C 或 SIGTERM 时停止接收新连接
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
