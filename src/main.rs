use anyhow::Result;
use rxdash::{config::DashConfig, web};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,rxdash=info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure & serve ────────────────────────────────────────
    let config = DashConfig::default();
    let addr = config.listen_addr;
    info!(csv = %config.csv_path.display(), seed = config.seed, "dashboard config");

    let app = web::router(config);
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
