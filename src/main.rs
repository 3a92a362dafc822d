mod config;
mod middleware;
mod outcome;
mod routes;
mod signal;

use anyhow::{Context, Result};
use config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?
        .block_on(run())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load(None).await?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initializing logging: {}", err))?;

    let (ct, tt) = signal::bind();
    let app = routes::app();

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    {
        let signal = ct.clone().cancelled_owned();

        tt.spawn(async move {
            info!("http server worker starting on {}", addr);
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
            {
                error!("http server worker error: {}", err);
            }
        });
    }

    tt.wait().await;
    info!("shut down");
    Ok(())
}
