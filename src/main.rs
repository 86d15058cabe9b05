use anyhow::Context;
use echo_server::{Config, Server, routes, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is the normal case in production.
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    telemetry::init(&config.log);

    let addr = config.addr();
    let server = Server::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    server.serve(routes::app()).await?;
    Ok(())
}
