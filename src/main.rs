mod config;
mod error;
mod response;
mod server;

use config::ServerConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    server::start(&ServerConfig::default()).await?;
    Ok(())
}
