use advisor::{Advisor, CsvFileSource};
use agrismart::{AppState, Cli, app, init_logging};
use clap::Parser;
use llm::GeminiClient;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging("info");

    let gateway = GeminiClient::new(cli.gemini_config()?, cli.persona()?)?;
    info!(model = gateway.model(), "gemini gateway ready");

    let history = CsvFileSource::new(&cli.farm_data);
    info!(path = %history.path().display(), "farm history source");
    let state = AppState::new(Advisor::new(Box::new(gateway)), history);

    let addr: SocketAddr = cli.addr.parse()?;
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
