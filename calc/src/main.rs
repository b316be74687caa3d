use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calc")]
#[command(about = "Servicio HTTP que evalúa expresiones aritméticas enteras")]
struct Cli {
    /// Dirección donde escuchar
    #[arg(long, env = "CALC_ADDR", default_value = "0.0.0.0:8080")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("calc=debug,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let app = calc::build_router();

    let listener = TcpListener::bind(&cli.addr).await?;
    info!("calc escuchando en {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
