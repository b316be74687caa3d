use anyhow::Result;
use clap::{Parser, ValueEnum};
use pool::config::{DEFAULT_ENDPOINT, DEFAULT_EXPR_LEN, DEFAULT_POOL_SIZE};
use pool::{
    HttpEvaluator, JsonReporter, LogReporter, PoolConfig, RandomExpressions, Reporter, Supervisor,
    TextReporter,
};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Output {
    /// Una línea de texto por resultado (stdout)
    Text,
    /// JSON lines (stdout)
    Json,
    /// Sólo logs de tracing (stderr)
    Log,
}

#[derive(Parser)]
#[command(name = "pool")]
#[command(about = "Pool de workers que genera expresiones y las manda a evaluar")]
struct Cli {
    /// Cantidad de workers concurrentes
    #[arg(long, env = "POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Cantidad de operandos por expresión
    #[arg(long, env = "EXPR_LEN", default_value_t = DEFAULT_EXPR_LEN)]
    expr_len: u8,

    /// URL base del servicio de evaluación
    #[arg(long, env = "CALC_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Capacidad del canal de completions (por defecto, el tamaño del pool)
    #[arg(long, env = "CHANNEL_CAPACITY")]
    channel_capacity: Option<usize>,

    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logs a stderr: stdout queda para los resultados
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pool=info,reqwest=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = PoolConfig::new(cli.pool_size, cli.expr_len, &cli.endpoint)?;
    if let Some(capacity) = cli.channel_capacity {
        config = config.with_channel_capacity(capacity)?;
    }

    let evaluator = HttpEvaluator::new(config.endpoint().clone());
    let supervisor = Supervisor::start(&config, RandomExpressions, evaluator).await;

    let err = match cli.output {
        Output::Text => run_with(supervisor, TextReporter::new(io::stdout())).await,
        Output::Json => run_with(supervisor, JsonReporter::new(io::stdout())).await,
        Output::Log => run_with(supervisor, LogReporter).await,
    };

    Err(err.into())
}

async fn run_with<R: Reporter>(
    supervisor: Supervisor<RandomExpressions, HttpEvaluator>,
    mut reporter: R,
) -> pool::PoolError {
    supervisor.run(&mut reporter).await
}
