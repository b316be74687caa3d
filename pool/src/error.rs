use thiserror::Error;

/// Errores de configuración. Son fatales: el proceso termina antes de lanzar
/// ningún worker.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pool size must be greater than zero")]
    ZeroPoolSize,

    #[error("expression length must be greater than zero")]
    ZeroExpressionLength,

    #[error("completion channel capacity must be greater than zero")]
    ZeroChannelCapacity,

    #[error("invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

/// Fallo de un intento (generación o evaluación). Nunca sube al supervisor:
/// termina como texto en el `error` del `CompletionMessage`.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("expression generation failed: {0}")]
    Generate(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("unmarshal failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Cuerpo válido y sin error, pero con status no 2xx
    #[error("unexpected HTTP status {status}")]
    Status { status: u16, result: i64 },

    /// Error de aplicación devuelto por el servicio, con su resultado parcial
    #[error("{message}")]
    Remote { result: i64, message: String },

    #[error("worker panicked: {0}")]
    Panicked(String),
}

impl TaskError {
    /// Resultado disponible a pesar del fallo (0 si nunca hubo uno).
    pub fn partial_result(&self) -> i64 {
        match self {
            TaskError::Remote { result, .. } | TaskError::Status { result, .. } => *result,
            _ => 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("completion channel closed")]
    ChannelClosed,
}
