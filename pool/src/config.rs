use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_POOL_SIZE: usize = 10;
pub const DEFAULT_EXPR_LEN: u8 = 5;
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/";

/// Configuración ya validada del pool. Sólo se construye con `PoolConfig::new`,
/// así que un pool de tamaño 0 o un endpoint inválido no se pueden representar.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pool_size: usize,
    expr_len: u8,
    endpoint: Url,
    channel_capacity: usize,
}

impl PoolConfig {
    pub fn new(pool_size: usize, expr_len: u8, endpoint: &str) -> Result<Self, ConfigError> {
        if pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        if expr_len == 0 {
            return Err(ConfigError::ZeroExpressionLength);
        }

        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        match endpoint.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            pool_size,
            expr_len,
            endpoint,
            // alcanza para que los N workers iniciales terminen sin bloquearse
            channel_capacity: pool_size,
        })
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        self.channel_capacity = capacity;
        Ok(self)
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn expr_len(&self) -> u8 {
        self.expr_len
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }
}
