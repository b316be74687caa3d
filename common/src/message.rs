use serde::{Deserialize, Serialize};
use std::fmt;

/// Posición reutilizable dentro del pool (0..N-1).
pub type SlotId = usize;

const UNKNOWN_ERROR: &str = "unknown error";

/// Resultado de un intento: lo emite un único worker y lo consume una única
/// iteración del supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub id: SlotId,
    pub serial: u64,
    pub expression: String,
    /// Sólo es válido si `error` es `None`
    pub result: i64,
    pub error: Option<String>,
}

impl CompletionMessage {
    pub fn success(id: SlotId, serial: u64, expression: String, result: i64) -> Self {
        Self {
            id,
            serial,
            expression,
            result,
            error: None,
        }
    }

    /// Mensaje de fallo. Nunca deja `error` vacío: si el texto viene vacío
    /// se reemplaza por "unknown error".
    pub fn failure(
        id: SlotId,
        serial: u64,
        expression: String,
        partial_result: i64,
        error: impl Into<String>,
    ) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            error
        };

        Self {
            id,
            serial,
            expression,
            result: partial_result,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for CompletionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slot={} serial={} expr={:?} result={}",
            self.id, self.serial, self.expression, self.result
        )?;
        if let Some(err) = &self.error {
            write!(f, " error={:?}", err)?;
        }
        Ok(())
    }
}
