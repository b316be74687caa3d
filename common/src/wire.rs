use serde::{Deserialize, Serialize};

/* --------- Formato JSON del servicio de evaluación --------- */

/// Cuerpo de respuesta de `GET /?expr=...`.
///
/// Los campos van en PascalCase (`Result`, `Error`). Ambos son opcionales al
/// decodificar y se aceptan también en minúsculas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalResponse {
    #[serde(rename = "Result", alias = "result", default)]
    pub result: i64,

    /// Vacío si la evaluación fue correcta
    #[serde(rename = "Error", alias = "error", default)]
    pub error: String,
}

impl EvalResponse {
    pub fn ok(result: i64) -> Self {
        Self {
            result,
            error: String::new(),
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            result: 0,
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
