use std::sync::Arc;

use common::CompletionMessage;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::TaskError;
use crate::evaluator::Evaluator;
use crate::expr::ExpressionSource;
use crate::task::Task;

/// Ejecuta una tarea y escribe exactamente un mensaje en `output`.
///
/// El trabajo corre en su propia tarea de tokio; si algo adentro hace panic
/// igual se emite un mensaje de fallo, así el pool nunca pierde un slot.
pub async fn run<S, E>(task: Task<E>, source: Arc<S>, output: mpsc::Sender<CompletionMessage>)
where
    S: ExpressionSource,
    E: Evaluator,
{
    let (id, serial) = (task.id, task.serial);

    let handle = tokio::spawn(execute(task, source));
    let message = match handle.await {
        Ok(message) => message,
        Err(e) => {
            warn!("panic o join error en slot {} (serial {}): {:?}", id, serial, e);
            let err = TaskError::Panicked(e.to_string());
            CompletionMessage::failure(id, serial, String::new(), 0, err.to_string())
        }
    };

    // sólo falla si el supervisor ya no existe
    if output.send(message).await.is_err() {
        warn!("canal de completions cerrado, descartando resultado del slot {}", id);
    }
}

async fn execute<S, E>(task: Task<E>, source: Arc<S>) -> CompletionMessage
where
    S: ExpressionSource,
    E: Evaluator,
{
    let expression = match source.generate(task.expr_len) {
        Ok(expr) => expr,
        Err(e) => {
            return CompletionMessage::failure(task.id, task.serial, String::new(), 0, e.to_string())
        }
    };

    debug!("slot {} serial {} evaluando {}", task.id, task.serial, expression);

    match task.evaluator.evaluate(&expression).await {
        Ok(result) => CompletionMessage::success(task.id, task.serial, expression, result),
        Err(e) => {
            let partial = e.partial_result();
            CompletionMessage::failure(task.id, task.serial, expression, partial, e.to_string())
        }
    }
}
