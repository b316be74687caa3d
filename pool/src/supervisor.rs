use std::sync::Arc;

use common::{CompletionMessage, SlotId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::evaluator::Evaluator;
use crate::expr::ExpressionSource;
use crate::report::Reporter;
use crate::task::Task;
use crate::worker;

/// Mantiene N workers corriendo: por cada completion que llega lanza
/// exactamente un worker nuevo en el mismo slot.
///
/// No guarda un mapa de workers activos. Los contadores son campos propios
/// del loop del supervisor y ningún worker los toca.
pub struct Supervisor<S, E> {
    expr_len: u8,
    source: Arc<S>,
    /// Prototipo: cada tarea recibe un clon ligado al mismo endpoint
    evaluator: E,
    tx: mpsc::Sender<CompletionMessage>,
    rx: mpsc::Receiver<CompletionMessage>,
    next_serial: u64,
    spawned: u64,
    received: u64,
}

impl<S, E> Supervisor<S, E>
where
    S: ExpressionSource,
    E: Evaluator,
{
    /// Crea el canal de completions y lanza los `pool_size` workers iniciales
    /// (slots 0..N-1, serial 0). Es async para que sólo se pueda llamar
    /// desde un contexto de tokio, donde `tokio::spawn` tiene runtime.
    pub async fn start(config: &PoolConfig, source: S, evaluator: E) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_capacity());

        let mut supervisor = Self {
            expr_len: config.expr_len(),
            source: Arc::new(source),
            evaluator,
            tx,
            rx,
            next_serial: 0,
            spawned: 0,
            received: 0,
        };

        for id in 0..config.pool_size() {
            supervisor.spawn(id, 0);
        }

        info!(
            "pool iniciado con {} workers (expr_len={}, capacidad del canal={})",
            config.pool_size(),
            config.expr_len(),
            config.channel_capacity()
        );

        supervisor
    }

    fn spawn(&mut self, id: SlotId, serial: u64) {
        let task = Task::new(id, serial, self.expr_len, self.evaluator.clone());
        tokio::spawn(worker::run(task, Arc::clone(&self.source), self.tx.clone()));
        self.spawned += 1;
    }

    /// Espera el próximo mensaje, en orden de llegada.
    ///
    /// Como el supervisor guarda su propio sender, en la práctica nunca
    /// devuelve `None`.
    pub async fn recv(&mut self) -> Option<CompletionMessage> {
        let message = self.rx.recv().await?;
        self.received += 1;
        Some(message)
    }

    /// Lanza el reemplazo para `id` con el siguiente serial y lo devuelve.
    pub fn respawn(&mut self, id: SlotId) -> u64 {
        self.next_serial += 1;
        let serial = self.next_serial;
        debug!("relanzando slot {} con serial {}", id, serial);
        self.spawn(id, serial);
        serial
    }

    /// Loop principal: recibir, reportar, relanzar. Sólo termina si el canal
    /// se cierra.
    pub async fn run<R: Reporter>(mut self, reporter: &mut R) -> PoolError {
        while let Some(message) = self.recv().await {
            if let Err(e) = reporter.report(&message) {
                warn!("no se pudo reportar el resultado del slot {}: {}", message.id, e);
            }
            self.respawn(message.id);
        }

        PoolError::ChannelClosed
    }

    /// Workers lanzados cuyo mensaje todavía no se recibió.
    pub fn in_flight(&self) -> usize {
        (self.spawned - self.received) as usize
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}
