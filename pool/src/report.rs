use std::io::{self, Write};

use chrono::{DateTime, Utc};
use common::CompletionMessage;
use serde::Serialize;
use tracing::{info, warn};

/// Destino de cada `CompletionMessage`, en el orden en que el supervisor los procesa.
pub trait Reporter {
    fn report(&mut self, message: &CompletionMessage) -> io::Result<()>;
}

/// Una línea de texto por mensaje.
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, message: &CompletionMessage) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    message: &'a CompletionMessage,
    reported_at: DateTime<Utc>,
}

/// JSON lines, con la hora en que se reportó.
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, message: &CompletionMessage) -> io::Result<()> {
        let line = JsonLine {
            message,
            reported_at: Utc::now(),
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Reporta por tracing: info si salió bien, warn si no.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, m: &CompletionMessage) -> io::Result<()> {
        match &m.error {
            None => info!(
                "slot {} serial {}: {} = {}",
                m.id, m.serial, m.expression, m.result
            ),
            Some(err) => warn!(
                "slot {} serial {}: {} falló: {}",
                m.id, m.serial, m.expression, err
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
impl Reporter for Vec<CompletionMessage> {
    fn report(&mut self, message: &CompletionMessage) -> io::Result<()> {
        self.push(message.clone());
        Ok(())
    }
}
