use common::SlotId;

/// Una unidad de trabajo: generar una expresión y evaluarla.
/// Es propiedad exclusiva del worker que la ejecuta.
#[derive(Debug, Clone)]
pub struct Task<E> {
    pub id: SlotId,
    /// Contador de generación, sólo diagnóstico
    pub serial: u64,
    pub expr_len: u8,
    pub evaluator: E,
}

impl<E> Task<E> {
    pub fn new(id: SlotId, serial: u64, expr_len: u8, evaluator: E) -> Self {
        Self {
            id,
            serial,
            expr_len,
            evaluator,
        }
    }
}
