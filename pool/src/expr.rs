use rand::Rng;

use crate::error::TaskError;

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Fuente de expresiones aritméticas.
pub trait ExpressionSource: Send + Sync + 'static {
    /// Devuelve una expresión con `length` operandos.
    fn generate(&self, length: u8) -> Result<String, TaskError>;
}

/// Expresiones pseudoaleatorias: dígitos 0..=9 separados por `+ - * /`,
/// ej: "3*7-0/2+5". Puede salir una división por cero, y es a propósito.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomExpressions;

impl ExpressionSource for RandomExpressions {
    fn generate(&self, length: u8) -> Result<String, TaskError> {
        generate_with(&mut rand::rng(), length)
    }
}

/// Igual que `RandomExpressions` pero con un RNG explícito (útil con semilla).
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: u8) -> Result<String, TaskError> {
    if length == 0 {
        return Err(TaskError::Generate(
            "expression length must be greater than zero".to_string(),
        ));
    }

    let mut expr = String::with_capacity(length as usize * 2);
    for i in 0..length {
        if i > 0 {
            expr.push(OPERATORS[rng.random_range(0..OPERATORS.len())]);
        }
        let digit = rng.random_range(0..=9u32);
        // digit < 10, from_digit nunca devuelve None
        expr.push(char::from_digit(digit, 10).unwrap_or('0'));
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn longitud_uno_es_un_digito() {
        let expr = RandomExpressions.generate(1).unwrap();
        assert_eq!(expr.len(), 1);
        assert!(expr.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn alterna_digitos_y_operadores() {
        let expr = RandomExpressions.generate(5).unwrap();
        assert_eq!(expr.len(), 9);

        for (i, c) in expr.chars().enumerate() {
            if i % 2 == 0 {
                assert!(c.is_ascii_digit(), "esperaba dígito en {i}: {expr}");
            } else {
                assert!(OPERATORS.contains(&c), "esperaba operador en {i}: {expr}");
            }
        }
    }

    #[test]
    fn longitud_cero_es_error() {
        let err = RandomExpressions.generate(0).unwrap_err();
        assert!(matches!(err, TaskError::Generate(_)));
    }

    #[test]
    fn misma_semilla_misma_expresion() {
        let a = generate_with(&mut StdRng::seed_from_u64(42), 6).unwrap();
        let b = generate_with(&mut StdRng::seed_from_u64(42), 6).unwrap();
        assert_eq!(a, b);
    }
}
