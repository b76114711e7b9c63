// ============================================================================
// LENIENT - Decodificación tolerante de campos numéricos
// ============================================================================
// Los formularios envían el valor crudo del input, así que el backend puede
// devolver "12.50" en lugar de 12.5. Aceptamos ambas formas.
// ============================================================================

use serde::de::{Deserializer, Error};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(serde_json::Number),
    Text(String),
    Null(()),
}

pub fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("número fuera de rango: {}", n))),
        Raw::Text(s) if s.trim().is_empty() => Ok(0.0),
        Raw::Text(s) => s.trim().parse().map_err(D::Error::custom),
        Raw::Null(()) => Ok(0.0),
    }
}

pub fn i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => match n.as_i64() {
            Some(value) => Ok(value),
            None => n
                .as_f64()
                .and_then(integral)
                .ok_or_else(|| D::Error::custom(format!("se esperaba un entero: {}", n))),
        },
        Raw::Text(s) if s.trim().is_empty() => Ok(0),
        Raw::Text(s) => {
            let s = s.trim();
            s.parse::<i64>().or_else(|_| {
                s.parse::<f64>()
                    .ok()
                    .and_then(integral)
                    .ok_or_else(|| D::Error::custom(format!("se esperaba un entero: {}", s)))
            })
        }
        Raw::Null(()) => Ok(0),
    }
}

/// `3.0` / `"3.00"` (columnas DECIMAL) cuentan como entero; `1.5` no
fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .then_some(value as i64)
}

/// Texto que a veces llega como número (p. ej. NIT o teléfono)
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n.to_string()),
        Raw::Text(s) => Ok(s),
        Raw::Null(()) => Ok(String::new()),
    }
}
