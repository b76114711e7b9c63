// ============================================================================
// FORM VIEWMODEL - Valores del formulario de alta/edición
// ============================================================================
// Un solo formulario para todas las entidades: los campos salen del esquema
// del `EntityConfig`. Sin validación; los numéricos solo se convierten.
// ============================================================================

use serde_json::{Map, Number, Value};

use crate::models::{Entity, FieldKind, FieldSpec};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    values: Vec<(&'static str, String)>,
}

impl FormState {
    /// Formulario vacío con un valor por campo del esquema
    pub fn empty(fields: &'static [FieldSpec]) -> Self {
        Self {
            values: fields.iter().map(|f| (f.name, String::new())).collect(),
        }
    }

    /// Formulario precargado desde un registro existente
    pub fn from_entity<E: Entity>(fields: &'static [FieldSpec], entity: &E) -> Self {
        Self {
            values: fields.iter().map(|f| (f.name, entity.field_value(f.name))).collect(),
        }
    }

    pub fn get(&self, field: &str) -> &str {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Devuelve `false` si el campo no pertenece al esquema
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|(_, v)| v.is_empty())
    }

    /// Cuerpo JSON del POST/PUT
    pub fn to_body(&self, fields: &'static [FieldSpec]) -> Value {
        let mut body = Map::new();
        for field in fields {
            body.insert(field.name.to_string(), coerce(field.kind, self.get(field.name)));
        }
        Value::Object(body)
    }
}

/// Numérico si se puede interpretar; si no, el texto tal cual (decide el servidor)
fn coerce(kind: FieldKind, raw: &str) -> Value {
    let trimmed = raw.trim();
    let number = match kind {
        FieldKind::Text => None,
        FieldKind::Integer => trimmed.parse::<i64>().ok().map(Number::from),
        FieldKind::Decimal => trimmed.parse::<f64>().ok().and_then(Number::from_f64),
    };
    number
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}
