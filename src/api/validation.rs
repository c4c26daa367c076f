use serde_json::{Map, Value};

use crate::models::{DogPatch, NewDog};

use super::error::ApiError;

pub const ALLOWED_KEYS: [&str; 4] = ["name", "description", "breed", "age"];

pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}

/// Validates a create body. Disallowed keys are rejected before any field
/// errors are reported; field errors are then collected into one list.
pub fn parse_new_dog(body: &Value) -> Result<NewDog, ApiError> {
    let empty = Map::new();
    let obj = body.as_object().unwrap_or(&empty);

    let invalid_keys: Vec<String> = obj
        .keys()
        .filter(|k| !ALLOWED_KEYS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !invalid_keys.is_empty() {
        return Err(ApiError::InvalidKeys(invalid_keys));
    }

    let mut errors = Vec::new();

    let name = match obj.get("name") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => {
            errors.push("name should be a string".to_string());
            None
        }
    };

    let description = match obj.get("description") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => {
            errors.push("description should be a string".to_string());
            None
        }
    };

    let breed = match obj.get("breed") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push("breed should be a string".to_string());
            None
        }
    };

    let age = match obj.get("age") {
        None | Some(Value::Null) => None,
        Some(v) => match coerce_age(v) {
            Some(n) => Some(n),
            None => {
                errors.push("age should be a number".to_string());
                None
            }
        },
    };

    match (name, description) {
        (Some(name), Some(description)) if errors.is_empty() => Ok(NewDog {
            name,
            description,
            breed,
            age,
        }),
        _ => Err(ApiError::FieldErrors(errors)),
    }
}

/// Builds a partial update from a patch body. Any unknown key (including
/// `id`, which is immutable) or wrong-typed value rejects the whole patch.
pub fn parse_dog_patch(body: &Value) -> Result<DogPatch, ApiError> {
    let obj = body.as_object().ok_or(ApiError::UpdateRejected)?;

    let mut patch = DogPatch::default();
    for (key, value) in obj {
        match key.as_str() {
            "name" => match value {
                Value::String(s) => patch.name = Some(s.clone()),
                _ => return Err(ApiError::UpdateRejected),
            },
            "description" => match value {
                Value::String(s) => patch.description = Some(s.clone()),
                _ => return Err(ApiError::UpdateRejected),
            },
            "breed" => match value {
                Value::Null => {}
                Value::String(s) => patch.breed = Some(s.clone()),
                _ => return Err(ApiError::UpdateRejected),
            },
            "age" => match value {
                Value::Null => {}
                v => patch.age = Some(coerce_age(v).ok_or(ApiError::UpdateRejected)?),
            },
            _ => return Err(ApiError::UpdateRejected),
        }
    }

    Ok(patch)
}

/// Numeric-string coercion: `3` and `"3"` both count as an age of 3.
fn coerce_age(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
