//! Input validation for item payloads.
//!
//! Gates every write so the repository and the store only ever receive
//! well-typed, non-empty, non-negative data. Full (create/PUT) and partial
//! (PATCH) payloads share one rule set; partial validation is the same set
//! with every field optional, so PUT and PATCH can never diverge on what a
//! valid `name` or `quantity` means.
//!
//! Validation runs on the raw JSON value rather than a deserialized struct,
//! so a wrong-typed field (a string `quantity`, a numeric `name`) is
//! reported as a field violation like any other rule failure instead of
//! failing at the deserializer with a different status code.
//!
//! Unknown JSON keys are ignored rather than rejected. That is a deliberate
//! policy, not an oversight: clients may send extra keys without breaking.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Validated fields for a create or full update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub quantity: i32,
}

/// Validated fields for a partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<i32>,
}

impl ItemPatch {
    /// True when no field was supplied; a patch with no fields is a no-op
    /// and degrades to a read at the repository.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none()
    }
}

/// A single per-field rule failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Rejection of client input before it reaches the store.
///
/// Always carries the full list of per-field violations so callers can
/// report which fields failed and why, never a single opaque message.
#[derive(Debug, Clone, Error)]
#[error("validation failed on {} field(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

const PAYLOAD_NOT_OBJECT: &str = "payload deve ser um objeto JSON";
const NAME_EMPTY: &str = "name não pode ser vazio";
const NAME_REQUIRED: &str = "name é obrigatório";
const NAME_NOT_TEXT: &str = "name deve ser um texto";
const QUANTITY_NEGATIVE: &str = "quantity deve ser >= 0";
const QUANTITY_REQUIRED: &str = "quantity é obrigatório";
const QUANTITY_NOT_INTEGER: &str = "quantity deve ser um inteiro";

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or_else(|| ValidationError {
        violations: vec![FieldViolation::new("payload", PAYLOAD_NOT_OBJECT)],
    })
}

/// Checks a present `name` value: must be a non-empty JSON string.
fn checked_name(value: &Value, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match value {
        Value::String(name) => {
            if name.is_empty() {
                violations.push(FieldViolation::new("name", NAME_EMPTY));
                return None;
            }
            Some(name.clone())
        }
        _ => {
            violations.push(FieldViolation::new("name", NAME_NOT_TEXT));
            None
        }
    }
}

/// Checks a present `quantity` value: must be a JSON integer (no strings,
/// no fractional numbers) that fits i32 and is not negative.
fn checked_quantity(value: &Value, violations: &mut Vec<FieldViolation>) -> Option<i32> {
    match value.as_i64().and_then(|quantity| i32::try_from(quantity).ok()) {
        Some(quantity) => {
            if quantity < 0 {
                violations.push(FieldViolation::new("quantity", QUANTITY_NEGATIVE));
                return None;
            }
            Some(quantity)
        }
        None => {
            violations.push(FieldViolation::new("quantity", QUANTITY_NOT_INTEGER));
            None
        }
    }
}

/// Validate a full payload: both fields mandatory, `name` a non-empty
/// string, `quantity` a non-negative integer.
pub fn validate_create(payload: &Value) -> Result<NewItem, ValidationError> {
    let object = as_object(payload)?;
    let mut violations = Vec::new();

    let name = match object.get("name") {
        Some(value) => checked_name(value, &mut violations),
        None => {
            violations.push(FieldViolation::new("name", NAME_REQUIRED));
            None
        }
    };
    let quantity = match object.get("quantity") {
        Some(value) => checked_quantity(value, &mut violations),
        None => {
            violations.push(FieldViolation::new("quantity", QUANTITY_REQUIRED));
            None
        }
    };

    match (name, quantity) {
        (Some(name), Some(quantity)) => Ok(NewItem { name, quantity }),
        _ => Err(ValidationError { violations }),
    }
}

/// Validate a partial payload: same rules as [`validate_create`], but only
/// for the fields actually present. An empty payload is valid and yields an
/// empty patch.
pub fn validate_partial(payload: &Value) -> Result<ItemPatch, ValidationError> {
    let object = as_object(payload)?;
    let mut violations = Vec::new();

    let name = object
        .get("name")
        .and_then(|value| checked_name(value, &mut violations));
    let quantity = object
        .get("quantity")
        .and_then(|value| checked_quantity(value, &mut violations));

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(ItemPatch { name, quantity })
}
