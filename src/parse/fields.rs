//! Tagged parse attempts for dirty cell values.
//!
//! Spreadsheet cells arrive as strings or numbers even when the column is
//! logically a list or an object, so every interpretation here is an
//! explicit attempt returning `Result`/`Option`. Callers turn failures into
//! findings; nothing in this module panics.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("not valid JSON: {0}")]
    BadJson(String),
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("expected an array of {{start, end}} objects")]
    BadSlotList,
    #[error("expected an array of phase numbers")]
    BadPhaseList,
}

/// One availability window. `start`/`end` are opaque timestamps to the
/// validation engine; only their presence and type are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub start: String,
    pub end: String,
}

/// Interpret a cell as a JSON object. Accepts an inline object or a
/// JSON-encoded string (the usual spreadsheet form).
pub fn parse_json_object(value: &Value) -> Result<Map<String, Value>, FieldError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(FieldError::NotAnObject),
            Err(e) => Err(FieldError::BadJson(e.to_string())),
        },
        _ => Err(FieldError::NotAnObject),
    }
}

/// Interpret a cell as a list of tags (skills, task ids). Total: a list
/// yields its elements, a string is comma-split, scalars become a single
/// tag. Entries are trimmed and empties dropped.
pub fn parse_tag_list(value: &Value) -> Vec<String> {
    let push = |out: &mut Vec<String>, s: &str| {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
    };

    let mut tags = Vec::new();
    match value {
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) => push(&mut tags, s),
                    Value::Number(n) => push(&mut tags, &n.to_string()),
                    _ => {}
                }
            }
        }
        Value::String(text) => {
            for part in text.split(',') {
                push(&mut tags, part);
            }
        }
        Value::Number(n) => push(&mut tags, &n.to_string()),
        _ => {}
    }
    tags
}

/// Interpret a cell as an array of `{start, end}` slot objects, either
/// inline or JSON-encoded. Both fields must be strings.
pub fn parse_slot_list(value: &Value) -> Result<Vec<Slot>, FieldError> {
    let items = match value {
        Value::Array(items) => items.clone(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => items,
            _ => return Err(FieldError::BadSlotList),
        },
        _ => return Err(FieldError::BadSlotList),
    };

    let mut slots = Vec::with_capacity(items.len());
    for item in &items {
        let Value::Object(obj) = item else {
            return Err(FieldError::BadSlotList);
        };
        match (obj.get("start"), obj.get("end")) {
            (Some(Value::String(start)), Some(Value::String(end))) => slots.push(Slot {
                start: start.clone(),
                end: end.clone(),
            }),
            _ => return Err(FieldError::BadSlotList),
        }
    }
    Ok(slots)
}

/// Interpret a cell as a list of phase numbers. Accepts an inline array,
/// a JSON-encoded array, a comma-separated string, an `a-b` range, or a
/// single number.
pub fn parse_phase_list(value: &Value) -> Result<Vec<i64>, FieldError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| parse_integer(v).ok_or(FieldError::BadPhaseList))
            .collect(),
        Value::Number(_) => Ok(vec![parse_integer(value).ok_or(FieldError::BadPhaseList)?]),
        Value::String(text) => parse_phase_text(text),
        _ => Err(FieldError::BadPhaseList),
    }
}

fn parse_phase_text(text: &str) -> Result<Vec<i64>, FieldError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Array(items)) => items
                .iter()
                .map(|v| parse_integer(v).ok_or(FieldError::BadPhaseList))
                .collect(),
            _ => Err(FieldError::BadPhaseList),
        };
    }
    // Range form "2-4" expands to every phase in between.
    if let Some((lo, hi)) = trimmed.split_once('-') {
        if let (Ok(lo), Ok(hi)) = (lo.trim().parse::<i64>(), hi.trim().parse::<i64>()) {
            if lo > hi {
                return Err(FieldError::BadPhaseList);
            }
            return Ok((lo..=hi).collect());
        }
        return Err(FieldError::BadPhaseList);
    }
    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| FieldError::BadPhaseList)
        })
        .collect()
}

/// Interpret a cell as an integer. Numeric strings and whole-valued floats
/// are accepted; anything else is `None`.
pub fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
                _ => None,
            }
        }
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(i);
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_inline_and_encoded() {
        assert!(parse_json_object(&json!({"a": 1})).is_ok());
        assert!(parse_json_object(&json!(r#"{"a": 1}"#)).is_ok());
    }

    #[test]
    fn json_object_rejects_scalars_arrays_and_garbage() {
        assert_eq!(parse_json_object(&json!([1, 2])), Err(FieldError::NotAnObject));
        assert_eq!(parse_json_object(&json!("[1, 2]")), Err(FieldError::NotAnObject));
        assert_eq!(parse_json_object(&json!(42)), Err(FieldError::NotAnObject));
        assert!(matches!(
            parse_json_object(&json!("{bad")),
            Err(FieldError::BadJson(_))
        ));
    }

    #[test]
    fn tag_list_splits_and_trims() {
        assert_eq!(parse_tag_list(&json!("welding, crane-ops ,")), vec!["welding", "crane-ops"]);
        assert_eq!(parse_tag_list(&json!(["a", " b "])), vec!["a", "b"]);
        assert!(parse_tag_list(&json!("")).is_empty());
        assert!(parse_tag_list(&Value::Null).is_empty());
    }

    #[test]
    fn slot_list_accepts_encoded_form() {
        let slots = parse_slot_list(&json!(r#"[{"start":"09:00","end":"12:00"}]"#)).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start, "09:00");
    }

    #[test]
    fn slot_list_rejects_bad_shapes() {
        assert_eq!(parse_slot_list(&json!([{"start": "09:00"}])), Err(FieldError::BadSlotList));
        assert_eq!(
            parse_slot_list(&json!([{"start": 9, "end": 12}])),
            Err(FieldError::BadSlotList)
        );
        assert_eq!(parse_slot_list(&json!("not json")), Err(FieldError::BadSlotList));
        assert_eq!(parse_slot_list(&json!(5)), Err(FieldError::BadSlotList));
    }

    #[test]
    fn phase_list_forms() {
        assert_eq!(parse_phase_list(&json!([1, 2, 3])).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_phase_list(&json!("[2,4]")).unwrap(), vec![2, 4]);
        assert_eq!(parse_phase_list(&json!("1,3, 5")).unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_phase_list(&json!("2-4")).unwrap(), vec![2, 3, 4]);
        assert_eq!(parse_phase_list(&json!(3)).unwrap(), vec![3]);
    }

    #[test]
    fn phase_list_rejects_non_numbers() {
        assert_eq!(parse_phase_list(&json!(["one"])), Err(FieldError::BadPhaseList));
        assert_eq!(parse_phase_list(&json!("soon")), Err(FieldError::BadPhaseList));
        assert_eq!(parse_phase_list(&json!("5-2")), Err(FieldError::BadPhaseList));
        assert_eq!(parse_phase_list(&json!({"phase": 1})), Err(FieldError::BadPhaseList));
    }

    #[test]
    fn integer_coercions() {
        assert_eq!(parse_integer(&json!(5)), Some(5));
        assert_eq!(parse_integer(&json!(5.0)), Some(5));
        assert_eq!(parse_integer(&json!("5")), Some(5));
        assert_eq!(parse_integer(&json!(" 5 ")), Some(5));
        assert_eq!(parse_integer(&json!(5.5)), None);
        assert_eq!(parse_integer(&json!("five")), None);
        assert_eq!(parse_integer(&Value::Null), None);
    }
}
