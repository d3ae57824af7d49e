// src/common/envelope.rs

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::error::ApiError;

/// Normaliza a resposta da API: `{ success, data, message }` ou valor puro.
///
/// Envelope com `success: true` devolve `data` (ou `null`); com
/// `success: false` vira um `ApiError` com a mensagem do servidor.
pub fn unwrap_envelope(value: Value, fallback_message: &str) -> Result<Value, ApiError> {
    let success = match value.as_object().and_then(|obj| obj.get("success")) {
        Some(Value::Bool(success)) => *success,
        _ => return Ok(value),
    };

    if success {
        let data = match value {
            Value::Object(mut obj) => obj.remove("data").unwrap_or(Value::Null),
            _ => Value::Null,
        };
        Ok(data)
    } else {
        Err(ApiError::from_error_value(None, &value, fallback_message))
    }
}

/// `data ?? []`: lista ausente vira lista vazia.
pub fn into_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn unwraps_successful_envelope() {
        let value = json!({ "success": true, "data": [{ "id": 1 }] });
        assert_eq!(unwrap_envelope(value, "x").unwrap(), json!([{ "id": 1 }]));
    }

    #[test]
    fn passes_bare_values_through() {
        let value = json!([{ "id": 1, "name": "Laptops" }]);
        assert_eq!(unwrap_envelope(value.clone(), "x").unwrap(), value);
    }

    #[test]
    fn failed_envelope_becomes_api_error() {
        let value = json!({ "success": false, "message": "Kategorie existiert bereits" });
        let err = unwrap_envelope(value, "x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.field.as_deref(), Some("name"));
        assert_eq!(err.message, "Kategorie existiert bereits");
    }

    #[test]
    fn missing_data_is_an_empty_list() {
        let data = unwrap_envelope(json!({ "success": true }), "x").unwrap();
        let rows: Vec<Value> = into_list(data).unwrap();
        assert!(rows.is_empty());
    }
}
