// src/common/case.rs
// Conversão de chaves entre o camelCase do cliente e o snake_case da API.

use serde_json::{Map, Value};

/// "manufacturerId" -> "manufacturer_id"
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// "manufacturer_id" -> "manufacturerId". Um "_" inicial é preservado.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for (i, ch) in key.chars().enumerate() {
        if ch == '_' && i > 0 {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Converte recursivamente todas as chaves de objetos para snake_case (corpo enviado à API).
pub fn keys_to_snake(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, val)| (to_snake_case(&key), keys_to_snake(val)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(keys_to_snake).collect()),
        other => other,
    }
}

/// Converte recursivamente as chaves para camelCase (resposta recebida da API).
///
/// Algumas respostas trazem o mesmo campo nas duas grafias
/// (`manufacturer_id` e `manufacturerId`). Nesse caso vence a chave que já
/// estava em camelCase.
pub fn keys_to_camel(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            let mut converted = Vec::new();

            for (key, val) in map {
                let camel = to_camel_case(&key);
                if camel == key {
                    out.insert(key, keys_to_camel(val));
                } else {
                    converted.push((camel, val));
                }
            }

            for (key, val) in converted {
                if !out.contains_key(&key) {
                    out.insert(key, keys_to_camel(val));
                }
            }

            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(keys_to_camel).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_single_keys() {
        assert_eq!(to_snake_case("isActive"), "is_active");
        assert_eq!(to_snake_case("ipAddress"), "ip_address");
        assert_eq!(to_snake_case("name"), "name");
        assert_eq!(to_camel_case("manufacturer_id"), "manufacturerId");
        assert_eq!(to_camel_case("contact_email"), "contactEmail");
        assert_eq!(to_camel_case("_links"), "_links");
    }

    #[test]
    fn converts_nested_bodies() {
        let body = json!({ "portCount": 24, "room": { "locationId": 3 }, "tags": [{ "isActive": true }] });
        assert_eq!(
            keys_to_snake(body),
            json!({ "port_count": 24, "room": { "location_id": 3 }, "tags": [{ "is_active": true }] })
        );
    }

    #[test]
    fn camel_case_key_wins_over_snake_duplicate() {
        let body = json!({ "manufacturer_id": 1, "manufacturerId": 2, "category_id": 5 });
        assert_eq!(keys_to_camel(body), json!({ "manufacturerId": 2, "categoryId": 5 }));
    }
}
