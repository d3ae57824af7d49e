// src/models/entity.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::common::error::AppError;
use crate::models::validation::required_text;

/// Registro de uma tela de configurações (categoria, departamento, ...).
pub trait Entity: Clone + Send + Sync + DeserializeOwned + 'static {
    type Form: EntityForm<Self>;

    /// Caminho REST da coleção, ex.: "/categories".
    const RESOURCE: &'static str;

    fn id(&self) -> i64;
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    fn is_active(&self) -> bool {
        true
    }

    /// Escopo de unicidade do nome. `None` = coleção inteira.
    fn uniqueness_scope(&self) -> Option<i64> {
        None
    }

    fn created_at(&self) -> Option<&DateTime<Utc>> {
        None
    }

    fn updated_at(&self) -> Option<&DateTime<Utc>> {
        None
    }
}

/// Estado editável do diálogo para uma entidade `E`.
pub trait EntityForm<E>: Clone + Default + Validate + Send + Sync {
    type Payload: Serialize + Send + Sync;

    fn from_entity(entity: &E) -> Self;
    fn name(&self) -> &str;

    fn uniqueness_scope(&self) -> Option<i64> {
        None
    }

    /// Valores atuais na ordem de exibição do formulário.
    fn fields(&self) -> Vec<FormField>;

    /// Altera um campo pela chave de `fields()`, a partir do texto digitado.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    /// Payload com strings aparadas e opcionais vazios omitidos.
    fn to_payload(&self) -> Self::Payload;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    pub fn new(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
        }
    }
}

// ---
// Helpers de formulário
// ---

/// `Some(trimmed)` ou `None` para texto em branco.
pub fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn text_of(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

pub fn number_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "ja" | "yes" | "aktiv" | "active" => Ok(true),
        "false" | "0" | "nein" | "no" | "inaktiv" | "inactive" => Ok(false),
        _ => Err(AppError::InvalidFieldValue(key.to_string(), value.to_string())),
    }
}

/// Texto vazio limpa o campo.
pub fn parse_optional<T: FromStr>(key: &str, value: &str) -> Result<Option<T>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::InvalidFieldValue(key.to_string(), value.to_string()))
}

// ---
// Formulário básico: nome, descrição e status
// (categorias, departamentos e grupos de usuários)
// ---

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BasicForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl Default for BasicForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl BasicForm {
    pub fn seeded(name: &str, description: Option<&str>, is_active: bool) -> Self {
        Self {
            name: name.to_string(),
            description: text_of(description),
            is_active,
        }
    }

    pub(crate) fn basic_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", self.name.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    pub(crate) fn set_basic_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    pub(crate) fn basic_payload(&self) -> BasicPayload {
        BasicPayload {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
            is_active: self.is_active,
        }
    }
}
