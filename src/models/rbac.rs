// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::error::AppError;
use crate::common::serde_utils::{default_active, deserialize_optional_datetime};
use crate::models::entity::{Entity, EntityForm, FormField, optional_text, parse_flag, text_of};
use crate::models::validation::required_text;

// O que vem da API (Cargos)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permission_ids: Vec<i64>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

// Permissões do sistema (somente leitura)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: i64,
    /// Ex.: "categories:create"
    pub name: String,
    /// Ex.: "categories"
    pub module: String,
    /// Texto livre, ex.: "add", "view", "bearbeiten"
    pub action: Option<String>,
    pub description: Option<String>,
}

impl Permission {
    /// Ação declarada ou, na falta dela, o sufixo do nome ("categories:create" -> "create").
    pub fn action_name(&self) -> &str {
        match self.action.as_deref().map(str::trim) {
            Some(action) if !action.is_empty() => action,
            _ => self
                .name
                .rsplit(|c: char| c == ':' || c == '.')
                .next()
                .unwrap_or(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RoleForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    pub description: String,
    pub is_active: bool,
    // Mantidos ao renomear, para não apagar as permissões do cargo
    pub permission_ids: Vec<i64>,
}

impl Default for RoleForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_active: true,
            permission_ids: Vec::new(),
        }
    }
}

// O Payload para criar/atualizar um cargo: sempre a lista completa
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub permission_ids: Vec<i64>,
}

impl RolePayload {
    pub fn for_role(role: &Role, permission_ids: Vec<i64>) -> Self {
        Self {
            name: role.name.trim().to_string(),
            description: role.description.as_deref().and_then(optional_text),
            is_active: role.is_active,
            permission_ids,
        }
    }
}

impl Entity for Role {
    type Form = RoleForm;
    const RESOURCE: &'static str = "/roles";

    fn id(&self) -> i64 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }
    fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
    }
}

impl EntityForm<Role> for RoleForm {
    type Payload = RolePayload;

    fn from_entity(entity: &Role) -> Self {
        Self {
            name: entity.name.clone(),
            description: text_of(entity.description.as_deref()),
            is_active: entity.is_active,
            permission_ids: entity.permission_ids.clone(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FormField> {
        let ids = self
            .permission_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            FormField::new("name", "Name", self.name.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
            FormField::new("permission_ids", "Berechtigungen", ids),
        ]
    }

    // Permissões só mudam pela matriz
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> RolePayload {
        RolePayload {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
            is_active: self.is_active,
            permission_ids: self.permission_ids.clone(),
        }
    }
}
