// src/models/organization.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::error::AppError;
use crate::common::serde_utils::{default_active, deserialize_optional_datetime};
use crate::models::entity::{
    BasicForm, BasicPayload, Entity, EntityForm, FormField, number_text, optional_text, parse_flag,
    parse_optional, text_of,
};
use crate::models::validation::required_text;

// --- Departamentos ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Department {
    type Form = BasicForm;
    const RESOURCE: &'static str = "/departments";

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

impl EntityForm<Department> for BasicForm {
    type Payload = BasicPayload;

    fn from_entity(entity: &Department) -> Self {
        BasicForm::seeded(&entity.name, entity.description.as_deref(), entity.is_active)
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn fields(&self) -> Vec<FormField> {
        self.basic_fields()
    }
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.set_basic_field(key, value)
    }
    fn to_payload(&self) -> BasicPayload {
        self.basic_payload()
    }
}

// --- Grupos de usuários ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: Option<i64>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for UserGroup {
    type Form = BasicForm;
    const RESOURCE: &'static str = "/user-groups";

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

impl EntityForm<UserGroup> for BasicForm {
    type Payload = BasicPayload;

    fn from_entity(entity: &UserGroup) -> Self {
        BasicForm::seeded(&entity.name, entity.description.as_deref(), entity.is_active)
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn fields(&self) -> Vec<FormField> {
        self.basic_fields()
    }
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.set_basic_field(key, value)
    }
    fn to_payload(&self) -> BasicPayload {
        self.basic_payload()
    }
}

// --- Locais (prédios / filiais) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct LocationForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    pub address: String,
    pub description: String,
    pub is_active: bool,
}

impl Default for LocationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl Entity for Location {
    type Form = LocationForm;
    const RESOURCE: &'static str = "/locations";

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

impl EntityForm<Location> for LocationForm {
    type Payload = LocationPayload;

    fn from_entity(entity: &Location) -> Self {
        Self {
            name: entity.name.clone(),
            address: text_of(entity.address.as_deref()),
            description: text_of(entity.description.as_deref()),
            is_active: entity.is_active,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", self.name.clone()),
            FormField::new("address", "Adresse", self.address.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "address" => self.address = value.to_string(),
            "description" => self.description = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> LocationPayload {
        LocationPayload {
            name: self.name.trim().to_string(),
            address: optional_text(&self.address),
            description: optional_text(&self.description),
            is_active: self.is_active,
        }
    }
}

// --- Salas ---
// O nome é único por local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub location_name: Option<String>,
    pub floor: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RoomForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[validate(required)]
    pub location_id: Option<i64>,
    pub floor: String,
    pub description: String,
    pub is_active: bool,
}

impl Default for RoomForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            location_id: None,
            floor: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub name: String,
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl Entity for Room {
    type Form = RoomForm;
    const RESOURCE: &'static str = "/rooms";

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
    fn uniqueness_scope(&self) -> Option<i64> {
        Some(self.location_id)
    }
    fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }
    fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
    }
}

impl EntityForm<Room> for RoomForm {
    type Payload = RoomPayload;

    fn from_entity(entity: &Room) -> Self {
        Self {
            name: entity.name.clone(),
            location_id: Some(entity.location_id),
            floor: text_of(entity.floor.as_deref()),
            description: text_of(entity.description.as_deref()),
            is_active: entity.is_active,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn uniqueness_scope(&self) -> Option<i64> {
        self.location_id
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", self.name.clone()),
            FormField::new("location_id", "Standort", number_text(self.location_id)),
            FormField::new("floor", "Etage", self.floor.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "location_id" => self.location_id = parse_optional(key, value)?,
            "floor" => self.floor = value.to_string(),
            "description" => self.description = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> RoomPayload {
        RoomPayload {
            name: self.name.trim().to_string(),
            location_id: self.location_id,
            floor: optional_text(&self.floor),
            description: optional_text(&self.description),
            is_active: self.is_active,
        }
    }
}
