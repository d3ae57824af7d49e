// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::error::AppError;
use crate::common::serde_utils::{default_active, deserialize_optional_datetime};
use crate::models::entity::{
    BasicForm, BasicPayload, Entity, EntityForm, FormField, number_text, optional_text, parse_flag,
    parse_optional, text_of,
};
use crate::models::validation::{optional_email, optional_url, required_text};

// --- 1. Categorias ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
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

impl Entity for Category {
    type Form = BasicForm;
    const RESOURCE: &'static str = "/categories";

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

impl EntityForm<Category> for BasicForm {
    type Payload = BasicPayload;

    fn from_entity(entity: &Category) -> Self {
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

// --- 2. Fabricantes ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ManufacturerForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "optional_url"))]
    pub website: String,
    #[validate(custom(function = "optional_email"))]
    pub contact_email: String,
    pub contact_phone: String,
    pub is_active: bool,
}

impl Default for ManufacturerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            website: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub is_active: bool,
}

impl Entity for Manufacturer {
    type Form = ManufacturerForm;
    const RESOURCE: &'static str = "/manufacturers";

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

impl EntityForm<Manufacturer> for ManufacturerForm {
    type Payload = ManufacturerPayload;

    fn from_entity(entity: &Manufacturer) -> Self {
        Self {
            name: entity.name.clone(),
            description: text_of(entity.description.as_deref()),
            website: text_of(entity.website.as_deref()),
            contact_email: text_of(entity.contact_email.as_deref()),
            contact_phone: text_of(entity.contact_phone.as_deref()),
            is_active: entity.is_active,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", self.name.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("website", "Webseite", self.website.clone()),
            FormField::new("contact_email", "Kontakt-E-Mail", self.contact_email.clone()),
            FormField::new("contact_phone", "Kontakt-Telefon", self.contact_phone.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "website" => self.website = value.to_string(),
            "contact_email" => self.contact_email = value.to_string(),
            "contact_phone" => self.contact_phone = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> ManufacturerPayload {
        ManufacturerPayload {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
            website: optional_text(&self.website),
            contact_email: optional_text(&self.contact_email),
            contact_phone: optional_text(&self.contact_phone),
            is_active: self.is_active,
        }
    }
}

// --- 3. Fornecedores ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SupplierForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    pub description: String,
    pub contact_person: String,
    #[validate(custom(function = "optional_email"))]
    pub contact_email: String,
    pub contact_phone: String,
    #[validate(custom(function = "optional_url"))]
    pub website: String,
    pub address: String,
    pub is_active: bool,
}

impl Default for SupplierForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            contact_person: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            website: String::new(),
            address: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub is_active: bool,
}

impl Entity for Supplier {
    type Form = SupplierForm;
    const RESOURCE: &'static str = "/suppliers";

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

impl EntityForm<Supplier> for SupplierForm {
    type Payload = SupplierPayload;

    fn from_entity(entity: &Supplier) -> Self {
        Self {
            name: entity.name.clone(),
            description: text_of(entity.description.as_deref()),
            contact_person: text_of(entity.contact_person.as_deref()),
            contact_email: text_of(entity.contact_email.as_deref()),
            contact_phone: text_of(entity.contact_phone.as_deref()),
            website: text_of(entity.website.as_deref()),
            address: text_of(entity.address.as_deref()),
            is_active: entity.is_active,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", self.name.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("contact_person", "Ansprechpartner", self.contact_person.clone()),
            FormField::new("contact_email", "Kontakt-E-Mail", self.contact_email.clone()),
            FormField::new("contact_phone", "Kontakt-Telefon", self.contact_phone.clone()),
            FormField::new("website", "Webseite", self.website.clone()),
            FormField::new("address", "Adresse", self.address.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "contact_person" => self.contact_person = value.to_string(),
            "contact_email" => self.contact_email = value.to_string(),
            "contact_phone" => self.contact_phone = value.to_string(),
            "website" => self.website = value.to_string(),
            "address" => self.address = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> SupplierPayload {
        SupplierPayload {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
            contact_person: optional_text(&self.contact_person),
            contact_email: optional_text(&self.contact_email),
            contact_phone: optional_text(&self.contact_phone),
            website: optional_text(&self.website),
            address: optional_text(&self.address),
            is_active: self.is_active,
        }
    }
}

// --- 4. Modelos de dispositivo ---
// O nome é único por fabricante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceModel {
    pub id: i64,
    pub name: String,
    pub manufacturer_id: i64,
    pub manufacturer_name: Option<String>,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub hdd: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct DeviceModelForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[validate(required)]
    pub manufacturer_id: Option<i64>,
    #[validate(required)]
    pub category_id: Option<i64>,
    pub cpu: String,
    pub ram: String,
    pub hdd: String,
    pub description: String,
    pub is_active: bool,
}

impl Default for DeviceModelForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            manufacturer_id: None,
            category_id: None,
            cpu: String::new(),
            ram: String::new(),
            hdd: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceModelPayload {
    pub name: String,
    pub manufacturer_id: Option<i64>,
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl Entity for DeviceModel {
    type Form = DeviceModelForm;
    const RESOURCE: &'static str = "/device-models";

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
        Some(self.manufacturer_id)
    }
    fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }
    fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
    }
}

impl EntityForm<DeviceModel> for DeviceModelForm {
    type Payload = DeviceModelPayload;

    fn from_entity(entity: &DeviceModel) -> Self {
        Self {
            name: entity.name.clone(),
            manufacturer_id: Some(entity.manufacturer_id),
            category_id: Some(entity.category_id),
            cpu: text_of(entity.cpu.as_deref()),
            ram: text_of(entity.ram.as_deref()),
            hdd: text_of(entity.hdd.as_deref()),
            description: text_of(entity.description.as_deref()),
            is_active: entity.is_active,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn uniqueness_scope(&self) -> Option<i64> {
        self.manufacturer_id
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", self.name.clone()),
            FormField::new("manufacturer_id", "Hersteller", number_text(self.manufacturer_id)),
            FormField::new("category_id", "Kategorie", number_text(self.category_id)),
            FormField::new("cpu", "CPU", self.cpu.clone()),
            FormField::new("ram", "RAM", self.ram.clone()),
            FormField::new("hdd", "HDD", self.hdd.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "manufacturer_id" => self.manufacturer_id = parse_optional(key, value)?,
            "category_id" => self.category_id = parse_optional(key, value)?,
            "cpu" => self.cpu = value.to_string(),
            "ram" => self.ram = value.to_string(),
            "hdd" => self.hdd = value.to_string(),
            "description" => self.description = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> DeviceModelPayload {
        DeviceModelPayload {
            name: self.name.trim().to_string(),
            manufacturer_id: self.manufacturer_id,
            category_id: self.category_id,
            cpu: optional_text(&self.cpu),
            ram: optional_text(&self.ram),
            hdd: optional_text(&self.hdd),
            description: optional_text(&self.description),
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_reads_active_alias_and_defaults() {
        let category: Category =
            serde_json::from_value(json!({ "id": 1, "name": "Laptops", "active": false })).unwrap();
        assert!(!category.is_active);

        let category: Category = serde_json::from_value(json!({ "id": 2, "name": "Monitore" })).unwrap();
        assert!(category.is_active);
        assert_eq!(category.created_at, None);
    }

    #[test]
    fn manufacturer_form_checks_formats() {
        let form = ManufacturerForm {
            name: "Dell".into(),
            website: "dell".into(),
            contact_email: "support(at)dell.com".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["website"][0].code, "url");
        assert_eq!(fields["contact_email"][0].code, "email");
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn device_model_requires_foreign_keys() {
        let form = DeviceModelForm {
            name: "Latitude 5440".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("manufacturer_id"));
        assert!(fields.contains_key("category_id"));
    }

    #[test]
    fn device_model_scope_is_the_manufacturer() {
        let model: DeviceModel = serde_json::from_value(json!({
            "id": 3, "name": "Latitude", "manufacturerId": 9, "categoryId": 1
        }))
        .unwrap();
        assert_eq!(model.uniqueness_scope(), Some(9));
        assert_eq!(DeviceModelForm::from_entity(&model).uniqueness_scope(), Some(9));
    }
}
