// src/models/network.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::error::AppError;
use crate::common::serde_utils::{default_active, deserialize_optional_datetime};
use crate::models::entity::{
    Entity, EntityForm, FormField, number_text, optional_text, parse_flag, parse_optional, text_of,
};
use crate::models::validation::{optional_ip, required_text};

// --- Dosen / Netzwerkports ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPort {
    pub id: i64,
    pub name: String,
    pub room_id: i64,
    pub room_name: Option<String>,
    // Registros antigos podem vir sem número de porta
    #[serde(default)]
    pub port_number: Option<u32>,
    pub description: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NetworkPortForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[validate(required)]
    pub room_id: Option<i64>,
    #[validate(required, range(min = 1))]
    pub port_number: Option<u32>,
    pub description: String,
    pub is_active: bool,
}

impl Default for NetworkPortForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            room_id: None,
            port_number: None,
            description: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPortPayload {
    pub name: String,
    pub room_id: Option<i64>,
    pub port_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl Entity for NetworkPort {
    type Form = NetworkPortForm;
    const RESOURCE: &'static str = "/network-ports";

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

impl EntityForm<NetworkPort> for NetworkPortForm {
    type Payload = NetworkPortPayload;

    fn from_entity(entity: &NetworkPort) -> Self {
        Self {
            name: entity.name.clone(),
            room_id: Some(entity.room_id),
            port_number: entity.port_number,
            description: text_of(entity.description.as_deref()),
            is_active: entity.is_active,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("name", "Bezeichnung", self.name.clone()),
            FormField::new("room_id", "Raum", number_text(self.room_id)),
            FormField::new("port_number", "Portnummer", number_text(self.port_number)),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "room_id" => self.room_id = parse_optional(key, value)?,
            "port_number" => self.port_number = parse_optional(key, value)?,
            "description" => self.description = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> NetworkPortPayload {
        NetworkPortPayload {
            name: self.name.trim().to_string(),
            room_id: self.room_id,
            port_number: self.port_number,
            description: optional_text(&self.description),
            is_active: self.is_active,
        }
    }
}

// --- Switches ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Switch {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub location_name: Option<String>,
    pub room_id: Option<i64>,
    pub room_name: Option<String>,
    pub manufacturer_id: Option<i64>,
    pub manufacturer_name: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub port_count: Option<u32>,
    pub rack_position: Option<String>,
    pub ip_address: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SwitchForm {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[validate(required)]
    pub location_id: Option<i64>,
    pub room_id: Option<i64>,
    pub manufacturer_id: Option<i64>,
    pub model: String,
    #[validate(required, range(min = 1))]
    pub port_count: Option<u32>,
    pub rack_position: String,
    #[validate(custom(function = "optional_ip"))]
    pub ip_address: String,
    pub description: String,
    pub is_active: bool,
}

impl Default for SwitchForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            location_id: None,
            room_id: None,
            manufacturer_id: None,
            model: String::new(),
            port_count: None,
            rack_position: String::new(),
            ip_address: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPayload {
    pub name: String,
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub port_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl Entity for Switch {
    type Form = SwitchForm;
    const RESOURCE: &'static str = "/switches";

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

impl SwitchForm {
    /// Troca o local; a sala escolhida pertence ao local anterior e é descartada.
    pub fn set_location(&mut self, location_id: Option<i64>) {
        if self.location_id != location_id {
            self.room_id = None;
        }
        self.location_id = location_id;
    }
}

impl EntityForm<Switch> for SwitchForm {
    type Payload = SwitchPayload;

    fn from_entity(entity: &Switch) -> Self {
        Self {
            name: entity.name.clone(),
            location_id: Some(entity.location_id),
            room_id: entity.room_id,
            manufacturer_id: entity.manufacturer_id,
            model: text_of(entity.model.as_deref()),
            port_count: entity.port_count,
            rack_position: text_of(entity.rack_position.as_deref()),
            ip_address: text_of(entity.ip_address.as_deref()),
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
            FormField::new("location_id", "Standort", number_text(self.location_id)),
            FormField::new("room_id", "Raum", number_text(self.room_id)),
            FormField::new("manufacturer_id", "Hersteller", number_text(self.manufacturer_id)),
            FormField::new("model", "Modell", self.model.clone()),
            FormField::new("port_count", "Anzahl Ports", number_text(self.port_count)),
            FormField::new("rack_position", "Rack-Position", self.rack_position.clone()),
            FormField::new("ip_address", "IP-Adresse", self.ip_address.clone()),
            FormField::new("description", "Beschreibung", self.description.clone()),
            FormField::new("is_active", "Status", self.is_active.to_string()),
        ]
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "location_id" => self.set_location(parse_optional(key, value)?),
            "name" => self.name = value.to_string(),
            "room_id" => self.room_id = parse_optional(key, value)?,
            "manufacturer_id" => self.manufacturer_id = parse_optional(key, value)?,
            "model" => self.model = value.to_string(),
            "port_count" => self.port_count = parse_optional(key, value)?,
            "rack_position" => self.rack_position = value.to_string(),
            "ip_address" => self.ip_address = value.to_string(),
            "description" => self.description = value.to_string(),
            "is_active" => self.is_active = parse_flag(key, value)?,
            _ => return Err(AppError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn to_payload(&self) -> SwitchPayload {
        SwitchPayload {
            name: self.name.trim().to_string(),
            location_id: self.location_id,
            room_id: self.room_id,
            manufacturer_id: self.manufacturer_id,
            model: optional_text(&self.model),
            port_count: self.port_count,
            rack_position: optional_text(&self.rack_position),
            ip_address: optional_text(&self.ip_address),
            description: optional_text(&self.description),
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_number_must_be_positive() {
        let form = NetworkPortForm {
            name: "D-1.04-01".into(),
            room_id: Some(4),
            port_number: Some(0),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field_errors()["port_number"][0].code, "range");
    }

    #[test]
    fn switch_checks_port_count_and_ip() {
        let form = SwitchForm {
            name: "SW-Core-01".into(),
            location_id: Some(1),
            port_count: None,
            ip_address: "192.168.1.999".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["port_count"][0].code, "required");
        assert_eq!(fields["ip_address"][0].code, "ip");
    }

    #[test]
    fn changing_location_drops_room() {
        let mut form = SwitchForm {
            location_id: Some(1),
            room_id: Some(7),
            ..Default::default()
        };

        form.set_location(Some(1));
        assert_eq!(form.room_id, Some(7));

        form.set_location(Some(2));
        assert_eq!(form.location_id, Some(2));
        assert_eq!(form.room_id, None);
        let payload = serde_json::to_value(form.to_payload()).unwrap();
        assert!(payload.get("roomId").is_none());

        form.set_field("room_id", "9").unwrap();
        form.set_field("location_id", "3").unwrap();
        assert_eq!(form.location_id, Some(3));
        assert_eq!(form.room_id, None);
    }

    #[test]
    fn missing_port_values_still_deserialize() {
        let port: NetworkPort = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "D-01", "roomId": 4, "portNumber": null
        }))
        .unwrap();
        assert_eq!(port.port_number, None);
        assert_eq!(NetworkPortForm::from_entity(&port).port_number, None);

        let switch: Switch =
            serde_json::from_value(serde_json::json!({ "id": 2, "name": "SW-01", "locationId": 1 })).unwrap();
        assert_eq!(switch.port_count, None);
    }

    #[test]
    fn switch_payload_omits_blank_optionals() {
        let form = SwitchForm {
            name: " SW-01 ".into(),
            location_id: Some(1),
            port_count: Some(48),
            ..Default::default()
        };
        let payload = serde_json::to_value(form.to_payload()).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({ "name": "SW-01", "locationId": 1, "portCount": 48, "isActive": true })
        );
    }
}
