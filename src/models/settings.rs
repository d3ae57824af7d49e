// src/models/settings.rs

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::validation::{email_list, optional_email, required_text};

/// Configurações de registro único (uma por instalação), lidas e gravadas inteiras.
pub trait SingletonSettings:
    Clone + Default + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    const RESOURCE: &'static str;
}

// Numeração das etiquetas de patrimônio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssetTagSettings {
    #[validate(custom(function = "required_text"))]
    pub prefix: String,

    #[validate(range(min = 1, max = 10))]
    pub digit_count: u32,

    #[validate(range(min = 1))]
    pub next_number: u64,
}

impl Default for AssetTagSettings {
    fn default() -> Self {
        Self {
            prefix: "LBV".to_string(),
            digit_count: 6,
            next_number: 1,
        }
    }
}

impl SingletonSettings for AssetTagSettings {
    const RESOURCE: &'static str = "/settings/asset-tags";
}

// Notificações por e-mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enabled: bool,

    #[validate(custom(function = "optional_email"))]
    pub sender_email: String,

    #[validate(custom(function = "email_list"))]
    pub recipients: Vec<String>,

    // Aviso de fim de garantia, em dias de antecedência
    #[validate(range(max = 365))]
    pub warranty_reminder_days: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            sender_email: String::new(),
            recipients: Vec::new(),
            warranty_reminder_days: 30,
        }
    }
}

impl SingletonSettings for NotificationSettings {
    const RESOURCE: &'static str = "/settings/notifications";
}
