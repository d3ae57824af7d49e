// src/services.rs

pub mod dialog;
pub mod fetch;
pub mod label_service;
pub mod notification;
pub mod rbac_service;
pub mod screen;
pub mod settings_service;
pub mod table;

pub use screen::{DeleteOutcome, ScreenConfig, SettingsScreen, SubmitOutcome};
