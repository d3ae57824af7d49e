// src/models.rs

pub mod catalog;
pub mod entity;
pub mod network;
pub mod organization;
pub mod rbac;
pub mod settings;
pub mod validation;

pub use catalog::{Category, DeviceModel, Manufacturer, Supplier};
pub use entity::{Entity, EntityForm, FormField};
pub use network::{NetworkPort, Switch};
pub use organization::{Department, Location, Room, UserGroup};
pub use rbac::{Permission, Role};
pub use settings::{AssetTagSettings, NotificationSettings, SingletonSettings};
