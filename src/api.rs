// src/api.rs

pub mod client;
pub mod rbac_repo;
pub mod repository;
pub mod settings_repo;

pub use client::ApiClient;
pub use rbac_repo::{PermissionCatalog, RbacRepository};
pub use repository::{FormPayload, Repository, RestRepository};
pub use settings_repo::SettingsRepository;
