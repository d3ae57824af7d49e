// src/api/rbac_repo.rs

use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::common::error::AppError;
use crate::models::rbac::Permission;

const PERMISSIONS_PATH: &str = "/permissions";

/// Catálogo de permissões do sistema (para montar a matriz de cargos).
#[async_trait]
pub trait PermissionCatalog: Send + Sync {
    async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError>;
}

#[derive(Debug, Clone)]
pub struct RbacRepository {
    client: ApiClient,
}

impl RbacRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PermissionCatalog for RbacRepository {
    async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        self.client.get_list(PERMISSIONS_PATH).await
    }
}
