// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use asset_admin::api::rbac_repo::PermissionCatalog;
use asset_admin::api::repository::{FormPayload, Repository};
use asset_admin::common::error::{ApiError, AppError, ErrorKind};
use asset_admin::models::entity::Entity;
use asset_admin::models::rbac::Permission;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub list: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.list + self.get + self.create + self.update + self.delete
    }

    pub fn mutations(&self) -> usize {
        self.create + self.update + self.delete
    }
}

struct MockState<E> {
    rows: Vec<E>,
    calls: Calls,
    payloads: Vec<Value>,
    fail_list: Option<ApiError>,
    fail_mutation: Option<ApiError>,
}

/// Repositório em memória: conta chamadas, guarda payloads e injeta falhas.
/// Clones compartilham o mesmo estado.
pub struct MockRepository<E> {
    state: Arc<Mutex<MockState<E>>>,
}

impl<E> Clone for MockRepository<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<E: Entity> MockRepository<E> {
    pub fn with_rows(rows: Vec<E>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                rows,
                calls: Calls::default(),
                payloads: Vec::new(),
                fail_list: None,
                fail_mutation: None,
            })),
        }
    }

    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.state.lock().unwrap().payloads.clone()
    }

    pub fn set_rows(&self, rows: Vec<E>) {
        self.state.lock().unwrap().rows = rows;
    }

    pub fn fail_list(&self, err: Option<ApiError>) {
        self.state.lock().unwrap().fail_list = err;
    }

    pub fn fail_mutations(&self, err: Option<ApiError>) {
        self.state.lock().unwrap().fail_mutation = err;
    }

    fn mutate(&self, payload: Option<Value>, bump: impl FnOnce(&mut Calls)) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        bump(&mut state.calls);
        if let Some(payload) = payload {
            state.payloads.push(payload);
        }
        match &state.fail_mutation {
            Some(err) => Err(AppError::Api(err.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MockRepository<E> {
    async fn list(&self) -> Result<Vec<E>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list += 1;
        match &state.fail_list {
            Some(err) => Err(AppError::Api(err.clone())),
            None => Ok(state.rows.clone()),
        }
    }

    async fn get(&self, id: i64) -> Result<E, AppError> {
        let mut state = self.state.lock().unwrap();
        state.calls.get += 1;
        state
            .rows
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(AppError::RecordNotFound(id))
    }

    async fn create(&self, payload: &FormPayload<E>) -> Result<(), AppError> {
        let value = serde_json::to_value(payload).unwrap();
        self.mutate(Some(value), |c| c.create += 1)
    }

    async fn update(&self, _id: i64, payload: &FormPayload<E>) -> Result<(), AppError> {
        let value = serde_json::to_value(payload).unwrap();
        self.mutate(Some(value), |c| c.update += 1)
    }

    async fn delete(&self, _id: i64) -> Result<(), AppError> {
        self.mutate(None, |c| c.delete += 1)
    }
}

/// Catálogo de permissões fixo, com falha opcional.
#[derive(Clone, Default)]
pub struct MockCatalog {
    pub permissions: Vec<Permission>,
    pub failure: Option<ApiError>,
}

#[async_trait]
impl PermissionCatalog for MockCatalog {
    async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        match &self.failure {
            Some(err) => Err(AppError::Api(err.clone())),
            None => Ok(self.permissions.clone()),
        }
    }
}

pub fn network_error(message: &str) -> ApiError {
    ApiError::new(ErrorKind::Network, message)
}

pub fn conflict_on_name(message: &str) -> ApiError {
    ApiError::new(ErrorKind::Conflict, message).with_field("name")
}
