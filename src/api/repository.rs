// src/api/repository.rs

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::common::error::AppError;
use crate::models::entity::{Entity, EntityForm};

/// Payload enviado em create/update para a entidade `E`.
pub type FormPayload<E> = <<E as Entity>::Form as EntityForm<E>>::Payload;

/// Acesso CRUD a uma coleção. As telas só conhecem este trait.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>, AppError>;
    async fn get(&self, id: i64) -> Result<E, AppError>;
    async fn create(&self, payload: &FormPayload<E>) -> Result<(), AppError>;
    async fn update(&self, id: i64, payload: &FormPayload<E>) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// Implementação REST: `GET/POST /<res>`, `GET/PUT/DELETE /<res>/:id`.
pub struct RestRepository<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> RestRepository<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", E::RESOURCE, id)
    }
}

impl<E> Clone for RestRepository<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for RestRepository<E> {
    async fn list(&self) -> Result<Vec<E>, AppError> {
        self.client.get_list(E::RESOURCE).await
    }

    async fn get(&self, id: i64) -> Result<E, AppError> {
        self.client.get(&Self::item_path(id)).await
    }

    async fn create(&self, payload: &FormPayload<E>) -> Result<(), AppError> {
        self.client.post(E::RESOURCE, payload).await?;
        Ok(())
    }

    async fn update(&self, id: i64, payload: &FormPayload<E>) -> Result<(), AppError> {
        self.client.put(&Self::item_path(id), payload).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.client.delete(&Self::item_path(id)).await
    }
}
