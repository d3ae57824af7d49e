// src/api/settings_repo.rs

use serde_json::Value;

use crate::api::client::ApiClient;
use crate::common::error::AppError;
use crate::models::settings::SingletonSettings;

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    client: ApiClient,
}

impl SettingsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Busca a configuração. Se ainda não existir no servidor (404 ou `data` vazio),
    /// devolve os valores padrão em vez de erro.
    pub async fn get_settings<S: SingletonSettings>(&self) -> Result<S, AppError> {
        let value = match self.client.get_value(S::RESOURCE).await {
            Ok(value) => value,
            Err(AppError::Api(err)) if err.status == Some(404) => Value::Null,
            Err(e) => return Err(e),
        };

        match value {
            Value::Null => Ok(S::default()),
            other => Ok(serde_json::from_value(other)?),
        }
    }

    /// PUT com o objeto inteiro. Resposta vazia = o que foi enviado.
    pub async fn update_settings<S: SingletonSettings>(&self, input: &S) -> Result<S, AppError> {
        match self.client.put(S::RESOURCE, input).await? {
            Value::Null => Ok(input.clone()),
            other => Ok(serde_json::from_value(other)?),
        }
    }
}
