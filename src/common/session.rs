// src/common/session.rs

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::common::error::AppError;

/// O que sobrevive entre execuções: token de acesso e último cargo selecionado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub token: Option<String>,
    pub last_role_id: Option<i64>,
}

/// Contexto de sessão do processo. Toda leitura/escrita passa por aqui;
/// quando há arquivo associado, cada escrita é persistida imediatamente.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionData>>,
    path: Option<PathBuf>,
}

impl Session {
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionData::default())),
            path: None,
        }
    }

    /// Carrega a sessão do arquivo. Arquivo inexistente = sessão vazia.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Arquivo de sessão ilegível ({}), iniciando vazio: {}", path.display(), e);
                SessionData::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(data)),
            path: Some(path),
        })
    }

    pub async fn snapshot(&self) -> SessionData {
        self.inner.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    pub async fn set_token(&self, token: impl Into<String>) -> Result<(), AppError> {
        let mut data = self.inner.write().await;
        data.token = Some(token.into());
        self.persist(&data).await
    }

    pub async fn last_role_id(&self) -> Option<i64> {
        self.inner.read().await.last_role_id
    }

    pub async fn set_last_role_id(&self, role_id: Option<i64>) -> Result<(), AppError> {
        let mut data = self.inner.write().await;
        data.last_role_id = role_id;
        self.persist(&data).await
    }

    /// Logout: limpa token e preferências.
    pub async fn clear(&self) -> Result<(), AppError> {
        let mut data = self.inner.write().await;
        *data = SessionData::default();
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    async fn persist(&self, data: &SessionData) -> Result<(), AppError> {
        if let Some(path) = &self.path {
            let bytes = serde_json::to_vec_pretty(data)?;
            tokio::fs::write(path, bytes).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session::load(&path).await.unwrap();
        assert_eq!(session.token().await, None);
        session.set_token("abc").await.unwrap();
        session.set_last_role_id(Some(7)).await.unwrap();

        let reloaded = Session::load(&path).await.unwrap();
        assert_eq!(reloaded.token().await.as_deref(), Some("abc"));
        assert_eq!(reloaded.last_role_id().await, Some(7));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session::load(&path).await.unwrap();
        session.set_token("abc").await.unwrap();
        session.clear().await.unwrap();

        assert_eq!(session.snapshot().await, SessionData::default());
        assert!(!path.exists());
        assert_eq!(Session::load(&path).await.unwrap().token().await, None);
    }
}
