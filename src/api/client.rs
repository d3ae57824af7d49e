// src/api/client.rs

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::common::{
    case,
    envelope,
    error::{ApiError, AppError},
    messages::Message,
    session::Session,
};
use crate::middleware::{auth::attach_bearer, i18n::{Locale, attach_locale}};

/// Cliente da API REST do inventário.
///
/// Cada chamada anexa o bearer token da sessão, converte o corpo para
/// snake_case, desembrulha o envelope `{ success, data, message }` e devolve
/// as chaves em camelCase.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    locale: Locale,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session, locale: Locale) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session, locale)
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Session,
        locale: Locale,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
            locale,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_value(&self, path: &str) -> Result<Value, AppError> {
        self.send(Method::GET, path, None).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let value = self.get_value(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET de uma coleção: `data ?? []`.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let value = self.get_value(path).await?;
        Ok(envelope::into_list(value)?)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, AppError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "Enviando requisição");

        let mut request = self.http.request(method.clone(), &url);
        request = attach_bearer(request, &self.session).await;
        request = attach_locale(request, &self.locale);
        if let Some(body) = body {
            request = request.json(&case::keys_to_snake(body));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let fallback = Message::GenericError.text(&self.locale);

        if !status.is_success() {
            let err = ApiError::from_body(Some(status.as_u16()), &text, fallback);
            tracing::warn!(%method, %url, status = status.as_u16(), "API rejeitou a requisição: {}", err.message);
            return Err(err.into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&text)?;
        let data = envelope::unwrap_envelope(value, fallback)?;
        Ok(case::keys_to_camel(data))
    }
}
