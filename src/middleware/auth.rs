// src/middleware/auth.rs

use reqwest::RequestBuilder;

use crate::common::session::Session;

/// Anexa o bearer token da sessão (se existir) à requisição de saída.
/// Sem token a requisição segue sem `Authorization`; quem decide é a API.
pub async fn attach_bearer(request: RequestBuilder, session: &Session) -> RequestBuilder {
    match session.token().await {
        Some(token) if !token.trim().is_empty() => request.bearer_auth(token),
        _ => request,
    }
}
