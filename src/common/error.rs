// src/common/error.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::common::case::to_snake_case;
use crate::common::messages::Message;
use crate::middleware::i18n::Locale;

// Mensagens antigas da API que indicam nome duplicado, sem campo estruturado.
const LEGACY_DUPLICATE_MARKERS: &[&str] = &["existiert bereits", "already exists"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Conflict,
    Network,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            409 => ErrorKind::Conflict,
            400 | 422 => ErrorKind::Validation,
            _ => ErrorKind::Network,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "validation" | "invalid" | "validation_error" => Some(ErrorKind::Validation),
            "conflict" | "duplicate" | "already_exists" | "in_use" | "referenced" => {
                Some(ErrorKind::Conflict)
            }
            "network" => Some(ErrorKind::Network),
            _ => None,
        }
    }
}

/// Erro estruturado exibido ao usuário: tipo, campo afetado (snake_case) e mensagem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Monta o erro a partir do corpo de uma resposta de erro (texto bruto).
    pub fn from_body(status: Option<u16>, body: &str, fallback_message: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value @ Value::Object(_)) => Self::from_error_value(status, &value, fallback_message),
            _ => {
                let text = body.trim();
                let message = if text.is_empty() { fallback_message } else { text };
                Self::classify(status, None, None, message.to_string())
            }
        }
    }

    /// Monta o erro a partir de um objeto JSON (`message`/`error`/`detail`, `field`, `code`).
    pub fn from_error_value(status: Option<u16>, value: &Value, fallback_message: &str) -> Self {
        let text_of = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let message = text_of("message")
            .or_else(|| text_of("error"))
            .or_else(|| text_of("detail"))
            .unwrap_or(fallback_message)
            .to_string();

        Self::classify(status, text_of("field"), text_of("code"), message)
    }

    fn classify(status: Option<u16>, field: Option<&str>, code: Option<&str>, message: String) -> Self {
        let mut kind = code
            .and_then(ErrorKind::from_code)
            .or_else(|| status.map(ErrorKind::from_status))
            .unwrap_or(ErrorKind::Validation);
        let mut field = field.map(to_snake_case);

        // Fallback para backends que ainda não enviam `field`/`code`.
        if field.is_none() && is_legacy_duplicate(&message) {
            kind = ErrorKind::Conflict;
            field = Some("name".to_string());
        }

        Self {
            kind,
            field,
            message,
            status,
        }
    }
}

fn is_legacy_duplicate(message: &str) -> bool {
    let lower = message.to_lowercase();
    LEGACY_DUPLICATE_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Rejeição estruturada vinda da API
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Falha na requisição HTTP: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Resposta inválida da API: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Registro {0} não encontrado")]
    RecordNotFound(i64),

    #[error("Nenhum diálogo aberto")]
    NoOpenDialog,

    #[error("O diálogo está em modo de visualização")]
    ReadOnlyDialog,

    #[error("Nenhuma exclusão aguardando confirmação")]
    NoPendingDeletion,

    #[error("Nenhum cargo selecionado")]
    NoRoleSelected,

    #[error("Campo desconhecido: {0}")]
    UnknownField(String),

    #[error("Valor inválido para {0}: {1}")]
    InvalidFieldValue(String, String),

    #[error("Configuração inválida: {0}")]
    ConfigError(String),

    #[error("Erro de I/O: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Erro ao gerar QR Code: {0}")]
    QrCodeError(#[from] qrcode::types::QrError),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar PDF: {0}")]
    PdfError(String),

    #[error("Erro interno")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Converte para o erro estruturado mostrado ao usuário, já no idioma dele.
    /// Prioridade da mensagem: servidor > transporte > texto genérico.
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let generic = Message::GenericError.text(locale);

        match self {
            AppError::Api(err) => err.clone(),
            AppError::ValidationError(errors) => {
                let first = field_messages(errors, locale).into_iter().next();
                match first {
                    Some((field, message)) => {
                        ApiError::new(ErrorKind::Validation, message).with_field(field)
                    }
                    None => ApiError::new(ErrorKind::Validation, Message::InvalidValue.text(locale)),
                }
            }
            AppError::HttpError(e) => {
                let transport = e.to_string();
                let message = if transport.trim().is_empty() { generic.to_string() } else { transport };
                let mut err = ApiError::new(ErrorKind::Network, message);
                err.status = e.status().map(|s| s.as_u16());
                err
            }
            AppError::RecordNotFound(_) => {
                ApiError::new(ErrorKind::Validation, Message::RecordNotFound.text(locale))
            }
            AppError::UnknownField(field) | AppError::InvalidFieldValue(field, _) => {
                ApiError::new(ErrorKind::Validation, Message::InvalidValue.text(locale)).with_field(field.clone())
            }
            AppError::NoRoleSelected => {
                ApiError::new(ErrorKind::Validation, Message::NoRoleSelected.text(locale))
            }
            AppError::NoOpenDialog | AppError::ReadOnlyDialog | AppError::NoPendingDeletion => {
                ApiError::new(ErrorKind::Validation, generic)
            }
            ref e => {
                tracing::error!("Erro inesperado: {}", e);
                ApiError::new(ErrorKind::Network, generic)
            }
        }
    }
}

/// Primeira mensagem traduzida de cada campo com erro, ordenada pelo nome do campo.
pub fn field_messages(errors: &validator::ValidationErrors, locale: &Locale) -> BTreeMap<String, String> {
    let mut details = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        if let Some(first) = field_errors.first() {
            details.insert(
                field.to_string(),
                Message::from_code(&first.code).text(locale).to_string(),
            );
        }
    }
    details
}

/// Formatador compartilhado: texto legível para qualquer falha.
pub fn error_message(err: &AppError, locale: &Locale) -> String {
    err.to_api_error(locale).message
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn status_decides_kind_when_no_code() {
        let err = ApiError::from_body(Some(409), r#"{"message":"Wird noch verwendet"}"#, "x");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.field, None);
        assert_eq!(err.message, "Wird noch verwendet");
        assert_eq!(err.status, Some(409));

        let err = ApiError::from_body(Some(500), "", "Fehler");
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(err.message, "Fehler");
    }

    #[test]
    fn structured_field_and_code_win() {
        let body = r#"{"error":"Ungültig","field":"contactEmail","code":"validation"}"#;
        let err = ApiError::from_body(Some(500), body, "x");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.field.as_deref(), Some("contact_email"));
        assert_eq!(err.message, "Ungültig");
    }

    #[test]
    fn legacy_duplicate_message_targets_name() {
        let err = ApiError::from_body(Some(400), "Abteilung existiert bereits", "x");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.field.as_deref(), Some("name"));
    }

    #[test]
    fn validation_errors_become_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("required"));
        let api = AppError::ValidationError(errors).to_api_error(&Locale::default());
        assert_eq!(api.kind, ErrorKind::Validation);
        assert_eq!(api.field.as_deref(), Some("name"));
        assert_eq!(api.message, "Dieses Feld ist erforderlich");
    }

    #[test]
    fn missing_role_has_its_own_text() {
        let api = AppError::NoRoleSelected.to_api_error(&Locale::default());
        assert_eq!(api.message, "Bitte zuerst eine Rolle auswählen");
        let api = AppError::NoRoleSelected.to_api_error(&Locale("en".into()));
        assert_eq!(api.message, "Please select a role first");
    }
}
