// src/config.rs

use std::{env, path::PathBuf};

use crate::api::{client::ApiClient, settings_repo::SettingsRepository};
use crate::common::{error::AppError, session::Session};
use crate::middleware::i18n::Locale;
use crate::services::label_service::{LabelPrinter, SheetLayout};
use crate::services::settings_service::SettingsService;

const DEFAULT_SESSION_FILE: &str = ".asset-admin-session.json";
const DEFAULT_FONT_DIR: &str = "./fonts";
const DEFAULT_FONT_FAMILY: &str = "Roboto";
const DEFAULT_LANGUAGE: &str = "de";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub label_font_dir: PathBuf,
    pub font_family: String,
    pub ui_language: String,
}

impl AppConfig {
    /// Lê a configuração do ambiente (e do `.env`, se existir).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .map_err(|_| AppError::ConfigError("API_BASE_URL deve ser definida".to_string()))?;
        if api_base_url.trim().is_empty() {
            return Err(AppError::ConfigError("API_BASE_URL está vazia".to_string()));
        }

        let var_or = |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.to_string());

        Ok(Self {
            api_base_url,
            session_file: var_or("SESSION_FILE", DEFAULT_SESSION_FILE).into(),
            label_font_dir: var_or("LABEL_FONT_DIR", DEFAULT_FONT_DIR).into(),
            font_family: var_or("FONT_FAMILY", DEFAULT_FONT_FAMILY),
            ui_language: var_or("UI_LANGUAGE", DEFAULT_LANGUAGE),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub locale: Locale,
    pub api_client: ApiClient,
    pub settings_service: SettingsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::from_config(config).await?)
    }

    pub async fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let session = Session::load(&config.session_file).await?;
        let locale = Locale::parse(&config.ui_language);

        // --- Monta o gráfico de dependências ---
        let api_client = ApiClient::new(config.api_base_url.clone(), session.clone(), locale.clone());
        let settings_service = SettingsService::new(SettingsRepository::new(api_client.clone()));

        tracing::info!(api = %config.api_base_url, lang = %locale.0, "Configuração carregada");

        Ok(Self {
            config,
            session,
            locale,
            api_client,
            settings_service,
        })
    }

    pub fn label_printer(&self, layout: SheetLayout) -> LabelPrinter {
        LabelPrinter::new(&self.config.label_font_dir, &self.config.font_family, layout)
    }
}
