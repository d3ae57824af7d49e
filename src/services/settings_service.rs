// src/services/settings_service.rs

use std::collections::BTreeMap;

use validator::Validate;

use crate::api::settings_repo::SettingsRepository;
use crate::common::error::{AppError, field_messages};
use crate::common::messages::Message;
use crate::middleware::i18n::Locale;
use crate::models::settings::{AssetTagSettings, SingletonSettings};
use crate::services::label_service::tag_sequence;
use crate::services::notification::Notifier;
use crate::services::screen::SubmitOutcome;

#[derive(Debug, Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self { repo }
    }

    pub async fn get<S: SingletonSettings>(&self) -> Result<S, AppError> {
        self.repo.get_settings().await
    }

    /// Valida localmente antes de enviar.
    pub async fn save<S: SingletonSettings>(&self, input: &S) -> Result<S, AppError> {
        input.validate()?;
        let saved = self.repo.update_settings(input).await?;
        tracing::info!(resource = S::RESOURCE, "Configurações gravadas");
        Ok(saved)
    }

    /// Próximas `count` etiquetas a partir da numeração configurada.
    pub async fn next_asset_tags(&self, count: usize) -> Result<Vec<String>, AppError> {
        let settings: AssetTagSettings = self.get().await?;
        Ok(tag_sequence(
            &settings.prefix,
            settings.digit_count as usize,
            settings.next_number,
            count,
        ))
    }
}

/// Formulário de uma configuração única (carregar, editar, gravar com toast).
pub struct SettingsEditor<S: SingletonSettings> {
    service: SettingsService,
    locale: Locale,
    form: S,
    field_errors: BTreeMap<String, String>,
    notifier: Notifier,
}

impl<S: SingletonSettings> SettingsEditor<S> {
    pub fn new(service: SettingsService, locale: Locale) -> Self {
        Self {
            service,
            locale,
            form: S::default(),
            field_errors: BTreeMap::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn form(&self) -> &S {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut S {
        &mut self.form
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn load(&mut self) {
        match self.service.get::<S>().await {
            Ok(settings) => self.form = settings,
            Err(e) => self.notifier.error(e.to_api_error(&self.locale).message),
        }
    }

    pub async fn save(&mut self) -> SubmitOutcome {
        self.field_errors.clear();
        if let Err(errors) = self.form.validate() {
            self.field_errors = field_messages(&errors, &self.locale);
            return SubmitOutcome::Invalid;
        }

        match self.service.save(&self.form).await {
            Ok(saved) => {
                self.form = saved;
                self.notifier.success(Message::SettingsSaved.text(&self.locale));
                SubmitOutcome::Saved
            }
            Err(e) => {
                let api = e.to_api_error(&self.locale);
                if let Some(field) = &api.field {
                    self.field_errors.insert(field.clone(), api.message.clone());
                }
                self.notifier.error(api.message.clone());
                SubmitOutcome::Rejected(api)
            }
        }
    }
}
