// src/services/screen.rs

use validator::Validate;

use crate::api::repository::Repository;
use crate::common::error::{ApiError, AppError, error_message, field_messages};
use crate::common::messages::Message;
use crate::middleware::i18n::Locale;
use crate::models::entity::{Entity, EntityForm};
use crate::services::dialog::{ConfirmDialog, DialogField, DialogMode, EditDialog};
use crate::services::notification::Notifier;
use crate::services::table::{Column, RenderedTable, RowAction, SortState, render_table, sort_rows};

/// Configuração de uma tela: título, colunas e texto da lista vazia.
pub struct ScreenConfig<E> {
    pub title: &'static str,
    pub columns: Vec<Column<E>>,
    pub empty_message: Option<String>,
}

impl<E: Entity> ScreenConfig<E> {
    pub fn builder(title: &'static str) -> ScreenConfigBuilder<E> {
        ScreenConfigBuilder {
            title,
            columns: Vec::new(),
            empty_message: None,
        }
    }

    pub fn column(&self, key: &str) -> Option<&Column<E>> {
        self.columns.iter().find(|c| c.data_key == key)
    }
}

pub struct ScreenConfigBuilder<E> {
    title: &'static str,
    columns: Vec<Column<E>>,
    empty_message: Option<String>,
}

impl<E: Entity> ScreenConfigBuilder<E> {
    pub fn column(mut self, column: Column<E>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn build(self) -> ScreenConfig<E> {
        ScreenConfig {
            title: self.title,
            columns: self.columns,
            empty_message: self.empty_message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Validação local falhou; os erros estão nos campos do diálogo.
    Invalid,
    Rejected(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Rejected(ApiError),
}

/// Tela genérica de listagem/edição: busca, tabela, diálogo e exclusão confirmada.
pub struct SettingsScreen<E: Entity, R: Repository<E>> {
    config: ScreenConfig<E>,
    repo: R,
    locale: Locale,
    rows: Vec<E>,
    loading: bool,
    sort: Option<SortState>,
    dialog: Option<EditDialog<E>>,
    pending_delete: Option<ConfirmDialog>,
    notifier: Notifier,
}

impl<E: Entity, R: Repository<E>> SettingsScreen<E, R> {
    pub fn new(config: ScreenConfig<E>, repo: R, locale: Locale) -> Self {
        Self {
            config,
            repo,
            locale,
            rows: Vec::new(),
            loading: false,
            sort: None,
            dialog: None,
            pending_delete: None,
            notifier: Notifier::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.config.title
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn dialog(&self) -> Option<&EditDialog<E>> {
        self.dialog.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&ConfirmDialog> {
        self.pending_delete.as_ref()
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Recarrega a lista inteira. Falha vira um toast de erro e lista vazia.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.repo.list().await {
            Ok(rows) => {
                tracing::debug!(resource = E::RESOURCE, count = rows.len(), "Lista carregada");
                self.rows = rows;
                self.apply_sort();
            }
            Err(e) => {
                self.rows.clear();
                self.notifier.error(error_message(&e, &self.locale));
            }
        }
        self.loading = false;
    }

    pub fn table(&self) -> RenderedTable {
        let empty = self
            .config
            .empty_message
            .clone()
            .unwrap_or_else(|| Message::NoRecords.text(&self.locale).to_string());
        render_table(&self.config.columns, &self.rows, self.sort.as_ref(), &empty, &self.locale)
    }

    /// Clique no cabeçalho. Devolve `false` para colunas desconhecidas ou sem ordenação.
    pub fn sort_by(&mut self, key: &str) -> bool {
        let Some(column) = self.config.column(key).filter(|c| c.sortable) else {
            return false;
        };
        self.sort = Some(SortState::toggled(self.sort.as_ref(), column.data_key));
        self.apply_sort();
        true
    }

    fn apply_sort(&mut self) {
        let Some(state) = &self.sort else { return };
        if let Some(column) = self.config.columns.iter().find(|c| c.data_key == state.key) {
            sort_rows(&mut self.rows, column, state.direction);
        }
    }

    fn find(&self, id: i64) -> Result<&E, AppError> {
        self.rows
            .iter()
            .find(|r| r.id() == id)
            .ok_or(AppError::RecordNotFound(id))
    }

    pub fn open_create(&mut self) {
        self.dialog = Some(EditDialog::create());
    }

    pub fn open_edit(&mut self, id: i64) -> Result<(), AppError> {
        let dialog = EditDialog::edit(self.find(id)?);
        self.dialog = Some(dialog);
        Ok(())
    }

    pub fn open_view(&mut self, id: i64) -> Result<(), AppError> {
        let dialog = EditDialog::view(self.find(id)?);
        self.dialog = Some(dialog);
        Ok(())
    }

    /// Clique numa célula: a coluna do nome abre a visualização.
    pub fn click_cell(&mut self, id: i64, key: &str) -> Result<bool, AppError> {
        if key != "name" {
            return Ok(false);
        }
        self.open_view(id)?;
        Ok(true)
    }

    pub fn context_menu(&self) -> Vec<(RowAction, &'static str)> {
        RowAction::ALL
            .iter()
            .map(|action| (*action, action.label(&self.locale)))
            .collect()
    }

    pub fn trigger(&mut self, action: RowAction, id: i64) -> Result<(), AppError> {
        match action {
            RowAction::View => self.open_view(id),
            RowAction::Edit => self.open_edit(id),
            RowAction::Delete => self.request_delete(id).map(|_| ()),
        }
    }

    pub fn form_mut(&mut self) -> Result<&mut E::Form, AppError> {
        self.dialog.as_mut().ok_or(AppError::NoOpenDialog)?.form_mut()
    }

    /// Altera um campo do formulário aberto a partir de texto (`is_active=nein`, `room_id=4`).
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.form_mut()?.set_field(key, value)
    }

    pub fn dialog_fields(&self) -> Vec<DialogField> {
        self.dialog.as_ref().map(EditDialog::fields).unwrap_or_default()
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Valida, confere unicidade do nome e grava. Sucesso fecha o diálogo e recarrega;
    /// rejeição mantém o diálogo aberto com o erro no campo correspondente.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        let dialog = self.dialog.as_mut().ok_or(AppError::NoOpenDialog)?;
        if dialog.mode() == DialogMode::View {
            return Err(AppError::ReadOnlyDialog);
        }
        dialog.clear_errors();

        if let Err(errors) = dialog.form().validate() {
            dialog.set_field_errors(field_messages(&errors, &self.locale));
            return Ok(SubmitOutcome::Invalid);
        }

        let record_id = dialog.record_id();
        let check = dialog.needs_uniqueness_check().then(|| {
            let form = dialog.form();
            (form.name().trim().to_lowercase(), form.uniqueness_scope())
        });
        let payload = dialog.form().to_payload();

        if let Some((name, scope)) = check {
            match self.name_taken(&name, scope, record_id).await {
                Ok(false) => {}
                Ok(true) => {
                    let message = Message::AlreadyExists.text(&self.locale);
                    if let Some(dialog) = self.dialog.as_mut() {
                        dialog.set_field_error("name", message);
                    }
                    return Ok(SubmitOutcome::Invalid);
                }
                // Sem a lista não dá para garantir unicidade: não grava.
                Err(e) => {
                    tracing::warn!(resource = E::RESOURCE, "Falha na verificação de unicidade: {}", e);
                    let api = e.to_api_error(&self.locale);
                    self.notifier.error(api.message.clone());
                    return Ok(SubmitOutcome::Rejected(api));
                }
            }
        }

        let result = match record_id {
            None => self.repo.create(&payload).await,
            Some(id) => self.repo.update(id, &payload).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(resource = E::RESOURCE, ?record_id, "Registro gravado");
                self.dialog = None;
                let message = if record_id.is_some() { Message::Updated } else { Message::Created };
                self.notifier.success(message.text(&self.locale));
                self.load().await;
                Ok(SubmitOutcome::Saved)
            }
            Err(e) => {
                let api = e.to_api_error(&self.locale);
                if let (Some(field), Some(dialog)) = (&api.field, self.dialog.as_mut()) {
                    dialog.set_field_error(field.clone(), api.message.clone());
                }
                self.notifier.error(api.message.clone());
                Ok(SubmitOutcome::Rejected(api))
            }
        }
    }

    async fn name_taken(&self, name: &str, scope: Option<i64>, exclude: Option<i64>) -> Result<bool, AppError> {
        let rows = self.repo.list().await?;
        Ok(rows.iter().any(|r| {
            Some(r.id()) != exclude
                && r.uniqueness_scope() == scope
                && r.name().trim().to_lowercase() == name
        }))
    }

    pub fn request_delete(&mut self, id: i64) -> Result<&ConfirmDialog, AppError> {
        let confirm = ConfirmDialog::for_record(self.find(id)?, &self.locale);
        Ok(self.pending_delete.insert(confirm))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<DeleteOutcome, AppError> {
        let confirm = self.pending_delete.take().ok_or(AppError::NoPendingDeletion)?;

        match self.repo.delete(confirm.record_id).await {
            Ok(()) => {
                tracing::info!(resource = E::RESOURCE, id = confirm.record_id, "Registro excluído");
                self.notifier.success(Message::Deleted.text(&self.locale));
                self.load().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                let api = e.to_api_error(&self.locale);
                self.notifier.error(api.message.clone());
                Ok(DeleteOutcome::Rejected(api))
            }
        }
    }

    /// Um toast de erro por fonte auxiliar que falhou (listas dos seletores).
    pub fn report_source_errors<'a>(&mut self, errors: impl IntoIterator<Item = &'a ApiError>) {
        for err in errors {
            self.notifier.error(err.message.clone());
        }
    }
}

