// src/services/dialog.rs

use std::collections::BTreeMap;

use crate::common::error::AppError;
use crate::common::messages::{Message, confirm_delete_text};
use crate::middleware::i18n::Locale;
use crate::models::entity::{Entity, EntityForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit,
    View,
}

/// Campo do formulário como a interface o exibe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub disabled: bool,
    pub error: Option<String>,
}

/// Diálogo modal de criação/edição/visualização de um registro.
pub struct EditDialog<E: Entity> {
    mode: DialogMode,
    record_id: Option<i64>,
    original_name: String,
    original_scope: Option<i64>,
    form: E::Form,
    field_errors: BTreeMap<String, String>,
}

impl<E: Entity> EditDialog<E> {
    pub fn create() -> Self {
        Self {
            mode: DialogMode::Create,
            record_id: None,
            original_name: String::new(),
            original_scope: None,
            form: E::Form::default(),
            field_errors: BTreeMap::new(),
        }
    }

    pub fn edit(entity: &E) -> Self {
        Self::seeded(DialogMode::Edit, entity)
    }

    pub fn view(entity: &E) -> Self {
        Self::seeded(DialogMode::View, entity)
    }

    fn seeded(mode: DialogMode, entity: &E) -> Self {
        Self {
            mode,
            record_id: Some(entity.id()),
            original_name: entity.name().to_string(),
            original_scope: entity.uniqueness_scope(),
            form: E::Form::from_entity(entity),
            field_errors: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == DialogMode::View
    }

    pub fn form(&self) -> &E::Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> Result<&mut E::Form, AppError> {
        if self.is_read_only() {
            return Err(AppError::ReadOnlyDialog);
        }
        Ok(&mut self.form)
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }

    pub fn set_field_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.field_errors.insert(key.into(), message.into());
    }

    pub fn set_field_errors(&mut self, errors: BTreeMap<String, String>) {
        self.field_errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.field_errors.clear();
    }

    /// Criando, renomeando ou trocando o escopo (local, fabricante).
    pub fn needs_uniqueness_check(&self) -> bool {
        let name = self.form.name().trim();
        if name.is_empty() {
            return false;
        }
        match self.mode {
            DialogMode::Create => true,
            DialogMode::Edit => {
                name.to_lowercase() != self.original_name.trim().to_lowercase()
                    || self.form.uniqueness_scope() != self.original_scope
            }
            DialogMode::View => false,
        }
    }

    pub fn fields(&self) -> Vec<DialogField> {
        let disabled = self.is_read_only();
        self.form
            .fields()
            .into_iter()
            .map(|f| DialogField {
                key: f.key,
                label: f.label,
                error: self.field_errors.get(f.key).cloned(),
                value: f.value,
                disabled,
            })
            .collect()
    }
}

/// Confirmação pendente de exclusão.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub record_id: i64,
    pub title: String,
    pub message: String,
}

impl ConfirmDialog {
    pub fn for_record<E: Entity>(entity: &E, locale: &Locale) -> Self {
        Self {
            record_id: entity.id(),
            title: Message::ConfirmDeleteTitle.text(locale).to_string(),
            message: confirm_delete_text(entity.name(), locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Category;
    use crate::models::organization::Room;

    fn category(name: &str) -> Category {
        Category {
            id: 7,
            name: name.into(),
            description: Some("Mobile Geräte".into()),
            is_active: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn view_mode_is_read_only_and_mirrors_record() {
        let mut dialog = EditDialog::view(&category("Laptops"));
        assert!(dialog.form_mut().is_err());

        let fields = dialog.fields();
        assert!(fields.iter().all(|f| f.disabled));
        assert_eq!(fields[0].value, "Laptops");
        assert_eq!(fields[1].value, "Mobile Geräte");
        assert_eq!(fields[2].value, "false");
    }

    #[test]
    fn uniqueness_check_only_when_name_or_scope_changes() {
        let mut dialog = EditDialog::edit(&category("Laptops"));
        assert!(!dialog.needs_uniqueness_check());

        dialog.form_mut().unwrap().name = "laptops".into();
        assert!(!dialog.needs_uniqueness_check());

        dialog.form_mut().unwrap().name = "Notebooks".into();
        assert!(dialog.needs_uniqueness_check());

        let room = Room {
            id: 1,
            name: "R1".into(),
            location_id: 2,
            location_name: None,
            floor: None,
            description: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        };
        let mut dialog = EditDialog::edit(&room);
        assert!(!dialog.needs_uniqueness_check());
        dialog.form_mut().unwrap().location_id = Some(3);
        assert!(dialog.needs_uniqueness_check());
    }

    #[test]
    fn confirm_dialog_names_the_record() {
        let confirm = ConfirmDialog::for_record(&category("Laptops"), &Locale::default());
        assert_eq!(confirm.record_id, 7);
        assert_eq!(confirm.title, "Löschen bestätigen");
        assert!(confirm.message.contains("„Laptops“"));
    }
}
