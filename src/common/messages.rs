// src/common/messages.rs

use crate::middleware::i18n::Locale;

/// Catálogo de textos exibidos ao usuário (toasts, helper texts, rótulos).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Required,
    InvalidEmail,
    InvalidUrl,
    InvalidIp,
    OutOfRange,
    InvalidValue,
    AlreadyExists,
    Created,
    Updated,
    Deleted,
    SettingsSaved,
    Active,
    Inactive,
    NoRecords,
    RecordNotFound,
    NoRoleSelected,
    ConfirmDeleteTitle,
    GenericError,
    View,
    Edit,
    Delete,
}

impl Message {
    /// Traduz o código de um `ValidationError` para a mensagem correspondente.
    pub fn from_code(code: &str) -> Self {
        match code {
            "required" => Message::Required,
            "email" => Message::InvalidEmail,
            "url" => Message::InvalidUrl,
            "ip" => Message::InvalidIp,
            "range" | "length" => Message::OutOfRange,
            "unique" | "already_exists" => Message::AlreadyExists,
            _ => Message::InvalidValue,
        }
    }

    pub fn text(self, locale: &Locale) -> &'static str {
        if locale.is_english() {
            self.english()
        } else {
            self.german()
        }
    }

    fn german(self) -> &'static str {
        match self {
            Message::Required => "Dieses Feld ist erforderlich",
            Message::InvalidEmail => "Bitte eine gültige E-Mail-Adresse eingeben",
            Message::InvalidUrl => "Bitte eine gültige URL eingeben",
            Message::InvalidIp => "Bitte eine gültige IP-Adresse eingeben",
            Message::OutOfRange => "Der Wert liegt außerhalb des erlaubten Bereichs",
            Message::InvalidValue => "Ungültiger Wert",
            Message::AlreadyExists => "Ein Eintrag mit diesem Namen existiert bereits",
            Message::Created => "Eintrag wurde erfolgreich erstellt",
            Message::Updated => "Eintrag wurde erfolgreich aktualisiert",
            Message::Deleted => "Eintrag wurde erfolgreich gelöscht",
            Message::SettingsSaved => "Einstellungen wurden gespeichert",
            Message::Active => "Aktiv",
            Message::Inactive => "Inaktiv",
            Message::NoRecords => "Keine Einträge vorhanden",
            Message::RecordNotFound => "Eintrag wurde nicht gefunden",
            Message::NoRoleSelected => "Bitte zuerst eine Rolle auswählen",
            Message::ConfirmDeleteTitle => "Löschen bestätigen",
            Message::GenericError => "Ein unerwarteter Fehler ist aufgetreten",
            Message::View => "Anzeigen",
            Message::Edit => "Bearbeiten",
            Message::Delete => "Löschen",
        }
    }

    fn english(self) -> &'static str {
        match self {
            Message::Required => "This field is required",
            Message::InvalidEmail => "Please enter a valid email address",
            Message::InvalidUrl => "Please enter a valid URL",
            Message::InvalidIp => "Please enter a valid IP address",
            Message::OutOfRange => "The value is out of range",
            Message::InvalidValue => "Invalid value",
            Message::AlreadyExists => "An entry with this name already exists",
            Message::Created => "Entry created successfully",
            Message::Updated => "Entry updated successfully",
            Message::Deleted => "Entry deleted successfully",
            Message::SettingsSaved => "Settings saved",
            Message::Active => "Active",
            Message::Inactive => "Inactive",
            Message::NoRecords => "No entries available",
            Message::RecordNotFound => "Entry not found",
            Message::NoRoleSelected => "Please select a role first",
            Message::ConfirmDeleteTitle => "Confirm deletion",
            Message::GenericError => "An unexpected error occurred",
            Message::View => "View",
            Message::Edit => "Edit",
            Message::Delete => "Delete",
        }
    }
}

/// Texto da confirmação de exclusão de um registro.
pub fn confirm_delete_text(name: &str, locale: &Locale) -> String {
    if locale.is_english() {
        format!("Do you really want to delete \"{name}\"?")
    } else {
        format!("Soll „{name}“ wirklich gelöscht werden?")
    }
}
