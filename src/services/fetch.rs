// src/services/fetch.rs

use crate::api::repository::Repository;
use crate::common::error::{ApiError, AppError};
use crate::middleware::i18n::Locale;
use crate::models::entity::Entity;

/// Resultado de uma fonte numa busca paralela. Falha de uma fonte não
/// derruba as outras.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub rows: Vec<T>,
    pub error: Option<ApiError>,
}

impl<T> Sourced<T> {
    pub fn from_result(result: Result<Vec<T>, AppError>, locale: &Locale) -> Self {
        match result {
            Ok(rows) => Self { rows, error: None },
            Err(e) => {
                tracing::warn!("Falha ao carregar fonte auxiliar: {}", e);
                Self {
                    rows: Vec::new(),
                    error: Some(e.to_api_error(locale)),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl<T> Default for Sourced<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            error: None,
        }
    }
}

pub async fn fetch_source<E: Entity, R: Repository<E> + ?Sized>(repo: &R, locale: &Locale) -> Sourced<E> {
    Sourced::from_result(repo.list().await, locale)
}

/// Opção de um seletor de chave estrangeira.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub id: i64,
    pub label: String,
}

/// Registros ativos, mais o atualmente referenciado mesmo se inativo; ordem por nome.
pub fn picker_options<E: Entity>(rows: &[E], selected: Option<i64>) -> Vec<PickerOption> {
    let mut options: Vec<PickerOption> = rows
        .iter()
        .filter(|r| r.is_active() || Some(r.id()) == selected)
        .map(|r| PickerOption {
            id: r.id(),
            label: r.name().to_string(),
        })
        .collect();
    options.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;
    use crate::models::catalog::Manufacturer;

    fn manufacturer(id: i64, name: &str, is_active: bool) -> Manufacturer {
        Manufacturer {
            id,
            name: name.into(),
            description: None,
            website: None,
            contact_email: None,
            contact_phone: None,
            is_active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn pickers_hide_inactive_unless_selected() {
        let rows = vec![
            manufacturer(1, "lenovo", true),
            manufacturer(2, "Compaq", false),
            manufacturer(3, "Dell", true),
        ];

        let labels = |opts: Vec<PickerOption>| opts.into_iter().map(|o| o.label).collect::<Vec<_>>();
        assert_eq!(labels(picker_options(&rows, None)), vec!["Dell", "lenovo"]);
        assert_eq!(labels(picker_options(&rows, Some(2))), vec!["Compaq", "Dell", "lenovo"]);
    }

    #[test]
    fn failed_source_keeps_its_error() {
        let err = ApiError::new(ErrorKind::Network, "offline");
        let sourced: Sourced<Manufacturer> =
            Sourced::from_result(Err(AppError::Api(err.clone())), &Locale::default());
        assert!(!sourced.is_ok());
        assert!(sourced.rows.is_empty());
        assert_eq!(sourced.error, Some(err));
    }
}
