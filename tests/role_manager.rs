// tests/role_manager.rs

mod common;

use assert_matches::assert_matches;

use asset_admin::common::error::AppError;
use asset_admin::common::session::Session;
use asset_admin::middleware::i18n::Locale;
use asset_admin::models::{Permission, Role};
use asset_admin::services::SubmitOutcome;
use asset_admin::services::notification::Severity;
use asset_admin::services::rbac_service::{CrudAction, RoleManager};

use common::{MockCatalog, MockRepository, network_error};

fn role(id: i64, name: &str, permission_ids: Vec<i64>) -> Role {
    Role {
        id,
        name: name.into(),
        description: None,
        permission_ids,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

fn permission(id: i64, module: &str, action: &str) -> Permission {
    Permission {
        id,
        name: format!("{module}:{action}"),
        module: module.into(),
        action: Some(action.into()),
        description: None,
    }
}

fn catalog() -> MockCatalog {
    MockCatalog {
        permissions: vec![
            permission(1, "categories", "add"),
            permission(2, "categories", "view"),
            permission(3, "categories", "edit"),
            permission(4, "categories", "remove"),
            permission(5, "rooms", "anzeigen"),
        ],
        failure: None,
    }
}

#[tokio::test]
async fn selecting_a_role_builds_matrix_and_remembers_it() {
    let repo = MockRepository::with_rows(vec![role(1, "Admin", vec![1, 2, 3, 4]), role(2, "Leser", vec![2])]);
    let session = Session::in_memory();
    let mut manager = RoleManager::new(repo.clone(), catalog(), session.clone(), Locale::default());

    manager.open().await;
    assert!(manager.selected().is_none());

    manager.select_role(2).await.unwrap();
    let matrix = manager.matrix().unwrap();
    assert!(matrix.is_checked("categories", CrudAction::Read));
    assert!(!matrix.is_checked("categories", CrudAction::Create));
    assert!(!matrix.is_checked("rooms", CrudAction::Read));
    assert_eq!(session.last_role_id().await, Some(2));

    // Reabrir a tela restaura o cargo da sessão
    let mut reopened = RoleManager::new(repo, catalog(), session, Locale::default());
    reopened.open().await;
    assert_eq!(reopened.selected().map(|r| r.name.as_str()), Some("Leser"));
}

#[tokio::test]
async fn save_sends_the_full_permission_list() {
    let repo = MockRepository::with_rows(vec![role(2, "Leser", vec![2, 99])]);
    let mut manager = RoleManager::new(repo.clone(), catalog(), Session::in_memory(), Locale::default());
    manager.open().await;
    manager.select_role(2).await.unwrap();

    assert_eq!(manager.toggle("rooms", CrudAction::Read), Some(true));
    assert_eq!(manager.toggle("categories", CrudAction::Read), Some(false));
    assert!(manager.set_module("categories", true));
    assert_eq!(manager.toggle("rooms", CrudAction::Delete), None);

    assert_eq!(manager.save().await.unwrap(), SubmitOutcome::Saved);

    let payloads = repo.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["name"], "Leser");
    assert_eq!(payloads[0]["permissionIds"], serde_json::json!([1, 2, 3, 4, 5, 99]));
    assert_eq!(repo.calls().list, 2);
    assert_eq!(manager.notifier().count(Severity::Success), 1);
    assert_eq!(manager.selected().map(|r| r.id), Some(2));
}

#[tokio::test]
async fn failed_permission_source_still_shows_roles() {
    let repo = MockRepository::with_rows(vec![role(1, "Admin", vec![])]);
    let failing = MockCatalog {
        permissions: Vec::new(),
        failure: Some(network_error("Berechtigungen nicht verfügbar")),
    };
    let mut manager = RoleManager::new(repo, failing, Session::in_memory(), Locale::default());

    manager.open().await;

    assert_eq!(manager.roles().len(), 1);
    assert!(manager.permissions().is_empty());
    assert_eq!(manager.notifier().count(Severity::Error), 1);
}

#[tokio::test]
async fn rejected_save_raises_one_error() {
    let repo = MockRepository::with_rows(vec![role(1, "Admin", vec![1])]);
    repo.fail_mutations(Some(network_error("Zeitüberschreitung")));
    let mut manager = RoleManager::new(repo.clone(), catalog(), Session::in_memory(), Locale::default());
    manager.open().await;

    assert_matches!(manager.save().await, Err(AppError::NoRoleSelected));
    assert_eq!(repo.calls().update, 0);

    manager.select_role(1).await.unwrap();
    assert_matches!(manager.save().await, Ok(SubmitOutcome::Rejected(_)));
    assert_eq!(manager.notifier().count(Severity::Error), 1);
    assert_eq!(repo.calls().list, 1);
    assert_matches!(manager.select_role(42).await, Err(AppError::RecordNotFound(42)));
}
