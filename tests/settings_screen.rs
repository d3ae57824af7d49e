// tests/settings_screen.rs

mod common;

use assert_matches::assert_matches;
use serde_json::json;

use asset_admin::common::error::{AppError, ErrorKind};
use asset_admin::middleware::i18n::Locale;
use asset_admin::models::{Category, Department, Room};
use asset_admin::screens::{catalog, organization};
use asset_admin::services::dialog::DialogMode;
use asset_admin::services::notification::Severity;
use asset_admin::services::table::{RowAction, SortDirection};
use asset_admin::services::{DeleteOutcome, SettingsScreen, SubmitOutcome};

use common::{MockRepository, conflict_on_name, network_error};

fn category(id: i64, name: &str, is_active: bool) -> Category {
    Category {
        id,
        name: name.into(),
        description: None,
        is_active,
        created_at: None,
        updated_at: None,
    }
}

fn department(id: i64, name: &str) -> Department {
    Department {
        id,
        name: name.into(),
        description: Some("Zentrale".into()),
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

fn room(id: i64, location_id: i64, name: &str) -> Room {
    Room {
        id,
        name: name.into(),
        location_id,
        location_name: None,
        floor: None,
        description: None,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

async fn category_screen(
    rows: Vec<Category>,
) -> (SettingsScreen<Category, MockRepository<Category>>, MockRepository<Category>) {
    let repo = MockRepository::with_rows(rows);
    let mut screen = SettingsScreen::new(catalog::categories(), repo.clone(), Locale::default());
    screen.load().await;
    (screen, repo)
}

#[tokio::test]
async fn load_renders_rows_and_status_column() {
    let (screen, repo) = category_screen(vec![category(1, "Laptops", true), category(2, "Drucker", false)]).await;

    assert_eq!(repo.calls().list, 1);
    assert!(!screen.is_loading());

    let table = screen.table();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(1, "isActive"), Some("Aktiv"));
    assert_eq!(table.cell(2, "isActive"), Some("Inaktiv"));
    assert_eq!(table.empty_message, None);
    assert_eq!(screen.notifier().count(Severity::Error), 0);
}

#[tokio::test]
async fn failed_load_empties_rows_with_one_error_toast() {
    let repo = MockRepository::with_rows(vec![category(1, "Laptops", true)]);
    repo.fail_list(Some(network_error("Server nicht erreichbar")));
    let mut screen = SettingsScreen::new(catalog::categories(), repo.clone(), Locale::default());

    screen.load().await;

    assert!(screen.rows().is_empty());
    assert_eq!(screen.notifier().count(Severity::Error), 1);
    assert_eq!(
        screen.notifier().current().map(|t| t.message.as_str()),
        Some("Server nicht erreichbar")
    );
    assert_eq!(screen.table().empty_message.as_deref(), Some("Keine Kategorien vorhanden"));
}

#[tokio::test]
async fn empty_name_is_rejected_without_network_call() {
    let repo = MockRepository::<Category>::empty();
    let mut screen = SettingsScreen::new(catalog::categories(), repo.clone(), Locale::default());

    screen.open_create();
    screen.form_mut().unwrap().name = "   ".into();
    let outcome = screen.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(repo.calls().total(), 0);
    let dialog = screen.dialog().expect("dialog stays open");
    assert_eq!(dialog.field_error("name"), Some("Dieses Feld ist erforderlich"));
    assert_eq!(screen.notifier().history().len(), 0);
}

#[tokio::test]
async fn create_closes_dialog_reloads_once_and_toasts_once() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;

    screen.open_create();
    screen.form_mut().unwrap().name = "Monitore".into();
    let outcome = screen.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert!(screen.dialog().is_none());
    let calls = repo.calls();
    assert_eq!(calls.create, 1);
    // carga inicial + verificação de unicidade + recarga
    assert_eq!(calls.list, 3);
    assert_eq!(screen.notifier().count(Severity::Success), 1);
    assert_eq!(screen.notifier().count(Severity::Error), 0);
}

#[tokio::test]
async fn update_without_rename_skips_uniqueness_check() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;

    screen.open_edit(1).unwrap();
    screen.form_mut().unwrap().is_active = false;
    assert_eq!(screen.submit().await.unwrap(), SubmitOutcome::Saved);

    let calls = repo.calls();
    assert_eq!(calls.update, 1);
    assert_eq!(calls.list, 2);
    assert_eq!(repo.payloads()[0], json!({ "name": "Laptops", "isActive": false }));
    assert_eq!(
        screen.notifier().current().map(|t| t.message.as_str()),
        Some("Eintrag wurde erfolgreich aktualisiert")
    );
}

#[tokio::test]
async fn fields_can_be_set_from_text() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;

    assert_matches!(screen.set_field("name", "x"), Err(AppError::NoOpenDialog));

    screen.open_edit(1).unwrap();
    screen.set_field("description", "Tragbare Rechner").unwrap();
    screen.set_field("is_active", "nein").unwrap();
    assert_matches!(screen.set_field("farbe", "rot"), Err(AppError::UnknownField(key)) if key == "farbe");
    assert_matches!(screen.set_field("is_active", "vielleicht"), Err(AppError::InvalidFieldValue(..)));

    assert_eq!(screen.submit().await.unwrap(), SubmitOutcome::Saved);
    assert_eq!(
        repo.payloads()[0],
        json!({ "name": "Laptops", "description": "Tragbare Rechner", "isActive": false })
    );
}

#[tokio::test]
async fn new_department_payload_is_trimmed() {
    let repo = MockRepository::<Department>::empty();
    let mut screen = SettingsScreen::new(organization::departments(), repo.clone(), Locale::default());

    screen.open_create();
    screen.form_mut().unwrap().name = "  IT  ".into();
    assert_eq!(screen.submit().await.unwrap(), SubmitOutcome::Saved);

    let payloads = repo.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["name"], "IT");
    assert!(payloads[0].get("description").is_none());
}

#[tokio::test]
async fn duplicate_name_is_caught_case_insensitively() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;

    screen.open_create();
    screen.form_mut().unwrap().name = " laptops ".into();
    let outcome = screen.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(repo.calls().create, 0);
    assert_eq!(
        screen.dialog().and_then(|d| d.field_error("name")),
        Some("Ein Eintrag mit diesem Namen existiert bereits")
    );
}

#[tokio::test]
async fn uniqueness_check_fails_closed() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;
    repo.fail_list(Some(network_error("offline")));

    screen.open_create();
    screen.form_mut().unwrap().name = "Monitore".into();

    let outcome = screen.submit().await.unwrap();

    assert_matches!(outcome, SubmitOutcome::Rejected(err) if err.kind == ErrorKind::Network);
    assert_eq!(repo.calls().create, 0);
    assert_eq!(screen.notifier().count(Severity::Error), 1);
    assert_eq!(screen.notifier().current().map(|t| t.message.as_str()), Some("offline"));
    // Falha de rede não vira "nome duplicado"; o diálogo continua aberto
    let dialog = screen.dialog().expect("dialog stays open");
    assert_eq!(dialog.field_error("name"), None);
}

#[tokio::test]
async fn room_names_are_unique_per_location() {
    let repo = MockRepository::with_rows(vec![room(1, 10, "Serverraum")]);
    let mut screen = SettingsScreen::new(organization::rooms(), repo.clone(), Locale::default());
    screen.load().await;

    screen.open_create();
    {
        let form = screen.form_mut().unwrap();
        form.name = "Serverraum".into();
        form.location_id = Some(20);
    }
    assert_eq!(screen.submit().await.unwrap(), SubmitOutcome::Saved);

    screen.open_create();
    {
        let form = screen.form_mut().unwrap();
        form.name = "SERVERRAUM".into();
        form.location_id = Some(10);
    }
    assert_eq!(screen.submit().await.unwrap(), SubmitOutcome::Invalid);
    assert_eq!(repo.calls().create, 1);
}

#[tokio::test]
async fn rejected_save_keeps_dialog_and_rows() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;
    repo.fail_mutations(Some(conflict_on_name("Kategorie existiert bereits")));

    screen.open_edit(1).unwrap();
    screen.form_mut().unwrap().name = "Notebooks".into();
    let outcome = screen.submit().await.unwrap();

    assert_matches!(outcome, SubmitOutcome::Rejected(err) if err.kind == ErrorKind::Conflict);
    assert_eq!(screen.rows().len(), 1);
    assert_eq!(screen.rows()[0].name, "Laptops");
    assert_eq!(screen.notifier().count(Severity::Error), 1);
    assert_eq!(screen.notifier().count(Severity::Success), 0);

    let dialog = screen.dialog().expect("dialog stays open");
    assert_eq!(dialog.mode(), DialogMode::Edit);
    assert_eq!(dialog.field_error("name"), Some("Kategorie existiert bereits"));
}

#[tokio::test]
async fn view_mode_mirrors_record_and_is_read_only() {
    let repo = MockRepository::with_rows(vec![department(4, "Einkauf")]);
    let mut screen = SettingsScreen::new(organization::departments(), repo.clone(), Locale::default());
    screen.load().await;

    assert!(screen.click_cell(4, "name").unwrap());
    assert_eq!(screen.dialog().map(|d| d.mode()), Some(DialogMode::View));

    let fields = screen.dialog_fields();
    let values: Vec<_> = fields.iter().map(|f| (f.key, f.value.as_str())).collect();
    assert_eq!(
        values,
        vec![("name", "Einkauf"), ("description", "Zentrale"), ("is_active", "true")]
    );
    assert!(fields.iter().all(|f| f.disabled));

    assert_matches!(screen.form_mut(), Err(AppError::ReadOnlyDialog));
    assert_matches!(screen.submit().await, Err(AppError::ReadOnlyDialog));
    assert_eq!(repo.calls().mutations(), 0);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;

    assert_matches!(screen.confirm_delete().await, Err(AppError::NoPendingDeletion));

    screen.trigger(RowAction::Delete, 1).unwrap();
    assert!(screen.pending_delete().unwrap().message.contains("Laptops"));
    screen.cancel_delete();
    assert_matches!(screen.confirm_delete().await, Err(AppError::NoPendingDeletion));
    assert_eq!(repo.calls().delete, 0);

    screen.request_delete(1).unwrap();
    assert_eq!(screen.confirm_delete().await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(repo.calls().delete, 1);
    assert_eq!(repo.calls().list, 2);
    assert_eq!(screen.notifier().count(Severity::Success), 1);
}

#[tokio::test]
async fn failed_delete_leaves_rows_untouched() {
    let (mut screen, repo) = category_screen(vec![category(1, "Laptops", true)]).await;
    repo.fail_mutations(Some(network_error("Wird noch verwendet")));

    screen.request_delete(1).unwrap();
    let outcome = screen.confirm_delete().await.unwrap();

    assert_matches!(outcome, DeleteOutcome::Rejected(_));
    assert_eq!(screen.rows().len(), 1);
    assert_eq!(repo.calls().list, 1);
    assert_eq!(screen.notifier().count(Severity::Error), 1);
    assert!(screen.pending_delete().is_none());
}

#[tokio::test]
async fn header_click_toggles_sort_direction() {
    let (mut screen, _repo) = category_screen(vec![
        category(1, "monitore", true),
        category(2, "Drucker", true),
        category(3, "laptops", true),
    ])
    .await;

    assert!(screen.sort_by("name"));
    let names: Vec<_> = screen.rows().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Drucker", "laptops", "monitore"]);

    assert!(screen.sort_by("name"));
    assert_eq!(screen.sort().map(|s| s.direction), Some(SortDirection::Descending));
    assert_eq!(screen.rows()[0].name, "monitore");

    assert!(!screen.sort_by("description"));
    assert!(!screen.sort_by("unknown"));
}

#[tokio::test]
async fn unknown_record_is_reported() {
    let (mut screen, _repo) = category_screen(vec![]).await;
    assert_matches!(screen.open_edit(99), Err(AppError::RecordNotFound(99)));
    assert_eq!(screen.context_menu().len(), 3);
}
