// src/screens/rbac.rs

use crate::api::{client::ApiClient, rbac_repo::RbacRepository, repository::RestRepository};
use crate::models::Role;
use crate::screens::{description_column, name_column, status_column};
use crate::services::rbac_service::{CrudAction, PermissionMatrix, RoleManager};
use crate::services::screen::ScreenConfig;
use crate::services::table::{CellValue, Column};

pub type RestRoleManager = RoleManager<RestRepository<Role>, RbacRepository>;

pub fn roles() -> ScreenConfig<Role> {
    ScreenConfig::builder("Rollen")
        .column(name_column())
        .column(description_column())
        .column(
            Column::new("permissionIds", "Berechtigungen", |r: &Role| {
                CellValue::Number(r.permission_ids.len() as f64)
            })
            .numeric()
            .width(14),
        )
        .column(status_column())
        .empty_message("Keine Rollen vorhanden")
        .build()
}

/// Cargos e permissões carregados; último cargo da sessão já selecionado.
pub async fn open_role_manager(client: &ApiClient) -> RestRoleManager {
    let mut manager = RoleManager::new(
        RestRepository::new(client.clone()),
        RbacRepository::new(client.clone()),
        client.session().clone(),
        client.locale().clone(),
    );
    manager.open().await;
    manager
}

/// Matriz em texto: uma linha por módulo, `[x]` para permissões atribuídas.
pub fn matrix_text(matrix: &PermissionMatrix) -> String {
    let width = matrix
        .modules()
        .iter()
        .map(|r| r.module.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    let mut lines = vec![format!(
        "{:<width$}  {:^6}  {:^6}  {:^6}  {:^6}",
        "Modul", "C", "R", "U", "D"
    )];
    for row in matrix.modules() {
        let cells = CrudAction::ALL
            .iter()
            .map(|action| match row.permission(*action) {
                None => "  -   ".to_string(),
                Some(_) if matrix.is_checked(&row.module, *action) => " [x]  ".to_string(),
                Some(_) => " [ ]  ".to_string(),
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(format!("{:<width$}  {}", row.module, cells));
    }
    lines.join("\n")
}
