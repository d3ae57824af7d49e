// src/services/rbac_service.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::api::{rbac_repo::PermissionCatalog, repository::Repository};
use crate::common::error::AppError;
use crate::common::messages::Message;
use crate::common::session::Session;
use crate::middleware::i18n::Locale;
use crate::models::rbac::{Permission, Role, RolePayload};
use crate::services::fetch::Sourced;
use crate::services::notification::Notifier;
use crate::services::screen::SubmitOutcome;

/// As quatro colunas da matriz de permissões.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CrudAction {
    Create,
    Read,
    Update,
    Delete,
}

const CREATE_WORDS: &[&str] = &["add", "new", "create", "insert", "anlegen", "erstellen", "hinzufügen", "neu"];
const READ_WORDS: &[&str] = &["read", "view", "list", "show", "get", "lesen", "anzeigen", "ansehen"];
const UPDATE_WORDS: &[&str] = &["update", "edit", "modify", "change", "write", "bearbeiten", "ändern", "aktualisieren"];
const DELETE_WORDS: &[&str] = &["delete", "remove", "destroy", "löschen", "entfernen"];

impl CrudAction {
    pub const ALL: [CrudAction; 4] = [
        CrudAction::Create,
        CrudAction::Read,
        CrudAction::Update,
        CrudAction::Delete,
    ];

    /// Classifica o nome livre da ação por palavras-chave ("add" -> Create).
    pub fn classify(action: &str) -> Option<CrudAction> {
        let lower = action.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        [
            (CrudAction::Create, CREATE_WORDS),
            (CrudAction::Read, READ_WORDS),
            (CrudAction::Update, UPDATE_WORDS),
            (CrudAction::Delete, DELETE_WORDS),
        ]
        .into_iter()
        .find(|(_, words)| tokens.iter().any(|t| words.contains(t)))
        .map(|(crud, _)| crud)
    }

    fn index(self) -> usize {
        match self {
            CrudAction::Create => 0,
            CrudAction::Read => 1,
            CrudAction::Update => 2,
            CrudAction::Delete => 3,
        }
    }
}

/// Linha da matriz: um módulo e o id da permissão em cada coluna.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRow {
    pub module: String,
    pub cells: [Option<i64>; 4],
}

impl ModuleRow {
    pub fn permission(&self, action: CrudAction) -> Option<i64> {
        self.cells[action.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    rows: Vec<ModuleRow>,
    assigned: BTreeSet<i64>,
}

impl PermissionMatrix {
    /// Agrupa por módulo. Ações sem coluna canônica ficam fora da grade, mas
    /// continuam atribuídas se já estavam.
    pub fn new(permissions: &[Permission], assigned: &[i64]) -> Self {
        let mut grouped: BTreeMap<String, [Option<i64>; 4]> = BTreeMap::new();
        for permission in permissions {
            let Some(action) = CrudAction::classify(permission.action_name()) else {
                tracing::debug!(permission = %permission.name, "Permissão sem ação CRUD reconhecida");
                continue;
            };
            let cells = grouped.entry(permission.module.clone()).or_default();
            cells[action.index()].get_or_insert(permission.id);
        }

        Self {
            rows: grouped
                .into_iter()
                .map(|(module, cells)| ModuleRow { module, cells })
                .collect(),
            assigned: assigned.iter().copied().collect(),
        }
    }

    pub fn modules(&self) -> &[ModuleRow] {
        &self.rows
    }

    pub fn cell(&self, module: &str, action: CrudAction) -> Option<i64> {
        self.rows
            .iter()
            .find(|r| r.module == module)
            .and_then(|r| r.permission(action))
    }

    pub fn is_checked(&self, module: &str, action: CrudAction) -> bool {
        self.cell(module, action)
            .is_some_and(|id| self.assigned.contains(&id))
    }

    /// Alterna a célula e devolve o novo estado (`None` se a célula não existe).
    pub fn toggle(&mut self, module: &str, action: CrudAction) -> Option<bool> {
        let id = self.cell(module, action)?;
        if self.assigned.remove(&id) {
            Some(false)
        } else {
            self.assigned.insert(id);
            Some(true)
        }
    }

    /// Marca ou desmarca todas as colunas de um módulo.
    pub fn set_module(&mut self, module: &str, checked: bool) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.module == module) else {
            return false;
        };
        for id in row.cells.iter().flatten() {
            if checked {
                self.assigned.insert(*id);
            } else {
                self.assigned.remove(id);
            }
        }
        true
    }

    pub fn permission_ids(&self) -> Vec<i64> {
        self.assigned.iter().copied().collect()
    }
}

/// Tela de cargos: lista de cargos, matriz do cargo selecionado e gravação.
pub struct RoleManager<R: Repository<Role>, P: PermissionCatalog> {
    roles_repo: R,
    catalog: P,
    session: Session,
    locale: Locale,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    selected: Option<i64>,
    matrix: Option<PermissionMatrix>,
    notifier: Notifier,
}

impl<R: Repository<Role>, P: PermissionCatalog> RoleManager<R, P> {
    pub fn new(roles_repo: R, catalog: P, session: Session, locale: Locale) -> Self {
        Self {
            roles_repo,
            catalog,
            session,
            locale,
            roles: Vec::new(),
            permissions: Vec::new(),
            selected: None,
            matrix: None,
            notifier: Notifier::new(),
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn selected(&self) -> Option<&Role> {
        let id = self.selected?;
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn matrix(&self) -> Option<&PermissionMatrix> {
        self.matrix.as_ref()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Busca cargos e permissões em paralelo e restaura o último cargo escolhido.
    pub async fn open(&mut self) {
        let (roles, permissions) = tokio::join!(
            self.roles_repo.list(),
            self.catalog.list_all_permissions()
        );
        let roles = Sourced::from_result(roles, &self.locale);
        let permissions = Sourced::from_result(permissions, &self.locale);

        for err in [&roles.error, &permissions.error].into_iter().flatten() {
            self.notifier.error(err.message.clone());
        }

        self.roles = roles.rows;
        self.permissions = permissions.rows;
        self.selected = None;
        self.matrix = None;

        if let Some(id) = self.session.last_role_id().await {
            if self.roles.iter().any(|r| r.id == id) {
                self.show_role(id);
            }
        }
    }

    fn show_role(&mut self, id: i64) -> bool {
        let Some(role) = self.roles.iter().find(|r| r.id == id) else {
            return false;
        };
        self.matrix = Some(PermissionMatrix::new(&self.permissions, &role.permission_ids));
        self.selected = Some(id);
        true
    }

    pub async fn select_role(&mut self, id: i64) -> Result<(), AppError> {
        if !self.show_role(id) {
            return Err(AppError::RecordNotFound(id));
        }
        self.session.set_last_role_id(Some(id)).await
    }

    pub fn toggle(&mut self, module: &str, action: CrudAction) -> Option<bool> {
        self.matrix.as_mut()?.toggle(module, action)
    }

    pub fn set_module(&mut self, module: &str, checked: bool) -> bool {
        self.matrix
            .as_mut()
            .is_some_and(|m| m.set_module(module, checked))
    }

    /// Envia a lista completa de permissões do cargo (última gravação vence).
    pub async fn save(&mut self) -> Result<SubmitOutcome, AppError> {
        let role = self.selected().ok_or(AppError::NoRoleSelected)?.clone();
        let matrix = self.matrix.as_ref().ok_or(AppError::NoRoleSelected)?;
        let payload = RolePayload::for_role(&role, matrix.permission_ids());

        match self.roles_repo.update(role.id, &payload).await {
            Ok(()) => {
                tracing::info!(role_id = role.id, "Permissões do cargo atualizadas");
                self.notifier.success(Message::Updated.text(&self.locale));
                self.reload_roles(role.id).await;
                Ok(SubmitOutcome::Saved)
            }
            Err(e) => {
                let api = e.to_api_error(&self.locale);
                self.notifier.error(api.message.clone());
                Ok(SubmitOutcome::Rejected(api))
            }
        }
    }

    async fn reload_roles(&mut self, keep_selected: i64) {
        match self.roles_repo.list().await {
            Ok(roles) => {
                self.roles = roles;
                if !self.show_role(keep_selected) {
                    self.selected = None;
                    self.matrix = None;
                }
            }
            Err(e) => self.notifier.error(e.to_api_error(&self.locale).message),
        }
    }
}
