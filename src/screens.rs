// src/screens.rs
// Telas de configurações: rotas, colunas e montagem de cada tela.

pub mod catalog;
pub mod network;
pub mod organization;
pub mod rbac;

use std::fmt;
use std::str::FromStr;

use crate::api::{client::ApiClient, repository::RestRepository};
use crate::middleware::i18n::Locale;
use crate::models::entity::Entity;
use crate::models::settings::{AssetTagSettings, NotificationSettings, SingletonSettings};
use crate::models::{
    Category, Department, DeviceModel, Location, Manufacturer, NetworkPort, Role, Room, Supplier,
    Switch, UserGroup,
};
use crate::services::screen::{ScreenConfig, SettingsScreen};
use crate::services::table::{CellValue, Column};

pub type RestScreen<E> = SettingsScreen<E, RestRepository<E>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsPage {
    Categories,
    Departments,
    DeviceModels,
    Manufacturers,
    Locations,
    Rooms,
    Suppliers,
    NetworkPorts,
    Switches,
    Roles,
    UserGroups,
    AssetTags,
    Notifications,
    Labels,
}

impl SettingsPage {
    pub const ALL: [SettingsPage; 14] = [
        SettingsPage::Categories,
        SettingsPage::Departments,
        SettingsPage::DeviceModels,
        SettingsPage::Manufacturers,
        SettingsPage::Locations,
        SettingsPage::Rooms,
        SettingsPage::Suppliers,
        SettingsPage::NetworkPorts,
        SettingsPage::Switches,
        SettingsPage::Roles,
        SettingsPage::UserGroups,
        SettingsPage::AssetTags,
        SettingsPage::Notifications,
        SettingsPage::Labels,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SettingsPage::Categories => "categories",
            SettingsPage::Departments => "departments",
            SettingsPage::DeviceModels => "device-models",
            SettingsPage::Manufacturers => "manufacturers",
            SettingsPage::Locations => "locations",
            SettingsPage::Rooms => "rooms",
            SettingsPage::Suppliers => "suppliers",
            SettingsPage::NetworkPorts => "network-ports",
            SettingsPage::Switches => "switches",
            SettingsPage::Roles => "roles",
            SettingsPage::UserGroups => "user-groups",
            SettingsPage::AssetTags => "asset-tags",
            SettingsPage::Notifications => "notifications",
            SettingsPage::Labels => "labels",
        }
    }

    pub fn path(self) -> String {
        format!("/settings/{}", self.slug())
    }

    pub fn title(self) -> &'static str {
        match self {
            SettingsPage::Categories => "Kategorien",
            SettingsPage::Departments => "Abteilungen",
            SettingsPage::DeviceModels => "Gerätemodelle",
            SettingsPage::Manufacturers => "Hersteller",
            SettingsPage::Locations => "Standorte",
            SettingsPage::Rooms => "Räume",
            SettingsPage::Suppliers => "Lieferanten",
            SettingsPage::NetworkPorts => "Netzwerkdosen",
            SettingsPage::Switches => "Switches",
            SettingsPage::Roles => "Rollen & Berechtigungen",
            SettingsPage::UserGroups => "Benutzergruppen",
            SettingsPage::AssetTags => "Inventarnummern",
            SettingsPage::Notifications => "Benachrichtigungen",
            SettingsPage::Labels => "Etikettendruck",
        }
    }

    /// Recurso REST por trás da página (`None` para o etiquetador).
    pub fn resource(self) -> Option<&'static str> {
        match self {
            SettingsPage::Categories => Some(Category::RESOURCE),
            SettingsPage::Departments => Some(Department::RESOURCE),
            SettingsPage::DeviceModels => Some(DeviceModel::RESOURCE),
            SettingsPage::Manufacturers => Some(Manufacturer::RESOURCE),
            SettingsPage::Locations => Some(Location::RESOURCE),
            SettingsPage::Rooms => Some(Room::RESOURCE),
            SettingsPage::Suppliers => Some(Supplier::RESOURCE),
            SettingsPage::NetworkPorts => Some(NetworkPort::RESOURCE),
            SettingsPage::Switches => Some(Switch::RESOURCE),
            SettingsPage::Roles => Some(Role::RESOURCE),
            SettingsPage::UserGroups => Some(UserGroup::RESOURCE),
            SettingsPage::AssetTags => Some(AssetTagSettings::RESOURCE),
            SettingsPage::Notifications => Some(NotificationSettings::RESOURCE),
            SettingsPage::Labels => None,
        }
    }

    /// Páginas com lista editável (as demais são formulários únicos).
    pub fn is_list(self) -> bool {
        !matches!(
            self,
            SettingsPage::AssetTags | SettingsPage::Notifications | SettingsPage::Labels
        )
    }
}

impl fmt::Display for SettingsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SettingsPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().trim_start_matches("/settings/").trim_matches('/');
        SettingsPage::ALL
            .into_iter()
            .find(|p| p.slug() == slug)
            .ok_or_else(|| format!("Página desconhecida: {s}"))
    }
}

// ---
// Colunas comuns
// ---

pub fn name_column<E: Entity>() -> Column<E> {
    Column::new("name", "Name", |e: &E| CellValue::text(e.name())).width(24)
}

pub fn description_column<E: Entity>() -> Column<E> {
    Column::new("description", "Beschreibung", |e: &E| CellValue::optional_text(e.description()))
        .width(32)
        .sortable(false)
}

pub fn status_column<E: Entity>() -> Column<E> {
    Column::new("isActive", "Status", |e: &E| CellValue::Flag(e.is_active())).width(10)
}

pub fn updated_column<E: Entity>() -> Column<E> {
    Column::new("updatedAt", "Geändert", |e: &E| CellValue::optional_timestamp(e.updated_at())).width(16)
}

/// Tela REST com a lista já carregada.
pub async fn open_screen<E: Entity>(config: ScreenConfig<E>, client: &ApiClient, locale: &Locale) -> RestScreen<E> {
    let mut screen = SettingsScreen::new(config, RestRepository::new(client.clone()), locale.clone());
    screen.load().await;
    screen
}
