// src/screens/organization.rs

use crate::api::{client::ApiClient, repository::RestRepository};
use crate::common::error::ApiError;
use crate::middleware::i18n::Locale;
use crate::models::{Department, Location, Room, UserGroup};
use crate::screens::{
    RestScreen, description_column, name_column, open_screen, status_column, updated_column,
};
use crate::services::fetch::{PickerOption, Sourced, fetch_source, picker_options};
use crate::services::screen::ScreenConfig;
use crate::services::table::{CellValue, Column};

pub fn departments() -> ScreenConfig<Department> {
    ScreenConfig::builder("Abteilungen")
        .column(name_column())
        .column(description_column())
        .column(status_column())
        .column(updated_column())
        .empty_message("Keine Abteilungen vorhanden")
        .build()
}

pub fn user_groups() -> ScreenConfig<UserGroup> {
    ScreenConfig::builder("Benutzergruppen")
        .column(name_column())
        .column(description_column())
        .column(
            Column::new("memberCount", "Mitglieder", |g: &UserGroup| {
                CellValue::optional_number(g.member_count.map(|c| c as f64))
            })
            .numeric()
            .width(10),
        )
        .column(status_column())
        .empty_message("Keine Benutzergruppen vorhanden")
        .build()
}

pub fn locations() -> ScreenConfig<Location> {
    ScreenConfig::builder("Standorte")
        .column(name_column())
        .column(Column::new("address", "Adresse", |l: &Location| {
            CellValue::optional_text(l.address.as_deref())
        }))
        .column(status_column())
        .column(updated_column())
        .empty_message("Keine Standorte vorhanden")
        .build()
}

pub fn rooms() -> ScreenConfig<Room> {
    ScreenConfig::builder("Räume")
        .column(name_column())
        .column(Column::new("locationName", "Standort", |r: &Room| {
            CellValue::optional_text(r.location_name.as_deref())
        }))
        .column(
            Column::new("floor", "Etage", |r: &Room| CellValue::optional_text(r.floor.as_deref()))
                .width(8),
        )
        .column(status_column())
        .empty_message("Keine Räume vorhanden")
        .build()
}

/// Seletor de local do diálogo de salas.
#[derive(Debug, Clone, Default)]
pub struct RoomLookups {
    pub locations: Sourced<Location>,
}

impl RoomLookups {
    pub async fn load(client: &ApiClient, locale: &Locale) -> Self {
        let repo = RestRepository::<Location>::new(client.clone());
        Self {
            locations: fetch_source::<Location, _>(&repo, locale).await,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ApiError> {
        self.locations.error.iter()
    }

    pub fn location_options(&self, selected: Option<i64>) -> Vec<PickerOption> {
        picker_options(&self.locations.rows, selected)
    }
}

pub async fn open_rooms(client: &ApiClient, locale: &Locale) -> (RestScreen<Room>, RoomLookups) {
    let (mut screen, lookups) = tokio::join!(
        open_screen(rooms(), client, locale),
        RoomLookups::load(client, locale)
    );
    screen.report_source_errors(lookups.errors());
    (screen, lookups)
}
