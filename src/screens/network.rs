// src/screens/network.rs

use crate::api::{client::ApiClient, repository::RestRepository};
use crate::common::error::ApiError;
use crate::middleware::i18n::Locale;
use crate::models::{Location, Manufacturer, NetworkPort, Room, Switch};
use crate::screens::{RestScreen, name_column, open_screen, status_column};
use crate::services::fetch::{PickerOption, Sourced, fetch_source, picker_options};
use crate::services::screen::ScreenConfig;
use crate::services::table::{CellValue, Column};

pub fn network_ports() -> ScreenConfig<NetworkPort> {
    ScreenConfig::builder("Netzwerkdosen")
        .column(name_column())
        .column(Column::new("roomName", "Raum", |p: &NetworkPort| {
            CellValue::optional_text(p.room_name.as_deref())
        }))
        .column(
            Column::new("portNumber", "Port", |p: &NetworkPort| {
                CellValue::optional_number(p.port_number)
            })
            .numeric()
            .width(6),
        )
        .column(status_column())
        .empty_message("Keine Netzwerkdosen vorhanden")
        .build()
}

// Sem IP cadastrado mostra um traço
fn render_ip(value: &CellValue, _: &Switch, locale: &Locale) -> String {
    match value {
        CellValue::Empty => "–".to_string(),
        other => other.display(locale),
    }
}

pub fn switches() -> ScreenConfig<Switch> {
    ScreenConfig::builder("Switches")
        .column(name_column())
        .column(Column::new("locationName", "Standort", |s: &Switch| {
            CellValue::optional_text(s.location_name.as_deref())
        }))
        .column(Column::new("roomName", "Raum", |s: &Switch| {
            CellValue::optional_text(s.room_name.as_deref())
        }))
        .column(Column::new("model", "Modell", |s: &Switch| {
            CellValue::optional_text(s.model.as_deref())
        }))
        .column(
            Column::new("portCount", "Ports", |s: &Switch| CellValue::optional_number(s.port_count))
                .numeric()
                .width(6),
        )
        .column(
            Column::new("ipAddress", "IP-Adresse", |s: &Switch| {
                CellValue::optional_text(s.ip_address.as_deref())
            })
            .width(15)
            .render(render_ip),
        )
        .column(status_column())
        .empty_message("Keine Switches vorhanden")
        .build()
}

#[derive(Debug, Clone, Default)]
pub struct NetworkPortLookups {
    pub rooms: Sourced<Room>,
}

impl NetworkPortLookups {
    pub async fn load(client: &ApiClient, locale: &Locale) -> Self {
        let repo = RestRepository::<Room>::new(client.clone());
        Self {
            rooms: fetch_source::<Room, _>(&repo, locale).await,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ApiError> {
        self.rooms.error.iter()
    }

    pub fn room_options(&self, selected: Option<i64>) -> Vec<PickerOption> {
        picker_options(&self.rooms.rows, selected)
    }
}

/// Seletores do diálogo de switches: local, sala e fabricante.
#[derive(Debug, Clone, Default)]
pub struct SwitchLookups {
    pub locations: Sourced<Location>,
    pub rooms: Sourced<Room>,
    pub manufacturers: Sourced<Manufacturer>,
}

impl SwitchLookups {
    pub async fn load(client: &ApiClient, locale: &Locale) -> Self {
        let locations = RestRepository::<Location>::new(client.clone());
        let rooms = RestRepository::<Room>::new(client.clone());
        let manufacturers = RestRepository::<Manufacturer>::new(client.clone());
        let (locations, rooms, manufacturers) = tokio::join!(
            fetch_source::<Location, _>(&locations, locale),
            fetch_source::<Room, _>(&rooms, locale),
            fetch_source::<Manufacturer, _>(&manufacturers, locale)
        );
        Self {
            locations,
            rooms,
            manufacturers,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ApiError> {
        [&self.locations.error, &self.rooms.error, &self.manufacturers.error]
            .into_iter()
            .flatten()
    }

    pub fn location_options(&self, selected: Option<i64>) -> Vec<PickerOption> {
        picker_options(&self.locations.rows, selected)
    }

    /// Só as salas do local escolhido.
    pub fn room_options(&self, location_id: Option<i64>, selected: Option<i64>) -> Vec<PickerOption> {
        let rooms: Vec<Room> = self
            .rooms
            .rows
            .iter()
            .filter(|r| location_id.is_none_or(|id| r.location_id == id))
            .cloned()
            .collect();
        picker_options(&rooms, selected)
    }

    pub fn manufacturer_options(&self, selected: Option<i64>) -> Vec<PickerOption> {
        picker_options(&self.manufacturers.rows, selected)
    }
}

pub async fn open_network_ports(
    client: &ApiClient,
    locale: &Locale,
) -> (RestScreen<NetworkPort>, NetworkPortLookups) {
    let (mut screen, lookups) = tokio::join!(
        open_screen(network_ports(), client, locale),
        NetworkPortLookups::load(client, locale)
    );
    screen.report_source_errors(lookups.errors());
    (screen, lookups)
}

pub async fn open_switches(client: &ApiClient, locale: &Locale) -> (RestScreen<Switch>, SwitchLookups) {
    let (mut screen, lookups) = tokio::join!(
        open_screen(switches(), client, locale),
        SwitchLookups::load(client, locale)
    );
    screen.report_source_errors(lookups.errors());
    (screen, lookups)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn switch_rooms_follow_selected_location() {
        let lookups = SwitchLookups {
            rooms: Sourced {
                rows: vec![room(1, 10, "Serverraum"), room(2, 20, "Büro 1"), room(3, 10, "Lager")],
                error: None,
            },
            ..Default::default()
        };

        let ids = |opts: Vec<PickerOption>| opts.into_iter().map(|o| o.id).collect::<Vec<_>>();
        assert_eq!(ids(lookups.room_options(Some(10), None)), vec![3, 1]);
        assert_eq!(ids(lookups.room_options(None, None)).len(), 3);
    }
}
