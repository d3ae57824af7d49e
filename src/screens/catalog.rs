// src/screens/catalog.rs

use crate::api::{client::ApiClient, repository::RestRepository};
use crate::common::error::ApiError;
use crate::middleware::i18n::Locale;
use crate::models::{Category, DeviceModel, Manufacturer, Supplier};
use crate::screens::{
    RestScreen, description_column, name_column, open_screen, status_column, updated_column,
};
use crate::services::fetch::{PickerOption, Sourced, fetch_source, picker_options};
use crate::services::screen::ScreenConfig;
use crate::services::table::{CellValue, Column};

pub fn categories() -> ScreenConfig<Category> {
    ScreenConfig::builder("Kategorien")
        .column(name_column())
        .column(description_column())
        .column(status_column())
        .column(updated_column())
        .empty_message("Keine Kategorien vorhanden")
        .build()
}

pub fn manufacturers() -> ScreenConfig<Manufacturer> {
    ScreenConfig::builder("Hersteller")
        .column(name_column())
        .column(Column::new("website", "Website", |m: &Manufacturer| {
            CellValue::optional_text(m.website.as_deref())
        }))
        .column(Column::new("contactEmail", "E-Mail", |m: &Manufacturer| {
            CellValue::optional_text(m.contact_email.as_deref())
        }))
        .column(
            Column::new("contactPhone", "Telefon", |m: &Manufacturer| {
                CellValue::optional_text(m.contact_phone.as_deref())
            })
            .sortable(false),
        )
        .column(status_column())
        .empty_message("Keine Hersteller vorhanden")
        .build()
}

pub fn suppliers() -> ScreenConfig<Supplier> {
    ScreenConfig::builder("Lieferanten")
        .column(name_column())
        .column(Column::new("contactPerson", "Ansprechpartner", |s: &Supplier| {
            CellValue::optional_text(s.contact_person.as_deref())
        }))
        .column(Column::new("contactEmail", "E-Mail", |s: &Supplier| {
            CellValue::optional_text(s.contact_email.as_deref())
        }))
        .column(
            Column::new("contactPhone", "Telefon", |s: &Supplier| {
                CellValue::optional_text(s.contact_phone.as_deref())
            })
            .sortable(false),
        )
        .column(status_column())
        .empty_message("Keine Lieferanten vorhanden")
        .build()
}

// "i5 / 16 GB / 512 GB", pulando o que estiver vazio
fn render_specs(_: &CellValue, model: &DeviceModel, _: &Locale) -> String {
    [&model.cpu, &model.ram, &model.hdd]
        .into_iter()
        .filter_map(|v| v.as_deref().map(str::trim).filter(|s| !s.is_empty()))
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn device_models() -> ScreenConfig<DeviceModel> {
    ScreenConfig::builder("Gerätemodelle")
        .column(name_column())
        .column(Column::new("manufacturerName", "Hersteller", |m: &DeviceModel| {
            CellValue::optional_text(m.manufacturer_name.as_deref())
        }))
        .column(Column::new("categoryName", "Kategorie", |m: &DeviceModel| {
            CellValue::optional_text(m.category_name.as_deref())
        }))
        .column(
            Column::new("cpu", "Ausstattung", |m: &DeviceModel| {
                CellValue::optional_text(m.cpu.as_deref())
            })
            .width(28)
            .render(render_specs),
        )
        .column(status_column())
        .empty_message("Keine Gerätemodelle vorhanden")
        .build()
}

/// Listas dos seletores do diálogo de modelos.
#[derive(Debug, Clone, Default)]
pub struct DeviceModelLookups {
    pub manufacturers: Sourced<Manufacturer>,
    pub categories: Sourced<Category>,
}

impl DeviceModelLookups {
    pub async fn load(client: &ApiClient, locale: &Locale) -> Self {
        let manufacturers = RestRepository::<Manufacturer>::new(client.clone());
        let categories = RestRepository::<Category>::new(client.clone());
        let (manufacturers, categories) = tokio::join!(
            fetch_source::<Manufacturer, _>(&manufacturers, locale),
            fetch_source::<Category, _>(&categories, locale)
        );
        Self {
            manufacturers,
            categories,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ApiError> {
        [&self.manufacturers.error, &self.categories.error]
            .into_iter()
            .flatten()
    }

    pub fn manufacturer_options(&self, selected: Option<i64>) -> Vec<PickerOption> {
        picker_options(&self.manufacturers.rows, selected)
    }

    pub fn category_options(&self, selected: Option<i64>) -> Vec<PickerOption> {
        picker_options(&self.categories.rows, selected)
    }
}

/// Modelos, fabricantes e categorias buscados em paralelo.
pub async fn open_device_models(
    client: &ApiClient,
    locale: &Locale,
) -> (RestScreen<DeviceModel>, DeviceModelLookups) {
    let (mut screen, lookups) = tokio::join!(
        open_screen(device_models(), client, locale),
        DeviceModelLookups::load(client, locale)
    );
    screen.report_source_errors(lookups.errors());
    (screen, lookups)
}
