// src/services/table.rs

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::common::messages::Message;
use crate::common::serde_utils::format_timestamp;
use crate::middleware::i18n::Locale;
use crate::models::entity::Entity;

/// Valor bruto de uma célula, antes da formatação.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Flag(bool),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => CellValue::Text(v.to_string()),
            _ => CellValue::Empty,
        }
    }

    pub fn optional_number<T: Into<f64>>(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, |v| CellValue::Number(v.into()))
    }

    pub fn optional_timestamp(value: Option<&DateTime<Utc>>) -> Self {
        value.map_or(CellValue::Empty, |v| CellValue::Timestamp(*v))
    }

    /// Texto exibido por padrão (sem renderizador próprio da coluna).
    pub fn display(&self, locale: &Locale) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Flag(true) => Message::Active.text(locale).to_string(),
            CellValue::Flag(false) => Message::Inactive.text(locale).to_string(),
            CellValue::Timestamp(ts) => format_timestamp(Some(ts)),
        }
    }

    // Coerção usada quando os tipos das duas células não batem
    fn coerced(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.to_lowercase(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Flag(flag) => flag.to_string(),
            CellValue::Timestamp(ts) => ts.to_rfc3339(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Números comparam como números, textos sem diferenciar maiúsculas;
/// tipos misturados caem na comparação textual.
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (CellValue::Text(x), CellValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (CellValue::Flag(x), CellValue::Flag(y)) => x.cmp(y),
        (CellValue::Timestamp(x), CellValue::Timestamp(y)) => x.cmp(y),
        _ => a.coerced().cmp(&b.coerced()),
    }
}

pub type CellFn<E> = fn(&E) -> CellValue;
pub type RenderFn<E> = fn(&CellValue, &E, &Locale) -> String;

/// Definição de coluna da tabela.
pub struct Column<E> {
    pub data_key: &'static str,
    pub label: &'static str,
    pub width: Option<u16>,
    pub numeric: bool,
    pub sortable: bool,
    value: CellFn<E>,
    render: Option<RenderFn<E>>,
}

impl<E> Clone for Column<E> {
    fn clone(&self) -> Self {
        Self {
            data_key: self.data_key,
            label: self.label,
            width: self.width,
            numeric: self.numeric,
            sortable: self.sortable,
            value: self.value,
            render: self.render,
        }
    }
}

impl<E> Column<E> {
    pub fn new(data_key: &'static str, label: &'static str, value: CellFn<E>) -> Self {
        Self {
            data_key,
            label,
            width: None,
            numeric: false,
            sortable: true,
            value,
            render: None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn render(mut self, render: RenderFn<E>) -> Self {
        self.render = Some(render);
        self
    }

    pub fn value(&self, row: &E) -> CellValue {
        (self.value)(row)
    }

    pub fn render_cell(&self, row: &E, locale: &Locale) -> String {
        let value = self.value(row);
        match self.render {
            Some(render) => render(&value, row, locale),
            None => value.display(locale),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: &'static str,
    pub direction: SortDirection,
}

impl SortState {
    /// Clique no cabeçalho: mesma coluna inverte, outra coluna começa ascendente.
    pub fn toggled(current: Option<&SortState>, key: &'static str) -> SortState {
        let direction = match current {
            Some(state) if state.key == key && state.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        SortState { key, direction }
    }
}

/// Ordenação estável: empates mantêm a ordem vinda da API.
pub fn sort_rows<E>(rows: &mut [E], column: &Column<E>, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = compare_cells(&column.value(a), &column.value(b));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];

    pub fn label(self, locale: &Locale) -> &'static str {
        match self {
            RowAction::View => Message::View.text(locale),
            RowAction::Edit => Message::Edit.text(locale),
            RowAction::Delete => Message::Delete.text(locale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: &'static str,
    pub label: &'static str,
    pub width: Option<u16>,
    pub numeric: bool,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: i64,
    pub cells: Vec<String>,
}

/// Tabela pronta para exibição.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    /// Presente só quando não há linhas.
    pub empty_message: Option<String>,
}

impl RenderedTable {
    /// Valor da célula `key` na linha `id`.
    pub fn cell(&self, id: i64, key: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h.key == key)?;
        let row = self.rows.iter().find(|r| r.id == id)?;
        row.cells.get(index).map(String::as_str)
    }

    /// Renderização em texto alinhado, para o terminal.
    pub fn to_text(&self) -> String {
        if let Some(message) = &self.empty_message {
            return message.clone();
        }

        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| h.width.map_or(h.label.chars().count(), usize::from))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&self.headers)
                .zip(&widths)
                .map(|((cell, header), width)| {
                    if header.numeric {
                        format!("{cell:>width$}")
                    } else {
                        format!("{cell:<width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(self.headers.iter().map(|h| h.label).collect())];
        out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
        for row in &self.rows {
            out.push(line(row.cells.iter().map(String::as_str).collect()));
        }
        out.join("\n")
    }
}

pub fn render_table<E: Entity>(
    columns: &[Column<E>],
    rows: &[E],
    sort: Option<&SortState>,
    empty_message: &str,
    locale: &Locale,
) -> RenderedTable {
    let headers = columns
        .iter()
        .map(|c| HeaderCell {
            key: c.data_key,
            label: c.label,
            width: c.width,
            numeric: c.numeric,
            sortable: c.sortable,
            sorted: sort.filter(|s| s.key == c.data_key).map(|s| s.direction),
        })
        .collect();

    let rendered = rows
        .iter()
        .map(|row| RenderedRow {
            id: row.id(),
            cells: columns.iter().map(|c| c.render_cell(row, locale)).collect(),
        })
        .collect::<Vec<_>>();

    let empty_message = rendered.is_empty().then(|| empty_message.to_string());

    RenderedTable {
        headers,
        rows: rendered,
        empty_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        let mut values = vec![
            CellValue::Number(10.0),
            CellValue::Number(9.0),
            CellValue::Number(100.0),
        ];
        values.sort_by(compare_cells);
        assert_eq!(
            values,
            vec![CellValue::Number(9.0), CellValue::Number(10.0), CellValue::Number(100.0)]
        );
    }

    #[test]
    fn text_ignores_case_and_mixed_types_fall_back_to_strings() {
        assert_eq!(
            compare_cells(&CellValue::text("apple"), &CellValue::text("Banana")),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::Number(5.0), &CellValue::text("a")),
            Ordering::Less
        );
        assert_eq!(compare_cells(&CellValue::Empty, &CellValue::text("x")), Ordering::Less);
    }

    #[test]
    fn same_header_toggles_direction() {
        let first = SortState::toggled(None, "name");
        assert_eq!(first.direction, SortDirection::Ascending);
        let second = SortState::toggled(Some(&first), "name");
        assert_eq!(second.direction, SortDirection::Descending);
        let other = SortState::toggled(Some(&second), "updatedAt");
        assert_eq!(other.direction, SortDirection::Ascending);
    }

    #[test]
    fn flags_display_localized_status() {
        let de = Locale::default();
        let en = Locale::parse("en");
        assert_eq!(CellValue::Flag(true).display(&de), "Aktiv");
        assert_eq!(CellValue::Flag(false).display(&de), "Inaktiv");
        assert_eq!(CellValue::Flag(true).display(&en), "Active");
        assert_eq!(CellValue::Number(42.0).display(&de), "42");
    }
}
