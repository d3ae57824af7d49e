// src/services/label_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use image::{DynamicImage, ImageBuffer, Luma};
use qrcode::QrCode;
use rand::Rng;

use crate::common::error::AppError;

const MAX_BAR_HEIGHT: u8 = 8;
const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Prefixo + número preenchido com zeros à esquerda. Nunca trunca.
pub fn generate_asset_tag(prefix: &str, digit_count: usize, number: u64) -> String {
    format!("{prefix}{number:0>digit_count$}")
}

/// Até `count` números consecutivos; para antes de estourar `u64`.
pub fn tag_sequence(prefix: &str, digit_count: usize, start: u64, count: usize) -> Vec<String> {
    (0..count as u64)
        .map_while(|offset| start.checked_add(offset))
        .map(|number| generate_asset_tag(prefix, digit_count, number))
        .collect()
}

/// Alturas aleatórias (1..=8) do código de barras decorativo. Não é legível por leitor.
pub fn decorative_bars<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<u8> {
    (0..count).map(|_| rng.gen_range(1..=MAX_BAR_HEIGHT)).collect()
}

pub fn bars_text(bars: &[u8]) -> String {
    bars.iter()
        .map(|h| BAR_GLYPHS[usize::from((*h).clamp(1, MAX_BAR_HEIGHT) - 1)])
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub tag: String,
    pub bars: Vec<u8>,
}

impl Label {
    pub fn new<R: Rng + ?Sized>(tag: impl Into<String>, rng: &mut R) -> Self {
        Self {
            tag: tag.into(),
            bars: decorative_bars(rng, 24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub columns: usize,
    pub rows_per_page: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            rows_per_page: 8,
        }
    }
}

impl SheetLayout {
    pub fn per_page(&self) -> usize {
        self.columns.max(1) * self.rows_per_page.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPage {
    pub number: usize,
    pub rows: Vec<Vec<Label>>,
}

/// Distribui as etiquetas na grade `columns x rows_per_page`, página a página.
pub fn layout_sheet(labels: Vec<Label>, layout: SheetLayout) -> Vec<LabelPage> {
    let columns = layout.columns.max(1);
    let per_page = layout.per_page();

    labels
        .chunks(per_page)
        .enumerate()
        .map(|(i, page)| LabelPage {
            number: i + 1,
            rows: page.chunks(columns).map(<[Label]>::to_vec).collect(),
        })
        .collect()
}

/// QR Code em texto, para pré-visualização no terminal.
pub fn render_qr_text(tag: &str) -> Result<String, AppError> {
    let code = QrCode::new(tag.as_bytes())?;
    Ok(code
        .render::<char>()
        .quiet_zone(false)
        .module_dimensions(2, 1)
        .build())
}

fn qr_image(tag: &str) -> Result<DynamicImage, AppError> {
    let code = QrCode::new(tag.as_bytes())?;
    let buffer = code.render::<Luma<u8>>().min_dimensions(120, 120).build();
    Ok(DynamicImage::ImageLuma8(buffer))
}

// Barras pretas crescendo de baixo para cima, 3px por barra + 1px de espaço
fn bars_image(bars: &[u8]) -> DynamicImage {
    let scale = 4u32;
    let width = (bars.len() as u32 * 4).max(1);
    let height = u32::from(MAX_BAR_HEIGHT) * scale;

    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        let bar = (x / 4) as usize;
        let filled = bars
            .get(bar)
            .is_some_and(|h| x % 4 != 3 && height - y <= u32::from(*h) * scale);
        if filled { Luma([0u8]) } else { Luma([255u8]) }
    });
    DynamicImage::ImageLuma8(buffer)
}

/// Gera a folha de etiquetas em PDF.
#[derive(Debug, Clone)]
pub struct LabelPrinter {
    font_dir: PathBuf,
    font_family: String,
    layout: SheetLayout,
}

impl LabelPrinter {
    pub fn new(font_dir: impl Into<PathBuf>, font_family: impl Into<String>, layout: SheetLayout) -> Self {
        Self {
            font_dir: font_dir.into(),
            font_family: font_family.into(),
            layout,
        }
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    pub fn render_pdf(&self, labels: Vec<Label>) -> Result<Vec<u8>, AppError> {
        let pages = layout_sheet(labels, self.layout);

        let font_family = genpdf::fonts::from_files(&self.font_dir, &self.font_family, None)
            .map_err(|_| AppError::FontNotFound(format!("{} em {}", self.font_family, self.font_dir.display())))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title("Etiketten");
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        let pdf_err = |e: genpdf::error::Error| AppError::PdfError(e.to_string());
        let tag_style = style::Style::new().bold().with_font_size(9);

        for (i, page) in pages.iter().enumerate() {
            if i > 0 {
                doc.push(elements::PageBreak::new());
            }

            let mut table = elements::TableLayout::new(vec![1; self.layout.columns.max(1)]);
            table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

            for row in &page.rows {
                let mut table_row = table.row();
                for column in 0..self.layout.columns.max(1) {
                    match row.get(column) {
                        Some(label) => {
                            let qr = elements::Image::from_dynamic_image(qr_image(&label.tag)?)
                                .map_err(pdf_err)?
                                .with_scale(genpdf::Scale::new(0.4, 0.4));
                            let bars = elements::Image::from_dynamic_image(bars_image(&label.bars))
                                .map_err(pdf_err)?
                                .with_scale(genpdf::Scale::new(0.5, 0.5));

                            let cell = elements::LinearLayout::vertical()
                                .element(qr)
                                .element(elements::Paragraph::new(label.tag.clone()).styled(tag_style))
                                .element(bars)
                                .padded(1);
                            table_row.push_element(cell);
                        }
                        None => table_row.push_element(elements::Paragraph::new("")),
                    }
                }
                table_row.push().map_err(pdf_err)?;
            }

            doc.push(table);
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(pdf_err)?;
        tracing::info!(pages = pages.len(), bytes = buffer.len(), "Folha de etiquetas gerada");

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pads_tags_without_truncating() {
        assert_eq!(generate_asset_tag("LBV", 6, 1), "LBV000001");
        assert_eq!(generate_asset_tag("LBV", 6, 1000), "LBV001000");
        assert_eq!(generate_asset_tag("LBV", 3, 123456), "LBV123456");
        assert_eq!(tag_sequence("IT-", 2, 9, 3), vec!["IT-09", "IT-10", "IT-11"]);
    }

    #[test]
    fn sequence_stops_at_the_largest_number() {
        let tags = tag_sequence("LBV", 6, u64::MAX - 1, 5);
        assert_eq!(tags, vec![format!("LBV{}", u64::MAX - 1), format!("LBV{}", u64::MAX)]);
    }

    #[test]
    fn bars_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let bars = decorative_bars(&mut rng, 200);
        assert_eq!(bars.len(), 200);
        assert!(bars.iter().all(|h| (1..=8).contains(h)));
        assert_eq!(bars_text(&[1, 8, 4]), "▁█▄");
    }

    #[test]
    fn sheet_is_paginated_row_by_row() {
        let mut rng = StdRng::seed_from_u64(1);
        let labels: Vec<Label> = tag_sequence("LBV", 6, 1, 7)
            .into_iter()
            .map(|t| Label::new(t, &mut rng))
            .collect();

        let pages = layout_sheet(labels, SheetLayout { columns: 2, rows_per_page: 2 });
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows.len(), 2);
        assert_eq!(pages[0].rows[1][1].tag, "LBV000004");
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].rows.iter().map(Vec::len).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn qr_preview_is_not_empty() {
        let text = render_qr_text("LBV000001").unwrap();
        assert!(text.lines().count() > 10);
    }

    #[test]
    fn missing_font_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let printer = LabelPrinter::new(dir.path(), "Roboto", SheetLayout::default());
        let mut rng = StdRng::seed_from_u64(3);
        let result = printer.render_pdf(vec![Label::new("LBV000001", &mut rng)]);
        assert!(matches!(result, Err(AppError::FontNotFound(_))));
    }
}
