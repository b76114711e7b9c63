// ============================================================================
// EXPORT SERVICE - Listado actual -> PDF (descarga o email)
// ============================================================================

use std::ops::Range;
use std::rc::Rc;

use base64::Engine;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use serde_json::json;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::api_client::{ApiError, HttpRequest, Method, Transport};
use crate::config::MailConfig;
use crate::models::{Column, Entity, EntityConfig, EntityId};
use crate::utils::{GlooScheduler, Scheduler, TimerHandle};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 7.0;
const FIRST_ROW_Y: f32 = 262.0;
const LAST_ROW_Y: f32 = 20.0;
const FONT_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 14.0;
const REVOKE_DELAY_MS: u32 = 1_000;
/// Ancho medio aproximado de un carácter de Helvetica 10pt
const CHAR_WIDTH_MM: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("Error generando el PDF: {0}")]
    Render(String),
    #[error("Error descargando el PDF: {0}")]
    Download(String),
    #[error("El envío por email no está configurado (MAIL_RELAY_URL)")]
    MailRelayNotConfigured,
    #[error("Error enviando el email: {0}")]
    Mail(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PdfExport {
    /// `data:application/pdf;...;base64,` para adjuntar en el email
    pub fn data_uri(&self) -> String {
        format!(
            "data:application/pdf;filename={};base64,{}",
            self.filename,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// `Articles-Company-3.pdf`, `Companies.pdf`
pub fn export_filename(config: &EntityConfig, parent_id: Option<EntityId>) -> String {
    match parent_id {
        Some(id) => format!("{}-Company-{}.pdf", config.plural, id),
        None => format!("{}.pdf", config.plural),
    }
}

/// Celdas de la tabla, ya recortadas al ancho de cada columna
pub fn table_cells<E: Entity>(columns: &[Column], rows: &[E]) -> Vec<Vec<String>> {
    let max_chars = max_chars_per_column(columns.len());
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| truncate(&row.field_value(c.field), max_chars))
                .collect()
        })
        .collect()
}

/// Rangos de filas por página
pub fn paginate(row_count: usize) -> Vec<Range<usize>> {
    let first_page = rows_per_page(FIRST_ROW_Y - ROW_HEIGHT);
    let other_pages = rows_per_page(PAGE_HEIGHT - MARGIN - ROW_HEIGHT);

    let mut pages = vec![0..row_count.min(first_page)];
    let mut start = pages[0].end;
    while start < row_count {
        let end = (start + other_pages).min(row_count);
        pages.push(start..end);
        start = end;
    }
    pages
}

fn rows_per_page(top: f32) -> usize {
    (((top - LAST_ROW_Y) / ROW_HEIGHT).floor() as usize).max(1)
}

fn max_chars_per_column(columns: usize) -> usize {
    let width = (PAGE_WIDTH - 2.0 * MARGIN) / columns.max(1) as f32;
    ((width / CHAR_WIDTH_MM) as usize).max(4)
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Tabla de una sola hoja lógica con columnas fijas; continúa en páginas nuevas
pub fn render_pdf<E: Entity>(
    config: &EntityConfig,
    parent_id: Option<EntityId>,
    rows: &[E],
) -> Result<PdfExport, ExportError> {
    let title = match parent_id {
        Some(id) => format!("{} - Company {}", config.plural, id),
        None => config.plural.to_string(),
    };
    let render_err = |e: printpdf::Error| ExportError::Render(e.to_string());

    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Tabla");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_err)?;

    let columns = config.export_columns;
    let cells = table_cells(columns, rows);
    let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns.len().max(1) as f32;

    let first_layer = doc.get_page(page).get_layer(layer);
    first_layer.use_text(&title, TITLE_SIZE, Mm(MARGIN), Mm(PAGE_HEIGHT - MARGIN - 5.0), &bold);
    first_layer.use_text(
        format!("Generado: {}", chrono::Local::now().format("%Y-%m-%d %H:%M")),
        FONT_SIZE,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - MARGIN - 12.0),
        &font,
    );

    for (index, range) in paginate(cells.len()).into_iter().enumerate() {
        let (current, top) = if index == 0 {
            (first_layer.clone(), FIRST_ROW_Y)
        } else {
            (new_page(&doc), PAGE_HEIGHT - MARGIN)
        };

        let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
        write_row(&current, &headers, top, column_width, &bold);
        for (offset, row) in cells[range].iter().enumerate() {
            let y = top - ROW_HEIGHT * (offset as f32 + 1.0);
            let values: Vec<&str> = row.iter().map(String::as_str).collect();
            write_row(&current, &values, y, column_width, &font);
        }
    }

    let bytes = doc.save_to_bytes().map_err(render_err)?;
    log::info!("📄 PDF generado: {} filas, {} bytes", rows.len(), bytes.len());

    Ok(PdfExport {
        filename: export_filename(config, parent_id),
        bytes,
    })
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Tabla");
    doc.get_page(page).get_layer(layer)
}

fn write_row(layer: &PdfLayerReference, values: &[&str], y: f32, width: f32, font: &IndirectFontRef) {
    for (index, value) in values.iter().enumerate() {
        let x = MARGIN + width * index as f32;
        layer.use_text(*value, FONT_SIZE, Mm(x), Mm(y), font);
    }
}

/// Libera el object URL después de que el navegador arranque la descarga
fn defer_revoke(
    scheduler: &dyn Scheduler,
    url: String,
    revoke: impl FnOnce(String) + 'static,
) -> TimerHandle {
    scheduler.schedule(REVOKE_DELAY_MS, Box::new(move || revoke(url)))
}

/// Descarga en el navegador vía `<a download>`
pub fn download_pdf(export: &PdfExport) -> Result<(), ExportError> {
    let js_err = |e: wasm_bindgen::JsValue| ExportError::Download(format!("{:?}", e));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Download("sin document".into()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(export.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;

    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| ExportError::Download("no es un <a>".into()))?;
    anchor.set_href(&url);
    anchor.set_download(&export.filename);
    anchor.set_attribute("style", "display: none").map_err(js_err)?;

    // Firefox ignora el click en un <a> fuera del documento
    let body = document
        .body()
        .ok_or_else(|| ExportError::Download("sin <body>".into()))?;
    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    anchor.remove();

    defer_revoke(&GlooScheduler, url, |url| {
        if let Err(e) = Url::revoke_object_url(&url) {
            log::warn!("⚠️ No se pudo liberar {}: {:?}", url, e);
        }
    })
    .detach();

    log::info!("💾 PDF descargado: {}", export.filename);
    Ok(())
}

/// Envío del PDF por email a través de un relay HTTP
pub struct MailRelay {
    transport: Rc<dyn Transport>,
    config: MailConfig,
}

impl MailRelay {
    pub fn new(transport: Rc<dyn Transport>, config: MailConfig) -> Self {
        Self { transport, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.relay_url.is_some()
    }

    pub async fn send_pdf(&self, export: &PdfExport) -> Result<(), ExportError> {
        let url = self
            .config
            .relay_url
            .as_deref()
            .ok_or(ExportError::MailRelayNotConfigured)?;

        let body = json!({
            "from_email": self.config.from_email,
            "to_email": self.config.to_email,
            "filename": export.filename,
            "pdf_data": export.data_uri(),
        });

        let response = self
            .transport
            .send(HttpRequest::new(Method::Post, url).json(body))
            .await?;
        if !response.ok() {
            return Err(ExportError::Mail(ApiError::Status {
                status: response.status,
                message: response.status_text,
            }));
        }

        log::info!("📧 PDF enviado por email a {}", self.config.to_email);
        Ok(())
    }
}
