//! Ticketfront
//!
//! Registration-site UI state and headless ticket export for Rust. The crate
//! provides a high-level interface for deriving scroll-aware navigation state
//! and for turning a confirmed registration into a downloadable PDF ticket.
//!
//! # Features
//!
//! - **Scroll-State Navigation**: derives the "on light background" flag from
//!   the live scroll position and a named content boundary
//! - **Ticket Export Pipeline**: rasterizes the on-screen ticket view at 2x,
//!   composes a single-page A4 document, and saves `Ticket-<id>.pdf`
//! - **Modular Design**: trait seams for the rasterizer backend, the save
//!   sink, and the user-facing notifier
//!
//! # Example
//!
//! ```no_run
//! use ticketfront::export::{Exporter, FsSink, LogNotifier};
//! use ticketfront::page::{Page, TICKET_ELEMENT_ID};
//! use ticketfront::ticket::TicketView;
//! use ticketfront::{ExportConfig, RegistrationResult};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data: RegistrationResult = serde_json::from_str(
//!     r#"{"fullName":"A. Attendee","email":"a@example.org","registrationId":"ABC123"}"#,
//! )?;
//!
//! let mut page = Page::new();
//! page.mount(TICKET_ELEMENT_ID, TicketView::from_registration(&data));
//!
//! let mut exporter = Exporter::new(
//!     page,
//!     ticketfront::new_rasterizer(),
//!     Box::new(FsSink::new("out")),
//!     Arc::new(LogNotifier),
//!     ExportConfig::default(),
//! );
//! exporter.export_ticket(TICKET_ELEMENT_ID, &data.registration_id)?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod nav;
pub mod page;
pub mod ticket;

pub mod export;
// Re-export the async handle at the crate root for ergonomic examples
pub use export::handle::ExportHandle;

use ticket::assets::AssetRef;
use ticket::{Screenshot, TicketView};

/// Configuration for the export pipeline
///
/// The defaults match the print layout the success page has always used:
/// a 2x raster over a white background, placed on a portrait A4 page at
/// 180mm width with a 20mm top margin.
///
/// # Examples
///
/// ```
/// let cfg = ticketfront::ExportConfig::default();
/// assert_eq!(cfg.raster.scale, 2.0);
/// assert_eq!(cfg.image_width_mm, 180.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Rasterization options for the ticket view
    pub raster: RasterOptions,
    /// Page width in millimetres (A4 portrait)
    pub page_width_mm: f32,
    /// Page height in millimetres (A4 portrait)
    pub page_height_mm: f32,
    /// Fixed target width of the placed ticket image
    pub image_width_mm: f32,
    /// Top margin above the placed image
    pub top_margin_mm: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            raster: RasterOptions::default(),
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            image_width_mm: 180.0,
            top_margin_mm: 20.0,
        }
    }
}

/// Rasterization options
///
/// Capture settings for the ticket raster: a device-pixel scale for print
/// clarity, an opaque fallback background for transparent regions, and
/// whether remote assets may be fetched.
#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    /// Device pixels per layout unit
    pub scale: f32,
    /// Fallback background as RGBA
    pub background: [u8; 4],
    /// Whether remote ticket assets (QR codes) may be fetched
    pub allow_remote: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: [255, 255, 255, 255],
            allow_remote: true,
        }
    }
}

/// An immutable registration record produced by the external registration
/// flow. Passed by reference into the success view; never mutated here.
///
/// Fields beyond the required three are opaque pass-through data consumed by
/// the ticket visual (institution, category, and similar).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    /// Attendee full name as entered at registration
    pub full_name: String,
    /// Confirmation email address
    pub email: String,
    /// Stable external identifier; also the exported file's base name
    pub registration_id: String,
    /// Optional QR code asset for the ticket visual
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr: Option<AssetRef>,
    /// Additional fields displayed on the ticket, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Core trait for ticket rasterizer backends
///
/// A rasterizer converts the rendered appearance of a ticket view into a
/// pixel bitmap. The software backend is the default; the trait is the seam
/// for alternative capture backends.
pub trait Rasterizer {
    /// Rasterize the view into a losslessly encoded screenshot
    fn rasterize(&self, view: &TicketView, opts: &RasterOptions) -> Result<Screenshot>;
}

/// Create a rasterizer with the default software backend
pub fn new_rasterizer() -> ticket::raster::SoftwareRasterizer {
    ticket::raster::SoftwareRasterizer::default()
}
