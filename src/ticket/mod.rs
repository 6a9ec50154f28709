//! Ticket rendering
//!
//! Turns a registration record into the visual ticket model, lays it out,
//! paints it, and rasterizes it into PNG bytes. The stages mirror a tiny
//! rendering pipeline: layout boxes, paint commands, raster.

pub mod assets;
pub mod font;
pub mod layout;
pub mod paint;
pub mod raster;

use crate::RegistrationResult;
use assets::AssetRef;

/// Conference name printed on the ticket banner
pub const CONFERENCE_NAME: &str = "Bharat Synapse @2047";

/// Logical width of the ticket surface in layout units
pub const TICKET_WIDTH: u32 = 480;

/// A rasterized view with losslessly encoded pixel data
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    pub fn empty(width: u32, height: u32) -> Self {
        Self { width, height, png_data: Vec::new() }
    }
}

/// The visual ticket: what the success page renders on screen and what the
/// export pipeline captures.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketView {
    /// Banner line
    pub conference: String,
    /// Labelled rows, printed in order
    pub fields: Vec<(String, String)>,
    /// Optional QR code asset
    pub qr: Option<AssetRef>,
    /// Logical width of the ticket surface
    pub width: u32,
}

impl TicketView {
    /// Build the ticket visual from a registration record.
    ///
    /// The required fields come first; any extra string-valued fields carried
    /// by the record follow in key order so the visual is deterministic.
    pub fn from_registration(data: &RegistrationResult) -> Self {
        let mut fields = vec![
            ("Name".to_string(), data.full_name.clone()),
            ("Email".to_string(), data.email.clone()),
            ("Registration ID".to_string(), data.registration_id.clone()),
        ];

        let mut extra: Vec<(&String, &serde_json::Value)> = data.extra.iter().collect();
        extra.sort_by_key(|(k, _)| k.as_str());
        for (key, value) in extra {
            if let Some(text) = value.as_str() {
                fields.push((title_case(key), text.to_string()));
            }
        }

        Self {
            conference: CONFERENCE_NAME.to_string(),
            fields,
            qr: data.qr.clone(),
            width: TICKET_WIDTH,
        }
    }
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
