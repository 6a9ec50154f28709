//! A4 document composition
//!
//! Embeds the ticket raster into a single-page portrait A4 document: fixed
//! 180mm image width, aspect-preserving height, horizontally centered, 20mm
//! top margin. Composition happens fully in memory so the save step is
//! atomic from the caller's perspective.

use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, XObjectId};

use crate::error::{Error, Result};
use crate::ticket::Screenshot;
use crate::ExportConfig;

/// Placement of the ticket image on the page, in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub width_mm: f32,
    pub height_mm: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

impl ImagePlacement {
    /// Fit an image of the given pixel dimensions: fixed target width,
    /// height preserving aspect ratio, horizontally centered, fixed top
    /// margin.
    pub fn compute(img_w: u32, img_h: u32, config: &ExportConfig) -> ImagePlacement {
        let width_mm = config.image_width_mm;
        let height_mm = width_mm * (img_h as f32) / (img_w as f32).max(1.0);
        ImagePlacement {
            width_mm,
            height_mm,
            x_mm: (config.page_width_mm - width_mm) / 2.0,
            y_mm: config.top_margin_mm,
        }
    }
}

/// Compose the single-page A4 document around the rasterized ticket
pub fn compose_a4(
    shot: &Screenshot,
    config: &ExportConfig,
    registration_id: &str,
) -> Result<Vec<u8>> {
    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(&shot.png_data, &mut warnings)
        .map_err(|e| Error::ComposeError(format!("decode ticket raster: {}", e)))?;
    let (img_w, img_h) = (raw.width as u32, raw.height as u32);
    let placement = ImagePlacement::compute(img_w, img_h, config);

    let mut doc = PdfDocument::new(&format!("Ticket {}", registration_id));
    let xobj_id = XObjectId::new();
    doc.resources.xobjects.map.insert(xobj_id.clone(), XObject::Image(raw));

    // printpdf's origin is the bottom-left corner
    let y_from_bottom = config.page_height_mm - (placement.y_mm + placement.height_mm);
    let transform = XObjectTransform {
        translate_x: Some(Mm(placement.x_mm).into_pt()),
        translate_y: Some(Mm(y_from_bottom).into_pt()),
        scale_x: Some(Mm(placement.width_mm).into_pt().0 / img_w as f32),
        scale_y: Some(Mm(placement.height_mm).into_pt().0 / img_h as f32),
        rotate: None,
        dpi: Some(72.0),
    };
    let ops = vec![Op::UseXobject { id: xobj_id, transform }];

    let page = PdfPage::new(Mm(config.page_width_mm), Mm(config.page_height_mm), ops);
    doc.pages.push(page);

    let mut out = Vec::new();
    doc.save_writer(&mut out, &PdfSaveOptions::default(), &mut warnings);
    if out.is_empty() {
        return Err(Error::ComposeError("document serialized to zero bytes".into()));
    }
    Ok(out)
}
