//! Software rasterizer backend
//!
//! Paints the command list into an RGBA buffer at the configured device
//! scale over the fallback background, then encodes losslessly as PNG.
//! Asset failures degrade to a painted placeholder; they never fail the
//! raster.

use image::{imageops, Rgba, RgbaImage};

use super::assets::AssetLoader;
use super::font::{self, CHAR_ADVANCE, GLYPH_WIDTH};
use super::paint::{paint_ticket, PaintCommand};
use super::{Screenshot, TicketView};
use crate::error::{Error, Result};
use crate::{RasterOptions, Rasterizer};

const PLACEHOLDER: (u8, u8, u8, u8) = (229, 231, 235, 255);

/// Default rasterizer backend; pure software, deterministic output
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareRasterizer {
    loader: AssetLoader,
}

impl Rasterizer for SoftwareRasterizer {
    fn rasterize(&self, view: &TicketView, opts: &RasterOptions) -> Result<Screenshot> {
        if !opts.scale.is_finite() || opts.scale <= 0.0 {
            return Err(Error::ConfigError(format!("invalid raster scale {}", opts.scale)));
        }

        let list = paint_ticket(view);
        let scale = opts.scale;
        let out_w = ((list.width as f32) * scale).round().max(1.0) as u32;
        let out_h = ((list.height as f32) * scale).round().max(1.0) as u32;

        let mut img = RgbaImage::from_pixel(out_w, out_h, Rgba(opts.background));

        for cmd in &list.commands {
            match cmd {
                PaintCommand::SolidRect { x, y, width, height, rgba } => {
                    fill_scaled_rect(&mut img, *x, *y, *width, *height, scale, *rgba);
                }
                PaintCommand::Text { x, y, text, scale: text_scale, rgba } => {
                    draw_text(&mut img, *x, *y, text, *text_scale, scale, *rgba);
                }
                PaintCommand::Image { x, y, width, height, asset } => {
                    match self.loader.load(asset, opts.allow_remote) {
                        Ok(decoded) => {
                            let dw = ((*width as f32) * scale).round().max(1.0) as u32;
                            let dh = ((*height as f32) * scale).round().max(1.0) as u32;
                            let resized = imageops::resize(
                                &decoded.to_rgba8(),
                                dw,
                                dh,
                                imageops::FilterType::Nearest,
                            );
                            let dx = ((*x as f32) * scale).round() as i64;
                            let dy = ((*y as f32) * scale).round() as i64;
                            imageops::overlay(&mut img, &resized, dx, dy);
                        }
                        Err(e) => {
                            log::warn!("ticket asset unavailable, painting placeholder: {}", e);
                            fill_scaled_rect(&mut img, *x, *y, *width, *height, scale, PLACEHOLDER);
                        }
                    }
                }
            }
        }

        let mut png_data = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png_data), image::ImageFormat::Png)
            .map_err(|e| Error::EncodeError(e.to_string()))?;

        Ok(Screenshot { width: out_w, height: out_h, png_data })
    }
}

// Fill a layout-unit rect scaled to device pixels, clamped to the surface
fn fill_scaled_rect(
    img: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    scale: f32,
    rgba: (u8, u8, u8, u8),
) {
    let x0 = ((x as f32) * scale).round() as i64;
    let y0 = ((y as f32) * scale).round() as i64;
    let x1 = (((x + width as i32) as f32) * scale).round() as i64;
    let y1 = (((y + height as i32) as f32) * scale).round() as i64;
    fill_device_rect(img, x0, y0, x1, y1, rgba);
}

fn fill_device_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, rgba: (u8, u8, u8, u8)) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let px = Rgba([rgba.0, rgba.1, rgba.2, rgba.3]);
    for yy in y0.max(0)..y1.min(h) {
        for xx in x0.max(0)..x1.min(w) {
            img.put_pixel(xx as u32, yy as u32, px);
        }
    }
}

// Draw a single text line. Glyph pixels are `text_scale` layout units square;
// one unit of leading above the glyph row keeps ascenders off the box edge.
fn draw_text(
    img: &mut RgbaImage,
    x: i32,
    y: i32,
    text: &str,
    text_scale: u32,
    device_scale: f32,
    rgba: (u8, u8, u8, u8),
) {
    let unit = text_scale as f32;
    for (ci, ch) in text.chars().enumerate() {
        let glyph = font::glyph(ch);
        let cx = x as f32 + (ci as u32 * CHAR_ADVANCE * text_scale) as f32;
        let cy = y as f32 + unit;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px0 = (cx + col as f32 * unit) * device_scale;
                let py0 = (cy + row as f32 * unit) * device_scale;
                let px1 = (cx + (col + 1) as f32 * unit) * device_scale;
                let py1 = (cy + (row + 1) as f32 * unit) * device_scale;
                fill_device_rect(
                    img,
                    px0.round() as i64,
                    py0.round() as i64,
                    px1.round() as i64,
                    py1.round() as i64,
                    rgba,
                );
            }
        }
    }
}
