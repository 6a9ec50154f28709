//! Paint command generation
//!
//! Flattens the ticket layout into a closed set of paint commands the
//! rasterizer consumes. One text command per line; images stay as asset
//! references until raster time.

use super::assets::AssetRef;
use super::font::{text_width, LINE_HEIGHT};
use super::layout::{layout_ticket, ElementKind};
use super::TicketView;

// Ticket palette, Tailwind color values
const BANNER_BG: (u8, u8, u8, u8) = (30, 58, 138, 255); // blue-900
const BANNER_TEXT: (u8, u8, u8, u8) = (255, 255, 255, 255);
const ACCENT: (u8, u8, u8, u8) = (251, 191, 36, 255); // amber-400
const FIELD_TEXT: (u8, u8, u8, u8) = (55, 65, 81, 255); // gray-700
const QR_PLACEHOLDER: (u8, u8, u8, u8) = (229, 231, 235, 255); // gray-200

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        rgba: (u8, u8, u8, u8),
    },
    Image {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        asset: AssetRef,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintList {
    pub commands: Vec<PaintCommand>,
    pub width: u32,
    pub height: u32,
}

/// Lay out and flatten a ticket view into paint commands
pub fn paint_ticket(view: &TicketView) -> PaintList {
    let layout = layout_ticket(view);
    let mut commands = Vec::new();

    for node in &layout.nodes {
        match node.kind {
            ElementKind::Banner => {
                commands.push(PaintCommand::SolidRect {
                    x: node.rect.x,
                    y: node.rect.y,
                    width: node.rect.width,
                    height: node.rect.height,
                    rgba: BANNER_BG,
                });
                let line_w = text_width(&node.text, node.scale);
                let x = node.rect.x + ((node.rect.width.saturating_sub(line_w)) / 2) as i32;
                let y = node.rect.y + node.box_model.padding as i32;
                commands.push(PaintCommand::Text {
                    x,
                    y,
                    text: node.text.clone(),
                    scale: node.scale,
                    rgba: BANNER_TEXT,
                });
            }
            ElementKind::AccentRule => {
                commands.push(PaintCommand::SolidRect {
                    x: node.rect.x,
                    y: node.rect.y,
                    width: node.rect.width,
                    height: node.rect.height,
                    rgba: ACCENT,
                });
            }
            ElementKind::Field => {
                let mut y = node.rect.y;
                for line in node.text.lines() {
                    commands.push(PaintCommand::Text {
                        x: node.rect.x,
                        y,
                        text: line.to_string(),
                        scale: node.scale,
                        rgba: FIELD_TEXT,
                    });
                    y += (LINE_HEIGHT * node.scale) as i32;
                }
            }
            ElementKind::QrSlot => match &view.qr {
                Some(asset) => commands.push(PaintCommand::Image {
                    x: node.rect.x,
                    y: node.rect.y,
                    width: node.rect.width,
                    height: node.rect.height,
                    asset: asset.clone(),
                }),
                None => commands.push(PaintCommand::SolidRect {
                    x: node.rect.x,
                    y: node.rect.y,
                    width: node.rect.width,
                    height: node.rect.height,
                    rgba: QR_PLACEHOLDER,
                }),
            },
        }
    }

    PaintList { commands, width: layout.width, height: layout.height }
}
