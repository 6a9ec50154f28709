//! Ticket layout
//!
//! Stacks the ticket's visual blocks vertically on a fixed-width surface
//! using fixed-advance text metrics: banner at scale 2, field rows at
//! scale 1, QR slot last.

use super::font::{CHAR_ADVANCE, LINE_HEIGHT};
use super::TicketView;

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxModel {
    pub margin: u32,
    pub padding: u32,
}

/// Block kinds of the ticket surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Banner,
    AccentRule,
    Field,
    QrSlot,
}

/// A layout node couples a box with its text and element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub rect: Rect,
    pub box_model: BoxModel,
    pub text: String,
    pub kind: ElementKind,
    pub scale: u32,
}

impl LayoutNode {
    pub fn content_width(&self) -> u32 {
        let total = (self.box_model.margin + self.box_model.padding) * 2;
        self.rect.width.saturating_sub(total)
    }
}

/// Side padding of the ticket surface
const SIDE_PADDING: u32 = 16;
/// Edge length of the QR slot
const QR_SIZE: u32 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct TicketLayout {
    pub nodes: Vec<LayoutNode>,
    pub width: u32,
    pub height: u32,
}

/// Compute the block layout for a ticket view.
///
/// Blocks stack top to bottom; field text wraps on the fixed character grid
/// so long values never overflow the surface.
pub fn layout_ticket(view: &TicketView) -> TicketLayout {
    let width = view.width;
    let mut nodes = Vec::new();
    let mut y = 0u32;

    // Banner with the conference title at scale 2
    let banner_padding = 12u32;
    let banner_h = LINE_HEIGHT * 2 + banner_padding * 2;
    nodes.push(LayoutNode {
        rect: Rect { x: 0, y: y as i32, width, height: banner_h },
        box_model: BoxModel { margin: 0, padding: banner_padding },
        text: fit_line(&view.conference, width.saturating_sub(2 * banner_padding), 2),
        kind: ElementKind::Banner,
        scale: 2,
    });
    y += banner_h;

    // Accent rule under the banner
    let rule_h = 4u32;
    nodes.push(LayoutNode {
        rect: Rect { x: 0, y: y as i32, width, height: rule_h },
        box_model: BoxModel { margin: 0, padding: 0 },
        text: String::new(),
        kind: ElementKind::AccentRule,
        scale: 1,
    });
    y += rule_h + 12;

    // Field rows, wrapped on the character grid
    let field_margin = 4u32;
    let content_w = width.saturating_sub(2 * SIDE_PADDING);
    for (label, value) in &view.fields {
        let text = wrap_text(&format!("{}: {}", label, value), content_w, 1);
        let lines = text.lines().count().max(1) as u32;
        let box_h = lines * LINE_HEIGHT;
        nodes.push(LayoutNode {
            rect: Rect {
                x: SIDE_PADDING as i32,
                y: y as i32,
                width: content_w,
                height: box_h,
            },
            box_model: BoxModel { margin: field_margin, padding: 0 },
            text,
            kind: ElementKind::Field,
            scale: 1,
        });
        y += box_h + field_margin;
    }

    // QR slot, centered, painted whether or not an asset resolves
    y += 12;
    nodes.push(LayoutNode {
        rect: Rect {
            x: ((width.saturating_sub(QR_SIZE)) / 2) as i32,
            y: y as i32,
            width: QR_SIZE,
            height: QR_SIZE,
        },
        box_model: BoxModel { margin: 0, padding: 0 },
        text: String::new(),
        kind: ElementKind::QrSlot,
        scale: 1,
    });
    y += QR_SIZE + SIDE_PADDING;

    TicketLayout { nodes, width, height: y }
}

// Truncate a single line to the available width at the given scale
fn fit_line(text: &str, avail: u32, scale: u32) -> String {
    let max_chars = (avail / (CHAR_ADVANCE * scale)).max(1) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

// Greedy word wrap on the fixed character grid
fn wrap_text(text: &str, avail: u32, scale: u32) -> String {
    let max_chars = (avail / (CHAR_ADVANCE * scale)).max(1) as usize;
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if !cur.is_empty() && cur.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
        // A single word longer than the line still gets truncated
        if cur.chars().count() > max_chars {
            cur = fit_line(&cur, avail, scale);
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::font::text_width;
    use crate::RegistrationResult;

    fn view() -> TicketView {
        let data: RegistrationResult = serde_json::from_str(
            r#"{"fullName":"A. Attendee","email":"a@example.org","registrationId":"ABC123"}"#,
        )
        .unwrap();
        TicketView::from_registration(&data)
    }

    #[test]
    fn layout_stacks_banner_fields_and_qr() {
        let layout = layout_ticket(&view());
        assert_eq!(layout.nodes[0].kind, ElementKind::Banner);
        assert_eq!(layout.nodes[0].scale, 2);
        assert_eq!(layout.nodes[1].kind, ElementKind::AccentRule);
        assert_eq!(layout.nodes.last().unwrap().kind, ElementKind::QrSlot);

        let fields: Vec<&LayoutNode> =
            layout.nodes.iter().filter(|n| n.kind == ElementKind::Field).collect();
        assert_eq!(fields.len(), 3);
        assert!(fields[0].text.starts_with("Name:"));
    }

    #[test]
    fn blocks_never_overlap_downward() {
        let layout = layout_ticket(&view());
        let mut prev_bottom = 0i32;
        for node in &layout.nodes {
            assert!(node.rect.y >= prev_bottom, "block at y={} overlaps previous", node.rect.y);
            let bottom = node.rect.y + node.rect.height as i32;
            assert!(bottom > node.rect.y);
            prev_bottom = bottom;
        }
        assert!(layout.height >= prev_bottom as u32);
    }

    #[test]
    fn qr_slot_is_centered() {
        let layout = layout_ticket(&view());
        let qr = layout.nodes.last().unwrap();
        assert_eq!(qr.rect.x as u32, (layout.width - qr.rect.width) / 2);
    }

    #[test]
    fn long_values_wrap_within_surface() {
        let data: RegistrationResult = serde_json::from_str(
            r#"{"fullName":"A Very Long Name That Definitely Does Not Fit On A Single Fixed Advance Line At All",
                "email":"a@example.org","registrationId":"R1"}"#,
        )
        .unwrap();
        let layout = layout_ticket(&TicketView::from_registration(&data));
        for node in layout.nodes.iter().filter(|n| n.kind == ElementKind::Field) {
            for line in node.text.lines() {
                assert!(text_width(line, node.scale) <= node.rect.width);
            }
        }
    }
}
