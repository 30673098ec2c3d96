// src/ui/placement.rs
//
// Anchor placement for contextual popovers. Pure function of the anchor
// rect, the viewport, and the popover size, so tests need no rendering.
use bevy_egui::egui::{Pos2, Rect, Vec2};

/// Vertical gap between the popover and its anchor.
pub const ANCHOR_GAP: f32 = 8.0;
/// Minimum distance kept between the popover and every viewport edge.
pub const VIEWPORT_MARGIN: f32 = 12.0;

/// Computes the top-left position for a popover anchored to `anchor` inside
/// `viewport`. Preferred placement is above the anchor, horizontally
/// centered; if that would break the top margin the popover flips below the
/// anchor instead. This is a single-candidate flip — above then below, never
/// left/right. Both coordinates are then clamped independently into the
/// margin box.
pub fn place_popover(anchor: Rect, viewport: Rect, popover_size: Vec2) -> Pos2 {
    let mut top = anchor.top() - ANCHOR_GAP - popover_size.y;
    if top < viewport.top() + VIEWPORT_MARGIN {
        top = anchor.bottom() + ANCHOR_GAP;
    }
    let left = anchor.center().x - popover_size.x / 2.0;

    let clamp_max_x = (viewport.right() - popover_size.x - VIEWPORT_MARGIN)
        .max(viewport.left() + VIEWPORT_MARGIN);
    let clamp_max_y = (viewport.bottom() - popover_size.y - VIEWPORT_MARGIN)
        .max(viewport.top() + VIEWPORT_MARGIN);

    Pos2 {
        x: left.clamp(viewport.left() + VIEWPORT_MARGIN, clamp_max_x),
        y: top.clamp(viewport.top() + VIEWPORT_MARGIN, clamp_max_y),
    }
}
