//! Anchor geometry for floating menus.
//!
//! The engine never reads a UI toolkit directly. Hosts implement
//! [`MeasureAnchor`] to report where triggers and panels are on screen; the
//! positioning functions only consume rectangles and a scroll offset.

use serde::{Deserialize, Serialize};

use super::MenuKind;

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in viewport pixels, as reported by a bounding-box query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside this rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Visible window size and vertical scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scroll_y: f64) -> Self {
        Self {
            width,
            height,
            scroll_y,
        }
    }
}

/// Document-relative anchor of the column menu panel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuPosition {
    pub top: f64,
    pub right: f64,
}

/// Sizing rules for the column menu panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLayout {
    /// Vertical gap between trigger and panel.
    pub gap: f64,
    /// Upper bound on the panel height in pixels.
    pub max_height: f64,
    /// Upper bound on the panel height as a fraction of the viewport height.
    pub viewport_fraction: f64,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            gap: 4.0,
            max_height: 400.0,
            viewport_fraction: 0.7,
        }
    }
}

impl MenuLayout {
    /// Panel height limit for the given viewport; content scrolls beyond it.
    pub fn max_height_for(&self, viewport: Viewport) -> f64 {
        self.max_height.min(viewport.height * self.viewport_fraction)
    }
}

/// Place the column menu under its trigger, right-aligned with it.
///
/// `anchor` is the trigger's viewport rectangle at the moment of opening;
/// adding the scroll offset turns it into document coordinates.
pub fn column_menu_position(anchor: Rect, viewport: Viewport, layout: &MenuLayout) -> MenuPosition {
    MenuPosition {
        top: anchor.bottom() + viewport.scroll_y + layout.gap,
        right: (viewport.width - anchor.right()).max(0.0),
    }
}

/// Where the column menu panel goes and how tall it may grow.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuPlacement {
    pub position: MenuPosition,
    pub max_height: f64,
}

impl MenuPlacement {
    /// Placement for a trigger measured at `anchor`.
    pub fn for_anchor(anchor: AnchorSnapshot, layout: &MenuLayout) -> Self {
        Self {
            position: column_menu_position(anchor.rect, anchor.viewport, layout),
            max_height: layout.max_height_for(anchor.viewport),
        }
    }
}

/// Host capability that measures menu triggers and panels.
pub trait MeasureAnchor {
    /// Bounding box of the button that toggles `menu`.
    fn trigger_rect(&self, menu: MenuKind) -> Option<Rect>;

    /// Bounding box of the open panel of `menu`.
    fn panel_rect(&self, menu: MenuKind) -> Option<Rect>;

    /// Current viewport size and scroll offset.
    fn viewport(&self) -> Viewport;
}

/// Trigger rect and viewport captured when a menu is toggled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorSnapshot {
    pub rect: Rect,
    pub viewport: Viewport,
}

impl AnchorSnapshot {
    /// Measure the trigger of `menu`, if the host can locate it.
    pub fn measure(measure: &dyn MeasureAnchor, menu: MenuKind) -> Option<Self> {
        measure.trigger_rect(menu).map(|rect| Self {
            rect,
            viewport: measure.viewport(),
        })
    }
}

/// Screen areas of one menu that count as "inside" for outside clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuRegion {
    pub trigger: Option<Rect>,
    pub panel: Option<Rect>,
}

impl MenuRegion {
    pub fn contains(&self, point: Point) -> bool {
        self.trigger.is_some_and(|r| r.contains(point)) || self.panel.is_some_and(|r| r.contains(point))
    }
}

/// Regions of every menu, captured at pointer-down time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuRegions {
    pub actions: MenuRegion,
    pub filter: MenuRegion,
    pub columns: MenuRegion,
}

impl MenuRegions {
    /// Measure every menu through the host.
    pub fn measure(measure: &dyn MeasureAnchor) -> Self {
        let region = |menu| MenuRegion {
            trigger: measure.trigger_rect(menu),
            panel: measure.panel_rect(menu),
        };
        Self {
            actions: region(MenuKind::Actions),
            filter: region(MenuKind::Filter),
            columns: region(MenuKind::Columns),
        }
    }

    pub fn get(&self, menu: MenuKind) -> &MenuRegion {
        match menu {
            MenuKind::Actions => &self.actions,
            MenuKind::Filter => &self.filter,
            MenuKind::Columns => &self.columns,
        }
    }

    /// Whether `point` misses both the panel and the trigger of `menu`.
    pub fn is_outside(&self, menu: MenuKind, point: Point) -> bool {
        !self.get(menu).contains(point)
    }
}
