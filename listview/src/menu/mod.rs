//! Floating menus: bulk actions, filter picker, and column visibility.
//!
//! Each menu is an independent open flag toggled by its trigger. The column
//! menu also remembers where it was anchored when it opened. Every open menu
//! closes on a pointer-down outside both its panel and its trigger.

mod anchor;
mod listener;

pub use anchor::{
    AnchorSnapshot, MeasureAnchor, MenuLayout, MenuPlacement, MenuPosition, MenuRegion,
    MenuRegions, Point, Rect, Viewport, column_menu_position,
};
pub use listener::{ListenerId, PointerEvents, PointerListeners, PointerSubscription};

use log::debug;

/// The three floating menus of a list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Actions,
    Filter,
    Columns,
}

impl MenuKind {
    pub const ALL: [MenuKind; 3] = [MenuKind::Actions, MenuKind::Filter, MenuKind::Columns];
}

/// Open flags of the three menus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuState {
    actions: bool,
    filter: bool,
    columns: bool,
    column_placement: Option<MenuPlacement>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, menu: MenuKind) -> bool {
        match menu {
            MenuKind::Actions => self.actions,
            MenuKind::Filter => self.filter,
            MenuKind::Columns => self.columns,
        }
    }

    /// Whether any menu is open, i.e. the pointer listener is needed.
    pub fn any_open(&self) -> bool {
        self.actions || self.filter || self.columns
    }

    /// Open menus, in header order.
    pub fn open_menus(&self) -> Vec<MenuKind> {
        MenuKind::ALL
            .into_iter()
            .filter(|m| self.is_open(*m))
            .collect()
    }

    /// Where the column menu was anchored when it opened.
    pub fn column_placement(&self) -> Option<MenuPlacement> {
        self.column_placement
    }

    /// Flip a menu. Opening the column menu with an anchor positions it.
    /// Returns true if the menu is now open.
    pub fn toggle(&mut self, menu: MenuKind, anchor: Option<AnchorSnapshot>, layout: &MenuLayout) -> bool {
        let open = !self.is_open(menu);
        self.set_open(menu, open);
        if menu == MenuKind::Columns && open {
            self.column_placement = anchor.map(|a| MenuPlacement::for_anchor(a, layout));
            debug!("Column menu opened at {:?}", self.column_placement);
        }
        open
    }

    /// Close a menu. Returns true if it was open.
    pub fn close(&mut self, menu: MenuKind) -> bool {
        let was_open = self.is_open(menu);
        self.set_open(menu, false);
        was_open
    }

    pub fn close_all(&mut self) {
        for menu in MenuKind::ALL {
            self.set_open(menu, false);
        }
    }

    /// Close every open menu the point falls outside of.
    /// Returns the menus that were closed.
    pub fn pointer_down(&mut self, point: Point, regions: &MenuRegions) -> Vec<MenuKind> {
        let closed: Vec<MenuKind> = self
            .open_menus()
            .into_iter()
            .filter(|m| regions.is_outside(*m, point))
            .collect();
        for menu in &closed {
            self.set_open(*menu, false);
        }
        closed
    }

    fn set_open(&mut self, menu: MenuKind, open: bool) {
        match menu {
            MenuKind::Actions => self.actions = open,
            MenuKind::Filter => self.filter = open,
            MenuKind::Columns => {
                self.columns = open;
                if !open {
                    self.column_placement = None;
                }
            }
        }
    }
}
