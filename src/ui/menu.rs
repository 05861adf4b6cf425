//! Mobile navigation menu.
//!
//! Visibility is never tracked on the side: the panel's `hidden` class is the
//! state, and [`MenuState::next`] decides what each signal does to it.

use crate::ui::dom::{Document, NodeId};
use crate::ui::markup::{
    CLOSE_ICON_CLASS, HIDDEN_CLASS, MENU_ICON_CLASS, MOBILE_LINK_CLASS, MOBILE_MENU_BUTTON_ID,
    MOBILE_MENU_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

/// Inputs that can change the menu's visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSignal {
    /// The menu button was pressed
    Toggle,
    /// A link inside the menu was followed
    LinkClicked,
    /// A click landed outside both the button and the panel
    OutsideClick,
    /// The Escape key was pressed
    Escape,
}

impl MenuState {
    #[must_use]
    pub fn next(self, signal: MenuSignal) -> MenuState {
        match signal {
            MenuSignal::Toggle => match self {
                MenuState::Open => MenuState::Closed,
                MenuState::Closed => MenuState::Open,
            },
            MenuSignal::LinkClicked | MenuSignal::OutsideClick | MenuSignal::Escape => {
                MenuState::Closed
            }
        }
    }
}

/// Handles to the menu button, the panel and its glyphs
#[derive(Debug, Clone)]
pub struct MobileMenu {
    button: NodeId,
    panel: NodeId,
    menu_icon: Option<NodeId>,
    close_icon: Option<NodeId>,
    links: Vec<NodeId>,
}

impl MobileMenu {
    /// Captures the menu elements, or returns `None` when the button or the
    /// panel is missing from the page
    pub fn attach(doc: &dyn Document) -> Option<Self> {
        let button = doc.element_by_id(MOBILE_MENU_BUTTON_ID)?;
        let panel = doc.element_by_id(MOBILE_MENU_ID)?;

        let menu = Self {
            button,
            panel,
            menu_icon: doc.find_by_class(button, MENU_ICON_CLASS),
            close_icon: doc.find_by_class(button, CLOSE_ICON_CLASS),
            links: doc.elements_by_class(MOBILE_LINK_CLASS),
        };
        tracing::debug!("Mobile menu attached with {} links", menu.links.len());
        Some(menu)
    }

    #[must_use]
    pub fn state(&self, doc: &dyn Document) -> MenuState {
        if doc.has_class(self.panel, HIDDEN_CLASS) {
            MenuState::Closed
        } else {
            MenuState::Open
        }
    }

    /// Maps a click on `target` to a signal, if it concerns the menu at all
    #[must_use]
    pub fn classify_click(&self, doc: &dyn Document, target: NodeId) -> Option<MenuSignal> {
        if doc.contains(self.button, target) {
            return Some(MenuSignal::Toggle);
        }
        if self.links.iter().any(|&link| doc.contains(link, target)) {
            return Some(MenuSignal::LinkClicked);
        }
        if doc.contains(self.panel, target) {
            return None;
        }
        Some(MenuSignal::OutsideClick)
    }

    pub fn handle_click(&self, doc: &mut dyn Document, target: NodeId) {
        if let Some(signal) = self.classify_click(doc, target) {
            self.signal(doc, signal);
        }
    }

    pub fn handle_key(&self, doc: &mut dyn Document, key: &str) {
        if key == "Escape" {
            self.signal(doc, MenuSignal::Escape);
        }
    }

    pub fn signal(&self, doc: &mut dyn Document, signal: MenuSignal) {
        let current = self.state(doc);
        let next = current.next(signal);
        if next != current {
            tracing::debug!(?signal, ?next, "Mobile menu state changed");
        }
        self.apply(doc, next);
    }

    fn apply(&self, doc: &mut dyn Document, state: MenuState) {
        let (shown, hidden) = match state {
            MenuState::Open => (self.close_icon, self.menu_icon),
            MenuState::Closed => (self.menu_icon, self.close_icon),
        };
        match state {
            MenuState::Open => doc.remove_class(self.panel, HIDDEN_CLASS),
            MenuState::Closed => doc.add_class(self.panel, HIDDEN_CLASS),
        }
        if let Some(icon) = shown {
            doc.remove_class(icon, HIDDEN_CLASS);
        }
        if let Some(icon) = hidden {
            doc.add_class(icon, HIDDEN_CLASS);
        }
    }
}
