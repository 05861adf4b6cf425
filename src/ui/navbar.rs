//! Navbar background that switches style once the page is scrolled.

use crate::ui::dom::{Document, NodeId};
use crate::ui::markup::NAVBAR_ID;

/// Visual style of the fixed navbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    /// Translucent, used near the top of the page
    Default,
    /// Opaque with a stronger border, used once the page has scrolled
    Scrolled,
}

impl NavbarStyle {
    /// Style for a vertical scroll offset. Offsets strictly above `threshold`
    /// are considered scrolled.
    #[must_use]
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            NavbarStyle::Scrolled
        } else {
            NavbarStyle::Default
        }
    }

    #[must_use]
    pub fn background(self) -> &'static str {
        match self {
            NavbarStyle::Default => "hsla(0, 0%, 100%, 0.05)",
            NavbarStyle::Scrolled => "hsla(0, 0%, 0%, 0.9)",
        }
    }

    #[must_use]
    pub fn border_bottom_color(self) -> &'static str {
        match self {
            NavbarStyle::Default => "hsla(0, 0%, 100%, 0.1)",
            NavbarStyle::Scrolled => "hsla(0, 0%, 100%, 0.2)",
        }
    }
}

/// Restyles `#navbar` on every scroll
#[derive(Debug, Clone)]
pub struct Navbar {
    node: NodeId,
    threshold: f64,
}

impl Navbar {
    pub fn attach(doc: &dyn Document, threshold: f64) -> Option<Self> {
        let node = doc.element_by_id(NAVBAR_ID)?;
        Some(Self { node, threshold })
    }

    pub fn on_scroll(&self, doc: &mut dyn Document) -> NavbarStyle {
        let style = NavbarStyle::for_offset(doc.viewport().scroll_y, self.threshold);
        doc.set_style(self.node, "background", style.background());
        doc.set_style(self.node, "border-bottom-color", style.border_bottom_color());
        style
    }
}
