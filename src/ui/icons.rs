//! Icon rendering collaborator.
//!
//! Markup carries placeholders such as `<i data-lucide="menu">`. After any
//! mutation that introduces new placeholders the page asks its
//! [`IconRenderer`] to materialise them into visible glyphs.

use crate::ui::dom::Document;
use crate::ui::markup::ICON_ATTRIBUTE;

const RENDERED_ATTRIBUTE: &str = "data-icon-rendered";

/// Turns icon placeholders into glyphs
pub trait IconRenderer {
    /// Renders every placeholder not yet rendered and returns how many were
    /// materialised by this call
    fn create_icons(&self, doc: &mut dyn Document) -> usize;
}

/// Lucide-style renderer: each placeholder gains the `lucide lucide-<name>`
/// classes and an `<svg>` child. Already rendered placeholders are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LucideIcons;

impl IconRenderer for LucideIcons {
    fn create_icons(&self, doc: &mut dyn Document) -> usize {
        let pending: Vec<_> = doc
            .descendants(doc.root())
            .into_iter()
            .filter(|&node| doc.attribute(node, RENDERED_ATTRIBUTE).is_none())
            .filter_map(|node| doc.attribute(node, ICON_ATTRIBUTE).map(|name| (node, name)))
            .collect();

        for (node, name) in &pending {
            doc.add_class(*node, "lucide");
            doc.add_class(*node, &format!("lucide-{name}"));
            doc.set_attribute(*node, RENDERED_ATTRIBUTE, "true");
            let glyph = doc.create_element("svg");
            doc.set_attribute(glyph, "aria-hidden", "true");
            doc.append_child(*node, glyph);
        }

        if !pending.is_empty() {
            tracing::debug!("Rendered {} icon placeholders", pending.len());
        }
        pending.len()
    }
}
