//! In-page anchor routing with an allowance for the fixed header.

use crate::ui::dom::{Document, NodeId, ScrollRequest};

/// What a click on a fragment anchor did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorNavigation {
    /// Default navigation suppressed and a smooth scroll requested
    Scrolled(ScrollRequest),
    /// Default navigation suppressed, but the fragment matched no element
    Suppressed,
}

/// Fragment id of an in-page `href`, e.g. `"about"` for `"#about"`
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Intercepts clicks on every `a[href^="#"]` present at bootstrap
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    anchors: Vec<NodeId>,
    header_offset: f64,
}

impl SmoothScroll {
    pub fn attach(doc: &dyn Document, header_offset: f64) -> Self {
        let anchors: Vec<NodeId> = doc
            .elements_by_tag("a")
            .into_iter()
            .filter(|&a| {
                doc.attribute(a, "href")
                    .is_some_and(|href| fragment_target(&href).is_some())
            })
            .collect();
        tracing::debug!("Smooth scrolling attached to {} anchors", anchors.len());
        Self {
            anchors,
            header_offset,
        }
    }

    /// Innermost registered anchor containing `target`
    #[must_use]
    pub fn anchor_for(&self, doc: &dyn Document, target: NodeId) -> Option<NodeId> {
        doc.ancestors(target)
            .into_iter()
            .find(|node| self.anchors.contains(node))
    }

    /// Handles a click; `None` means the click did not hit a fragment anchor
    pub fn handle_click(&self, doc: &mut dyn Document, target: NodeId) -> Option<AnchorNavigation> {
        let anchor = self.anchor_for(doc, target)?;
        let href = doc.attribute(anchor, "href").unwrap_or_default();
        let destination = fragment_target(&href)
            .filter(|id| !id.is_empty())
            .and_then(|id| doc.element_by_id(id));

        let Some(element) = destination else {
            tracing::debug!("Anchor {href} has no target; navigation suppressed");
            return Some(AnchorNavigation::Suppressed);
        };

        let request = ScrollRequest::smooth(doc.layout(element).top - self.header_offset);
        doc.scroll_to(request);
        Some(AnchorNavigation::Scrolled(request))
    }
}
