//! Detection and decoration of links that leave the current host.

use crate::ui::dom::{Document, NodeId};
use crate::ui::icons::IconRenderer;
use crate::ui::markup::{EXTERNAL_ICON_CLASS, ICON_ATTRIBUTE};
use url::Url;

/// Whether `href` points to an absolute http(s) URL on another host than `page`.
///
/// Relative references never count as external.
#[must_use]
pub fn is_external(href: &str, page: &Url) -> bool {
    let Ok(target) = Url::parse(href) else {
        return false;
    };
    matches!(target.scheme(), "http" | "https") && target.host_str() != page.host_str()
}

/// Marks outbound links with an icon and logs when they are followed
#[derive(Debug, Clone, Default)]
pub struct ExternalLinks {
    links: Vec<NodeId>,
    decorated: bool,
}

impl ExternalLinks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decorates the outbound links present right now. Only the first call
    /// does anything; returns how many links were registered.
    pub fn decorate(&mut self, doc: &mut dyn Document, icons: &dyn IconRenderer) -> usize {
        if self.decorated {
            return 0;
        }
        self.decorated = true;

        let page = doc.location().clone();
        self.links = doc
            .elements_by_tag("a")
            .into_iter()
            .filter(|&a| {
                doc.attribute(a, "href")
                    .is_some_and(|href| is_external(&href, &page))
            })
            .collect();

        for &link in &self.links {
            if doc.find_by_class(link, EXTERNAL_ICON_CLASS).is_some() {
                continue;
            }
            let icon = doc.create_element("i");
            doc.set_attribute(icon, ICON_ATTRIBUTE, "external-link");
            doc.add_class(icon, EXTERNAL_ICON_CLASS);
            doc.set_style(icon, "width", "0.75rem");
            doc.set_style(icon, "height", "0.75rem");
            doc.set_style(icon, "margin-left", "0.25rem");
            doc.append_child(link, icon);
        }
        icons.create_icons(doc);

        tracing::debug!("Decorated {} external links", self.links.len());
        self.links.len()
    }

    /// Logs a click that landed inside a decorated link and returns its target
    pub fn handle_click(&self, doc: &dyn Document, target: NodeId) -> Option<String> {
        let link = self
            .links
            .iter()
            .copied()
            .find(|&link| doc.contains(link, target))?;
        let href = doc.attribute(link, "href")?;
        tracing::info!(href = %href, "External link clicked");
        Some(href)
    }
}
