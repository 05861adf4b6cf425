//! Deferred image loading from `data-src` once an image becomes visible.

use crate::ui::dom::{Document, NodeId};
use crate::ui::intersection::{ObserverOptions, OneShotObserver};
use crate::ui::markup::DEFERRED_SRC_ATTRIBUTE;

/// Swaps `data-src` into `src` once an image becomes visible
#[derive(Debug, Clone)]
pub struct LazyImages {
    observer: OneShotObserver,
}

impl LazyImages {
    pub fn attach(doc: &dyn Document) -> Self {
        let mut observer = OneShotObserver::new(ObserverOptions::default());
        for img in doc.elements_by_tag("img") {
            if doc.attribute(img, DEFERRED_SRC_ATTRIBUTE).is_some() {
                observer.observe(img);
            }
        }
        tracing::debug!("Lazy loading {} images", observer.observed_count());
        Self { observer }
    }

    /// Loads every image that became visible; returns the loaded images
    pub fn on_viewport_change(&mut self, doc: &mut dyn Document) -> Vec<NodeId> {
        let visible = self.observer.take_intersecting(doc);
        for &img in &visible {
            if let Some(source) = doc.attribute(img, DEFERRED_SRC_ATTRIBUTE) {
                doc.set_attribute(img, "src", &source);
                doc.remove_attribute(img, DEFERRED_SRC_ATTRIBUTE);
            }
        }
        visible
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.observer.observed_count()
    }
}
