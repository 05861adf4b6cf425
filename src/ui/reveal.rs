//! One-shot fade-in of portfolio cards as they enter the viewport.

use crate::ui::dom::{Document, NodeId};
use crate::ui::intersection::{ObserverOptions, OneShotObserver};
use crate::ui::markup::{REVEALED_CLASS, REVEAL_CARD_CLASSES};

/// Fades cards in the first time they scroll into view.
///
/// Cards are collected once at bootstrap; elements added later are not picked up.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    observer: OneShotObserver,
}

impl ScrollReveal {
    pub fn attach(doc: &dyn Document, options: ObserverOptions) -> Self {
        let mut observer = OneShotObserver::new(options);
        for node in doc.descendants(doc.root()) {
            if REVEAL_CARD_CLASSES
                .iter()
                .any(|class| doc.has_class(node, class))
            {
                observer.observe(node);
            }
        }
        tracing::debug!("Scroll reveal observing {} cards", observer.observed_count());
        Self { observer }
    }

    /// Reveals every card that became visible; returns the revealed cards
    pub fn on_viewport_change(&mut self, doc: &mut dyn Document) -> Vec<NodeId> {
        let revealed = self.observer.take_intersecting(doc);
        for &card in &revealed {
            doc.add_class(card, REVEALED_CLASS);
        }
        revealed
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.observer.observed_count()
    }
}
