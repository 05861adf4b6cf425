//! Viewport intersection signal.
//!
//! The ratio is computed from layout geometry, so any host that can report
//! element boxes and the viewport gets the same one-shot semantics as a
//! browser `IntersectionObserver` configured with a single threshold.

use crate::ui::dom::{Document, NodeId, Rect, Viewport};

/// Trigger condition for a [`OneShotObserver`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible, in `[0, 1]`
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport before measuring
    pub bottom_margin: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            bottom_margin: 0.0,
        }
    }
}

/// Visible fraction of `rect` within `viewport` shrunk by the bottom margin.
///
/// Zero-height elements count as fully visible when they sit inside the
/// measured window.
#[must_use]
pub fn intersection_ratio(rect: Rect, viewport: Viewport, options: ObserverOptions) -> f64 {
    let window_top = viewport.scroll_y;
    let window_bottom = viewport.scroll_y + (viewport.height - options.bottom_margin).max(0.0);

    if rect.height <= 0.0 {
        let inside = rect.top >= window_top && rect.top <= window_bottom;
        return if inside { 1.0 } else { 0.0 };
    }

    let visible = rect.bottom().min(window_bottom) - rect.top.max(window_top);
    (visible.max(0.0) / rect.height).min(1.0)
}

/// Watches a fixed set of elements and reports each exactly once, the first
/// time it is sufficiently visible
#[derive(Debug, Clone, Default)]
pub struct OneShotObserver {
    options: ObserverOptions,
    observed: Vec<NodeId>,
}

impl OneShotObserver {
    #[must_use]
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
        }
    }

    pub fn observe(&mut self, node: NodeId) {
        if !self.observed.contains(&node) {
            self.observed.push(node);
        }
    }

    pub fn unobserve(&mut self, node: NodeId) {
        self.observed.retain(|&n| n != node);
    }

    #[must_use]
    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Elements that crossed the threshold. They are unobserved before being
    /// returned, so later calls never report them again.
    pub fn take_intersecting(&mut self, doc: &dyn Document) -> Vec<NodeId> {
        let viewport = doc.viewport();
        let options = self.options;
        let (triggered, waiting): (Vec<NodeId>, Vec<NodeId>) =
            self.observed.iter().partition(|&&node| {
                if !doc.is_connected(node) {
                    return false;
                }
                let ratio = intersection_ratio(doc.layout(node), viewport, options);
                ratio > 0.0 && ratio >= options.threshold
            });
        self.observed = waiting;
        triggered
    }
}
