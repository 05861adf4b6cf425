//! Toast notifications.
//!
//! At most one toast is alive: showing a new one cancels and removes the
//! previous. Each toast walks a fixed sequence of timed phases
//! (`SlideIn`, `SlideOut`, `Remove`) driven through the [`Scheduler`]; a
//! manual close cancels whatever is still pending.

use crate::settings::NotificationSettings;
use crate::ui::dom::{Document, NodeId};
use crate::ui::icons::IconRenderer;
use crate::ui::markup::{
    ICON_ATTRIBUTE, NOTIFICATION_CLASS, NOTIFICATION_CLOSE_CLASS, NOTIFICATION_CONTENT_CLASS,
};
use crate::ui::scheduler::{Scheduler, Timer};
use tokio_util::sync::CancellationToken;

const HIDDEN_TRANSFORM: &str = "translateX(100%)";
const SHOWN_TRANSFORM: &str = "translateX(0)";
const CLOSE_HOVER_BACKGROUND: &str = "rgba(255, 255, 255, 0.2)";

const TOAST_STYLE: [(&str, &str); 11] = [
    ("position", "fixed"),
    ("top", "100px"),
    ("right", "20px"),
    ("z-index", "9999"),
    ("max-width", "400px"),
    ("padding", "1rem"),
    ("border-radius", "8px"),
    ("box-shadow", "0 10px 30px rgba(0, 0, 0, 0.3)"),
    ("backdrop-filter", "blur(10px)"),
    ("transform", HIDDEN_TRANSFORM),
    ("transition", "transform 0.3s ease"),
];

const CONTENT_STYLE: [(&str, &str); 4] = [
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "space-between"),
    ("gap", "1rem"),
];

const CLOSE_STYLE: [(&str, &str); 7] = [
    ("background", "none"),
    ("border", "none"),
    ("color", "inherit"),
    ("cursor", "pointer"),
    ("padding", "0.25rem"),
    ("border-radius", "4px"),
    ("transition", "background-color 0.2s ease"),
];

/// Identifies one toast across its timed phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    SlideIn,
    SlideOut,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    /// Background, text colour and border. Only success is green; every
    /// other kind uses the red palette.
    fn palette(self) -> [(&'static str, &'static str); 3] {
        match self {
            NotificationKind::Success => [
                ("background", "hsla(142, 76%, 36%, 0.9)"),
                ("color", "white"),
                ("border", "1px solid hsl(142, 76%, 36%)"),
            ],
            NotificationKind::Info | NotificationKind::Error => [
                ("background", "hsla(0, 84%, 60%, 0.9)"),
                ("color", "white"),
                ("border", "1px solid hsl(0, 84%, 60%)"),
            ],
        }
    }
}

#[derive(Debug)]
struct ActiveToast {
    id: ToastId,
    node: NodeId,
    close_button: NodeId,
    cancel: CancellationToken,
}

/// Owns the single live toast
#[derive(Debug)]
pub struct Notifier {
    timings: NotificationSettings,
    lifetime: CancellationToken,
    next_id: u64,
    active: Option<ActiveToast>,
}

impl Notifier {
    /// `lifetime` is the parent of every toast's cancellation token, so
    /// cancelling it silences all pending phases.
    #[must_use]
    pub fn new(timings: NotificationSettings, lifetime: CancellationToken) -> Self {
        Self {
            timings,
            lifetime,
            next_id: 0,
            active: None,
        }
    }

    /// The live toast, if any
    #[must_use]
    pub fn active(&self) -> Option<ToastId> {
        self.active.as_ref().map(|toast| toast.id)
    }

    /// Element of the live toast
    #[must_use]
    pub fn active_node(&self) -> Option<NodeId> {
        self.active.as_ref().map(|toast| toast.node)
    }

    /// Replaces any displayed toast with a new one and schedules its phases
    pub fn show(
        &mut self,
        doc: &mut dyn Document,
        icons: &dyn IconRenderer,
        scheduler: &dyn Scheduler,
        message: &str,
        kind: NotificationKind,
    ) -> ToastId {
        if let Some(previous) = self.active.take() {
            previous.cancel.cancel();
        }
        for stale in doc.elements_by_class(NOTIFICATION_CLASS) {
            doc.remove(stale);
        }

        self.next_id += 1;
        let id = ToastId(self.next_id);
        let (node, close_button) = build_toast(doc, message, kind);
        doc.append_child(doc.body(), node);
        icons.create_icons(doc);

        let cancel = self.lifetime.child_token();
        scheduler.schedule(
            self.timings.slide_in_delay(),
            cancel.clone(),
            Timer::Notification {
                toast: id,
                phase: NotificationPhase::SlideIn,
            },
        );
        scheduler.schedule(
            self.timings.display(),
            cancel.clone(),
            Timer::Notification {
                toast: id,
                phase: NotificationPhase::SlideOut,
            },
        );

        tracing::debug!(?id, kind = kind.as_str(), "Notification shown: {message}");
        self.active = Some(ActiveToast {
            id,
            node,
            close_button,
            cancel,
        });
        id
    }

    /// Applies a timed phase. Phases for a toast that is no longer live are
    /// ignored.
    pub fn advance(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &dyn Scheduler,
        toast: ToastId,
        phase: NotificationPhase,
    ) {
        let Some(active) = self.active.as_ref().filter(|active| active.id == toast) else {
            tracing::debug!(?toast, ?phase, "Ignoring phase of a dismissed notification");
            return;
        };
        if !doc.is_connected(active.node) {
            tracing::debug!(?toast, "Notification already detached");
            self.dismiss();
            return;
        }

        match phase {
            NotificationPhase::SlideIn => doc.set_style(active.node, "transform", SHOWN_TRANSFORM),
            NotificationPhase::SlideOut => {
                doc.set_style(active.node, "transform", HIDDEN_TRANSFORM);
                scheduler.schedule(
                    self.timings.slide_out(),
                    active.cancel.clone(),
                    Timer::Notification {
                        toast,
                        phase: NotificationPhase::Remove,
                    },
                );
            }
            NotificationPhase::Remove => {
                doc.remove(active.node);
                self.dismiss();
            }
        }
    }

    /// Closes the toast when `target` lies inside its close control.
    /// Returns whether it did.
    pub fn handle_click(&mut self, doc: &mut dyn Document, target: NodeId) -> bool {
        let Some(active) = self
            .active
            .as_ref()
            .filter(|active| doc.contains(active.close_button, target))
        else {
            return false;
        };
        doc.remove(active.node);
        tracing::debug!(id = ?active.id, "Notification closed manually");
        self.dismiss();
        true
    }

    /// Hover feedback on the close control
    pub fn handle_pointer(&self, doc: &mut dyn Document, target: NodeId, entered: bool) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if target != active.close_button {
            return;
        }
        let background = if entered {
            CLOSE_HOVER_BACKGROUND
        } else {
            "transparent"
        };
        doc.set_style(active.close_button, "background-color", background);
    }

    fn dismiss(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
        }
    }
}

/// Builds the detached toast subtree; returns the root and its close button
fn build_toast(doc: &mut dyn Document, message: &str, kind: NotificationKind) -> (NodeId, NodeId) {
    let node = doc.create_element("div");
    doc.add_class(node, NOTIFICATION_CLASS);
    doc.add_class(node, &format!("{NOTIFICATION_CLASS}-{}", kind.as_str()));
    for (property, value) in TOAST_STYLE.iter().chain(kind.palette().iter()) {
        doc.set_style(node, property, value);
    }

    let content = doc.create_element("div");
    doc.add_class(content, NOTIFICATION_CONTENT_CLASS);
    for (property, value) in CONTENT_STYLE {
        doc.set_style(content, property, value);
    }
    doc.append_child(node, content);

    let text = doc.create_element("span");
    doc.set_text(text, message);
    doc.append_child(content, text);

    let close_button = doc.create_element("button");
    doc.add_class(close_button, NOTIFICATION_CLOSE_CLASS);
    doc.set_attribute(close_button, "aria-label", "Fechar");
    for (property, value) in CLOSE_STYLE {
        doc.set_style(close_button, property, value);
    }
    doc.append_child(content, close_button);

    let glyph = doc.create_element("i");
    doc.set_attribute(glyph, ICON_ATTRIBUTE, "x");
    doc.append_child(close_button, glyph);

    (node, close_button)
}
