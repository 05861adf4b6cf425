//! DOM-ready bootstrap and event routing.
//!
//! [`Page`] owns the document and one handle per feature. Hosts translate
//! browser events into [`PageEvent`]s and feed them to [`Page::dispatch`] one
//! at a time; nothing inside the page runs concurrently.

use crate::error::Result;
use crate::settings::UiSettings;
use crate::ui::contact::{
    ContactForm, ContactSubmitter, FormPhase, SubmitOutcome, DELIVERY_FAILED_MESSAGE,
    SUCCESS_MESSAGE,
};
use crate::ui::dom::{Document, NodeId};
use crate::ui::external_links::ExternalLinks;
use crate::ui::icons::IconRenderer;
use crate::ui::intersection::ObserverOptions;
use crate::ui::lazy_images::LazyImages;
use crate::ui::markup::CURRENT_YEAR_ID;
use crate::ui::menu::{MenuState, MobileMenu};
use crate::ui::navbar::Navbar;
use crate::ui::notification::{NotificationKind, Notifier, ToastId};
use crate::ui::reveal::ScrollReveal;
use crate::ui::scheduler::{Scheduler, Timer};
use crate::ui::smooth_scroll::{AnchorNavigation, SmoothScroll};
use crate::utils::current_year;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Something that happened on the page
#[derive(Debug)]
pub enum PageEvent {
    Click { target: NodeId },
    KeyDown { key: String },
    /// The viewport moved; the new offset is read from the document
    Scroll,
    Submit { form: NodeId },
    PointerEnter { target: NodeId },
    PointerLeave { target: NodeId },
    /// A scheduled timer came due
    Timer(Timer),
    /// The contact submitter finished
    SubmissionSettled(Result<()>),
}

/// How the host should treat the original browser event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The browser's default action (navigation, form post) must not run
    pub default_prevented: bool,
}

impl EventOutcome {
    fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }
}

pub struct Page<D> {
    doc: D,
    icons: Box<dyn IconRenderer + Send>,
    scheduler: Box<dyn Scheduler + Send>,
    lifetime: CancellationToken,
    menu: Option<MobileMenu>,
    navbar: Option<Navbar>,
    smooth_scroll: SmoothScroll,
    contact: Option<ContactForm>,
    notifier: Notifier,
    reveal: ScrollReveal,
    lazy_images: LazyImages,
    external_links: ExternalLinks,
}

impl<D: Document> Page<D> {
    /// Wires every feature against `doc`. Features whose elements are missing
    /// stay disabled.
    pub fn bootstrap(
        mut doc: D,
        icons: Box<dyn IconRenderer + Send>,
        scheduler: Box<dyn Scheduler + Send>,
        submitter: Arc<dyn ContactSubmitter>,
        settings: &UiSettings,
    ) -> Self {
        tracing::info!("Bootstrapping page interactivity");
        icons.create_icons(&mut doc);

        let lifetime = CancellationToken::new();
        let menu = MobileMenu::attach(&doc);
        let navbar = Navbar::attach(&doc, settings.navbar_threshold_px);
        let smooth_scroll = SmoothScroll::attach(&doc, settings.header_offset_px);
        let contact = ContactForm::attach(&doc, submitter);
        stamp_current_year(&mut doc);

        let reveal = ScrollReveal::attach(
            &doc,
            ObserverOptions {
                threshold: settings.reveal_threshold,
                bottom_margin: settings.reveal_bottom_margin_px,
            },
        );
        let lazy_images = LazyImages::attach(&doc);
        scheduler.schedule(
            settings.external_link_delay(),
            lifetime.child_token(),
            Timer::DecorateExternalLinks,
        );

        let mut page = Self {
            doc,
            icons,
            scheduler,
            notifier: Notifier::new(settings.notification, lifetime.clone()),
            lifetime,
            menu,
            navbar,
            smooth_scroll,
            contact,
            reveal,
            lazy_images,
            external_links: ExternalLinks::new(),
        };
        page.update_observers();

        tracing::debug!(
            menu = page.menu.is_some(),
            navbar = page.navbar.is_some(),
            contact = page.contact.is_some(),
            "Page features attached"
        );
        page
    }

    /// Like [`Page::bootstrap`], with the settings the server rendered into
    /// the page's `data-ui-settings` attribute
    pub fn bootstrap_from_markup(
        doc: D,
        icons: Box<dyn IconRenderer + Send>,
        scheduler: Box<dyn Scheduler + Send>,
        submitter: Arc<dyn ContactSubmitter>,
    ) -> Self {
        let settings = UiSettings::from_document(&doc);
        Self::bootstrap(doc, icons, scheduler, submitter, &settings)
    }

    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::Click { target } => self.on_click(target),
            PageEvent::KeyDown { key } => {
                if let Some(menu) = &self.menu {
                    menu.handle_key(&mut self.doc, &key);
                }
                EventOutcome::default()
            }
            PageEvent::Scroll => {
                self.on_viewport_moved();
                EventOutcome::default()
            }
            PageEvent::Submit { form } => self.on_submit(form),
            PageEvent::PointerEnter { target } => {
                self.notifier.handle_pointer(&mut self.doc, target, true);
                EventOutcome::default()
            }
            PageEvent::PointerLeave { target } => {
                self.notifier.handle_pointer(&mut self.doc, target, false);
                EventOutcome::default()
            }
            PageEvent::Timer(timer) => {
                self.on_timer(timer);
                EventOutcome::default()
            }
            PageEvent::SubmissionSettled(result) => {
                self.on_submission_settled(result);
                EventOutcome::default()
            }
        }
    }

    /// Shows a toast, replacing any toast already on screen
    pub fn show_notification(&mut self, message: &str, kind: NotificationKind) -> ToastId {
        self.notifier.show(
            &mut self.doc,
            self.icons.as_ref(),
            self.scheduler.as_ref(),
            message,
            kind,
        )
    }

    /// Cancels every pending timed phase; later timers are ignored
    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    #[must_use]
    pub fn menu_state(&self) -> Option<MenuState> {
        self.menu.as_ref().map(|menu| menu.state(&self.doc))
    }

    #[must_use]
    pub fn contact_phase(&self) -> Option<FormPhase> {
        self.contact.as_ref().map(ContactForm::phase)
    }

    #[must_use]
    pub fn active_notification(&self) -> Option<ToastId> {
        self.notifier.active()
    }

    /// Cards and images still waiting to become visible
    #[must_use]
    pub fn pending_observations(&self) -> (usize, usize) {
        (self.reveal.pending(), self.lazy_images.pending())
    }

    fn on_click(&mut self, target: NodeId) -> EventOutcome {
        let mut outcome = EventOutcome::default();

        self.notifier.handle_click(&mut self.doc, target);
        if let Some(navigation) = self.smooth_scroll.handle_click(&mut self.doc, target) {
            if let AnchorNavigation::Scrolled(request) = navigation {
                tracing::debug!(top = request.top, "Smooth scrolling to anchor");
                // the jump moved the viewport without a scroll event of its own
                self.on_viewport_moved();
            }
            outcome = EventOutcome::prevented();
        }
        self.external_links.handle_click(&self.doc, target);
        if let Some(menu) = &self.menu {
            menu.handle_click(&mut self.doc, target);
        }

        outcome
    }

    fn on_submit(&mut self, form: NodeId) -> EventOutcome {
        let Some(contact) = self.contact.as_mut().filter(|c| c.form() == form) else {
            return EventOutcome::default();
        };

        let submitted = contact.submit(&mut self.doc, self.icons.as_ref(), self.scheduler.as_ref());
        if let SubmitOutcome::Rejected(error) = submitted {
            self.show_notification(error.message(), NotificationKind::Error);
        }
        EventOutcome::prevented()
    }

    fn on_submission_settled(&mut self, result: Result<()>) {
        let Some(contact) = self.contact.as_mut() else {
            return;
        };
        if !contact.settle(&mut self.doc, self.icons.as_ref(), &result) {
            tracing::debug!("Submission settled with nothing in flight");
            return;
        }

        match result {
            Ok(()) => {
                self.show_notification(SUCCESS_MESSAGE, NotificationKind::Success);
            }
            Err(e) => {
                tracing::warn!("Contact message was not delivered: {e}");
                self.show_notification(DELIVERY_FAILED_MESSAGE, NotificationKind::Error);
            }
        }
    }

    fn on_timer(&mut self, timer: Timer) {
        if self.lifetime.is_cancelled() {
            tracing::debug!(?timer, "Page shut down; timer ignored");
            return;
        }
        match timer {
            Timer::Notification { toast, phase } => {
                self.notifier
                    .advance(&mut self.doc, self.scheduler.as_ref(), toast, phase);
            }
            Timer::DecorateExternalLinks => {
                self.external_links
                    .decorate(&mut self.doc, self.icons.as_ref());
            }
        }
    }

    fn on_viewport_moved(&mut self) {
        if let Some(navbar) = &self.navbar {
            navbar.on_scroll(&mut self.doc);
        }
        self.update_observers();
    }

    fn update_observers(&mut self) {
        let revealed = self.reveal.on_viewport_change(&mut self.doc);
        let loaded = self.lazy_images.on_viewport_change(&mut self.doc);
        if !revealed.is_empty() || !loaded.is_empty() {
            tracing::debug!(
                revealed = revealed.len(),
                loaded = loaded.len(),
                "Viewport observers triggered"
            );
        }
    }
}

fn stamp_current_year(doc: &mut dyn Document) {
    if let Some(node) = doc.element_by_id(CURRENT_YEAR_ID) {
        doc.set_text(node, &current_year().to_string());
    }
}
