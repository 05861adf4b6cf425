mod common;

use common::{button_label, field_values, fill_form, portfolio, toast_messages, Ids};
use portfolio_shell::error::PortfolioError;
use portfolio_shell::settings::UiSettings;
use portfolio_shell::ui::contact::{
    FormPhase, SimulatedSubmitter, DELIVERY_FAILED_MESSAGE, INVALID_EMAIL_MESSAGE, LOADING_LABEL,
    MISSING_FIELDS_MESSAGE, SUCCESS_MESSAGE,
};
use portfolio_shell::ui::dom::{Document, MemoryDocument, NodeId, ScrollRequest};
use portfolio_shell::ui::icons::LucideIcons;
use portfolio_shell::ui::markup::{
    EXTERNAL_ICON_CLASS, HIDDEN_CLASS, NOTIFICATION_CLASS, NOTIFICATION_CLOSE_CLASS,
    REVEALED_CLASS, UI_SETTINGS_ATTRIBUTE,
};
use portfolio_shell::ui::menu::MenuState;
use portfolio_shell::ui::navbar::NavbarStyle;
use portfolio_shell::ui::page::{Page, PageEvent};
use portfolio_shell::ui::scheduler::ManualScheduler;
use portfolio_shell::utils::current_year;
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    page: Page<MemoryDocument>,
    scheduler: ManualScheduler,
    ids: Ids,
}

impl Fixture {
    fn new() -> Self {
        let (doc, ids) = portfolio();
        Self::from_page(doc, ids)
    }

    fn from_page(doc: MemoryDocument, ids: Ids) -> Self {
        let scheduler = ManualScheduler::new();
        let page = Page::bootstrap(
            doc,
            Box::new(LucideIcons),
            Box::new(scheduler.clone()),
            Arc::new(SimulatedSubmitter::new(Duration::from_millis(2000))),
            &UiSettings::default(),
        );
        Self {
            page,
            scheduler,
            ids,
        }
    }

    fn doc(&self) -> &MemoryDocument {
        self.page.document()
    }

    fn click(&mut self, target: NodeId) -> bool {
        self.page
            .dispatch(PageEvent::Click { target })
            .default_prevented
    }

    fn scroll_to(&mut self, top: f64) {
        self.page
            .document_mut()
            .scroll_to(ScrollRequest::instant(top));
        self.page.dispatch(PageEvent::Scroll);
    }

    fn submit(&mut self, values: [&str; 4]) -> bool {
        fill_form(self.page.document_mut(), &self.ids, values);
        self.page
            .dispatch(PageEvent::Submit { form: self.ids.form })
            .default_prevented
    }

    fn advance(&mut self, millis: u64) {
        let page = &mut self.page;
        self.scheduler
            .advance(Duration::from_millis(millis), |timer| {
                page.dispatch(PageEvent::Timer(timer));
            });
    }
}

#[test]
fn test_menu_toggle_and_escape() {
    let mut fx = Fixture::new();
    let ids = fx.ids;
    assert_eq!(fx.page.menu_state(), Some(MenuState::Closed));

    fx.click(ids.menu_icon);
    assert_eq!(fx.page.menu_state(), Some(MenuState::Open));
    assert!(!fx.doc().has_class(ids.panel, HIDDEN_CLASS));
    assert!(fx.doc().has_class(ids.menu_icon, HIDDEN_CLASS));
    assert!(!fx.doc().has_class(ids.close_icon, HIDDEN_CLASS));

    fx.page.dispatch(PageEvent::KeyDown {
        key: "Escape".to_string(),
    });
    assert_eq!(fx.page.menu_state(), Some(MenuState::Closed));
    assert!(fx.doc().has_class(ids.panel, HIDDEN_CLASS));
    assert!(!fx.doc().has_class(ids.menu_icon, HIDDEN_CLASS));
    assert!(fx.doc().has_class(ids.close_icon, HIDDEN_CLASS));

    // Escape on a closed menu changes nothing
    fx.page.dispatch(PageEvent::KeyDown {
        key: "Escape".to_string(),
    });
    assert_eq!(fx.page.menu_state(), Some(MenuState::Closed));

    fx.page.dispatch(PageEvent::KeyDown {
        key: "Enter".to_string(),
    });
    assert_eq!(fx.page.menu_state(), Some(MenuState::Closed));
}

#[test]
fn test_menu_closes_on_link_and_outside_click() {
    let mut fx = Fixture::new();
    let ids = fx.ids;

    fx.click(ids.menu_button);
    let prevented = fx.click(ids.mobile_link);
    assert!(prevented);
    assert_eq!(fx.page.menu_state(), Some(MenuState::Closed));

    fx.click(ids.menu_button);
    fx.click(ids.panel);
    assert_eq!(fx.page.menu_state(), Some(MenuState::Open));

    fx.click(ids.hero);
    assert_eq!(fx.page.menu_state(), Some(MenuState::Closed));
}

#[test]
fn test_navbar_style_follows_threshold() {
    let mut fx = Fixture::new();
    let navbar = fx.ids.navbar;
    let background = |fx: &Fixture| fx.doc().style(navbar, "background");
    let border = |fx: &Fixture| fx.doc().style(navbar, "border-bottom-color");

    fx.scroll_to(100.0);
    assert_eq!(
        background(&fx).as_deref(),
        Some(NavbarStyle::Default.background())
    );

    fx.scroll_to(101.0);
    assert_eq!(
        background(&fx).as_deref(),
        Some(NavbarStyle::Scrolled.background())
    );
    assert_eq!(
        border(&fx).as_deref(),
        Some(NavbarStyle::Scrolled.border_bottom_color())
    );

    fx.scroll_to(0.0);
    assert_eq!(
        border(&fx).as_deref(),
        Some(NavbarStyle::Default.border_bottom_color())
    );
}

#[test]
fn test_anchor_clicks_scroll_below_header() {
    let mut fx = Fixture::new();
    let ids = fx.ids;

    assert!(fx.click(ids.about_label));
    assert_eq!(fx.doc().scroll_log(), &[ScrollRequest::smooth(820.0)]);

    assert!(fx.click(ids.broken_link));
    assert_eq!(fx.doc().scroll_log().len(), 1);

    assert!(!fx.click(ids.hero));
}

#[test]
fn test_anchor_jump_updates_scroll_driven_state() {
    let (mut doc, ids) = portfolio();
    let projects_link = doc.build(ids.navbar, "a").attr("href", "#projects").node();
    let body = doc.body();
    let _ = doc
        .build(body, "section")
        .id("projects")
        .layout(2300.0, 600.0)
        .node();
    let mut fx = Fixture::from_page(doc, ids);
    assert!(fx.doc().style(ids.navbar, "background").is_none());
    assert!(!fx.doc().has_class(ids.far_card, REVEALED_CLASS));

    assert!(fx.click(projects_link));
    assert_eq!(fx.doc().viewport().scroll_y, 2220.0);
    assert_eq!(
        fx.doc().style(ids.navbar, "background").as_deref(),
        Some(NavbarStyle::Scrolled.background())
    );
    assert!(fx.doc().has_class(ids.far_card, REVEALED_CLASS));
    assert_eq!(
        fx.doc().attribute(ids.far_image, "src").as_deref(),
        Some("/static/atlas.webp")
    );
    assert_eq!(fx.page.pending_observations(), (0, 0));
}

#[test]
fn test_markup_settings_drive_bootstrap() {
    let (mut doc, ids) = portfolio();
    let body = doc.body();
    doc.set_attribute(body, UI_SETTINGS_ATTRIBUTE, r#"{"navbar_threshold_px": 10}"#);
    let mut page = Page::bootstrap_from_markup(
        doc,
        Box::new(LucideIcons),
        Box::new(ManualScheduler::new()),
        Arc::new(SimulatedSubmitter::new(Duration::from_millis(2000))),
    );

    page.document_mut().scroll_to(ScrollRequest::instant(20.0));
    page.dispatch(PageEvent::Scroll);
    assert_eq!(
        page.document().style(ids.navbar, "background").as_deref(),
        Some(NavbarStyle::Scrolled.background())
    );
}

#[test]
fn test_missing_field_shows_error_without_loading() {
    let mut fx = Fixture::new();
    let button = fx.ids.submit_button;

    assert!(fx.submit(["Ana", "ana@ana.dev", "", "Olá"]));
    assert_eq!(toast_messages(fx.doc()), vec![MISSING_FIELDS_MESSAGE]);
    assert_eq!(fx.page.contact_phase(), Some(FormPhase::Idle));
    assert!(fx.doc().attribute(button, "disabled").is_none());
    assert!(!button_label(fx.doc(), button).contains(LOADING_LABEL));
    assert!(fx.scheduler.take_submissions().is_empty());
}

#[test]
fn test_email_must_have_domain_and_suffix() {
    let mut fx = Fixture::new();

    for email in ["foo", "foo@bar"] {
        fx.submit(["Ana", email, "Oi", "Olá"]);
        assert_eq!(toast_messages(fx.doc()), vec![INVALID_EMAIL_MESSAGE]);
        assert_eq!(fx.page.contact_phase(), Some(FormPhase::Idle));
    }

    fx.submit(["Ana", "foo@bar.com", "Oi", "Olá"]);
    assert_eq!(fx.page.contact_phase(), Some(FormPhase::Submitting));
    assert_eq!(fx.scheduler.take_submissions().len(), 1);
}

#[test]
fn test_submission_cycle_resets_form() {
    let mut fx = Fixture::new();
    let ids = fx.ids;
    let original_label = button_label(fx.doc(), ids.submit_button);

    fx.submit(["Ana", "ana@ana.dev", "Projeto", "Vamos conversar"]);
    assert!(fx.doc().attribute(ids.submit_button, "disabled").is_some());
    assert!(button_label(fx.doc(), ids.submit_button).contains(LOADING_LABEL));

    // a second submit while sending is ignored
    fx.submit(["Ana", "ana@ana.dev", "Projeto", "Vamos conversar"]);
    assert_eq!(fx.scheduler.take_submissions().len(), 1);

    fx.page.dispatch(PageEvent::SubmissionSettled(Ok(())));
    assert_eq!(fx.page.contact_phase(), Some(FormPhase::Idle));
    assert!(fx.doc().attribute(ids.submit_button, "disabled").is_none());
    assert_eq!(button_label(fx.doc(), ids.submit_button), original_label);
    assert!(field_values(fx.doc(), &ids).iter().all(String::is_empty));
    assert_eq!(toast_messages(fx.doc()), vec![SUCCESS_MESSAGE]);
}

#[test]
fn test_failed_submission_keeps_fields() {
    let mut fx = Fixture::new();
    let ids = fx.ids;

    fx.submit(["Ana", "ana@ana.dev", "Projeto", "Vamos conversar"]);
    fx.page
        .dispatch(PageEvent::SubmissionSettled(Err(PortfolioError::Submission(
            "offline".to_string(),
        ))));

    assert_eq!(toast_messages(fx.doc()), vec![DELIVERY_FAILED_MESSAGE]);
    assert_eq!(field_values(fx.doc(), &ids)[0], "Ana");
    assert!(fx.doc().attribute(ids.submit_button, "disabled").is_none());
}

#[test]
fn test_second_notification_replaces_first() {
    let mut fx = Fixture::new();

    let first = fx.page.show_notification("primeira", Default::default());
    let second = fx.page.show_notification("segunda", Default::default());
    assert_ne!(first, second);
    assert_eq!(fx.doc().elements_by_class(NOTIFICATION_CLASS).len(), 1);
    assert_eq!(toast_messages(fx.doc()), vec!["segunda"]);

    // the first toast's phases no longer affect anything
    fx.advance(5300);
    assert!(fx.doc().elements_by_class(NOTIFICATION_CLASS).is_empty());
    assert_eq!(fx.page.active_notification(), None);
}

#[test]
fn test_notification_lifecycle() {
    let mut fx = Fixture::new();
    fx.page.show_notification("olá", Default::default());
    let toast = fx.doc().elements_by_class(NOTIFICATION_CLASS)[0];
    assert_eq!(
        fx.doc().style(toast, "transform").as_deref(),
        Some("translateX(100%)")
    );

    fx.advance(100);
    assert_eq!(
        fx.doc().style(toast, "transform").as_deref(),
        Some("translateX(0)")
    );

    fx.advance(4900);
    assert_eq!(
        fx.doc().style(toast, "transform").as_deref(),
        Some("translateX(100%)")
    );
    assert!(fx.doc().is_connected(toast));

    fx.advance(300);
    assert!(!fx.doc().is_connected(toast));
    assert_eq!(fx.page.active_notification(), None);
}

#[test]
fn test_closing_notification_cancels_its_timers() {
    let mut fx = Fixture::new();
    fx.advance(100);
    fx.page.show_notification("olá", Default::default());
    let toast = fx.doc().elements_by_class(NOTIFICATION_CLASS)[0];
    let close = fx
        .doc()
        .find_by_class(toast, NOTIFICATION_CLOSE_CLASS)
        .expect("toast has a close button");

    fx.page.dispatch(PageEvent::PointerEnter { target: close });
    assert_eq!(
        fx.doc().style(close, "background-color").as_deref(),
        Some("rgba(255, 255, 255, 0.2)")
    );
    fx.page.dispatch(PageEvent::PointerLeave { target: close });
    assert_eq!(
        fx.doc().style(close, "background-color").as_deref(),
        Some("transparent")
    );

    fx.click(close);
    assert!(!fx.doc().is_connected(toast));
    assert_eq!(fx.page.active_notification(), None);
    assert!(fx.scheduler.pending().is_empty());
}

#[test]
fn test_reveal_and_lazy_images_fire_once() {
    let mut fx = Fixture::new();
    let ids = fx.ids;

    // bootstrap already handled what starts in view
    assert!(fx.doc().has_class(ids.near_card, REVEALED_CLASS));
    assert_eq!(
        fx.doc().attribute(ids.near_image, "src").as_deref(),
        Some("/static/portrait.webp")
    );
    assert!(fx.doc().attribute(ids.near_image, "data-src").is_none());
    assert!(!fx.doc().has_class(ids.far_card, REVEALED_CLASS));
    assert!(fx.doc().attribute(ids.far_image, "src").is_none());
    assert_eq!(fx.page.pending_observations(), (1, 1));

    fx.scroll_to(2000.0);
    assert!(fx.doc().has_class(ids.far_card, REVEALED_CLASS));
    assert_eq!(
        fx.doc().attribute(ids.far_image, "src").as_deref(),
        Some("/static/atlas.webp")
    );
    assert_eq!(fx.page.pending_observations(), (0, 0));

    // leaving and re-entering the viewport does not touch the card again
    fx.page
        .document_mut()
        .remove_class(ids.far_card, REVEALED_CLASS);
    fx.scroll_to(0.0);
    fx.scroll_to(2000.0);
    assert!(!fx.doc().has_class(ids.far_card, REVEALED_CLASS));
}

#[test]
fn test_year_is_stamped() {
    let fx = Fixture::new();
    assert_eq!(fx.doc().text(fx.ids.year), current_year().to_string());
}

#[test]
fn test_external_links_decorated_after_delay() {
    let mut fx = Fixture::new();
    let link = fx.ids.github_link;
    assert!(fx.doc().find_by_class(link, EXTERNAL_ICON_CLASS).is_none());

    fx.advance(99);
    assert!(fx.doc().find_by_class(link, EXTERNAL_ICON_CLASS).is_none());

    fx.advance(1);
    let icon = fx
        .doc()
        .find_by_class(link, EXTERNAL_ICON_CLASS)
        .expect("external icon appended");
    assert!(fx.doc().has_class(icon, "lucide-external-link"));
    assert!(fx.doc().find_by_class(fx.ids.about_link, EXTERNAL_ICON_CLASS).is_none());

    // clicking an external link never suppresses navigation
    assert!(!fx.click(icon));
}

#[test]
fn test_shutdown_silences_pending_timers() {
    let mut fx = Fixture::new();
    fx.page.show_notification("olá", Default::default());
    fx.page.shutdown();

    assert!(fx.scheduler.pending().is_empty());
    fx.advance(10_000);
    assert_eq!(fx.doc().elements_by_class(NOTIFICATION_CLASS).len(), 1);
    assert!(fx
        .doc()
        .find_by_class(fx.ids.github_link, EXTERNAL_ICON_CLASS)
        .is_none());
}
