//! Element ids and class names the page markup must provide.
//!
//! `templates/index.html` renders these verbatim; keep the two in sync.

pub const MOBILE_MENU_BUTTON_ID: &str = "mobileMenuBtn";
pub const MOBILE_MENU_ID: &str = "mobileMenu";
pub const NAVBAR_ID: &str = "navbar";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const CURRENT_YEAR_ID: &str = "currentYear";

pub const HIDDEN_CLASS: &str = "hidden";
pub const MENU_ICON_CLASS: &str = "menu-icon";
pub const CLOSE_ICON_CLASS: &str = "close-icon";
pub const MOBILE_LINK_CLASS: &str = "mobile-link";

/// Cards that fade in when scrolled into view
pub const REVEAL_CARD_CLASSES: [&str; 4] =
    ["project-card", "skill-card", "contact-card", "studio-card"];
pub const REVEALED_CLASS: &str = "fade-in-up";

pub const NOTIFICATION_CLASS: &str = "notification";
pub const NOTIFICATION_CONTENT_CLASS: &str = "notification-content";
pub const NOTIFICATION_CLOSE_CLASS: &str = "notification-close";

pub const EXTERNAL_ICON_CLASS: &str = "external-icon";

/// Attribute naming the glyph an icon placeholder should become
pub const ICON_ATTRIBUTE: &str = "data-lucide";
/// Attribute holding the deferred source of a lazily loaded image
pub const DEFERRED_SRC_ATTRIBUTE: &str = "data-src";
/// Attribute on `<body>` carrying the serialised `UiSettings`
pub const UI_SETTINGS_ATTRIBUTE: &str = "data-ui-settings";
