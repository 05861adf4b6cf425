//! Interactive behaviour of the portfolio page.
//!
//! Each feature is a small component holding handles to the elements it needs,
//! captured once by [`page::Page::bootstrap`]. User interactions go through
//! pure state transitions (`menu::MenuState::next`, `contact::FormPhase::on_submit`)
//! before touching the document.

pub mod contact;
pub mod dom;
pub mod external_links;
pub mod icons;
pub mod intersection;
pub mod lazy_images;
pub mod markup;
pub mod menu;
pub mod navbar;
pub mod notification;
pub mod page;
pub mod reveal;
pub mod scheduler;
pub mod session;
pub mod smooth_scroll;
