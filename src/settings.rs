//! Timings and thresholds that drive the interactive page behaviour.
//!
//! Every field has a serde default, so a configuration file only needs to
//! name the values it wants to change.

use crate::error::{PortfolioError, Result};
use crate::ui::dom::Document;
use crate::ui::markup::UI_SETTINGS_ATTRIBUTE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scroll offset (px) past which the navbar switches to its opaque style
pub const DEFAULT_NAVBAR_THRESHOLD_PX: f64 = 100.0;
/// Height (px) reserved for the fixed header when scrolling to an anchor
pub const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;
/// Latency of the simulated contact submission
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2000;
/// Delay between inserting a toast and sliding it in
pub const DEFAULT_SLIDE_IN_DELAY_MS: u64 = 100;
/// Time from insertion until a toast starts sliding out
pub const DEFAULT_DISPLAY_MS: u64 = 5000;
/// Length of the slide-out transition before the toast is removed
pub const DEFAULT_SLIDE_OUT_MS: u64 = 300;
/// Fraction of a card that must be visible before it is revealed
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
/// Bottom contraction (px) of the viewport used for reveal checks
pub const DEFAULT_REVEAL_BOTTOM_MARGIN_PX: f64 = 50.0;
/// Delay after bootstrap before external links are decorated
pub const DEFAULT_EXTERNAL_LINK_DELAY_MS: u64 = 100;

/// Interactive behaviour settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    pub navbar_threshold_px: f64,
    pub header_offset_px: f64,
    pub submit_delay_ms: u64,
    pub notification: NotificationSettings,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
    pub external_link_delay_ms: u64,
}

/// Phase timings of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub slide_in_delay_ms: u64,
    pub display_ms: u64,
    pub slide_out_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            navbar_threshold_px: DEFAULT_NAVBAR_THRESHOLD_PX,
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            notification: NotificationSettings::default(),
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_bottom_margin_px: DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
            external_link_delay_ms: DEFAULT_EXTERNAL_LINK_DELAY_MS,
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            slide_in_delay_ms: DEFAULT_SLIDE_IN_DELAY_MS,
            display_ms: DEFAULT_DISPLAY_MS,
            slide_out_ms: DEFAULT_SLIDE_OUT_MS,
        }
    }
}

impl UiSettings {
    /// Validates the settings
    ///
    /// # Returns
    ///
    /// `Ok(())` if the settings are usable, or an error naming the first bad value
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidSettings` when a pixel value is negative or
    /// not finite, the reveal threshold lies outside `[0, 1]`, or a toast would
    /// slide out before it slid in.
    pub fn validate(&self) -> Result<()> {
        let pixels = [
            ("navbar_threshold_px", self.navbar_threshold_px),
            ("header_offset_px", self.header_offset_px),
            ("reveal_bottom_margin_px", self.reveal_bottom_margin_px),
        ];
        for (name, value) in pixels {
            if !value.is_finite() || value < 0.0 {
                return Err(PortfolioError::InvalidSettings(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(PortfolioError::InvalidSettings(format!(
                "reveal_threshold must lie between 0 and 1, got {}",
                self.reveal_threshold
            )));
        }

        let toast = &self.notification;
        if toast.display_ms == 0 || toast.display_ms < toast.slide_in_delay_ms {
            return Err(PortfolioError::InvalidSettings(
                "notification display_ms must be positive and not shorter than slide_in_delay_ms"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Settings embedded in the page's `<body data-ui-settings>`.
    ///
    /// A missing, malformed or invalid attribute falls back to the defaults.
    #[must_use]
    pub fn from_document(doc: &dyn Document) -> Self {
        let Some(raw) = doc.attribute(doc.body(), UI_SETTINGS_ATTRIBUTE) else {
            return Self::default();
        };
        match Self::parse_embedded(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring embedded page settings: {e}");
                Self::default()
            }
        }
    }

    fn parse_embedded(raw: &str) -> Result<Self> {
        let settings: UiSettings = serde_json::from_str(raw)
            .map_err(|e| PortfolioError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    #[must_use]
    pub fn external_link_delay(&self) -> Duration {
        Duration::from_millis(self.external_link_delay_ms)
    }
}

impl NotificationSettings {
    #[must_use]
    pub fn slide_in_delay(&self) -> Duration {
        Duration::from_millis(self.slide_in_delay_ms)
    }

    #[must_use]
    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    #[must_use]
    pub fn slide_out(&self) -> Duration {
        Duration::from_millis(self.slide_out_ms)
    }
}
