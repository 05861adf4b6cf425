//! # Portfolio Shell Library
//!
//! This library provides the interactive layer of a single-page personal
//! portfolio, together with a small preview server that renders and hosts the
//! page itself.
//!
//! ## Overview
//!
//! The library is organized into several modules that handle different aspects of the application:
//!
//! - `config`: Loads the page content and settings from a json5 file
//! - `error`: Defines custom error types for consistent error handling
//! - `index`: Renders the portfolio page
//! - `server`: Runs the preview web server
//! - `settings`: Timings and thresholds of the interactive layer
//! - `telemetry`: Logging setup
//! - `ui`: Menu, navbar, smooth scrolling, contact form, notifications,
//!   scroll reveal, lazy images and external links
//! - `utils`: Provides utility functions used throughout the application
//!
//! ## Getting Started
//!
//! Interactivity runs against any [`ui::dom::Document`]. A headless session
//! over the in-memory document looks like this:
//!
//! ```no_run
//! use portfolio_shell::settings::UiSettings;
//! use portfolio_shell::ui::contact::SimulatedSubmitter;
//! use portfolio_shell::ui::dom::MemoryDocument;
//! use portfolio_shell::ui::icons::LucideIcons;
//! use portfolio_shell::ui::page::PageEvent;
//! use portfolio_shell::ui::session::spawn_session;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), portfolio_shell::error::PortfolioError> {
//!     let doc = MemoryDocument::new(url::Url::parse("https://ana.dev/").unwrap());
//!     let settings = UiSettings::default();
//!     let submitter = Arc::new(SimulatedSubmitter::new(settings.submit_delay()));
//!     let shutdown = CancellationToken::new();
//!
//!     let (page, task) = spawn_session(doc, Box::new(LucideIcons), submitter, settings, shutdown.clone());
//!     page.dispatch(PageEvent::Scroll).await?;
//!
//!     shutdown.cancel();
//!     task.await.ok();
//!     Ok(())
//! }
//! ```
//!
//! The preview server is started with `server::run`:
//!
//! ```no_run
//! use portfolio_shell::{config::CONFIG_FILE, server};
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), portfolio_shell::error::PortfolioError> {
//!     let cancel_token = CancellationToken::new();
//!     let config_path = Some(PathBuf::from(CONFIG_FILE));
//!
//!     server::run(3000, config_path, cancel_token).await
//! }
//! ```

/// Custom error types module
///
/// Defines the `PortfolioError` enum used by configuration loading, the
/// preview server and the page session.
pub mod error;

/// Configuration management module
///
/// Loads the portfolio content (owner, tagline, projects) and the interactive
/// settings from a json5 file.
pub mod config;

/// Index page generation module
///
/// Renders the portfolio page with the element ids and classes the
/// interactive layer expects.
pub mod index;

/// Server operations module
///
/// Hosts the rendered page and the `static/` directory using Axum. It is a
/// static host only and stores nothing.
pub mod server;

/// Interactive settings module
///
/// Scroll thresholds, header allowance, notification phase timings and
/// observer parameters, all with defaults.
pub mod settings;

/// Logging setup
pub mod telemetry;

/// Interactive page behaviour
pub mod ui;

/// Utility functions module
pub mod utils;
