//! Custom error types for the portfolio shell
//!
//! This module defines custom error types and implements the necessary traits
//! to properly handle errors throughout the application. Interactive page
//! behaviour absorbs its failures locally; only configuration, the preview
//! server and the page session plumbing surface a `PortfolioError`.

use std::fmt;

/// Main error type for the portfolio shell
#[derive(Debug)]
pub enum PortfolioError {
    /// Error occurred while parsing address
    AddressParse(std::net::AddrParseError),

    /// Error occurred while binding or running the preview server
    ServerRun(std::io::Error),

    /// Error occurred while reading configuration file
    ConfigRead(std::io::Error),

    /// Error occurred while parsing configuration
    ConfigParse(json5::Error),

    /// Configuration parsed but holds values the page cannot use
    InvalidSettings(String),

    /// A contact submitter failed to deliver the message
    Submission(String),

    /// The page session task is no longer running
    SessionClosed,

    /// Generic error with a message
    Generic(String),
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioError::AddressParse(e) => {
                write!(f, "Failed to parse network address: {e}")
            }
            PortfolioError::ServerRun(e) => {
                write!(f, "Server runtime error: {e}")
            }
            PortfolioError::ConfigRead(e) => {
                write!(f, "Failed to read configuration file: {e}")
            }
            PortfolioError::ConfigParse(e) => {
                write!(f, "Failed to parse configuration: {e}")
            }
            PortfolioError::InvalidSettings(msg) => {
                write!(f, "Invalid page settings: {msg}")
            }
            PortfolioError::Submission(msg) => {
                write!(f, "Contact submission failed: {msg}")
            }
            PortfolioError::SessionClosed => f.write_str("Page session is closed"),
            PortfolioError::Generic(msg) => {
                write!(f, "Error: {msg}")
            }
        }
    }
}

impl std::error::Error for PortfolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortfolioError::AddressParse(e) => Some(e),
            PortfolioError::ServerRun(e) | PortfolioError::ConfigRead(e) => Some(e),
            PortfolioError::ConfigParse(e) => Some(e),
            PortfolioError::InvalidSettings(_)
            | PortfolioError::Submission(_)
            | PortfolioError::SessionClosed
            | PortfolioError::Generic(_) => None,
        }
    }
}

impl From<std::net::AddrParseError> for PortfolioError {
    fn from(error: std::net::AddrParseError) -> Self {
        PortfolioError::AddressParse(error)
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(error: std::io::Error) -> Self {
        PortfolioError::ConfigRead(error)
    }
}

impl From<json5::Error> for PortfolioError {
    fn from(error: json5::Error) -> Self {
        PortfolioError::ConfigParse(error)
    }
}

impl From<&str> for PortfolioError {
    fn from(msg: &str) -> Self {
        PortfolioError::Generic(msg.to_string())
    }
}

impl From<String> for PortfolioError {
    fn from(msg: String) -> Self {
        PortfolioError::Generic(msg)
    }
}

/// Result type alias using our custom error type
pub type Result<T> = std::result::Result<T, PortfolioError>;
