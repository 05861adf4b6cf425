//! Contact form handling.
//!
//! The shipped [`SimulatedSubmitter`] performs no network call: it waits a
//! fixed delay and reports success. A real backend plugs in by implementing
//! [`ContactSubmitter`]; the UI contract around it (disable the control, await
//! delivery, restore the control, notify) stays the same.

use crate::error::Result;
use crate::ui::dom::{Document, NodeId};
use crate::ui::icons::IconRenderer;
use crate::ui::markup::{CONTACT_FORM_ID, ICON_ATTRIBUTE};
use crate::ui::scheduler::{Scheduler, SubmitFuture};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

pub const MISSING_FIELDS_MESSAGE: &str = "Por favor, preencha todos os campos.";
pub const INVALID_EMAIL_MESSAGE: &str = "Por favor, insira um email válido.";
pub const SUCCESS_MESSAGE: &str = "Mensagem enviada com sucesso! Entrarei em contato em breve.";
pub const DELIVERY_FAILED_MESSAGE: &str =
    "Não foi possível enviar a mensagem. Tente novamente mais tarde.";
pub const LOADING_LABEL: &str = "Enviando...";

/// Names of the required form fields, in the order they are read
pub const FIELD_NAMES: [&str; 4] = ["name", "email", "subject", "message"];

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// `local@domain.tld` with no whitespace and at least one dot after the `@`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// # Errors
    ///
    /// `MissingFields` when any field is empty, otherwise `InvalidEmail` when
    /// the address does not look like one.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|value| value.is_empty()) {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    InvalidEmail,
}

impl ValidationError {
    /// User-facing text shown in the error toast
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::MissingFields => MISSING_FIELDS_MESSAGE,
            ValidationError::InvalidEmail => INVALID_EMAIL_MESSAGE,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// What a submit does in a given phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTransition {
    /// Validation failed; stay idle and tell the user why
    Reject(ValidationError),
    /// Valid message; enter the submitting phase
    Begin,
    /// A submission is already in flight
    Ignore,
}

impl FormPhase {
    #[must_use]
    pub fn on_submit(self, message: &ContactMessage) -> FormTransition {
        match self {
            FormPhase::Submitting => FormTransition::Ignore,
            FormPhase::Idle => match message.validate() {
                Ok(()) => FormTransition::Begin,
                Err(error) => FormTransition::Reject(error),
            },
        }
    }
}

/// Delivers a validated contact message
pub trait ContactSubmitter: Send + Sync {
    fn submit(&self, message: ContactMessage) -> SubmitFuture;
}

/// Stand-in for a backend: waits `delay`, logs the message and succeeds
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl ContactSubmitter for SimulatedSubmitter {
    fn submit(&self, message: ContactMessage) -> SubmitFuture {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(
                name = %message.name,
                email = %message.email,
                subject = %message.subject,
                "Contact form submitted (simulated, nothing was sent)"
            );
            Ok(())
        })
    }
}

/// Result of a submit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    Sending(ContactMessage),
    Ignored,
}

#[derive(Debug, Clone)]
struct SavedLabel {
    text: String,
    children: Vec<NodeId>,
}

/// Handles to `#contactForm` and its submit button
pub struct ContactForm {
    form: NodeId,
    button: NodeId,
    phase: FormPhase,
    saved_label: Option<SavedLabel>,
    submitter: Arc<dyn ContactSubmitter>,
}

impl fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactForm")
            .field("form", &self.form)
            .field("button", &self.button)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl ContactForm {
    /// Captures the form and its `button[type=submit]`; `None` when either
    /// is missing
    pub fn attach(doc: &dyn Document, submitter: Arc<dyn ContactSubmitter>) -> Option<Self> {
        let form = doc.element_by_id(CONTACT_FORM_ID)?;
        let Some(button) = doc.descendants(form).into_iter().find(|&node| {
            doc.tag(node) == "button" && doc.attribute(node, "type").as_deref() == Some("submit")
        }) else {
            tracing::warn!("Contact form has no submit button; form handling disabled");
            return None;
        };
        Some(Self {
            form,
            button,
            phase: FormPhase::Idle,
            saved_label: None,
            submitter,
        })
    }

    #[must_use]
    pub fn form(&self) -> NodeId {
        self.form
    }

    #[must_use]
    pub fn button(&self) -> NodeId {
        self.button
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Current field values; missing fields read as empty
    #[must_use]
    pub fn read_message(&self, doc: &dyn Document) -> ContactMessage {
        let value = |name: &str| {
            self.field(doc, name)
                .and_then(|field| doc.attribute(field, "value"))
                .unwrap_or_default()
        };
        ContactMessage {
            name: value("name"),
            email: value("email"),
            subject: value("subject"),
            message: value("message"),
        }
    }

    /// Validates the form and, when valid, hands the message to the submitter
    pub fn submit(
        &mut self,
        doc: &mut dyn Document,
        icons: &dyn IconRenderer,
        scheduler: &dyn Scheduler,
    ) -> SubmitOutcome {
        let message = self.read_message(doc);
        match self.phase.on_submit(&message) {
            FormTransition::Ignore => {
                tracing::debug!("Submit ignored; a submission is already in flight");
                SubmitOutcome::Ignored
            }
            FormTransition::Reject(error) => {
                tracing::debug!(?error, "Contact form rejected");
                SubmitOutcome::Rejected(error)
            }
            FormTransition::Begin => {
                self.phase = FormPhase::Submitting;
                self.show_loading(doc);
                icons.create_icons(doc);
                scheduler.spawn_submission(self.submitter.submit(message.clone()));
                tracing::info!("Contact form submitting");
                SubmitOutcome::Sending(message)
            }
        }
    }

    /// Finishes an in-flight submission. Fields are cleared only on success.
    /// Returns `false` when nothing was in flight.
    pub fn settle(
        &mut self,
        doc: &mut dyn Document,
        icons: &dyn IconRenderer,
        result: &Result<()>,
    ) -> bool {
        if self.phase != FormPhase::Submitting {
            return false;
        }
        if result.is_ok() {
            self.reset_fields(doc);
        }
        self.restore_label(doc);
        icons.create_icons(doc);
        self.phase = FormPhase::Idle;
        true
    }

    fn field(&self, doc: &dyn Document, name: &str) -> Option<NodeId> {
        doc.descendants(self.form)
            .into_iter()
            .find(|&node| doc.attribute(node, "name").as_deref() == Some(name))
    }

    fn reset_fields(&self, doc: &mut dyn Document) {
        let fields: Vec<NodeId> = doc
            .descendants(self.form)
            .into_iter()
            .filter(|&node| {
                doc.attribute(node, "name").is_some()
                    && matches!(doc.tag(node).as_str(), "input" | "textarea" | "select")
            })
            .collect();
        for field in fields {
            doc.set_attribute(field, "value", "");
        }
    }

    fn show_loading(&mut self, doc: &mut dyn Document) {
        let children = doc.children(self.button);
        for &child in &children {
            doc.remove(child);
        }
        self.saved_label = Some(SavedLabel {
            text: doc.text(self.button),
            children,
        });

        doc.set_text(self.button, "");
        let spinner = doc.create_element("i");
        doc.set_attribute(spinner, ICON_ATTRIBUTE, "loader-2");
        doc.add_class(spinner, "animate-spin");
        doc.append_child(self.button, spinner);
        let label = doc.create_element("span");
        doc.set_text(label, LOADING_LABEL);
        doc.append_child(self.button, label);
        doc.set_attribute(self.button, "disabled", "");
    }

    fn restore_label(&mut self, doc: &mut dyn Document) {
        for child in doc.children(self.button) {
            doc.remove(child);
        }
        if let Some(saved) = self.saved_label.take() {
            doc.set_text(self.button, &saved.text);
            for child in saved.children {
                doc.append_child(self.button, child);
            }
        }
        doc.remove_attribute(self.button, "disabled");
    }
}
