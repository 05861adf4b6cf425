//! Runs a [`Page`] inside a tokio task.
//!
//! The task is the page's only owner. Events, fired timers and finished
//! submissions all arrive through one unbounded channel and are applied
//! strictly in order, so no state needs a lock.

use crate::error::{PortfolioError, Result};
use crate::settings::UiSettings;
use crate::ui::contact::ContactSubmitter;
use crate::ui::dom::Document;
use crate::ui::icons::IconRenderer;
use crate::ui::page::{EventOutcome, Page, PageEvent};
use crate::ui::scheduler::{Scheduler, SubmitFuture, Timer};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

type PageJob<D> = Box<dyn FnOnce(&mut Page<D>) + Send>;

enum Command<D> {
    Event(PageEvent, Option<oneshot::Sender<EventOutcome>>),
    Inspect(PageJob<D>),
}

/// [`Scheduler`] backed by tokio timers; due work is posted back to the session
struct TokioScheduler<D> {
    tx: mpsc::UnboundedSender<Command<D>>,
}

impl<D: Send + 'static> Scheduler for TokioScheduler<D> {
    fn schedule(&self, delay: Duration, cancel: CancellationToken, timer: Timer) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => debug!(?timer, "Timer cancelled"),
                () = tokio::time::sleep(delay) => {
                    if tx.send(Command::Event(PageEvent::Timer(timer), None)).is_err() {
                        debug!(?timer, "Page session closed before timer fired");
                    }
                }
            }
        });
    }

    fn spawn_submission(&self, submission: SubmitFuture) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = submission.await;
            if tx
                .send(Command::Event(PageEvent::SubmissionSettled(result), None))
                .is_err()
            {
                debug!("Page session closed before submission settled");
            }
        });
    }
}

/// Cheap, cloneable access to a running page session
pub struct PageHandle<D> {
    tx: mpsc::UnboundedSender<Command<D>>,
}

impl<D> Clone for PageHandle<D> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<D: Document + Send + 'static> PageHandle<D> {
    /// Delivers `event` and waits until the page processed it
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::SessionClosed` if the session has stopped
    pub async fn dispatch(&self, event: PageEvent) -> Result<EventOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.tx
            .send(Command::Event(event, Some(reply)))
            .map_err(|_| PortfolioError::SessionClosed)?;
        outcome.await.map_err(|_| PortfolioError::SessionClosed)
    }

    /// Runs `f` against the page between two events
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::SessionClosed` if the session has stopped
    pub async fn with_page<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Page<D>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, result) = oneshot::channel();
        let job: PageJob<D> = Box::new(move |page| {
            // the caller may have given up waiting
            let _ = reply.send(f(page));
        });
        self.tx
            .send(Command::Inspect(job))
            .map_err(|_| PortfolioError::SessionClosed)?;
        result.await.map_err(|_| PortfolioError::SessionClosed)
    }
}

/// Bootstraps `doc` inside a new task and returns a handle to it.
///
/// The session runs until `shutdown` is cancelled; pending timers are
/// cancelled with it.
pub fn spawn_session<D>(
    doc: D,
    icons: Box<dyn IconRenderer + Send>,
    submitter: Arc<dyn ContactSubmitter>,
    settings: UiSettings,
    shutdown: CancellationToken,
) -> (PageHandle<D>, JoinHandle<()>)
where
    D: Document + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = TokioScheduler { tx: tx.clone() };

    let task = tokio::spawn(async move {
        let mut page = Page::bootstrap(doc, icons, Box::new(scheduler), submitter, &settings);
        info!("Page session started");

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                command = rx.recv() => match command {
                    Some(Command::Event(event, reply)) => {
                        let outcome = page.dispatch(event);
                        if let Some(reply) = reply {
                            let _ = reply.send(outcome);
                        }
                    }
                    Some(Command::Inspect(job)) => job(&mut page),
                    None => break,
                },
            }
        }

        page.shutdown();
        info!("Page session stopped");
    });

    (PageHandle { tx }, task)
}
