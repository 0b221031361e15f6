//! Status message lifecycle.
//!
//! Owns the single banner slot for the login form. Creating a new message
//! evicts the previous one; error messages auto-dismiss after a fixed
//! delay through a cancelable timer that never touches an evicted slot.

use crate::form::{StatusKind, StatusMessage};
use crate::surface::FormSurface;
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Renders and removes the transient status banner. The slot is an owned
/// field, not a query against the surface, so exactly one message can exist
/// per controller instance.
///
pub struct MessagePresenter<S: FormSurface + 'static> {
    surface: Arc<Mutex<S>>,
    current: Arc<Mutex<Option<StatusMessage>>>,
    expiry: Option<JoinHandle<()>>,
    error_timeout: Duration,
}

impl<S: FormSurface + 'static> MessagePresenter<S> {
    /// Return a new presenter with an empty banner slot.
    ///
    pub fn new(surface: Arc<Mutex<S>>, error_timeout: Duration) -> Self {
        MessagePresenter {
            surface,
            current: Arc::new(Mutex::new(None)),
            expiry: None,
            error_timeout,
        }
    }

    /// Insert a new status banner, evicting the previous one and canceling
    /// its removal timer. Error banners are scheduled for automatic removal
    /// after the configured timeout.
    ///
    pub async fn show(&mut self, kind: StatusKind, text: &str) {
        self.cancel_expiry();

        {
            let mut surface = self.surface.lock().await;
            if !surface.is_mounted() {
                debug!("Skipping status banner for unmounted form.");
                return;
            }
            let message = StatusMessage::new(kind, text);
            surface.show_status(&message);
            drop(surface);
            *self.current.lock().await = Some(message);
        }

        if kind == StatusKind::Error {
            let surface = Arc::clone(&self.surface);
            let current = Arc::clone(&self.current);
            let timeout = self.error_timeout;
            self.expiry = Some(tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                // The slot re-check keeps a stale timer from clearing a
                // banner it no longer owns.
                if current.lock().await.take().is_some() {
                    surface.lock().await.clear_status();
                }
            }));
        }
    }

    /// Remove the current banner, if any, and cancel its removal timer.
    ///
    pub async fn clear(&mut self) {
        self.cancel_expiry();
        if self.current.lock().await.take().is_some() {
            self.surface.lock().await.clear_status();
        }
    }

    /// Return a copy of the banner currently occupying the slot.
    ///
    #[allow(dead_code)]
    pub async fn current(&self) -> Option<StatusMessage> {
        self.current.lock().await.clone()
    }

    /// Abort the pending removal task, if any.
    ///
    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}

impl<S: FormSurface + 'static> Drop for MessagePresenter<S> {
    fn drop(&mut self) {
        // A timer outliving the form must not touch a removed banner.
        self.cancel_expiry();
    }
}
