//! Submission controller.
//!
//! Owns one login attempt end to end: read the surface, validate, guard
//! against re-entry, post the credentials, and map the outcome back onto
//! the surface as state, banner, token write, and navigation.

use crate::form::{
    is_valid_identifier, is_valid_password, mask_identifier_input, Credentials, Field, FieldError,
    MessagePresenter, StatusKind, SubmissionState, MSG_CONNECTION_FAILED, MSG_INVALID_CREDENTIALS,
    MSG_INVALID_IDENTIFIER, MSG_LOGIN_SUCCESS, MSG_PASSWORD_TOO_SHORT, MSG_REQUIRED_FIELD,
};
use crate::config::Config;
use crate::portal::{LoginSuccess, Portal, PortalError};
use crate::storage::{TokenStore, AUTH_TOKEN_KEY};
use crate::surface::FormSurface;
use log::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Drives the login form through `Idle -> Submitting -> {Succeeded |
/// Failed}`. All mutable UI state (banner slot, submitting flag, field
/// errors) is owned here; the surface is only ever written through this
/// instance.
///
pub struct LoginController<S: FormSurface + 'static, K: TokenStore> {
    surface: Arc<Mutex<S>>,
    portal: Portal,
    store: K,
    presenter: MessagePresenter<S>,
    dashboard_url: String,
    gov_auth_url: String,
    redirect_delay: Duration,
    state: SubmissionState,
    in_flight: bool,
    field_errors: HashMap<Field, String>,
    redirect_task: Option<JoinHandle<()>>,
}

impl<S: FormSurface + 'static, K: TokenStore> LoginController<S, K> {
    /// Return a new controller in `Idle` wired to the given surface,
    /// portal endpoint, and token store.
    ///
    pub fn new(surface: Arc<Mutex<S>>, portal: Portal, store: K, config: &Config) -> Self {
        let presenter = MessagePresenter::new(Arc::clone(&surface), config.error_timeout());
        LoginController {
            surface,
            portal,
            store,
            presenter,
            dashboard_url: config.dashboard_url.clone(),
            gov_auth_url: config.gov_auth_url.clone(),
            redirect_delay: config.redirect_delay(),
            state: SubmissionState::Idle,
            in_flight: false,
            field_errors: HashMap::new(),
            redirect_task: None,
        }
    }

    /// Current submission state.
    ///
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Inline errors currently attached, in field order.
    ///
    pub fn field_errors(&self) -> Vec<FieldError> {
        [Field::Identifier, Field::Password]
            .iter()
            .filter_map(|field| {
                self.field_errors.get(field).map(|message| FieldError {
                    field: *field,
                    message: message.clone(),
                })
            })
            .collect()
    }

    /// Re-apply the national ID display mask to the identifier field.
    /// Called on each identifier keystroke.
    ///
    pub async fn apply_identifier_mask(&mut self) {
        let mut surface = self.surface.lock().await;
        let current = surface.read_identifier();
        let masked = mask_identifier_input(&current);
        if masked != current {
            surface.set_identifier(&masked);
        }
    }

    /// A field regaining focus drops its inline error.
    ///
    pub async fn on_field_focus(&mut self, field: Field) {
        self.field_errors.remove(&field);
        self.surface.lock().await.clear_field_error(field);
    }

    /// Run one submission attempt and return the resulting state. Local
    /// validation failures stay in `Idle` without a network call; every
    /// other outcome is absorbed into the surface, so this never errors.
    ///
    pub async fn submit(&mut self) -> SubmissionState {
        if self.in_flight {
            debug!("Ignoring submit trigger while a request is in flight.");
            return self.state;
        }

        let (identifier, password, remember) = {
            let surface = self.surface.lock().await;
            (
                surface.read_identifier().trim().to_string(),
                surface.read_password(),
                surface.read_remember(),
            )
        };

        self.clear_field_errors().await;
        if !self.validate(&identifier, &password).await {
            debug!("Submission stopped by local validation.");
            self.state = SubmissionState::Idle;
            return self.state;
        }

        info!("Submitting credentials for '{}'...", identifier);
        self.state = SubmissionState::Submitting;
        self.in_flight = true;
        self.presenter.clear().await;
        self.surface.lock().await.set_submitting(true);

        let credentials = Credentials {
            identifier,
            password,
            remember,
        };
        match self.portal.login(&credentials).await {
            Ok(success) => self.complete_success(success).await,
            Err(error) => self.complete_failure(error).await,
        }

        self.surface.lock().await.set_submitting(false);
        self.in_flight = false;
        self.state
    }

    /// Hand off to the government identity provider. Plain navigation, no
    /// credential exchange on this side.
    ///
    pub async fn gov_sign_in(&mut self) {
        info!("Handing off to the government identity provider...");
        self.surface.lock().await.navigate(&self.gov_auth_url);
    }

    /// Detach the pending redirect, if any, so the caller can await it.
    ///
    pub fn take_redirect_task(&mut self) -> Option<JoinHandle<()>> {
        self.redirect_task.take()
    }

    /// Check both fields, attaching an inline error to every failing one.
    /// Returns true when the attempt may proceed to the network.
    ///
    async fn validate(&mut self, identifier: &str, password: &str) -> bool {
        let mut valid = true;
        if identifier.is_empty() {
            self.show_field_error(Field::Identifier, MSG_REQUIRED_FIELD).await;
            valid = false;
        } else if !is_valid_identifier(identifier) {
            self.show_field_error(Field::Identifier, MSG_INVALID_IDENTIFIER).await;
            valid = false;
        }
        if password.is_empty() {
            self.show_field_error(Field::Password, MSG_REQUIRED_FIELD).await;
            valid = false;
        } else if !is_valid_password(password) {
            self.show_field_error(Field::Password, MSG_PASSWORD_TOO_SHORT).await;
            valid = false;
        }
        valid
    }

    /// Accepted login: persist the token when present, show the success
    /// banner, and schedule the redirect. The submit control is re-enabled
    /// by the caller regardless; navigation happens on its own delay.
    ///
    async fn complete_success(&mut self, success: LoginSuccess) {
        self.state = SubmissionState::Succeeded;
        info!("Login accepted.");

        if let Some(token) = &success.token {
            if let Err(e) = self.store.put(AUTH_TOKEN_KEY, token) {
                // A token that fails to persist costs a re-login later,
                // not this attempt.
                error!("Failed to persist session token: {}", e);
            }
        }

        self.presenter.show(StatusKind::Success, MSG_LOGIN_SUCCESS).await;

        let target = success
            .redirect
            .unwrap_or_else(|| self.dashboard_url.clone());
        let surface = Arc::clone(&self.surface);
        let delay = self.redirect_delay;
        self.redirect_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut surface = surface.lock().await;
            if surface.is_mounted() {
                surface.navigate(&target);
            } else {
                debug!("Skipping redirect for unmounted form.");
            }
        }));
    }

    /// Rejected or failed login: show the server message verbatim when one
    /// exists, a generic connection text otherwise.
    ///
    async fn complete_failure(&mut self, error: PortalError) {
        self.state = SubmissionState::Failed;
        match error {
            PortalError::Rejected { message } => {
                let text = message.unwrap_or_else(|| MSG_INVALID_CREDENTIALS.to_string());
                warn!("Login rejected: {}", text);
                self.presenter.show(StatusKind::Error, &text).await;
            }
            error => {
                error!("Login request failed: {}", error);
                self.presenter.show(StatusKind::Error, MSG_CONNECTION_FAILED).await;
            }
        }
    }

    async fn show_field_error(&mut self, field: Field, message: &str) {
        self.field_errors.insert(field, message.to_string());
        self.surface.lock().await.set_field_error(field, message);
    }

    async fn clear_field_errors(&mut self) {
        self.field_errors.clear();
        let mut surface = self.surface.lock().await;
        surface.clear_field_error(Field::Identifier);
        surface.clear_field_error(Field::Password);
    }
}
