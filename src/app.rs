//! Application orchestration.
//!
//! Wires configuration, the portal client, the token store, and a terminal
//! surface into a login controller and runs one command to completion.

use crate::config::Config;
use crate::error::AppError;
use crate::form::{LoginController, SubmissionState};
use crate::logger;
use crate::portal::Portal;
use crate::storage::{FileTokenStore, AUTH_TOKEN_KEY};
use crate::surface::TerminalSurface;
use anyhow::{anyhow, Result};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the binary was asked to do.
///
#[derive(Debug)]
pub enum Command {
    Login {
        identifier: String,
        password: String,
        remember: bool,
    },
    GovSignIn,
}

/// Oversees command execution and teardown.
///
pub struct App {
    config: Config,
}

impl App {
    /// Run the given command according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, command: Command) -> Result<()> {
        logger::init(LevelFilter::Info).map_err(|e| AppError::Logger(e.to_string()))?;
        info!("Starting portal client...");

        let app = App { config };
        app.run(command).await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Build the pipeline and drive it through one command.
    ///
    async fn run(&self, command: Command) -> Result<()> {
        let base_url = self
            .config
            .api_base_url
            .clone()
            .ok_or_else(|| anyhow!("No portal server URL configured (use --server or the configuration file)"))?;
        let portal = Portal::new(
            &base_url,
            &self.config.login_endpoint,
            self.config.csrf_token.as_deref(),
        );
        let store = FileTokenStore::new(self.config.session_file_path()?);
        if store.get(AUTH_TOKEN_KEY).is_some() {
            debug!("An existing session token will be replaced on success.");
        }

        match command {
            Command::Login {
                identifier,
                password,
                remember,
            } => {
                let surface = Arc::new(Mutex::new(TerminalSurface::new(
                    &identifier,
                    &password,
                    remember,
                )));
                let mut controller =
                    LoginController::new(Arc::clone(&surface), portal, store, &self.config);

                controller.apply_identifier_mask().await;
                controller.submit().await;
                let state = controller.state();
                debug!("Submission finished in state {:?}.", state);

                if let Some(redirect) = controller.take_redirect_task() {
                    redirect.await?;
                }
                if state != SubmissionState::Succeeded {
                    let field_errors = controller.field_errors();
                    if !field_errors.is_empty() {
                        return Err(anyhow!(
                            "Login attempt stopped by {} field error(s)",
                            field_errors.len()
                        ));
                    }
                    return Err(anyhow!("Login attempt did not succeed"));
                }
            }
            Command::GovSignIn => {
                let surface = Arc::new(Mutex::new(TerminalSurface::new("", "", false)));
                let mut controller =
                    LoginController::new(Arc::clone(&surface), portal, store, &self.config);
                controller.gov_sign_in().await;
            }
        }

        Ok(())
    }
}
