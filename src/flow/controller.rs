//! The state machine governing sign-in, sign-up, and forgot-password.
//!
//! All transitions happen on one logical flow: field edits and mode toggles
//! are synchronous state changes, and the only async boundary is the
//! identity provider call, gated against re-entry by `is_submitting`. The
//! role cache is written before credential verification is issued so that a
//! reload mid-flight still observes the intended role.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::{
    FlowConfig, FlowMode, FlowState, Navigation, REGISTRATION_PENDING_MESSAGE,
    RESERVED_EMAIL_MESSAGE, RESET_EMAIL_SENT_MESSAGE,
};
use crate::provider::{IdentityProvider, ProviderError};
use crate::role::{normalize_email, RoleResolver};
use crate::store::RoleStore;

/// What a successful submission asks the host to do next.
enum Submission {
    /// Leave the form for a destination.
    Navigate(Navigation),
    /// Show a success message now; switch mode after the configured delay.
    Pending {
        message: &'static str,
        next_mode: FlowMode,
    },
}

/// Everything a submission can fail with. All variants end up as the
/// `error` display field; nothing propagates past the submit boundary.
#[derive(Debug, Error)]
enum SubmitError {
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("{0}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for SubmitError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err)
    }
}

pub struct AuthFlowController<P, S> {
    config: FlowConfig,
    resolver: RoleResolver,
    provider: P,
    store: S,
    state: Arc<Mutex<FlowState>>,
    pending_switch: Mutex<Option<JoinHandle<()>>>,
}

impl<P, S> AuthFlowController<P, S>
where
    P: IdentityProvider,
    S: RoleStore,
{
    #[must_use]
    pub fn new(config: FlowConfig, resolver: RoleResolver, provider: P, store: S) -> Self {
        Self {
            config,
            resolver,
            provider,
            store,
            state: Arc::new(Mutex::new(FlowState::default())),
            pending_switch: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Snapshot of the form state for the presentation layer.
    pub async fn state(&self) -> FlowState {
        self.state.lock().await.clone()
    }

    /// Mount-time redirect guard. If either the cached role or the
    /// provider's live session flag indicates admin, navigate to the admin
    /// destination before rendering anything. A provider failure counts as
    /// "not admin".
    pub async fn on_mount(&self) -> Option<Navigation> {
        let cached = self.store.read();
        let live = match self.provider.session_is_admin().await {
            Ok(flag) => flag,
            Err(err) => {
                debug!("session flag unavailable: {err}");
                false
            }
        };
        debug!(cached, live, "redirect guard check");
        (cached || live).then_some(Navigation::Admin)
    }

    /// Email field edit: recompute the derived admin flag and the
    /// reserved-email gate.
    pub async fn set_email(&self, email: String) {
        let is_admin_email = self.resolver.resolve(&email);
        let mut state = self.state.lock().await;
        state.email = email;
        state.is_admin_email = is_admin_email;
        state.apply_reserved_email_rule();
    }

    pub async fn set_password(&self, password: SecretString) {
        self.state.lock().await.password = password;
    }

    pub async fn toggle_password_visibility(&self) {
        let mut state = self.state.lock().await;
        state.show_password = !state.show_password;
    }

    /// Switch between sign-in and sign-up. Clears messages, keeps fields.
    pub async fn toggle_mode(&self) {
        let mut state = self.state.lock().await;
        state.mode = match state.mode {
            FlowMode::SignIn => FlowMode::SignUp,
            FlowMode::SignUp | FlowMode::ForgotPassword => FlowMode::SignIn,
        };
        state.error = None;
        state.success = None;
        state.apply_reserved_email_rule();
    }

    /// Enter or leave the forgot-password flow. Clears messages, keeps
    /// fields.
    pub async fn toggle_forgot_password(&self) {
        let mut state = self.state.lock().await;
        state.mode = if state.mode == FlowMode::ForgotPassword {
            FlowMode::SignIn
        } else {
            FlowMode::ForgotPassword
        };
        state.error = None;
        state.success = None;
        state.apply_reserved_email_rule();
    }

    /// Whether the submit control should be enabled.
    pub async fn can_submit(&self) -> bool {
        let state = self.state.lock().await;
        !(state.is_submitting || (state.mode == FlowMode::SignUp && state.is_admin_email))
    }

    /// Run the submission for the active mode.
    ///
    /// Re-entrant submits are ignored while one is in flight. Exactly one of
    /// the error/success messages is set afterwards, and `is_submitting` is
    /// reset on every path.
    pub async fn submit(&self) -> Option<Navigation> {
        let (mode, email, password) = {
            let mut state = self.state.lock().await;
            if state.is_submitting {
                return None;
            }
            state.is_submitting = true;
            state.error = None;
            state.success = None;
            (state.mode, state.email.clone(), state.password.clone())
        };

        debug!(?mode, email = %normalize_email(&email), "form submitted");
        let outcome = self.run_submission(mode, &email, &password).await;

        let mut navigation = None;
        let mut scheduled = None;
        {
            let mut state = self.state.lock().await;
            match outcome {
                Ok(Submission::Navigate(target)) => navigation = Some(target),
                Ok(Submission::Pending { message, next_mode }) => {
                    state.success = Some(message.to_string());
                    scheduled = Some(next_mode);
                }
                Err(err) => {
                    error!("auth flow error: {err}");
                    state.error = Some(err.to_string());
                }
            }
            state.is_submitting = false;
        }

        if let Some(next_mode) = scheduled {
            self.schedule_mode_switch(next_mode).await;
        }
        navigation
    }

    async fn run_submission(
        &self,
        mode: FlowMode,
        email: &str,
        password: &SecretString,
    ) -> Result<Submission, SubmitError> {
        match mode {
            FlowMode::ForgotPassword => {
                let callback_url = self.config.reset_callback_url();
                debug!(email = %normalize_email(email), "requesting password reset");
                self.provider
                    .request_password_reset(email, &callback_url)
                    .await?;
                Ok(Submission::Pending {
                    message: RESET_EMAIL_SENT_MESSAGE,
                    next_mode: FlowMode::SignIn,
                })
            }
            FlowMode::SignIn => {
                let is_user_admin = self.resolver.resolve(email);
                // The decision must be durable before credentials go out so
                // a reload during verification still sees the intended role.
                self.store.write(is_user_admin)?;
                self.provider
                    .verify_credentials(email, password.expose_secret())
                    .await?;
                debug!(is_user_admin, "sign in completed");
                Ok(Submission::Navigate(if is_user_admin {
                    Navigation::Admin
                } else {
                    Navigation::Home
                }))
            }
            FlowMode::SignUp => {
                // Unreachable while the submit control is disabled, but
                // re-checked so the provider is never called with a roster
                // email.
                if self.resolver.resolve(email) {
                    return Err(SubmitError::Validation(RESERVED_EMAIL_MESSAGE));
                }
                self.provider
                    .register_account(email, password.expose_secret())
                    .await?;
                Ok(Submission::Pending {
                    message: REGISTRATION_PENDING_MESSAGE,
                    next_mode: FlowMode::SignIn,
                })
            }
        }
    }

    /// Schedule the delayed mode switch, replacing (and cancelling) any
    /// previous one.
    async fn schedule_mode_switch(&self, target: FlowMode) {
        let state = Arc::clone(&self.state);
        let delay = self.config.mode_switch_delay();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.lock().await;
            state.mode = target;
            state.apply_reserved_email_rule();
        });
        if let Some(previous) = self.pending_switch.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Wait for a scheduled mode switch to complete, if one is pending.
    pub async fn settle(&self) {
        let handle = self.pending_switch.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl<P, S> Drop for AuthFlowController<P, S> {
    fn drop(&mut self) {
        // Timers must not act once the flow is torn down.
        if let Some(handle) = self.pending_switch.get_mut().take() {
            handle.abort();
        }
    }
}
