//! Auth flow state machine: modes, form state, configuration, and the
//! controller orchestrating roster, role store, and identity provider.

pub mod controller;

pub use controller::AuthFlowController;

use secrecy::SecretString;
use std::time::Duration;

/// Message shown when a roster email is used for regular registration.
pub const RESERVED_EMAIL_MESSAGE: &str =
    "This email is reserved for admin use only and cannot be used for regular user registration.";

/// Message shown after a password-reset email was requested.
pub const RESET_EMAIL_SENT_MESSAGE: &str = "Password reset email sent! Check your inbox.";

/// Message shown after registration, while email verification is pending.
pub const REGISTRATION_PENDING_MESSAGE: &str =
    "Registration successful! Please check your email to verify your account.";

const DEFAULT_ADMIN_DESTINATION: &str = "/admin";
const DEFAULT_HOME_DESTINATION: &str = "/";
const DEFAULT_RESET_PASSWORD_PATH: &str = "/reset-password";
const DEFAULT_MODE_SWITCH_DELAY: Duration = Duration::from_secs(3);

/// Which of the three flows is currently active. Exactly one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowMode {
    SignIn,
    SignUp,
    ForgotPassword,
}

/// Post-action navigation decision handed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Admin,
    Home,
}

/// Flow configuration: destinations, reset callback, and timer delay.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    origin: String,
    admin_destination: String,
    home_destination: String,
    reset_password_path: String,
    mode_switch_delay: Duration,
}

impl FlowConfig {
    /// Build a config around the client's origin base URL.
    #[must_use]
    pub fn new(origin: String) -> Self {
        // Ensure origin does not have a trailing slash
        let origin = origin.trim_end_matches('/').to_string();
        Self {
            origin,
            admin_destination: DEFAULT_ADMIN_DESTINATION.to_string(),
            home_destination: DEFAULT_HOME_DESTINATION.to_string(),
            reset_password_path: DEFAULT_RESET_PASSWORD_PATH.to_string(),
            mode_switch_delay: DEFAULT_MODE_SWITCH_DELAY,
        }
    }

    #[must_use]
    pub fn with_admin_destination(mut self, destination: String) -> Self {
        self.admin_destination = destination;
        self
    }

    #[must_use]
    pub fn with_home_destination(mut self, destination: String) -> Self {
        self.home_destination = destination;
        self
    }

    #[must_use]
    pub fn with_reset_password_path(mut self, path: String) -> Self {
        self.reset_password_path = path;
        self
    }

    #[must_use]
    pub fn with_mode_switch_delay(mut self, delay: Duration) -> Self {
        self.mode_switch_delay = delay;
        self
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn mode_switch_delay(&self) -> Duration {
        self.mode_switch_delay
    }

    /// Callback URL embedded in password-reset email links.
    #[must_use]
    pub fn reset_callback_url(&self) -> String {
        format!("{}{}", self.origin, self.reset_password_path)
    }

    /// Path to navigate to for a navigation decision.
    #[must_use]
    pub fn destination(&self, navigation: Navigation) -> &str {
        match navigation {
            Navigation::Admin => &self.admin_destination,
            Navigation::Home => &self.home_destination,
        }
    }
}

/// Form state exposed to the presentation layer.
#[derive(Clone, Debug)]
pub struct FlowState {
    pub mode: FlowMode,
    pub email: String,
    pub password: SecretString,
    pub show_password: bool,
    pub is_admin_email: bool,
    pub is_submitting: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            mode: FlowMode::SignIn,
            email: String::new(),
            password: SecretString::default(),
            show_password: false,
            is_admin_email: false,
            is_submitting: false,
            error: None,
            success: None,
        }
    }
}

impl FlowState {
    /// Set or clear the reserved-email error according to the current mode
    /// and email. Only this specific message is ever cleared here; unrelated
    /// errors stay untouched.
    pub(crate) fn apply_reserved_email_rule(&mut self) {
        if self.mode == FlowMode::SignUp && self.is_admin_email {
            self.error = Some(RESERVED_EMAIL_MESSAGE.to_string());
        } else if self.error.as_deref() == Some(RESERVED_EMAIL_MESSAGE) {
            self.error = None;
        }
    }
}
