use anyhow::{anyhow, Result};
use tracing::debug;

use crate::cli::{actions::Action, dispatch::Globals};
use crate::flow::{AuthFlowController, FlowConfig};
use crate::provider::HttpProvider;
use crate::role::RoleResolver;
use crate::store::FileRoleStore;

/// Wire up provider, role store, and controller, then run the requested
/// flow and report the outcome.
pub async fn handle(globals: &Globals, action: Action) -> Result<()> {
    let provider = HttpProvider::new(&globals.provider_url)?;
    let store = FileRoleStore::new(&globals.cache_path);
    let config = FlowConfig::new(globals.origin.clone());
    let controller = AuthFlowController::new(config, RoleResolver::default(), provider, store);

    // Redirect guard: an already-admin session skips the form entirely.
    if let Some(navigation) = controller.on_mount().await {
        println!(
            "navigate to {}",
            controller.config().destination(navigation)
        );
        return Ok(());
    }

    let navigation = match action {
        Action::SignIn { email, password } => {
            controller.set_email(email).await;
            controller.set_password(password).await;
            controller.submit().await
        }
        Action::SignUp { email, password } => {
            controller.toggle_mode().await;
            controller.set_email(email).await;
            controller.set_password(password).await;
            controller.submit().await
        }
        Action::Recover { email } => {
            controller.toggle_forgot_password().await;
            controller.set_email(email).await;
            controller.submit().await
        }
    };

    let state = controller.state().await;
    if let Some(error) = state.error {
        return Err(anyhow!(error));
    }
    if let Some(success) = state.success {
        println!("{success}");
    }
    if let Some(navigation) = navigation {
        println!(
            "navigate to {}",
            controller.config().destination(navigation)
        );
    }
    debug!("flow settled");
    Ok(())
}
