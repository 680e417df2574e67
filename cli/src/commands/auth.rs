//! `agentic login`, `agentic logout` and `agentic whoami`.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::app::AppContext;
use crate::application::services::auth::{self, DEMO_EMAIL, DEMO_PASSWORD};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    #[arg(long, env = "AGENTIC_EMAIL")]
    pub email: Option<String>,

    /// Prompted for when omitted
    #[arg(long, env = "AGENTIC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Sign in with the demo account (ignores --email and --password)
    #[arg(long)]
    pub demo: bool,
}

/// Run the login command.
///
/// # Errors
///
/// Returns an error if credentials are missing in non-interactive mode, or
/// the backend rejects them.
pub async fn login(app: &AppContext, args: LoginArgs) -> Result<ExitCode> {
    let (email, password) = if args.demo {
        (DEMO_EMAIL.to_string(), DEMO_PASSWORD.to_string())
    } else {
        credentials(app, args)?
    };

    let user = auth::login(&app.api, &app.local, &email, &password).await?;
    app.renderer().done(
        &format!("Logged in as {}", user.email),
        json!({ "user": user }),
    )?;
    Ok(ExitCode::SUCCESS)
}

fn credentials(app: &AppContext, args: LoginArgs) -> Result<(String, String)> {
    let interactive = !app.non_interactive && app.output.is_tty;
    let email = match args.email {
        Some(email) => email,
        None if interactive => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .context("cannot read email")?,
        None => anyhow::bail!("Email is required. Use --email or --demo."),
    };
    let password = match args.password {
        Some(password) => password,
        None if interactive => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .context("cannot read password")?,
        None => anyhow::bail!("Password is required. Use --password or AGENTIC_PASSWORD."),
    };
    Ok((email.trim().to_string(), password))
}

/// Run the logout command.
///
/// # Errors
///
/// Returns an error if local data cannot be removed.
pub fn logout(app: &AppContext) -> Result<ExitCode> {
    auth::logout(&app.local)?;
    app.renderer().done("Logged out", json!({}))?;
    Ok(ExitCode::SUCCESS)
}

/// Run the whoami command.
///
/// # Errors
///
/// Returns an error when no profile is stored.
pub fn whoami(app: &AppContext) -> Result<ExitCode> {
    let user = app.session.require_user()?;
    app.renderer().render_user(user)?;
    Ok(ExitCode::SUCCESS)
}
