//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once from the top-level flags. It owns the output
//! context, the stores, the HTTP client and the session read from local
//! storage, so command handlers never read ambient state themselves.

use std::time::Duration;

use anyhow::Result;

use crate::application::services::{auth, config_service};
use crate::domain::config::AgenticConfig;
use crate::domain::session::SessionContext;
use crate::infra::config::YamlConfigStore;
use crate::infra::http::HttpApi;
use crate::infra::local_store::JsonFileStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub output: OutputFlags,
    /// Backend override from `--api-url` or `AGENTIC_API_URL`.
    pub api_url: Option<String>,
    /// Skip interactive prompts (also set by the `CI` env var).
    pub yes: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    pub config_store: YamlConfigStore,
    pub config: AgenticConfig,
    pub local: JsonFileStore,
    pub api: HttpApi,
    /// Token and user as stored when the process started.
    pub session: SessionContext,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or local store cannot be read, or the
    /// HTTP client cannot be built.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let non_interactive = flags.yes || std::env::var("CI").is_ok();
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_service::load_config(&config_store)?;
        let api_url = config_service::resolve_api_url(&config, flags.api_url.as_deref());
        let api = HttpApi::new(&api_url, Duration::from_secs(config.api.timeout_secs))?;
        tracing::debug!(api_url, timeout_secs = config.api.timeout_secs, "backend configured");

        let local = JsonFileStore::new()?;
        let session = auth::load_session(&local)?;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store,
            config,
            local,
            api,
            session,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Execution timeout from config.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.api.timeout_secs)
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI or `--yes`), returns `default`
    /// immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
