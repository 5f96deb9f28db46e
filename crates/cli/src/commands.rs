//! Command implementations: thin drivers over the taskgate session core.
//!
//! Outbound signals go through a launcher that prints instead of opening, so
//! an integrator can eyeball the exact locators their registration will
//! receive from a real flow.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use taskgate::{LinkLauncher, SessionController, TaskOutcome, TaskRequest};
use url::Url;

use crate::cli::Commands;

/// Launcher that prints each outbound locator to stdout.
struct PrintLauncher;

impl LinkLauncher for PrintLauncher {
    fn open(&self, url: &Url) -> taskgate::Result<()> {
        println!("outbound> {url}");
        Ok(())
    }
}

pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Parse { url } => parse(&url),
        Commands::Flow { url, outcome, provider_id } => flow(&url, &outcome, provider_id),
    }
}

fn parse(raw: &str) -> Result<()> {
    let url = Url::parse(raw).context("inbound link is not a valid URL")?;

    let payload = match TaskRequest::from_url(&url) {
        Ok(request) => json!({
            "handled": true,
            "task_id": request.task_id,
            "session_id": request.session_id,
            "callback_url": request.callback_url.as_str(),
            "app_name": request.app_name,
            "extra": request.extra,
        }),
        Err(rejection) => json!({
            "handled": false,
            "reason": rejection.to_string(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn flow(raw: &str, outcome: &str, provider_id: Option<String>) -> Result<()> {
    let url = Url::parse(raw).context("inbound link is not a valid URL")?;
    let outcome = TaskOutcome::from_str(outcome).map_err(|reason| anyhow!(reason))?;

    let controller = SessionController::new(Arc::new(PrintLauncher));
    if let Some(provider_id) = provider_id {
        controller.configure(provider_id);
    }
    controller.set_task_callback(|request| {
        println!(
            "delivered> task {} (session {})",
            request.task_id, request.session_id
        );
    });

    if !controller.parse_incoming(&url) {
        return Err(anyhow!("link not handled: not a well-formed taskgate redirect"));
    }

    controller.signal_ready();
    controller.report_completion(outcome);
    Ok(())
}
