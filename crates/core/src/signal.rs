//! Construction of outbound locators for the redirect contract.

use url::Url;

use crate::outcome::TaskOutcome;

/// Fixed destination of the readiness notification.
pub const READY_ENDPOINT: &str = "focusapp://ready";

/// Builds the readiness signal sent back to the origin once the host UI is
/// loaded: `focusapp://ready?session_id=…&provider_id=…`.
pub fn ready_url(session_id: &str, provider_id: Option<&str>) -> Url {
    let mut url = Url::parse(READY_ENDPOINT).expect("static readiness endpoint parses");
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("session_id", session_id);
        if let Some(provider_id) = provider_id {
            pairs.append_pair("provider_id", provider_id);
        }
    }
    url
}

/// Builds the completion signal: the stored callback target with `status`,
/// `provider_id`, `session_id` and `task_id` appended to its existing query.
///
/// Pre-existing query pairs on the callback target are preserved untouched;
/// the optional fields are appended only when set.
pub fn completion_url(
    callback: &Url,
    outcome: TaskOutcome,
    provider_id: Option<&str>,
    session_id: Option<&str>,
    task_id: Option<&str>,
) -> Url {
    let mut url = callback.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("status", outcome.as_wire_str());
        if let Some(provider_id) = provider_id {
            pairs.append_pair("provider_id", provider_id);
        }
        if let Some(session_id) = session_id {
            pairs.append_pair("session_id", session_id);
        }
        if let Some(task_id) = task_id {
            pairs.append_pair("task_id", task_id);
        }
    }
    url
}
