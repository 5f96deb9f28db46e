//! Inbound deep-link parsing into a task request.
//!
//! An inbound locator is recognized by the marker substring in its path.
//! Recognized links must carry `task_id` and `callback_url`; `session_id`
//! and `app_name` are optional, and every other query pair is preserved
//! verbatim in [`TaskRequest::extra`].

use std::collections::BTreeMap;

use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;
use url::Url;

/// Path substring that marks a deep link as a taskgate redirect.
pub const MARKER: &str = "taskgate";

/// Query keys consumed by the parser and excluded from `extra`.
const RESERVED_KEYS: [&str; 4] = ["task_id", "callback_url", "session_id", "app_name"];

/// Length of a generated session identifier.
const GENERATED_SESSION_ID_LEN: usize = 16;

/// A parsed redirect request, released to observers once the host is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    /// Opaque identifier of the micro-task to show.
    pub task_id: String,
    /// Identifier of this redirect instance; generated when the origin
    /// omitted one.
    pub session_id: String,
    /// Destination the completion signal is reported to.
    pub callback_url: Url,
    /// Human-readable label of the app the user was blocked from.
    pub app_name: Option<String>,
    /// Query pairs not otherwise recognized, key-ordered.
    pub extra: BTreeMap<String, String>,
}

/// Why an inbound locator was not accepted as a task request.
#[derive(Debug, Error)]
pub enum RequestRejection {
    /// The path lacks the marker substring; the link is not for us.
    #[error("path does not contain the taskgate marker")]
    NoMarker,

    /// Marker present but a required query field is missing or empty.
    #[error("recognized link is missing required field {0}")]
    MissingField(&'static str),

    /// Marker present but the callback target does not parse as a URL.
    #[error("recognized link has an unparseable callback_url: {0}")]
    InvalidCallback(#[from] url::ParseError),
}

impl TaskRequest {
    /// Parses an inbound locator into a task request.
    ///
    /// Only the path is consulted for the marker; a `taskgate` substring in
    /// the host or query does not make a link recognized. Required fields
    /// that are present but empty count as missing.
    pub fn from_url(url: &Url) -> Result<Self, RequestRejection> {
        if !url.path().contains(MARKER) {
            return Err(RequestRejection::NoMarker);
        }

        let mut task_id = None;
        let mut callback_raw = None;
        let mut session_id = None;
        let mut app_name = None;
        let mut extra = BTreeMap::new();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "task_id" => task_id = non_empty(value.into_owned()),
                "callback_url" => callback_raw = non_empty(value.into_owned()),
                "session_id" => session_id = non_empty(value.into_owned()),
                "app_name" => app_name = non_empty(value.into_owned()),
                _ => {
                    extra.insert(key.into_owned(), value.into_owned());
                }
            }
        }

        let task_id = task_id.ok_or(RequestRejection::MissingField("task_id"))?;
        let callback_raw = callback_raw.ok_or(RequestRejection::MissingField("callback_url"))?;
        let callback_url = Url::parse(&callback_raw)?;

        Ok(Self {
            task_id,
            session_id: session_id.unwrap_or_else(generate_session_id),
            callback_url,
            app_name,
            extra,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Produces a random session identifier for inbound links that omit one.
///
/// Alphanumeric from the thread RNG; unpredictable and collision-free for
/// the lifetime of a process, not a cryptographic token.
pub(crate) fn generate_session_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SESSION_ID_LEN)
        .map(char::from)
        .collect()
}
