//! End-to-end lifecycle tests for the session controller: parse, hold,
//! deliver-once, report, clear. Uses the recording launcher and recording
//! observers so every outbound locator and delivery is inspectable.

use std::sync::Arc;

use parking_lot::Mutex;
use taskgate::{
    RecordingLauncher, SessionController, TaskObserver, TaskOutcome, TaskRequest,
};
use url::Url;

/// Observer that appends a tag per delivery to a shared log, so tests can
/// assert both count and order across several observers.
struct TaggedObserver {
    tag: &'static str,
    log: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl TaskObserver for TaggedObserver {
    fn on_task_received(&self, request: &TaskRequest) {
        self.log.lock().push((self.tag, request.task_id.clone()));
    }
}

fn gate_url(query: &str) -> Url {
    Url::parse(&format!("https://partner.example/app/taskgate?{query}")).unwrap()
}

fn setup() -> (SessionController, Arc<RecordingLauncher>) {
    let launcher = RecordingLauncher::new();
    (SessionController::new(launcher.clone()), launcher)
}

fn query_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[test]
fn unmarked_link_is_ignored_and_state_untouched() {
    let (controller, _) = setup();
    assert!(controller.parse_incoming(&gate_url("task_id=t1&callback_url=blocker%3A%2F%2Fdone&session_id=s1")));

    let other = Url::parse("https://partner.example/promo?task_id=t2&callback_url=x%3A%2F%2Fy").unwrap();
    assert!(!controller.parse_incoming(&other));

    // Prior session survives the unrecognized link untouched.
    assert_eq!(controller.current_task_id().as_deref(), Some("t1"));
    assert_eq!(controller.current_session_id().as_deref(), Some("s1"));
}

#[test]
fn malformed_marked_link_is_rejected_without_state_change() {
    let (controller, _) = setup();
    assert!(!controller.parse_incoming(&gate_url("callback_url=blocker%3A%2F%2Fdone")));
    assert!(!controller.parse_incoming(&gate_url("task_id=t1")));
    assert!(!controller.has_active_session());
    assert_eq!(controller.current_task_id(), None);
    assert_eq!(controller.current_session_id(), None);
}

#[test]
fn well_formed_link_activates_session() {
    let (controller, _) = setup();
    assert!(controller.parse_incoming(&gate_url(
        "task_id=breathing&callback_url=blocker%3A%2F%2Fdone&session_id=s-42"
    )));
    assert!(controller.has_active_session());
    assert_eq!(controller.current_task_id().as_deref(), Some("breathing"));
    assert_eq!(controller.current_session_id().as_deref(), Some("s-42"));
}

#[test]
fn omitted_session_id_gets_distinct_generated_ids() {
    let (controller, _) = setup();

    assert!(controller.parse_incoming(&gate_url("task_id=t&callback_url=blocker%3A%2F%2Fdone")));
    let first = controller.current_session_id().expect("generated id");
    assert!(!first.is_empty());

    assert!(controller.parse_incoming(&gate_url("task_id=t&callback_url=blocker%3A%2F%2Fdone")));
    let second = controller.current_session_id().expect("generated id");
    assert!(!second.is_empty());

    assert_ne!(first, second);
}

#[test]
fn pending_task_is_delivered_exactly_once_in_order() {
    let (controller, _) = setup();
    let log = Arc::new(Mutex::new(Vec::new()));

    controller.add_observer(Arc::new(TaggedObserver { tag: "first", log: log.clone() }));
    controller.add_observer(Arc::new(TaggedObserver { tag: "second", log: log.clone() }));
    let callback_log = log.clone();
    controller.set_task_callback(move |request| {
        callback_log.lock().push(("callback", request.task_id.clone()));
    });

    assert!(controller.parse_incoming(&gate_url(
        "task_id=breathing&callback_url=blocker%3A%2F%2Fdone&session_id=s-1"
    )));
    controller.signal_ready();

    assert_eq!(
        *log.lock(),
        vec![
            ("first", "breathing".to_string()),
            ("second", "breathing".to_string()),
            ("callback", "breathing".to_string()),
        ]
    );

    // Session stays active after delivery; nothing is redelivered.
    assert!(controller.has_active_session());
    controller.signal_ready();
    assert_eq!(log.lock().len(), 3);
}

#[test]
fn replacing_the_callback_does_not_append() {
    let (controller, _) = setup();
    let log = Arc::new(Mutex::new(Vec::new()));

    let stale = log.clone();
    controller.set_task_callback(move |_| stale.lock().push("stale"));
    let live = log.clone();
    controller.set_task_callback(move |_| live.lock().push("live"));

    assert!(controller.parse_incoming(&gate_url(
        "task_id=t&callback_url=blocker%3A%2F%2Fdone&session_id=s"
    )));
    controller.signal_ready();

    assert_eq!(*log.lock(), vec!["live"]);
}

#[test]
fn ready_signal_notifies_origin_endpoint() {
    let (controller, launcher) = setup();
    controller.configure("partner-9");
    assert!(controller.parse_incoming(&gate_url(
        "task_id=t&callback_url=blocker%3A%2F%2Fdone&session_id=s-1"
    )));
    controller.signal_ready();

    let opened = launcher.take_opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].scheme(), "focusapp");
    assert_eq!(opened[0].host_str(), Some("ready"));
    assert_eq!(
        query_pairs(&opened[0]),
        vec![
            ("session_id".to_string(), "s-1".to_string()),
            ("provider_id".to_string(), "partner-9".to_string()),
        ]
    );
}

#[test]
fn completion_dispatches_callback_and_clears_session() {
    let (controller, launcher) = setup();
    controller.configure("partner-9");
    assert!(controller.parse_incoming(&gate_url(
        "task_id=breathing&callback_url=blocker%3A%2F%2Fdone%3Ffrom%3Dgate&session_id=s-1"
    )));
    controller.report_completion(TaskOutcome::Opened);

    let opened = launcher.take_opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].scheme(), "blocker");
    assert_eq!(
        query_pairs(&opened[0]),
        vec![
            ("from".to_string(), "gate".to_string()),
            ("status".to_string(), "open".to_string()),
            ("provider_id".to_string(), "partner-9".to_string()),
            ("session_id".to_string(), "s-1".to_string()),
            ("task_id".to_string(), "breathing".to_string()),
        ]
    );

    assert!(!controller.has_active_session());
    assert_eq!(controller.current_task_id(), None);
    assert_eq!(controller.current_session_id(), None);
}

#[test]
fn cancel_task_matches_cancelled_completion() {
    let run = |cancel_via_alias: bool| {
        let (controller, launcher) = setup();
        controller.configure("partner-9");
        assert!(controller.parse_incoming(&gate_url(
            "task_id=t&callback_url=blocker%3A%2F%2Fdone&session_id=s-1"
        )));
        if cancel_via_alias {
            controller.cancel_task();
        } else {
            controller.report_completion(TaskOutcome::Cancelled);
        }
        let opened = launcher.take_opened();
        assert!(!controller.has_active_session());
        opened
    };

    let via_alias = run(true);
    let via_report = run(false);
    assert_eq!(via_alias, via_report);
    assert_eq!(via_alias.len(), 1);
    assert!(via_alias[0].query().unwrap_or("").contains("status=cancelled"));
}

#[test]
fn completion_without_parse_dispatches_nothing() {
    let (controller, launcher) = setup();
    controller.configure("partner-9");
    controller.report_completion(TaskOutcome::Opened);
    assert!(launcher.take_opened().is_empty());
    assert!(!controller.has_active_session());
}

#[test]
fn overwriting_parse_discards_the_first_pending_task() {
    let (controller, _) = setup();
    let log = Arc::new(Mutex::new(Vec::new()));
    controller.add_observer(Arc::new(TaggedObserver { tag: "obs", log: log.clone() }));

    assert!(controller.parse_incoming(&gate_url(
        "task_id=first&callback_url=blocker%3A%2F%2Fdone&session_id=s-1"
    )));
    assert!(controller.parse_incoming(&gate_url(
        "task_id=second&callback_url=blocker%3A%2F%2Fdone&session_id=s-2"
    )));

    controller.signal_ready();
    controller.signal_ready();

    // Only the replacement task is ever delivered.
    assert_eq!(*log.lock(), vec![("obs", "second".to_string())]);
    assert_eq!(controller.current_session_id().as_deref(), Some("s-2"));
}

#[test]
fn delivered_request_carries_extra_params() {
    let (controller, _) = setup();
    let seen = Arc::new(Mutex::new(None));

    let sink = seen.clone();
    controller.set_task_callback(move |request| {
        *sink.lock() = Some(request.clone());
    });

    assert!(controller.parse_incoming(&gate_url(
        "task_id=t&callback_url=blocker%3A%2F%2Fdone&app_name=Instagram&theme=dark&lang=en"
    )));
    controller.signal_ready();

    let request = seen.lock().clone().expect("task delivered");
    assert_eq!(request.app_name.as_deref(), Some("Instagram"));
    assert_eq!(request.extra.get("theme").map(String::as_str), Some("dark"));
    assert_eq!(request.extra.get("lang").map(String::as_str), Some("en"));
    assert!(!request.extra.contains_key("task_id"));
    assert!(!request.extra.contains_key("callback_url"));
}
