use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use apogee_core::error::{ApogeeError, Result};
use apogee_core::{ConnectionManager, ConnectionState, Link, SessionConfig, StatusObserver};

#[derive(Clone, Default)]
struct SharedLink {
    sent: Rc<RefCell<Vec<String>>>,
    broken: bool,
}

impl Link for SharedLink {
    fn send_text(&mut self, payload: &str) -> Result<()> {
        if self.broken {
            return Err(ApogeeError::Link("writer gone".into()));
        }
        self.sent.borrow_mut().push(payload.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct StatusLog(Vec<ConnectionState>);

impl StatusObserver for StatusLog {
    fn connection_changed(&mut self, state: ConnectionState) {
        self.0.push(state);
    }
}

fn manager() -> ConnectionManager<SharedLink> {
    ConnectionManager::new(&SessionConfig::for_host("rocket.local"))
}

#[test]
fn first_connect_dials_the_gateway_once() {
    let mut cm = manager();
    assert_eq!(cm.gateway(), "ws://rocket.local/ws");
    assert_eq!(cm.state(), ConnectionState::Disconnected);
    assert_eq!(cm.connect(), Some("ws://rocket.local/ws"));
    assert!(cm.is_dialing());
    assert_eq!(cm.connect(), None, "dial already in flight");

    let mut log = StatusLog::default();
    cm.on_open(SharedLink::default(), &mut log);
    assert_eq!(cm.state(), ConnectionState::Connected);
    assert_eq!(cm.connect(), None, "socket already live");
    assert_eq!(log.0, vec![ConnectionState::Connected]);
}

#[test]
fn reconnect_fires_exactly_after_fixed_delay() {
    let mut cm = manager();
    let mut log = StatusLog::default();
    cm.connect();
    cm.on_open(SharedLink::default(), &mut log);

    let closed_at = Instant::now();
    cm.on_close(closed_at, &mut log);
    assert_eq!(cm.state(), ConnectionState::Disconnected);
    assert_eq!(
        log.0,
        vec![ConnectionState::Connected, ConnectionState::Disconnected]
    );

    let deadline = closed_at + Duration::from_millis(2_000);
    assert_eq!(cm.reconnect_deadline(), Some(deadline));

    assert_eq!(cm.poll_reconnect(closed_at), None);
    assert_eq!(cm.poll_reconnect(deadline - Duration::from_millis(1)), None);
    assert_eq!(cm.poll_reconnect(deadline), Some("ws://rocket.local/ws"));

    // One-shot: consumed by the attempt.
    assert_eq!(cm.reconnect_deadline(), None);
    assert_eq!(cm.poll_reconnect(deadline + Duration::from_secs(10)), None);
}

#[test]
fn failed_dial_schedules_another_attempt_with_the_same_delay() {
    let mut cm = manager();
    let mut log = StatusLog::default();
    let t0 = Instant::now();

    cm.connect();
    cm.on_close(t0, &mut log);
    let first = cm.reconnect_deadline().unwrap();
    assert_eq!(first - t0, Duration::from_millis(2_000));

    assert!(cm.poll_reconnect(first).is_some());
    let t1 = first + Duration::from_millis(300);
    cm.on_close(t1, &mut log);
    assert_eq!(cm.reconnect_deadline(), Some(t1 + Duration::from_millis(2_000)));
}

#[test]
fn error_then_close_does_not_push_the_deadline_out() {
    let mut cm = manager();
    let mut log = StatusLog::default();
    let t0 = Instant::now();
    cm.connect();
    cm.on_open(SharedLink::default(), &mut log);

    cm.on_close(t0, &mut log);
    cm.on_close(t0 + Duration::from_millis(50), &mut log);
    assert_eq!(
        cm.reconnect_deadline(),
        Some(t0 + Duration::from_millis(2_000))
    );
}

#[test]
fn manual_connect_cancels_pending_reconnect() {
    let mut cm = manager();
    let mut log = StatusLog::default();
    let t0 = Instant::now();
    cm.connect();
    cm.on_close(t0, &mut log);
    assert!(cm.reconnect_deadline().is_some());

    assert!(cm.connect().is_some());
    assert_eq!(cm.reconnect_deadline(), None);
}

#[test]
fn custom_delay_is_honoured() {
    let cfg = SessionConfig {
        reconnect_delay: Duration::from_millis(750),
        ..SessionConfig::for_host("10.0.0.2:8080")
    };
    let mut cm: ConnectionManager<SharedLink> = ConnectionManager::new(&cfg);
    let mut log = StatusLog::default();
    let t0 = Instant::now();
    assert_eq!(cm.connect(), Some("ws://10.0.0.2:8080/ws"));
    cm.on_close(t0, &mut log);
    assert_eq!(cm.reconnect_deadline(), Some(t0 + Duration::from_millis(750)));
}

#[test]
fn send_only_goes_out_while_connected() {
    let mut cm = manager();
    let mut log = StatusLog::default();
    let link = SharedLink::default();
    let sent = link.sent.clone();

    assert!(!cm.send("true"), "dropped while disconnected");

    cm.connect();
    cm.on_open(link, &mut log);
    assert!(cm.send("true"));

    cm.on_close(Instant::now(), &mut log);
    assert!(!cm.send("false"));

    assert_eq!(*sent.borrow(), vec!["true".to_string()]);
}

#[test]
fn link_failure_is_reported_as_not_sent() {
    let mut cm = manager();
    let mut log = StatusLog::default();
    cm.connect();
    cm.on_open(
        SharedLink {
            broken: true,
            ..SharedLink::default()
        },
        &mut log,
    );
    assert!(!cm.send("true"));
    assert_eq!(cm.state(), ConnectionState::Connected);
}
