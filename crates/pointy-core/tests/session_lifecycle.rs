use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use pointy_common::AppConfig;
use pointy_core::{FeedError, PageKind, PageSession, PageView, ViewRequest};
use pointy_rt::{Clock, ManualClock, RuntimeClock, SimulatorState};

fn seeded_config(seed: u64) -> Arc<AppConfig> {
    let mut config = AppConfig::default();
    config.simulation.random_seed = Some(seed);
    Arc::new(config)
}

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 11, 0, 0).unwrap()
}

#[tokio::test(start_paused = true)]
async fn employee_feed_ticks_every_three_seconds() {
    let clock = Arc::new(RuntimeClock::starting_at(start()));
    let mut session = PageSession::open(PageKind::Presence, seeded_config(7), clock).unwrap();
    session.start().unwrap();
    assert_eq!(session.state(), SimulatorState::Running);

    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(session.summary().employee_generation, 0);

    tokio::time::sleep(Duration::from_millis(6_200)).await;
    assert_eq!(session.summary().employee_generation, 3);

    let ticks = session.stop().await;
    assert_eq!(ticks.employee_ticks, 3);
    assert_eq!(session.state(), SimulatorState::Stopped);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(session.summary().employee_generation, 3);
}

#[tokio::test(start_paused = true)]
async fn alert_list_is_capped_at_retention() {
    let mut config = AppConfig::default();
    config.simulation.random_seed = Some(11);
    config.simulation.alert_probability = 1.0;
    let clock = Arc::new(RuntimeClock::starting_at(start()));
    let mut session = PageSession::open(PageKind::Alerts, Arc::new(config), clock).unwrap();
    session.start().unwrap();

    tokio::time::sleep(Duration::from_millis(15_100)).await;
    assert_eq!(session.alerts().len(), 6);

    tokio::time::sleep(Duration::from_secs(15 * 10)).await;
    let alerts = session.alerts();
    assert_eq!(alerts.len(), 10);
    assert!(alerts.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
    session.stop().await;
}

#[test]
fn replay_interleaves_alert_ticks() {
    let session =
        PageSession::open_manual(PageKind::Dashboard, seeded_config(5), ManualClock::new(start()))
            .unwrap();
    let ticks = session.replay(10).unwrap();
    assert_eq!(ticks.employee_ticks, 10);
    assert_eq!(ticks.alert_ticks, 2);
    assert_eq!(session.summary().employee_generation, 10);
}

#[test]
fn replay_moves_the_session_clock() {
    let clock = ManualClock::new(start());
    let session =
        PageSession::open_manual(PageKind::Presence, seeded_config(3), clock.clone()).unwrap();
    session.replay(20).unwrap();

    assert_eq!(clock.now(), start() + chrono::Duration::seconds(60));
    let newest = session
        .employees()
        .iter()
        .map(|employee| employee.last_detected)
        .max()
        .unwrap();
    assert!(newest > start());
}

#[test]
fn replay_requires_a_manual_session() {
    let session = PageSession::open(
        PageKind::Presence,
        seeded_config(3),
        Arc::new(ManualClock::new(start())),
    )
    .unwrap();
    assert!(matches!(session.replay(1), Err(FeedError::NotReplayable(_))));
}

#[test]
fn same_seed_same_snapshot() {
    let a = PageSession::open(
        PageKind::Employees,
        seeded_config(21),
        Arc::new(ManualClock::new(start())),
    )
    .unwrap();
    let b = PageSession::open(
        PageKind::Employees,
        seeded_config(21),
        Arc::new(ManualClock::new(start())),
    )
    .unwrap();
    assert_eq!(a.employees(), b.employees());
}

#[test]
fn attendance_is_memoised_on_roster_generation() {
    let mut session =
        PageSession::open_manual(PageKind::Attendance, seeded_config(9), ManualClock::new(start()))
            .unwrap();
    let first = session.attendance(7);
    assert_eq!(first.len(), 100 * 7);
    let again = session.attendance(7);
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(session.attendance_refreshes(), 1);

    session.attendance(3);
    assert_eq!(session.attendance_refreshes(), 2);

    session.replay(1).unwrap();
    let after_tick = session.attendance(3);
    assert_eq!(session.attendance_refreshes(), 3);
    assert_eq!(after_tick.len(), 100 * 3);
}

#[test]
fn resolving_and_dismissing_alert_three() {
    let session = PageSession::open(
        PageKind::Alerts,
        seeded_config(1),
        Arc::new(ManualClock::new(start())),
    )
    .unwrap();
    assert!(session.resolve_alert("3"));
    let alerts = session.alerts();
    assert_eq!(alerts.len(), 5);
    assert!(alerts.iter().find(|a| a.id == "3").unwrap().resolved);
    assert_eq!(alerts.iter().filter(|a| a.resolved).count(), 2);

    assert!(session.dismiss_alert("3"));
    assert_eq!(session.alerts().len(), 4);
    assert!(!session.resolve_alert("3"));
}

#[test]
fn every_page_renders() {
    let clock = Arc::new(ManualClock::new(start()));
    for kind in [
        PageKind::Dashboard,
        PageKind::Presence,
        PageKind::Attendance,
        PageKind::Alerts,
        PageKind::Analytics,
        PageKind::Employees,
        PageKind::Locations,
        PageKind::Payroll,
        PageKind::Security,
    ] {
        let mut session = PageSession::open(kind, seeded_config(13), clock.clone()).unwrap();
        let view = session.view(&ViewRequest::default());
        assert_eq!(view.kind(), kind);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["page"], kind.as_ref());
    }
}

#[test]
fn dashboard_view_truncates_presence_table() {
    let mut session = PageSession::open(
        PageKind::Dashboard,
        seeded_config(17),
        Arc::new(ManualClock::new(start())),
    )
    .unwrap();
    match session.view(&ViewRequest::default()) {
        PageView::Dashboard(view) => {
            assert_eq!(view.presence.showing, 20);
            assert_eq!(view.presence.total, 250);
            assert_eq!(view.buildings.len(), 4);
            assert_eq!(view.daily.len(), 14);
            assert_eq!(view.hourly.len(), 15);
            assert_eq!(view.alerts.unread, 4);
            assert_eq!(view.stats.checked_in_today + view.stats.absent, 250);
        }
        other => panic!("unexpected view {:?}", other.kind()),
    }
}
