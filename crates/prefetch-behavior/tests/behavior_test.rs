use chrono::{DateTime, Duration, TimeZone, Utc};
use prefetch_behavior::{purge_stale_visits, BehaviorTracker};
use prefetch_core::config::BehaviorConfig;
use prefetch_core::models::DeviceInfo;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap()
}

fn record_sequence(tracker: &BehaviorTracker, user: &str, paths: &[&str]) {
    for (i, path) in paths.iter().enumerate() {
        tracker.record_visit_at(user, path, None, base_time() + Duration::minutes(i as i64));
    }
}

#[test]
fn common_paths_example_scenario() {
    let tracker = BehaviorTracker::default();
    record_sequence(
        &tracker,
        "U",
        &["/events", "/events/1", "/events", "/dashboard", "/events"],
    );

    let top = tracker.common_paths("U", 2);
    assert_eq!(top, ["/events", "/dashboard"]);

    let freqs = tracker.path_frequencies("U");
    assert_eq!(freqs[0].path, "/events");
    assert_eq!(freqs[0].count, 3);
    assert_eq!(freqs[1].count, 1);
    assert_eq!(freqs[2].path, "/events/1");
}

#[test]
fn common_paths_for_unknown_user_is_empty() {
    let tracker = BehaviorTracker::default();
    assert!(tracker.common_paths("nobody", 5).is_empty());
    assert!(tracker.visits("nobody").is_empty());
    assert!(tracker.profile("nobody").is_none());
}

#[test]
fn empty_path_or_user_is_ignored() {
    let tracker = BehaviorTracker::default();
    assert!(!tracker.record_visit("u1", "", None));
    assert!(!tracker.record_visit("", "/events", None));
    assert_eq!(tracker.user_count(), 0);

    assert!(tracker.record_visit("u1", "/events", Some("https://google.com")));
    let visits = tracker.visits("u1");
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].referrer.as_deref(), Some("https://google.com"));
}

#[test]
fn profile_keeps_top_five_common_paths() {
    let tracker = BehaviorTracker::default();
    record_sequence(
        &tracker,
        "u1",
        &["/a", "/b", "/c", "/d", "/e", "/f", "/a", "/b"],
    );
    let profile = tracker.profile("u1").unwrap();
    assert_eq!(profile.common_paths.len(), 5);
    assert_eq!(&profile.common_paths[..2], ["/b", "/a"]);
    assert_eq!(profile.last_visit().unwrap().path, "/b");
}

#[test]
fn history_is_bounded_per_user() {
    let tracker = BehaviorTracker::new(BehaviorConfig {
        max_visits_per_user: 3,
        ..Default::default()
    });
    record_sequence(&tracker, "u1", &["/a", "/b", "/c", "/d", "/e"]);

    let paths: Vec<String> = tracker.visits("u1").into_iter().map(|v| v.path).collect();
    assert_eq!(paths, ["/c", "/d", "/e"]);
}

#[test]
fn ensure_profile_records_device_once() {
    let tracker = BehaviorTracker::default();
    let device = DeviceInfo {
        user_agent: "Mozilla/5.0".to_string(),
        connection: "4g".to_string(),
        ..Default::default()
    };
    tracker.ensure_profile("u1", device.clone());
    tracker.ensure_profile("u1", DeviceInfo::default());
    tracker.record_visit("u1", "/events", None);

    assert_eq!(tracker.profile("u1").unwrap().device, device);
}

#[test]
fn purge_removes_only_visits_older_than_a_day() {
    let tracker = BehaviorTracker::default();
    let now = base_time() + Duration::hours(30);

    tracker.record_visit_at("u1", "/old", None, now - Duration::hours(25));
    tracker.record_visit_at("u1", "/edge", None, now - Duration::hours(24));
    tracker.record_visit_at("u1", "/fresh", None, now - Duration::hours(2));
    tracker.record_visit_at("u2", "/ancient", None, now - Duration::days(3));

    let report = purge_stale_visits(&tracker, now);
    assert_eq!(report.visits_removed, 3);
    assert_eq!(report.empty_profiles, 1);

    let remaining: Vec<String> = tracker.visits("u1").into_iter().map(|v| v.path).collect();
    assert_eq!(remaining, ["/fresh"]);
    assert_eq!(tracker.common_paths("u1", 5), ["/fresh"]);
    assert!(tracker.has_profile("u2"));
}

#[test]
fn purge_with_unbounded_max_age_keeps_everything() {
    let tracker = BehaviorTracker::new(BehaviorConfig {
        max_visit_age_secs: u64::MAX,
        ..BehaviorConfig::default()
    });
    let now = base_time() + Duration::days(400);
    tracker.record_visit_at("u1", "/events", None, base_time());
    tracker.record_visit_at("u1", "/now", None, now);

    let report = purge_stale_visits(&tracker, now);
    assert_eq!(report.visits_removed, 0);
    assert_eq!(tracker.visits("u1").len(), 2);
}

#[test]
fn remove_and_clear() {
    let tracker = BehaviorTracker::default();
    tracker.record_visit("u1", "/events", None);
    tracker.record_visit("u2", "/events", None);

    assert!(tracker.remove_user("u1").is_some());
    assert_eq!(tracker.user_count(), 1);
    tracker.clear();
    assert_eq!(tracker.user_count(), 0);
}

#[test]
fn concurrent_recording_no_corruption() {
    use std::sync::Arc;
    use std::thread;

    let tracker = Arc::new(BehaviorTracker::default());
    let mut handles = vec![];

    for i in 0..4 {
        let t = Arc::clone(&tracker);
        handles.push(thread::spawn(move || {
            let user = format!("user{i}");
            for j in 0..100 {
                t.record_visit(&user, &format!("/events/{}", j % 10), None);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..4 {
        let user = format!("user{i}");
        assert_eq!(tracker.visits(&user).len(), 100);
        let freqs = tracker.path_frequencies(&user);
        assert_eq!(freqs.len(), 10);
        assert!(freqs.iter().all(|f| f.count == 10));
    }
}

#[test]
fn profile_round_trips_through_json() {
    let tracker = BehaviorTracker::default();
    tracker.record_visit("u1", "/events", None);
    let profile = tracker.profile("u1").unwrap();

    let json = serde_json::to_string(&profile).unwrap();
    let back: prefetch_behavior::BehaviorProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back.visits, profile.visits);
    assert_eq!(back.common_paths, profile.common_paths);
}
