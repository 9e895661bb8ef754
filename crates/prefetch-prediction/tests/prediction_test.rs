use chrono::{DateTime, Duration, TimeZone, Utc};
use prefetch_behavior::BehaviorTracker;
use prefetch_core::config::PredictionConfig;
use prefetch_core::models::{DayType, HeuristicKind, HeuristicRule};
use prefetch_prediction::{PredictionSource, RoutePredictor, TemporalSignals, TransitionTable};

const TUESDAY: u32 = 2;
const WEDNESDAY: u32 = 3;
const SATURDAY: u32 = 6;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 2, 8, 0, 0).unwrap()
}

fn setup(paths_by_user: &[(&str, &[&str])]) -> (BehaviorTracker, RoutePredictor) {
    let tracker = BehaviorTracker::default();
    for (user, paths) in paths_by_user {
        for (i, path) in paths.iter().enumerate() {
            tracker.record_visit_at(user, path, None, base_time() + Duration::minutes(i as i64));
        }
    }
    let predictor = RoutePredictor::new(tracker.clone(), PredictionConfig::default());
    (tracker, predictor)
}

/// 03:00 on a Tuesday: no default heuristic rule fires.
fn quiet_hour() -> TemporalSignals {
    TemporalSignals::new(3, TUESDAY)
}

#[test]
fn predicts_most_frequent_transition() {
    let (_, predictor) = setup(&[(
        "U",
        &["/events", "/dashboard", "/events", "/dashboard", "/events", "/profile"],
    )]);

    let table = predictor.setup("U");
    assert_eq!(table.count("/events", "/dashboard"), 2);
    assert_eq!(table.count("/events", "/profile"), 1);

    assert_eq!(predictor.predict_at("U", "/events", 1, &quiet_hour()), ["/dashboard"]);
    assert_eq!(
        predictor.predict_at("U", "/events", 2, &quiet_hour()),
        ["/dashboard", "/profile"]
    );
}

#[test]
fn prediction_is_deterministic() {
    let (_, predictor) = setup(&[(
        "U",
        &["/events", "/b", "/events", "/a", "/events", "/c", "/events"],
    )]);
    let first = predictor.predict_at("U", "/events", 3, &quiet_hour());
    for _ in 0..10 {
        predictor.setup("U");
        assert_eq!(predictor.predict_at("U", "/events", 3, &quiet_hour()), first);
    }
    // Equal counts resolve lexicographically.
    assert_eq!(first, ["/a", "/b", "/c"]);
}

#[test]
fn falls_back_to_behavioral_rules_without_transitions() {
    let (_, predictor) = setup(&[("U", &["/profile"])]);
    let work_hours = TemporalSignals::new(10, WEDNESDAY);

    let candidates = predictor.predict_candidates("U", "/profile", 3, &work_hours);
    let routes: Vec<&str> = candidates.iter().map(|c| c.route.as_str()).collect();
    assert_eq!(routes, ["/events", "/dashboard"]);
    assert!(candidates.iter().all(|c| c.source == PredictionSource::Behavioral));
}

#[test]
fn calendar_rules_apply_without_a_profile() {
    let (_, predictor) = setup(&[]);
    let saturday_evening = TemporalSignals::new(20, SATURDAY);

    let candidates = predictor.predict_candidates("stranger", "/", 3, &saturday_evening);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].route, "/events");
    assert_eq!(candidates[0].source, PredictionSource::Calendar);
}

#[test]
fn behavioral_fallback_uses_common_paths_outside_rule_hours() {
    let (_, predictor) = setup(&[(
        "U",
        &["/gallery", "/gallery", "/news", "/gallery", "/news", "/about"],
    )]);

    // From /about there are no recorded transitions.
    let routes = predictor.predict_at("U", "/about", 3, &quiet_hour());
    assert_eq!(routes, ["/gallery", "/news"]);
}

#[test]
fn fills_remaining_slots_from_lower_tiers_without_duplicates() {
    let (_, predictor) = setup(&[("U", &["/events", "/dashboard", "/events"])]);
    let lunch = TemporalSignals::new(13, WEDNESDAY);

    let candidates = predictor.predict_candidates("U", "/events", 3, &lunch);
    let routes: Vec<&str> = candidates.iter().map(|c| c.route.as_str()).collect();
    // Transition /events→/dashboard first; behavioral adds nothing new except
    // /events (the current path, excluded); calendar repeats; common paths exhausted.
    assert_eq!(routes, ["/dashboard"]);
    assert_eq!(candidates[0].source, PredictionSource::Transition);
    assert_eq!(candidates[0].weight, 1);
}

#[test]
fn never_suggests_current_path_even_for_self_transitions() {
    let (_, predictor) = setup(&[("U", &["/events", "/events", "/events", "/profile"])]);
    let routes = predictor.predict_at("U", "/events", 2, &quiet_hour());
    assert!(!routes.contains(&"/events".to_string()));
    assert_eq!(routes[0], "/profile");
}

#[test]
fn zero_requested_predictions_is_empty() {
    let (_, predictor) = setup(&[("U", &["/events", "/dashboard"])]);
    assert!(predictor.predict_at("U", "/events", 0, &quiet_hour()).is_empty());
}

#[test]
fn unbounded_request_returns_every_candidate() {
    let (_, predictor) = setup(&[(
        "U",
        &["/events", "/dashboard", "/events", "/dashboard", "/events", "/profile", "/gallery"],
    )]);

    let all = predictor.predict_at("U", "/events", usize::MAX, &quiet_hour());
    assert_eq!(all, ["/dashboard", "/profile", "/gallery"]);
    assert_eq!(predictor.predict_at("U", "/events", 10, &quiet_hour()), all);
}

#[test]
fn unknown_user_at_quiet_hour_predicts_nothing() {
    let (_, predictor) = setup(&[]);
    assert!(predictor.predict_at("ghost", "/events", 3, &quiet_hour()).is_empty());
}

#[test]
fn cached_table_is_reused_until_setup() {
    let (tracker, predictor) = setup(&[("U", &["/events", "/dashboard"])]);
    assert_eq!(predictor.predict_at("U", "/events", 1, &quiet_hour()), ["/dashboard"]);

    // New visits are not visible until the table is rebuilt.
    let later = base_time() + Duration::hours(1);
    tracker.record_visit_at("U", "/events", None, later);
    tracker.record_visit_at("U", "/profile", None, later + Duration::minutes(1));
    tracker.record_visit_at("U", "/events", None, later + Duration::minutes(2));
    tracker.record_visit_at("U", "/profile", None, later + Duration::minutes(3));
    assert_eq!(predictor.predict_at("U", "/events", 1, &quiet_hour()), ["/dashboard"]);
    assert!(predictor.cache().hits() >= 1);

    predictor.setup("U");
    assert_eq!(predictor.predict_at("U", "/events", 1, &quiet_hour()), ["/profile"]);

    predictor.invalidate("U");
    predictor.invalidate_all();
}

#[test]
fn custom_heuristic_table_is_data_driven() {
    let tracker = BehaviorTracker::default();
    tracker.record_visit("U", "/", None);
    let config = PredictionConfig {
        heuristics: vec![
            HeuristicRule::new(HeuristicKind::Behavioral, 6..=8, DayType::Weekday, &["/news"]),
            HeuristicRule::new(HeuristicKind::Calendar, 6..=8, DayType::Any, &["/gallery"]),
        ],
        ..Default::default()
    };
    let predictor = RoutePredictor::new(tracker, config);

    let morning = TemporalSignals::new(7, WEDNESDAY);
    assert_eq!(predictor.predict_at("U", "/", 3, &morning), ["/news", "/gallery"]);
}

#[test]
fn transition_table_from_visits_counts_pairs() {
    let tracker = BehaviorTracker::default();
    for (i, p) in ["/a", "/b", "/a", "/b", "/c"].iter().enumerate() {
        tracker.record_visit_at("U", p, None, base_time() + Duration::minutes(i as i64));
    }
    let table = TransitionTable::from_visits(&tracker.visits("U"));
    assert_eq!(table.count("/a", "/b"), 2);
    assert_eq!(table.count("/b", "/a"), 1);
    assert_eq!(table.count("/b", "/c"), 1);
    assert_eq!(table.total(), 4);
    assert!(table.has_transitions_from("/b"));
    assert!(!table.has_transitions_from("/c"));
}

#[test]
fn temporal_signals_from_datetime() {
    // 2026-06-06 is a Saturday.
    let at = Utc.with_ymd_and_hms(2026, 6, 6, 21, 15, 0).unwrap();
    let signals = TemporalSignals::at(&at);
    assert_eq!(signals.hour_of_day, 21);
    assert_eq!(signals.day_of_week, SATURDAY);
    assert_eq!(signals.day_type(), DayType::Weekend);
}
