//! Data-driven time-of-day / day-of-week route heuristics.

use serde::{Deserialize, Serialize};

/// Which days a heuristic rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
    Any,
}

impl DayType {
    /// Classify an ISO weekday (Mon=1 .. Sun=7).
    pub fn of_iso_weekday(day: u32) -> Self {
        if day >= 6 {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }

    pub fn admits(self, day: u32) -> bool {
        match self {
            DayType::Any => true,
            other => other == DayType::of_iso_weekday(day),
        }
    }
}

/// Which fallback tier a rule belongs to.
///
/// Behavioral rules only fire for users that have a behavior profile;
/// calendar rules fire for everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    Behavioral,
    Calendar,
}

/// One row of the heuristic table: during `start_hour..=end_hour` on
/// `day_type` days, suggest `routes` in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicRule {
    pub kind: HeuristicKind,
    pub start_hour: u32,
    pub end_hour: u32,
    pub day_type: DayType,
    pub routes: Vec<String>,
}

impl HeuristicRule {
    pub fn new(
        kind: HeuristicKind,
        hours: std::ops::RangeInclusive<u32>,
        day_type: DayType,
        routes: &[&str],
    ) -> Self {
        Self {
            kind,
            start_hour: *hours.start(),
            end_hour: *hours.end(),
            day_type,
            routes: routes.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Whether this rule applies at `hour` (0–23) on ISO weekday `day`.
    pub fn matches(&self, hour: u32, day: u32) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour) && self.day_type.admits(day)
    }
}

/// The default table, reproducing the member portal's usage patterns.
pub fn default_rules() -> Vec<HeuristicRule> {
    vec![
        // Work hours: members check upcoming events and their dashboard.
        HeuristicRule::new(HeuristicKind::Behavioral, 9..=17, DayType::Any, &["/events", "/dashboard"]),
        HeuristicRule::new(HeuristicKind::Behavioral, 18..=22, DayType::Any, &["/events", "/profile"]),
        HeuristicRule::new(HeuristicKind::Calendar, 0..=23, DayType::Weekend, &["/events"]),
        HeuristicRule::new(HeuristicKind::Calendar, 12..=14, DayType::Weekday, &["/events", "/dashboard"]),
    ]
}
