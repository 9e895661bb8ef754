//! # prefetch-prediction
//!
//! Predicts the routes a user is likely to visit next.
//!
//! ## Strategies, in fill order
//!
//! | Strategy | Signal Source |
//! |----------|--------------|
//! | Transition | First-order Markov counts from the user's visit history |
//! | Behavioral | Hour-of-day rules for users with a profile, else their top paths |
//! | Calendar | Weekday/weekend and hour-of-day rules for everyone |
//! | Common path | The user's most visited paths |
//!
//! A route produced by several strategies keeps its first (highest-tier) position.

pub mod cache;
pub mod engine;
pub mod signals;
pub mod strategies;
pub mod transitions;

pub use cache::TransitionCache;
pub use engine::RoutePredictor;
pub use signals::TemporalSignals;
pub use strategies::{PredictionSource, RouteCandidate};
pub use transitions::TransitionTable;
