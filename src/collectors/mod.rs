//! # Collectors Module
//!
//! One collector per metric family, coordinated by the orchestrator.
//!
//! - **`Collector` trait**: the interface all collectors share
//! - **`UserCollector`**: online/offline counts over the user directory
//! - **`ConferenceCollector`**: total/running/stopped conference counts
//! - **`ParticipantCollector`**: user/guest counts across running conferences
//! - **`EventLogCollector`**: failed-login counts within a lookback window
//! - **`Orchestrator`**: runs every collector sequentially and assembles
//!   the channel list in its documented order
//!
//! Each collector owns a clone of the shared [`crate::client::ApiClient`]
//! and its own accumulated summary; nothing is shared between them.

pub mod collector;
pub mod conference_collector;
pub mod eventlog_collector;
pub mod orchestrator;
pub mod participant_collector;
pub mod user_collector;

// Re-export the main types for easy access
pub use collector::Collector;
pub use conference_collector::ConferenceCollector;
pub use eventlog_collector::EventLogCollector;
pub use orchestrator::Orchestrator;
pub use participant_collector::ParticipantCollector;
pub use user_collector::UserCollector;
