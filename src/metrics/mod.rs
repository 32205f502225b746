//! # Metrics Module
//!
//! Data structures for the sensor's metric families.
//!
//! - **`records`**: wire-level records as the management API returns them,
//!   reduced to the fields classification needs
//! - **`counts`**: per-family scalar summaries produced by the collectors

pub mod counts;
pub mod records;

pub use counts::{
    ConferenceCounts,
    LoginErrorCounts,
    ParticipantCounts,
    UserCounts,
};
pub use records::{
    ConferenceRecord,
    LogEventPayload,
    LogEventRecord,
    ParticipantRecord,
    UserRecord,
};
