use serde::{
    Deserialize,
    Serialize,
};

/// Presence counts over the whole user directory.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UserCounts {
    pub online: i64,
    pub offline: i64,
}

/// Conference counts. `total` includes conferences in states other than
/// running/stopped; those contribute to no other bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConferenceCounts {
    pub total: i64,
    pub running: i64,
    pub stopped: i64,
}

/// Participant counts summed across all running conferences.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ParticipantCounts {
    pub total: i64,
    pub users: i64,
    pub guests: i64,
}

/// Failed-login counts within one lookback window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoginErrorCounts {
    pub admin: i64,
    pub user: i64,
}
