//! Pure record classifiers.
//!
//! Every function here is total and side-effect-free: one record in, one
//! category out. All counting happens in the collectors.

use crate::metrics::LogEventRecord;

/// Presence bucket for a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPresence {
    Online,
    Offline,
}

/// Status codes the directory reports per user.
/// 0: offline; 1: online; 2: busy; 5: multihost. Busy and multihost users
/// are connected to the server, so they count as online. Codes outside this
/// set belong to neither bucket and are dropped by the caller.
pub fn classify_user_status(status: i64) -> Option<UserPresence> {
    match status {
        0 => Some(UserPresence::Offline),
        1 | 2 | 5 => Some(UserPresence::Online),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConferenceState {
    Running,
    Stopped,
    Other,
}

pub fn classify_conference_state(state: &str) -> ConferenceState {
    match state {
        "running" => ConferenceState::Running,
        "stopped" => ConferenceState::Stopped,
        _ => ConferenceState::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantKind {
    User,
    Guest,
}

/// Guest call ids look like `#guest2:Visitor@server.example`: a `#guest`
/// prefix with the `@` separator somewhere after it.
pub fn classify_participant(id: &str) -> ParticipantKind {
    match id.strip_prefix("#guest") {
        Some(rest) if rest.contains('@') => ParticipantKind::Guest,
        _ => ParticipantKind::User,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    Admin,
    User,
}

/// Picks out failed logins from the event log. Admin logins report a
/// `result` code ("0" means success); user logins carry an `error` field
/// only when they failed.
pub fn classify_login_event(event: &LogEventRecord) -> Option<LoginFailure> {
    if event.event_type != "login" {
        return None;
    }
    match event.object_type.as_str() {
        "admin" if event.payload.result.as_deref() != Some("0") => Some(LoginFailure::Admin),
        "user" if event.payload.error.is_some() => Some(LoginFailure::User),
        _ => None,
    }
}
