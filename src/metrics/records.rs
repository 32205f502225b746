use serde::{
    Deserialize,
    Serialize,
};

/// Directory user. Only the presence status matters to the sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub status: i64,
}

/// Conference as listed by `GET conferences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConferenceRecord {
    pub id: String,
    pub state: String,
}

/// Conference participant. Guests are recognizable from the call id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: String,
}

/// Event-log entry from `GET logs/events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEventRecord {
    pub event_type: String,
    pub object_type: String,
    #[serde(default)]
    pub payload: LogEventPayload,
}

/// Event payload. Login events carry `result` for admin logins and an
/// `error` field for failed user logins; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEventPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}
