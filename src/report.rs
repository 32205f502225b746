//! PRTG custom-sensor document types.
//!
//! PRTG reads exactly one JSON document from stdout per poll: either a
//! `result` array of channels, or an `error`/`text` pair. Never both.

use serde::{
    Deserialize,
    Serialize,
};

/// One named numeric metric in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub channel: String,
    pub value: i64,
    pub float: u8,
    pub limitmode: u8,
}

impl Channel {
    /// Integer channel with limit checking enabled, the only shape this
    /// sensor emits.
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            channel: name.into(),
            value,
            float: 0,
            limitmode: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrtgDocument {
    pub prtg: PrtgBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrtgBody {
    Result { result: Vec<Channel> },
    Error { error: u8, text: String },
}

/// The document emitted when every collector succeeded.
pub fn success_document(channels: Vec<Channel>) -> PrtgDocument {
    PrtgDocument {
        prtg: PrtgBody::Result { result: channels },
    }
}

/// The document emitted on any fatal error. Carries no channels at all;
/// PRTG treats a document with both as malformed.
pub fn error_document(message: impl Into<String>) -> PrtgDocument {
    PrtgDocument {
        prtg: PrtgBody::Error {
            error: 1,
            text: message.into(),
        },
    }
}
