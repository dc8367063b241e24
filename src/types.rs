use crate::router::ConversationRouter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A trusted sender.  Registered once, looked up by phone number.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Who produced a turn.  `Stt` marks caller speech that came through transcription.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Stt,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Stt => "stt",
        }
    }

    /// The role as presented to the language model, which has no notion of `stt`.
    pub fn model_role(&self) -> &'static str {
        match self {
            Role::Stt => "user",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "stt" => Ok(Role::Stt),
            other => Err(format!("unknown turn role '{other}'")),
        }
    }
}

/// Which conversation bucket a turn belongs to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Call,
    Sms,
}

impl Channel {
    pub fn from_audio(is_audio: bool) -> Self {
        if is_audio {
            Channel::Call
        } else {
            Channel::Sms
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Call => "call",
            Channel::Sms => "sms",
        }
    }

    /// Role of an inbound turn on this channel.
    pub fn inbound_role(&self) -> Role {
        match self {
            Channel::Call => Role::Stt,
            Channel::Sms => Role::User,
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(Channel::Call),
            "sms" => Ok(Channel::Sms),
            other => Err(format!("unknown channel '{other}'")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Everything stored for one sender, one ordered bucket per channel.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationRecord {
    pub sender: String,
    pub call: Vec<Turn>,
    pub sms: Vec<Turn>,
}

impl ConversationRecord {
    pub fn bucket(&self, channel: Channel) -> &[Turn] {
        match channel {
            Channel::Call => &self.call,
            Channel::Sms => &self.sms,
        }
    }

    pub fn bucket_mut(&mut self, channel: Channel) -> &mut Vec<Turn> {
        match channel {
            Channel::Call => &mut self.call,
            Channel::Sms => &mut self.sms,
        }
    }
}

/// Spam/unknown decision for a sender that is not a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Spam,
    Unknown,
}

impl Classification {
    /// Anything mentioning "spam", in any case, is spam.  Everything else is unknown.
    pub fn from_label(label: &str) -> Self {
        if label.to_lowercase().contains("spam") {
            Classification::Spam
        } else {
            Classification::Unknown
        }
    }
}

/// Outcome of routing one inbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoutingResult {
    Known,
    Spam,
    Conversation { reply: String },
}

/// Outcome of a voice call submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    Known {
        message: String,
    },
    Conversation {
        transcription: String,
        reply: String,
        reply_audio: Vec<u8>,
    },
}

pub struct AppState {
    pub router: Arc<ConversationRouter>,
}
