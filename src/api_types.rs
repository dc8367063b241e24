//! Request and response bodies of the JSON endpoints.

use crate::types::Contact;

use serde::{Deserialize, Serialize};

/// `POST /contacts` takes a single contact or a list of them.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ContactsPayload {
    Many(Vec<Contact>),
    One(Contact),
}

impl ContactsPayload {
    pub fn into_vec(self) -> Vec<Contact> {
        match self {
            ContactsPayload::Many(contacts) => contacts,
            ContactsPayload::One(contact) => vec![contact],
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct IncomingMessage {
    #[serde(alias = "caller_number")]
    pub phone: String,
    pub message: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum MessageResponse {
    Known { detail: String },
    Spam { detail: String },
    Conversation { conversation_result: String },
}

/// `POST /handle-sms` answer: the routing outcome plus the echoed sender and message.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SmsResponse {
    Known {
        caller_number: String,
        user_message: String,
        detail: String,
    },
    Spam {
        caller_number: String,
        user_message: String,
        detail: String,
    },
    Conversation {
        caller_number: String,
        user_message: String,
        bot_response: String,
    },
}

#[derive(Deserialize, Debug)]
pub struct CallQuery {
    pub caller_number: String,
}

#[derive(Serialize, Debug)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CallResponse {
    Known {
        caller_number: String,
        detail: String,
    },
    Conversation {
        caller_number: String,
        transcribed_text: String,
        bot_response: String,
        /// Base64 WAV.
        tts_audio: String,
    },
}

#[derive(Serialize, Debug)]
pub struct TranscriptionBody {
    pub transcription: String,
}

#[derive(Deserialize, Debug)]
pub struct LlmRequest {
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct LlmResponse {
    pub reply: String,
}

#[derive(Deserialize, Debug)]
pub struct TtsRequest {
    pub text: String,
}

#[derive(Serialize, Debug)]
pub struct TtsResponse {
    pub audio: String,
}
