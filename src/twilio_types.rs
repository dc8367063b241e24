pub fn wrap_twiml(twiml: String) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{twiml}")
}

mod twiml {
    use xmlserde_derives::XmlSerialize;

    #[derive(PartialEq, Eq, XmlSerialize, Default)]
    #[xmlserde(root = b"Response")]
    pub struct Response {
        #[xmlserde(ty = "untag")]
        pub actions: Vec<ResponseAction>,
    }

    #[derive(PartialEq, Eq, XmlSerialize)]
    pub enum ResponseAction {
        #[xmlserde(name = b"Message")]
        Message(MessageAction),
    }

    #[derive(PartialEq, Eq, XmlSerialize, Default)]
    pub struct MessageAction {
        #[xmlserde(ty = "text")]
        pub body: String,
    }
}
pub use twiml::*;

mod sms {
    use serde::Deserialize;

    /// Form body Twilio posts to the messaging webhook for each inbound SMS.
    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "PascalCase")]
    pub struct TwilioSmsPayload {
        pub message_sid: String,
        pub account_sid: String,
        pub from: String,
        pub to: String,
        pub body: String,
        #[serde(default)]
        pub from_city: Option<String>,
        #[serde(default)]
        pub from_state: Option<String>,
        #[serde(default)]
        pub from_country: Option<String>,
    }
}
pub use sms::*;
