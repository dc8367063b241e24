use crate::consts::{CLASSIFIER_PROMPT, DEFAULT_PROMPT};
use crate::error::{AppError, Service};
use crate::openai_types::OpenAIMessage;
use crate::services::{ChatModel, Synthesizer, Transcriber};
use crate::store::ConversationStore;
use crate::types::{
    CallOutcome, Channel, Classification, Contact, ConversationRecord, Role, RoutingResult, Turn,
};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, MutexGuard};
use tracing::{debug, info};

/// One async lock per sender, so the append/read/append sequence of a sender never interleaves
/// with another request for the same sender.
#[derive(Default)]
struct SenderLocks {
    // sender => lock; entries are dropped once nobody holds or waits on them
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SenderLocks {
    fn lease(&self, sender: &str) -> SenderLease<'_> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let lock = locks.entry(sender.to_string()).or_default().clone();
        SenderLease {
            locks: self,
            sender: sender.to_string(),
            lock,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// A handle on one sender's lock.  Dropping it, including when the request future is dropped
/// mid-flight, removes the map entry once no other lease refers to it.
struct SenderLease<'a> {
    locks: &'a SenderLocks,
    sender: String,
    lock: Arc<AsyncMutex<()>>,
}

impl SenderLease<'_> {
    async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

impl Drop for SenderLease<'_> {
    fn drop(&mut self) {
        let mut locks = self
            .locks
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // refcounts only change under the map lock
        drop(std::mem::take(&mut self.lock));
        let idle = locks
            .get(&self.sender)
            .map_or(false, |lock| Arc::strong_count(lock) == 1);
        if idle {
            locks.remove(&self.sender);
        }
    }
}

/// Decides what happens to each inbound message and keeps the per-sender transcript.
pub struct ConversationRouter {
    store: Arc<dyn ConversationStore>,
    transcriber: Arc<dyn Transcriber>,
    chat_model: Arc<dyn ChatModel>,
    synthesizer: Arc<dyn Synthesizer>,
    sender_locks: SenderLocks,
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Persona first, then every stored turn in order.
fn conversation_context(turns: &[Turn]) -> Vec<OpenAIMessage> {
    let mut conversation = vec![OpenAIMessage::new(
        Role::System.model_role(),
        DEFAULT_PROMPT,
    )];
    conversation.extend(
        turns
            .iter()
            .map(|turn| OpenAIMessage::new(turn.role.model_role(), turn.content.as_str())),
    );
    conversation
}

impl ConversationRouter {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        transcriber: Arc<dyn Transcriber>,
        chat_model: Arc<dyn ChatModel>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        Self {
            store,
            transcriber,
            chat_model,
            synthesizer,
            sender_locks: SenderLocks::default(),
        }
    }

    pub async fn register_contacts(&self, contacts: Vec<Contact>) -> Result<Vec<Contact>, AppError> {
        if contacts.is_empty() {
            return Err(AppError::validation("at least one contact is required"));
        }
        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(contacts.len());
        for contact in contacts {
            let phone = required("phone", &contact.phone)?;
            if !seen.insert(phone.clone()) {
                return Err(AppError::validation(format!(
                    "phone {phone} appears more than once"
                )));
            }
            cleaned.push(Contact {
                phone,
                name: non_blank(contact.name),
                email: non_blank(contact.email),
            });
        }
        self.store.insert_contacts(&cleaned).await?;
        info!(count = cleaned.len(), "registered contacts");

        Ok(cleaned)
    }

    pub async fn lookup_contact(&self, phone: &str) -> Result<Contact, AppError> {
        let phone = required("phone", phone)?;
        self.store
            .get_contact(&phone)
            .await?
            .ok_or(AppError::NotFound {
                entity: "contact",
                id: phone,
            })
    }

    pub async fn get_history(&self, sender: &str) -> Result<ConversationRecord, AppError> {
        let sender = required("sender", sender)?;
        self.store
            .get_record(&sender)
            .await?
            .ok_or(AppError::NotFound {
                entity: "conversation",
                id: sender,
            })
    }

    /// Ask the model whether a message is spam.  Only the labels `spam` and `unknown` are
    /// meaningful; anything that does not mention spam counts as unknown.
    pub async fn classify(&self, message: &str) -> Result<Classification, AppError> {
        let prompt = vec![
            OpenAIMessage::new(Role::System.model_role(), CLASSIFIER_PROMPT),
            OpenAIMessage::new(Role::User.model_role(), message),
        ];
        let label = self.chat_model.complete(prompt).await?.text;
        let classification = Classification::from_label(&label);
        debug!(label=%label, ?classification, "classified message");
        Ok(classification)
    }

    /// Route one inbound message.  `is_audio` selects the call bucket and forces a reply even
    /// for spam, since a live call always has to be answered.
    pub async fn route(
        &self,
        sender: &str,
        message: &str,
        is_audio: bool,
    ) -> Result<RoutingResult, AppError> {
        let sender = required("sender", sender)?;
        let message = required("message", message)?;

        let lease = self.sender_locks.lease(&sender);
        let _guard = lease.lock().await;
        self.route_locked(&sender, &message, Channel::from_audio(is_audio))
            .await
    }

    async fn route_locked(
        &self,
        sender: &str,
        message: &str,
        channel: Channel,
    ) -> Result<RoutingResult, AppError> {
        self.store
            .append_turn(sender, channel, &Turn::new(channel.inbound_role(), message))
            .await?;

        if self.store.get_contact(sender).await?.is_some() {
            info!(sender=%sender, channel=%channel.as_str(), "known contact");
            return Ok(RoutingResult::Known);
        }

        let classification = self.classify(message).await?;
        match (channel, classification) {
            (Channel::Sms, Classification::Spam) => {
                info!(sender=%sender, "spam message; not replying");
                return Ok(RoutingResult::Spam);
            }
            (Channel::Call, Classification::Spam) => {
                info!(sender=%sender, "spam call; answering anyway");
            }
            (_, Classification::Unknown) => {
                info!(sender=%sender, channel=%channel.as_str(), "unknown sender; engaging");
            }
        }

        let turns = self.store.get_turns(sender, channel).await?;
        let reply = self.chat_model.complete(conversation_context(&turns)).await?.text;
        self.store
            .append_turn(sender, channel, &Turn::new(Role::Assistant, reply.as_str()))
            .await?;

        Ok(RoutingResult::Conversation { reply })
    }

    pub async fn submit_message(&self, sender: &str, text: &str) -> Result<RoutingResult, AppError> {
        self.route(sender, text, false).await
    }

    /// Transcribe, route on the call bucket, then voice the reply.
    pub async fn submit_call_audio(
        &self,
        sender: &str,
        audio: Vec<u8>,
        filename: &str,
    ) -> Result<CallOutcome, AppError> {
        let sender = required("caller_number", sender)?;
        let transcription = self.transcribe(audio, filename).await?;
        if transcription.trim().is_empty() {
            return Err(AppError::collaborator(Service::Stt, "no speech recognised"));
        }

        match self.route(&sender, &transcription, true).await? {
            RoutingResult::Known => Ok(CallOutcome::Known {
                message: format!("Call from {sender} - Ringing"),
            }),
            RoutingResult::Conversation { reply } => {
                let reply_audio = self.synthesize(&reply).await?;
                Ok(CallOutcome::Conversation {
                    transcription,
                    reply,
                    reply_audio,
                })
            }
            RoutingResult::Spam => Err(AppError::collaborator(
                Service::Llm,
                "call path produced no reply",
            )),
        }
    }

    pub async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AppError> {
        if audio.is_empty() {
            return Err(AppError::validation("audio is required"));
        }
        self.transcriber.transcribe(audio, filename).await
    }

    /// A single stateless reply under the default persona.  Nothing is stored.
    pub async fn reply_once(&self, message: &str) -> Result<String, AppError> {
        let message = required("message", message)?;
        let turns = [Turn::new(Role::User, message)];
        Ok(self.chat_model.complete(conversation_context(&turns)).await?.text)
    }

    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError> {
        let text = required("text", text)?;
        self.synthesizer.synthesize(&text).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::Completion;
    use crate::store::MemoryStore;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers classification prompts with a fixed label and conversation prompts by echoing
    /// the last message.  Every call is recorded.
    pub struct StubChatModel {
        pub label: String,
        pub delay: Option<Duration>,
        pub fail: bool,
        pub classifications: AtomicUsize,
        pub completions: Mutex<Vec<Vec<OpenAIMessage>>>,
    }

    impl StubChatModel {
        pub fn labelling(label: &str) -> Self {
            Self {
                label: label.to_string(),
                delay: None,
                fail: false,
                classifications: AtomicUsize::new(0),
                completions: Mutex::new(Vec::new()),
            }
        }

        pub fn classifications(&self) -> usize {
            self.classifications.load(Ordering::SeqCst)
        }

        pub fn completions(&self) -> Vec<Vec<OpenAIMessage>> {
            self.completions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for StubChatModel {
        async fn complete(&self, messages: Vec<OpenAIMessage>) -> Result<Completion, AppError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(AppError::collaborator(Service::Llm, "stub failure"));
            }
            if messages[0].content == CLASSIFIER_PROMPT {
                self.classifications.fetch_add(1, Ordering::SeqCst);
                return Ok(Completion {
                    text: self.label.clone(),
                });
            }
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.completions.lock().unwrap().push(messages);
            Ok(Completion {
                text: format!("reply to {last}"),
            })
        }
    }

    pub struct StubTranscriber(pub String);

    #[async_trait]
    impl Transcriber for StubTranscriber {
        async fn transcribe(&self, _audio: Vec<u8>, _filename: &str) -> Result<String, AppError> {
            Ok(self.0.clone())
        }
    }

    pub struct StubSynthesizer;

    #[async_trait]
    impl Synthesizer for StubSynthesizer {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError> {
            Ok(format!("RIFF:{text}").into_bytes())
        }
    }

    pub fn router_with(
        chat_model: Arc<StubChatModel>,
        transcription: &str,
    ) -> (ConversationRouter, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let router = ConversationRouter::new(
            store.clone(),
            Arc::new(StubTranscriber(transcription.to_string())),
            chat_model,
            Arc::new(StubSynthesizer),
        );
        (router, store)
    }

    fn john_doe() -> Contact {
        Contact {
            phone: "+1-555-901-2345".to_string(),
            name: Some("John Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn spam_text_gets_no_reply() {
        let llm = Arc::new(StubChatModel::labelling("spam"));
        let (router, store) = router_with(llm.clone(), "");

        let res = router.submit_message("+1-555-654-3210", "Free trip!").await.unwrap();
        assert_eq!(res, RoutingResult::Spam);
        assert_eq!(llm.classifications(), 1);
        assert!(llm.completions().is_empty());

        let turns = store.get_turns("+1-555-654-3210", Channel::Sms).await.unwrap();
        assert_eq!(turns, vec![Turn::new(Role::User, "Free trip!")]);
    }

    #[tokio::test]
    async fn known_contact_short_circuits() {
        let llm = Arc::new(StubChatModel::labelling("spam"));
        let (router, store) = router_with(llm.clone(), "");
        router.register_contacts(vec![john_doe()]).await.unwrap();

        for text in ["Hi", "Free trip!", "Fix your car!"] {
            let res = router.submit_message("+1-555-901-2345", text).await.unwrap();
            assert_eq!(res, RoutingResult::Known);
        }
        assert_eq!(llm.classifications(), 0);
        assert!(llm.completions().is_empty());

        // Inbound turns are still recorded, nothing else is.
        let turns = store.get_turns("+1-555-901-2345", Channel::Sms).await.unwrap();
        assert_eq!(turns.len(), 3);
        assert!(turns.iter().all(|t| t.role == Role::User));
    }

    #[tokio::test]
    async fn unregistered_senders_are_never_known() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm.clone(), "");
        router.register_contacts(vec![john_doe()]).await.unwrap();

        for sender in ["+1-555-654-3210", "+1-555-000-0000", "+1-555-901-2346"] {
            let res = router.submit_message(sender, "Hi").await.unwrap();
            assert_ne!(res, RoutingResult::Known);
        }
        assert_eq!(llm.classifications(), 3);
    }

    #[tokio::test]
    async fn unknown_sender_gets_a_growing_conversation() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, store) = router_with(llm.clone(), "");
        let sender = "+1-555-222-3333";

        let first = router.submit_message(sender, "Hello?").await.unwrap();
        assert_eq!(
            first,
            RoutingResult::Conversation {
                reply: "reply to Hello?".to_string()
            }
        );
        router.submit_message(sender, "Who is this?").await.unwrap();

        let turns = store.get_turns(sender, Channel::Sms).await.unwrap();
        assert_eq!(
            turns,
            vec![
                Turn::new(Role::User, "Hello?"),
                Turn::new(Role::Assistant, "reply to Hello?"),
                Turn::new(Role::User, "Who is this?"),
                Turn::new(Role::Assistant, "reply to Who is this?"),
            ]
        );

        // The second prompt replays persona plus every stored turn in order.
        let completions = llm.completions();
        assert_eq!(completions.len(), 2);
        let second = &completions[1];
        assert_eq!(second[0], OpenAIMessage::new("system", DEFAULT_PROMPT));
        assert_eq!(
            second[1..].to_vec(),
            turns[..3]
                .iter()
                .map(|t| OpenAIMessage::new(t.role.model_role(), t.content.as_str()))
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn first_message_prompt_is_persona_and_message_only() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm.clone(), "");
        router.submit_message("+1-555-444-5555", "Hey").await.unwrap();

        let completions = llm.completions();
        assert_eq!(
            completions[0],
            vec![
                OpenAIMessage::new("system", DEFAULT_PROMPT),
                OpenAIMessage::new("user", "Hey"),
            ]
        );
    }

    #[tokio::test]
    async fn call_path_replies_even_to_spam() {
        let llm = Arc::new(StubChatModel::labelling("spam"));
        let (router, store) = router_with(llm.clone(), "Fix your car!");

        let outcome = router
            .submit_call_audio("+1-555-000-0000", b"fake m4a".to_vec(), "audio.m4a")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            CallOutcome::Conversation {
                transcription: "Fix your car!".to_string(),
                reply: "reply to Fix your car!".to_string(),
                reply_audio: b"RIFF:reply to Fix your car!".to_vec(),
            }
        );
        assert_eq!(llm.classifications(), 1);

        let record = store.get_record("+1-555-000-0000").await.unwrap().unwrap();
        assert!(record.sms.is_empty());
        assert_eq!(
            record.call,
            vec![
                Turn::new(Role::Stt, "Fix your car!"),
                Turn::new(Role::Assistant, "reply to Fix your car!"),
            ]
        );
        // stt turns reach the model as user turns
        assert_eq!(llm.completions()[0][1], OpenAIMessage::new("user", "Fix your car!"));
    }

    #[tokio::test]
    async fn known_caller_rings_through() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm.clone(), "It's John");
        router.register_contacts(vec![john_doe()]).await.unwrap();

        let outcome = router
            .submit_call_audio("+1-555-901-2345", b"audio".to_vec(), "audio.wav")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            CallOutcome::Known {
                message: "Call from +1-555-901-2345 - Ringing".to_string()
            }
        );
        assert_eq!(llm.classifications(), 0);
    }

    #[tokio::test]
    async fn empty_audio_is_a_validation_error() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, store) = router_with(llm, "anything");
        let res = router
            .submit_call_audio("+1-555-000-0000", Vec::new(), "audio.m4a")
            .await;
        assert!(matches!(res, Err(AppError::Validation(_))));
        assert!(store.get_record("+1-555-000-0000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn silent_audio_is_an_stt_failure() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm, "   ");
        let res = router
            .submit_call_audio("+1-555-000-0000", b"hiss".to_vec(), "audio.m4a")
            .await;
        assert!(matches!(
            res,
            Err(AppError::Collaborator {
                service: Service::Stt,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn llm_failure_propagates() {
        let llm = Arc::new(StubChatModel {
            fail: true,
            ..StubChatModel::labelling("unknown")
        });
        let (router, store) = router_with(llm, "");
        let res = router.submit_message("+1-555-666-7777", "Hello").await;
        assert!(matches!(
            res,
            Err(AppError::Collaborator {
                service: Service::Llm,
                ..
            })
        ));
        // the inbound turn was already stored; no reply was
        let turns = store.get_turns("+1-555-666-7777", Channel::Sms).await.unwrap();
        assert_eq!(turns, vec![Turn::new(Role::User, "Hello")]);
    }

    #[tokio::test]
    async fn blank_input_is_rejected_before_storing() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, store) = router_with(llm.clone(), "");
        assert!(matches!(
            router.submit_message("   ", "Hello").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            router.submit_message("+1-555-666-7777", "  ").await,
            Err(AppError::Validation(_))
        ));
        assert!(store.get_record("+1-555-666-7777").await.unwrap().is_none());
        assert_eq!(llm.classifications(), 0);
    }

    #[tokio::test]
    async fn registering_twice_fails() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm, "");
        router.register_contacts(vec![john_doe()]).await.unwrap();
        let res = router.register_contacts(vec![john_doe()]).await;
        assert!(matches!(res, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn registration_trims_and_drops_blank_fields() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm, "");
        let stored = router
            .register_contacts(vec![Contact {
                phone: " +1-555-901-2345 ".to_string(),
                name: Some("".to_string()),
                email: Some(" john.doe@example.com ".to_string()),
            }])
            .await
            .unwrap();
        assert_eq!(
            stored,
            vec![Contact {
                phone: "+1-555-901-2345".to_string(),
                name: None,
                email: Some("john.doe@example.com".to_string()),
            }]
        );
        assert_eq!(router.lookup_contact("+1-555-901-2345").await.unwrap(), stored[0]);
    }

    #[tokio::test]
    async fn repeated_phone_in_batch_is_rejected() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, store) = router_with(llm, "");
        let res = router.register_contacts(vec![john_doe(), john_doe()]).await;
        assert!(matches!(res, Err(AppError::Validation(_))));
        assert!(store.get_contact("+1-555-901-2345").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookups_report_not_found() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm, "");
        assert!(matches!(
            router.lookup_contact("+1-555-000-0000").await,
            Err(AppError::NotFound { entity: "contact", .. })
        ));
        assert!(matches!(
            router.get_history("+1-555-000-0000").await,
            Err(AppError::NotFound {
                entity: "conversation",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn contact_added_mid_conversation_is_known_from_then_on() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, _store) = router_with(llm.clone(), "");
        let res = router.submit_message("+1-555-901-2345", "Hi").await.unwrap();
        assert!(matches!(res, RoutingResult::Conversation { .. }));

        router.register_contacts(vec![john_doe()]).await.unwrap();
        let res = router.submit_message("+1-555-901-2345", "Hi again").await.unwrap();
        assert_eq!(res, RoutingResult::Known);

        let history = router.get_history("+1-555-901-2345").await.unwrap();
        assert_eq!(history.sms.len(), 3);
    }

    #[tokio::test]
    async fn concurrent_messages_for_one_sender_do_not_interleave() {
        let llm = Arc::new(StubChatModel {
            delay: Some(Duration::from_millis(20)),
            ..StubChatModel::labelling("unknown")
        });
        let (router, store) = router_with(llm, "");
        let sender = "+1-555-888-9999";

        let (a, b) = tokio::join!(
            router.submit_message(sender, "first"),
            router.submit_message(sender, "second"),
        );
        a.unwrap();
        b.unwrap();

        let turns = store.get_turns(sender, Channel::Sms).await.unwrap();
        assert_eq!(turns.len(), 4);
        for pair in turns.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1], Turn::new(Role::Assistant, format!("reply to {}", pair[0].content)));
        }
        assert_eq!(router.sender_locks.len(), 0);
    }

    #[tokio::test]
    async fn dropped_request_frees_its_sender_lock() {
        let llm = Arc::new(StubChatModel {
            delay: Some(Duration::from_millis(200)),
            ..StubChatModel::labelling("unknown")
        });
        let (router, store) = router_with(llm, "");
        let sender = "+1-555-888-9999";

        let res = tokio::time::timeout(
            Duration::from_millis(20),
            router.submit_message(sender, "hang up"),
        )
        .await;
        assert!(res.is_err());
        assert_eq!(router.sender_locks.len(), 0);

        // The sender is not wedged behind the abandoned request.
        let res = router.submit_message(sender, "still there?").await.unwrap();
        assert!(matches!(res, RoutingResult::Conversation { .. }));
        assert_eq!(router.sender_locks.len(), 0);
        let turns = store.get_turns(sender, Channel::Sms).await.unwrap();
        assert_eq!(turns.last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn reply_once_stores_nothing() {
        let llm = Arc::new(StubChatModel::labelling("unknown"));
        let (router, store) = router_with(llm.clone(), "");
        let reply = router.reply_once("Fix your car!").await.unwrap();
        assert_eq!(reply, "reply to Fix your car!");
        assert_eq!(llm.classifications(), 0);
        assert!(store.get_record("Fix your car!").await.unwrap().is_none());
    }
}
