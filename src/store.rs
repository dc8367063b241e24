use crate::error::StoreError;
use crate::types::{Channel, Contact, ConversationRecord, Turn};

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Persistence for contacts and per-sender conversation records.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Insert all contacts or none.  Any phone already present is a `Duplicate`.
    async fn insert_contacts(&self, contacts: &[Contact]) -> Result<(), StoreError>;

    async fn get_contact(&self, phone: &str) -> Result<Option<Contact>, StoreError>;

    /// Append one turn to a sender's bucket, creating the record on first append.
    async fn append_turn(
        &self,
        sender: &str,
        channel: Channel,
        turn: &Turn,
    ) -> Result<(), StoreError>;

    /// Turns of one bucket in append order.  Empty when nothing was stored.
    async fn get_turns(&self, sender: &str, channel: Channel) -> Result<Vec<Turn>, StoreError>;

    /// `None` when no turn was ever appended for `sender`.
    async fn get_record(&self, sender: &str) -> Result<Option<ConversationRecord>, StoreError>;
}

/// Process-local store.  Used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    contacts: RwLock<HashMap<String, Contact>>,
    records: RwLock<HashMap<String, ConversationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn insert_contacts(&self, contacts: &[Contact]) -> Result<(), StoreError> {
        let mut stored = self.contacts.write().await;
        if let Some(dup) = contacts.iter().find(|c| stored.contains_key(&c.phone)) {
            return Err(StoreError::Duplicate(dup.phone.clone()));
        }
        for contact in contacts {
            stored.insert(contact.phone.clone(), contact.clone());
        }
        Ok(())
    }

    async fn get_contact(&self, phone: &str) -> Result<Option<Contact>, StoreError> {
        Ok(self.contacts.read().await.get(phone).cloned())
    }

    async fn append_turn(
        &self,
        sender: &str,
        channel: Channel,
        turn: &Turn,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(sender.to_string())
            .or_insert_with(|| ConversationRecord {
                sender: sender.to_string(),
                ..Default::default()
            });
        record.bucket_mut(channel).push(turn.clone());
        Ok(())
    }

    async fn get_turns(&self, sender: &str, channel: Channel) -> Result<Vec<Turn>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .get(sender)
            .map(|r| r.bucket(channel).to_vec())
            .unwrap_or_default())
    }

    async fn get_record(&self, sender: &str) -> Result<Option<ConversationRecord>, StoreError> {
        Ok(self.records.read().await.get(sender).cloned())
    }
}
