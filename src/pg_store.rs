use crate::db_types::{ContactRow, TurnRow};
use crate::error::StoreError;
use crate::store::ConversationStore;
use crate::types::{Channel, Contact, ConversationRecord, Turn};

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::{error, info};

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed store.  Turns are ordered by their serial id within a sender and channel.
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                error!(error=%e, "failed to run migrations");
                StoreError::Backend(e.to_string())
            })?;
        info!("connected to postgres and applied migrations");
        Ok(Self { pool })
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl ConversationStore for PgStore {
    async fn insert_contacts(&self, contacts: &[Contact]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for contact in contacts {
            let res = sqlx::query(
                "
                insert into contacts (
                  phone,
                  name,
                  email
                ) values (
                  $1,
                  $2,
                  $3
                )
                ",
            )
            .bind(&contact.phone)
            .bind(&contact.name)
            .bind(&contact.email)
            .execute(&mut *tx)
            .await;
            match res {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    return Err(StoreError::Duplicate(contact.phone.clone()));
                }
                Err(e) => return Err(e.into()),
            }
        }
        tx.commit().await?;

        Ok(())
    }

    async fn get_contact(&self, phone: &str) -> Result<Option<Contact>, StoreError> {
        let row = sqlx::query_as::<_, ContactRow>(
            "
            select phone, name, email
            from contacts
            where phone = $1
            ",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Contact::from))
    }

    async fn append_turn(
        &self,
        sender: &str,
        channel: Channel,
        turn: &Turn,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "
            insert into turns (
              sender,
              channel,
              role,
              content
            ) values (
              $1,
              $2,
              $3,
              $4
            )
            ",
        )
        .bind(sender)
        .bind(channel.as_str())
        .bind(turn.role.as_str())
        .bind(&turn.content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_turns(&self, sender: &str, channel: Channel) -> Result<Vec<Turn>, StoreError> {
        let rows = sqlx::query_as::<_, TurnRow>(
            "
            select channel, role, content
            from turns
            where sender = $1 and channel = $2
            order by id
            ",
        )
        .bind(sender)
        .bind(channel.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| row.into_turn().map(|(_, turn)| turn))
            .collect()
    }

    async fn get_record(&self, sender: &str) -> Result<Option<ConversationRecord>, StoreError> {
        let rows = sqlx::query_as::<_, TurnRow>(
            "
            select channel, role, content
            from turns
            where sender = $1
            order by id
            ",
        )
        .bind(sender)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Ok(None);
        }
        let mut record = ConversationRecord {
            sender: sender.to_string(),
            ..Default::default()
        };
        for row in rows {
            let (channel, turn) = row.into_turn()?;
            record.bucket_mut(channel).push(turn);
        }
        Ok(Some(record))
    }
}
