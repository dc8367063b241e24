use crate::error::StoreError;
use crate::types::{Channel, Contact, Role, Turn};

#[derive(sqlx::FromRow)]
pub struct ContactRow {
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            phone: row.phone,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct TurnRow {
    pub channel: String,
    pub role: String,
    pub content: String,
}

impl TurnRow {
    pub fn into_turn(self) -> Result<(Channel, Turn), StoreError> {
        let channel = self.channel.parse::<Channel>().map_err(StoreError::Backend)?;
        let role = self.role.parse::<Role>().map_err(StoreError::Backend)?;
        Ok((
            channel,
            Turn {
                role,
                content: self.content,
            },
        ))
    }
}
