use chrono::{Days, NaiveDate};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        chat::{entities::ChatMessage, ports::ChatMessageRepository},
        common::entities::app_errors::CoreError,
    },
    entity::chat_messages::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct SqliteChatMessageRepository {
    pub db: DatabaseConnection,
}

impl SqliteChatMessageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ChatMessageRepository for SqliteChatMessageRepository {
    async fn append(&self, message: ChatMessage) -> Result<ChatMessage, CoreError> {
        Entity::insert(ActiveModel {
            id: Set(message.id),
            role: Set(message.role.as_str().to_owned()),
            content: Set(message.content.clone()),
            image_path: Set(message.image_path.clone()),
            retryable: Set(message.retryable),
            created_at: Set(message.created_at),
        })
        .exec(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to append chat message: {}", e);
            CoreError::Storage(format!("failed to append chat message: {e}"))
        })?;

        Ok(message)
    }

    async fn list(&self) -> Result<Vec<ChatMessage>, CoreError> {
        let messages = Entity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list chat history: {}", e);
                CoreError::Storage(format!("failed to list chat history: {e}"))
            })?
            .iter()
            .map(ChatMessage::from)
            .collect();

        Ok(messages)
    }

    async fn count_on_date(&self, date: NaiveDate) -> Result<u64, CoreError> {
        let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let end = date
            .checked_add_days(Days::new(1))
            .unwrap_or(date)
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();

        Entity::find()
            .filter(Column::CreatedAt.gte(start))
            .filter(Column::CreatedAt.lt(end))
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to count chat messages for {}: {}", date, e);
                CoreError::Storage(format!("failed to count chat messages: {e}"))
            })
    }

    async fn mark_retryable(&self, id: Uuid) -> Result<(), CoreError> {
        let model = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to look up chat message: {}", e);
                CoreError::Storage(format!("failed to look up chat message: {e}"))
            })?
            .ok_or_else(|| CoreError::DataNotFound(format!("chat message {id}")))?;

        let mut active: ActiveModel = model.into();
        active.retryable = Set(true);
        Entity::update(active).exec(&self.db).await.map_err(|e| {
            error!("Failed to flag chat message: {}", e);
            CoreError::Storage(format!("failed to flag chat message: {e}"))
        })?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete chat message: {}", e);
                CoreError::Storage(format!("failed to delete chat message: {e}"))
            })?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        Entity::delete_many().exec(&self.db).await.map_err(|e| {
            error!("Failed to clear chat history: {}", e);
            CoreError::Storage(format!("failed to clear chat history: {e}"))
        })?;

        Ok(())
    }
}
