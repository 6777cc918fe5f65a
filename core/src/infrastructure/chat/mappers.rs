use crate::{domain::chat::entities::ChatMessage, entity::chat_messages};

impl From<&chat_messages::Model> for ChatMessage {
    fn from(model: &chat_messages::Model) -> Self {
        Self {
            id: model.id,
            role: model.role.as_str().into(),
            content: model.content.clone(),
            image_path: model.image_path.clone(),
            retryable: model.retryable,
            created_at: model.created_at,
        }
    }
}

impl From<chat_messages::Model> for ChatMessage {
    fn from(model: chat_messages::Model) -> Self {
        Self::from(&model)
    }
}
