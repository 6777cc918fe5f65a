pub mod chat_message_repository;

pub use chat_message_repository::SqliteChatMessageRepository;
