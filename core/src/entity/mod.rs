pub mod chat_messages;
pub mod meals;
pub mod user_profiles;
