pub mod analysis;
pub mod chat;
pub mod common;
pub mod food;
pub mod nutrition;
pub mod user;
