pub mod chat;
pub mod db;
pub mod food;
pub mod user;
pub mod webhook;
