pub mod user_profile_repository;

pub use user_profile_repository::SqliteUserProfileRepository;
