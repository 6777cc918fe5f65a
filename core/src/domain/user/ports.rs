use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    user::{entities::UserProfile, value_objects::UpdateProfileInput},
};

/// Repository trait for the single stored user profile
#[cfg_attr(test, mockall::automock)]
pub trait UserProfileRepository: Send + Sync {
    fn get_profile(&self) -> impl Future<Output = Result<Option<UserProfile>, CoreError>> + Send;

    fn save_profile(
        &self,
        profile: UserProfile,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;
}

/// Service trait for profile reads and explicit profile saves
pub trait UserService: Send + Sync {
    fn get_profile(&self) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;

    fn save_profile(
        &self,
        input: UpdateProfileInput,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;
}
