//! User profile registration and lookup.
//!
//! Credentials live with the identity collaborator; this service only keeps
//! the display name and mail address the digest needs.

use crate::model::user::{UserId, UserProfile};
use crate::repo::user_repo::UserRepository;
use crate::service::ServiceError;
use log::info;

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a profile. Mail addresses are unique case-insensitively.
    pub fn register(&self, name: &str, email: &str) -> Result<UserProfile, ServiceError> {
        let user = UserProfile::new(name, email);
        user.validate()?;

        if self.repo.find_user_by_email(&user.email)?.is_some() {
            info!("event=user_register module=service status=conflict");
            return Err(ServiceError::AlreadyExists("user email"));
        }

        self.repo.create_user(&user)?;
        info!("event=user_register module=service status=ok");
        Ok(user)
    }

    pub fn get_user(&self, id: UserId) -> Result<UserProfile, ServiceError> {
        self.repo.get_user(id)?.ok_or(ServiceError::NotFound(id))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, ServiceError> {
        Ok(self.repo.find_user_by_email(email)?)
    }
}
