//! User profile repository.
//!
//! Profiles are written once by the identity collaborator and read by
//! services that need a display name or mail address.

use crate::model::user::{UserId, UserProfile};
use crate::repo::{parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub trait UserRepository {
    fn create_user(&self, user: &UserProfile) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    /// Looks up a profile by mail address (case-insensitive).
    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<UserProfile>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &UserProfile) -> RepoResult<UserId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3);",
            params![user.id.to_string(), user.name.as_str(), user.email.as_str()],
        )?;

        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, email FROM users WHERE id = ?1;",
                [id.to_string()],
                read_user_columns,
            )
            .optional()?;

        row.map(parse_user).transpose()
    }

    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<UserProfile>> {
        let normalized = email.trim().to_ascii_lowercase();
        let row = self
            .conn
            .query_row(
                "SELECT id, name, email FROM users WHERE email = ?1;",
                [normalized],
                read_user_columns,
            )
            .optional()?;

        row.map(parse_user).transpose()
    }
}

fn read_user_columns(row: &Row<'_>) -> rusqlite::Result<(String, String, String)> {
    Ok((row.get("id")?, row.get("name")?, row.get("email")?))
}

fn parse_user((id, name, email): (String, String, String)) -> RepoResult<UserProfile> {
    let user = UserProfile {
        id: parse_uuid(&id, "users.id")?,
        name,
        email,
    };
    user.validate()?;
    Ok(user)
}
