use async_trait::async_trait;
use thiserror::Error;

#[async_trait]
pub trait UserRepo: Sync + Send {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError>;

    async fn get_user(&self, user_id: i32) -> Result<User, UserRepoError>;

    /// Lookup used by the identity layer in front of the service. Misses are
    /// common there, so they are not an error.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserRepoError>;

    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepoError>;
}

#[derive(Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: String, password_hash: String) -> NewUser {
        NewUser {
            username,
            password_hash,
        }
    }
}

#[derive(Error, Debug)]
pub enum UserRepoError {
    #[error("User with id {0} not found")]
    UserNotFound(i32),
    #[error("Username {0} is already taken")]
    UsernameTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
