use crate::sqlx_repo::is_unique_violation;
use crate::user_repo::{NewUser, User, UserRepo, UserRepoError};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;

pub struct SQLxUserRepo {
    pool: Pool<Postgres>,
}

impl SQLxUserRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxUserRepo {
        SQLxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepo for SQLxUserRepo {
    #[instrument(skip(self, new_user))]
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let id: i32 =
            sqlx::query_scalar("INSERT INTO users(username, password_hash) VALUES ($1, $2) RETURNING id")
                .bind(&new_user.username)
                .bind(&new_user.password_hash)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        UserRepoError::UsernameTaken(new_user.username.clone())
                    } else {
                        UserRepoError::Other(
                            anyhow::Error::new(e)
                                .context(format!("Unable to create user {}", new_user.username)),
                        )
                    }
                })?;
        Ok(User {
            id,
            username: new_user.username,
            password_hash: new_user.password_hash,
        })
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: i32) -> Result<User, UserRepoError> {
        let user: Option<(i32, String, String)> =
            sqlx::query_as("SELECT id, username, password_hash FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get user {}", user_id))?;
        user.map(|(id, username, password_hash)| User {
            id,
            username,
            password_hash,
        })
        .ok_or(UserRepoError::UserNotFound(user_id))
    }

    #[instrument(skip(self))]
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserRepoError> {
        let user: Option<(i32, String, String)> =
            sqlx::query_as("SELECT id, username, password_hash FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get user {}", username))?;
        Ok(user.map(|(id, username, password_hash)| User {
            id,
            username,
            password_hash,
        }))
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete user {}", user_id))?;
        if result.rows_affected() == 0 {
            Err(UserRepoError::UserNotFound(user_id))
        } else {
            Ok(())
        }
    }
}
