use crate::mem_repo::SharedState;
use crate::user_repo::{NewUser, User, UserRepo, UserRepoError};
use async_trait::async_trait;

pub struct MemUserRepo {
    state: SharedState,
}

impl MemUserRepo {
    pub fn new(state: SharedState) -> MemUserRepo {
        MemUserRepo { state }
    }
}

#[async_trait]
impl UserRepo for MemUserRepo {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard
            .users
            .values()
            .any(|u| u.username == new_user.username)
        {
            return Err(UserRepoError::UsernameTaken(new_user.username));
        }

        let id = write_guard.next_id();
        let user = User {
            id,
            username: new_user.username,
            password_hash: new_user.password_hash,
        };
        write_guard.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: i32) -> Result<User, UserRepoError> {
        let read_guard = self.state.read_lock()?;
        read_guard
            .users
            .get(&user_id)
            .cloned()
            .ok_or(UserRepoError::UserNotFound(user_id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserRepoError> {
        let read_guard = self.state.read_lock()?;
        Ok(read_guard
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard.users.remove(&user_id).is_none() {
            return Err(UserRepoError::UserNotFound(user_id));
        }

        // Receipts go with their owner, dependents included.
        let receipt_ids: Vec<i32> = write_guard
            .receipts
            .iter()
            .filter(|(_, record)| record.user_id == user_id)
            .map(|(id, _)| *id)
            .collect();
        for receipt_id in receipt_ids {
            write_guard.receipts.remove(&receipt_id);
            write_guard.receipt_tags.remove(&receipt_id);
            write_guard.receipt_items.remove(&receipt_id);
        }
        Ok(())
    }
}
