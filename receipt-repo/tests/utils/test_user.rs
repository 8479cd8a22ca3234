use receipt_repo::user_repo::{NewUser, UserRepo};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct TestUser {
    pub id: i32,
    repo: Arc<dyn UserRepo>,
}

impl TestUser {
    pub async fn new(user_repo: &Arc<dyn UserRepo>) -> TestUser {
        let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
        let user = user_repo
            .create_user(NewUser::new(username.clone(), "not a real hash".to_owned()))
            .await
            .unwrap();
        info!(%username, "Created user");
        TestUser {
            id: user.id,
            repo: user_repo.clone(),
        }
    }

    pub async fn delete(&self) {
        self.repo.delete_user(self.id).await.unwrap()
    }
}
