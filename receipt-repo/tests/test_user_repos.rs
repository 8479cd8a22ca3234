mod utils;

use receipt_repo::user_repo::{NewUser, UserRepoError};
use rstest::rstest;
use utils::RepoType;
use uuid::Uuid;

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_create_and_get_user(#[case] repo_type: RepoType) {
    let Some((user_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        return;
    };

    let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    let user = user_repo
        .create_user(NewUser::new(username.clone(), "hash".to_owned()))
        .await
        .unwrap();
    assert_eq!(user.username, username);

    let stored_user = user_repo.get_user(user.id).await.unwrap();
    assert_eq!(stored_user.id, user.id);
    assert_eq!(stored_user.username, username);
    assert_eq!(stored_user.password_hash, "hash");

    user_repo.delete_user(user.id).await.unwrap();
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_get_user_by_username(#[case] repo_type: RepoType) {
    let Some((user_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        return;
    };

    let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    let user = user_repo
        .create_user(NewUser::new(username.clone(), "hash".to_owned()))
        .await
        .unwrap();

    let found = user_repo.get_user_by_username(&username).await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    user_repo.delete_user(user.id).await.unwrap();
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_get_unknown_username(#[case] repo_type: RepoType) {
    let Some((user_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        return;
    };

    let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    let found = user_repo.get_user_by_username(&username).await.unwrap();
    assert!(found.is_none());
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_duplicate_username(#[case] repo_type: RepoType) {
    let Some((user_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        return;
    };

    let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    let user = user_repo
        .create_user(NewUser::new(username.clone(), "hash".to_owned()))
        .await
        .unwrap();

    let result = user_repo
        .create_user(NewUser::new(username.clone(), "other hash".to_owned()))
        .await;
    assert!(matches!(result, Err(UserRepoError::UsernameTaken(name)) if name == username));

    user_repo.delete_user(user.id).await.unwrap();
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_delete_user(#[case] repo_type: RepoType) {
    let Some((user_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        return;
    };

    let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    let user = user_repo
        .create_user(NewUser::new(username, "hash".to_owned()))
        .await
        .unwrap();

    user_repo.delete_user(user.id).await.unwrap();

    let result = user_repo.get_user(user.id).await;
    assert!(matches!(result, Err(UserRepoError::UserNotFound(id)) if id == user.id));
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_delete_unknown_user(#[case] repo_type: RepoType) {
    let Some((user_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        return;
    };

    let result = user_repo.delete_user(-1).await;
    assert!(result.is_err());
}
