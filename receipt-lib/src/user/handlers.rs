use crate::error::HandlerError;
use crate::identity::UserId;
use actix_web::{web, HttpResponse, Responder};
use receipt_repo::user_repo::{NewUser, User, UserRepo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The identity layer hashes the password before it reaches this service;
/// only the hash ever crosses the wire here.
#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password_hash: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
        }
    }
}

#[post("/signup")]
pub async fn signup(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    signup_request: web::Json<SignupRequest>,
) -> Result<impl Responder, HandlerError> {
    let signup_request = signup_request.into_inner();
    let user = user_repo
        .create_user(NewUser::new(
            signup_request.username,
            signup_request.password_hash,
        ))
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("")]
pub async fn delete_user(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    user_repo.delete_user(*user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
