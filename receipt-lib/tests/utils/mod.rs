use receipt_repo::catalog_repo::CatalogRepo;
use receipt_repo::receipt_repo::ReceiptRepo;
use receipt_repo::report_repo::ReportRepo;
use receipt_repo::user_repo::{NewUser, UserRepo};
use rstest::*;
use std::sync::Arc;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

pub type Repos = (
    Arc<dyn UserRepo>,
    Arc<dyn CatalogRepo>,
    Arc<dyn ReceiptRepo>,
    Arc<dyn ReportRepo>,
);

/// Builds the app the way the server wires it, with the identity middleware
/// in front of every user-scoped service.
macro_rules! build_app {
    ($repos:expr) => {{
        let (user_repo, catalog_repo, receipt_repo, report_repo) = $repos;
        App::new()
            .app_data(Data::new(user_repo))
            .app_data(Data::new(catalog_repo))
            .app_data(Data::new(receipt_repo))
            .app_data(Data::new(report_repo))
            .wrap(receipt_lib::tracing::create_middleware())
            .service(receipt_lib::receipt::receipt_service().wrap(IdentityRequired))
            .service(receipt_lib::report::report_service().wrap(IdentityRequired))
            .service(receipt_lib::catalog::tag_service().wrap(IdentityRequired))
            .service(receipt_lib::user::auth_service(true))
    }};
}

/// `TestRequest` with the header the fronting identity layer would have set.
macro_rules! authed_request {
    ($method:ident, $uri:expr, $user_id:expr) => {{
        TestRequest::$method()
            .uri($uri)
            .insert_header((receipt_lib::identity::AUTH_USER_HEADER, $user_id.to_string()))
    }};
}

pub struct TestUser {
    pub id: i32,
}

impl TestUser {
    pub async fn new(user_repo: &Arc<dyn UserRepo>) -> TestUser {
        let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
        let user = user_repo
            .create_user(NewUser::new(username.clone(), "not a real hash".to_owned()))
            .await
            .unwrap();
        info!(%username, "Created user");
        TestUser { id: user.id }
    }
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos() -> Repos {
    receipt_repo::mem_repo::create_repos()
}
