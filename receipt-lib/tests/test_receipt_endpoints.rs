use std::str::FromStr;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::App;
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::json;

use receipt_lib::identity::IdentityRequired;
use receipt_repo::catalog_repo::{NewCategory, NewPaymentMethod, Tag};
use receipt_repo::receipt_repo::{NewReceipt, Receipt};
use utils::repos;
use utils::tracing_setup;
use utils::Repos;
use utils::TestUser;

#[macro_use]
mod utils;

async fn setup_refs(repos: &Repos) -> (i32, i32) {
    let category = repos
        .1
        .create_category(NewCategory {
            name: "Groceries".to_owned(),
            description: None,
        })
        .await
        .unwrap();
    let payment_method = repos
        .1
        .create_payment_method(NewPaymentMethod {
            name: "Card".to_owned(),
            description: None,
        })
        .await
        .unwrap();
    (category.id, payment_method.id)
}

#[rstest]
#[actix_rt::test]
async fn test_create_and_get_receipt_api(_tracing_setup: &(), repos: Repos) {
    let test_user = TestUser::new(&repos.0).await;
    let (category_id, payment_method_id) = setup_refs(&repos).await;
    let service = test::init_service(build_app!(repos)).await;

    let new_receipt = NewReceipt {
        filename: None,
        description: "weekly shop".to_owned(),
        amount: Decimal::new(4599, 2),
        date: NaiveDate::from_str("2024-02-10").unwrap(),
        category_id,
        vendor_id: None,
        payment_method_id,
    };
    let request = authed_request!(post, "/receipts", test_user.id)
        .set_json(&new_receipt)
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(
        response.status().is_success(),
        "Got {} response when creating receipt",
        response.status()
    );
    let created: Receipt = test::read_body_json(response).await;
    assert_eq!(created.description, new_receipt.description);
    assert_eq!(created.amount, new_receipt.amount);

    let request = authed_request!(get, &format!("/receipts/{}", created.id), test_user.id)
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let fetched: Receipt = test::read_body_json(response).await;
    assert_eq!(fetched, created);
}

#[rstest]
#[actix_rt::test]
async fn test_request_without_identity(_tracing_setup: &(), repos: Repos) {
    let service = test::init_service(build_app!(repos)).await;

    let request = TestRequest::get().uri("/receipts").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_rt::test]
async fn test_get_other_users_receipt_api(_tracing_setup: &(), repos: Repos) {
    let user1 = TestUser::new(&repos.0).await;
    let user2 = TestUser::new(&repos.0).await;
    let (category_id, payment_method_id) = setup_refs(&repos).await;
    let receipt_repo = repos.2.clone();
    let service = test::init_service(build_app!(repos)).await;

    let receipt = receipt_repo
        .create_receipt(
            user1.id,
            NewReceipt {
                filename: None,
                description: "mine".to_owned(),
                amount: Decimal::from(10),
                date: NaiveDate::from_str("2024-02-10").unwrap(),
                category_id,
                vendor_id: None,
                payment_method_id,
            },
        )
        .await
        .unwrap();

    let request = authed_request!(get, &format!("/receipts/{}", receipt.id), user2.id)
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_rt::test]
async fn test_tag_endpoints(_tracing_setup: &(), repos: Repos) {
    let test_user = TestUser::new(&repos.0).await;
    let (category_id, payment_method_id) = setup_refs(&repos).await;
    let catalog_repo = repos.1.clone();
    let receipt_repo = repos.2.clone();
    let service = test::init_service(build_app!(repos)).await;

    let tag_b = catalog_repo.create_tag("groceries".to_owned()).await.unwrap();
    let tag_a = catalog_repo.create_tag("essentials".to_owned()).await.unwrap();
    let receipt = receipt_repo
        .create_receipt(
            test_user.id,
            NewReceipt {
                filename: None,
                description: "tagged".to_owned(),
                amount: Decimal::from(10),
                date: NaiveDate::from_str("2024-02-10").unwrap(),
                category_id,
                vendor_id: None,
                payment_method_id,
            },
        )
        .await
        .unwrap();

    let request = authed_request!(post, &format!("/receipts/{}/tags", receipt.id), test_user.id)
        .set_json(json!({ "tag_ids": [tag_b.id, tag_a.id] }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());

    let request = authed_request!(get, &format!("/receipts/{}/tags", receipt.id), test_user.id)
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let tags: Vec<Tag> = test::read_body_json(response).await;
    // Ordered by name: "essentials" before "groceries".
    assert_eq!(
        tags.iter().map(|t| t.id).collect::<Vec<i32>>(),
        vec![tag_a.id, tag_b.id]
    );

    let request = authed_request!(put, &format!("/receipts/{}/tags", receipt.id), test_user.id)
        .set_json(json!({ "tag_ids": [] }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());

    let request = authed_request!(get, &format!("/receipts/{}/tags", receipt.id), test_user.id)
        .to_request();
    let response = test::call_service(&service, request).await;
    let tags: Vec<Tag> = test::read_body_json(response).await;
    assert!(tags.is_empty());
}

#[rstest]
#[actix_rt::test]
async fn test_signup_api(_tracing_setup: &(), repos: Repos) {
    let service = test::init_service(build_app!(repos)).await;

    let request = TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "username": "alice", "password_hash": "hash" }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body.get("password_hash").is_none());

    // Same username again conflicts.
    let request = TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "username": "alice", "password_hash": "hash" }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[rstest]
#[actix_rt::test]
async fn test_signups_disabled(_tracing_setup: &(), repos: Repos) {
    let (user_repo, catalog_repo, receipt_repo, report_repo) = repos;
    let app = App::new()
        .app_data(Data::new(user_repo))
        .app_data(Data::new(catalog_repo))
        .app_data(Data::new(receipt_repo))
        .app_data(Data::new(report_repo))
        .service(receipt_lib::user::auth_service(false));
    let service = test::init_service(app).await;

    let request = TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "username": "bob", "password_hash": "hash" }))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
