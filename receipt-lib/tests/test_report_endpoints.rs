use std::str::FromStr;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::App;
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;

use receipt_lib::identity::IdentityRequired;
use receipt_repo::catalog_repo::{NewCategory, NewPaymentMethod};
use receipt_repo::receipt_repo::NewReceipt;
use receipt_repo::report_repo::SpendingTotal;
use utils::repos;
use utils::tracing_setup;
use utils::Repos;
use utils::TestUser;

#[macro_use]
mod utils;

async fn add_receipt(
    repos: &Repos,
    user_id: i32,
    category_id: i32,
    payment_method_id: i32,
    date: &str,
    amount: Decimal,
) {
    repos
        .2
        .create_receipt(
            user_id,
            NewReceipt {
                filename: None,
                description: "spending".to_owned(),
                amount,
                date: NaiveDate::from_str(date).unwrap(),
                category_id,
                vendor_id: None,
                payment_method_id,
            },
        )
        .await
        .unwrap();
}

#[rstest]
#[actix_rt::test]
async fn test_spending_by_category_api(_tracing_setup: &(), repos: Repos) {
    let test_user = TestUser::new(&repos.0).await;

    let groceries = repos
        .1
        .create_category(NewCategory {
            name: "Groceries".to_owned(),
            description: None,
        })
        .await
        .unwrap();
    let fuel = repos
        .1
        .create_category(NewCategory {
            name: "Fuel".to_owned(),
            description: None,
        })
        .await
        .unwrap();
    let card = repos
        .1
        .create_payment_method(NewPaymentMethod {
            name: "Card".to_owned(),
            description: None,
        })
        .await
        .unwrap();

    add_receipt(
        &repos,
        test_user.id,
        groceries.id,
        card.id,
        "2024-01-05",
        Decimal::new(5000, 2),
    )
    .await;
    add_receipt(
        &repos,
        test_user.id,
        fuel.id,
        card.id,
        "2024-01-10",
        Decimal::new(3000, 2),
    )
    .await;

    let service = test::init_service(build_app!(repos)).await;

    let request = authed_request!(
        get,
        "/reports/spending-by-category?start_date=2024-01-01&end_date=2024-01-31",
        test_user.id
    )
    .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let totals: Vec<SpendingTotal> = test::read_body_json(response).await;
    assert_eq!(
        totals,
        vec![
            SpendingTotal::new("Groceries".to_owned(), Decimal::new(5000, 2)),
            SpendingTotal::new("Fuel".to_owned(), Decimal::new(3000, 2)),
        ]
    );
}

#[rstest]
#[actix_rt::test]
async fn test_invalid_range_api(_tracing_setup: &(), repos: Repos) {
    let test_user = TestUser::new(&repos.0).await;
    let service = test::init_service(build_app!(repos)).await;

    let request = authed_request!(
        get,
        "/reports/spending-by-category?start_date=2024-02-01&end_date=2024-01-01",
        test_user.id
    )
    .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_rt::test]
async fn test_total_spending_api(_tracing_setup: &(), repos: Repos) {
    let test_user = TestUser::new(&repos.0).await;
    let service = test::init_service(build_app!(repos)).await;

    let request = authed_request!(get, "/reports/total-spending", test_user.id).to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let total: Decimal = test::read_body_json(response).await;
    assert_eq!(total, Decimal::ZERO);
}
