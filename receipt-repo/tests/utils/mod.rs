use receipt_repo::catalog_repo::{
    CatalogRepo, Category, NewCategory, NewPaymentMethod, NewVendor, PaymentMethod, Tag, Vendor,
};
use receipt_repo::receipt_repo::ReceiptRepo;
use receipt_repo::report_repo::ReportRepo;
use receipt_repo::user_repo::UserRepo;
use std::env;
use std::sync::Arc;
use uuid::Uuid;

pub mod generator;
pub mod test_user;

pub type Repos = (
    Arc<dyn UserRepo>,
    Arc<dyn CatalogRepo>,
    Arc<dyn ReceiptRepo>,
    Arc<dyn ReportRepo>,
);

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

/// Postgres cases need a database to talk to; without `TEST_DATABASE_URL`
/// they are skipped by returning `None`.
pub async fn build_repos(repo_type: RepoType) -> Option<Repos> {
    match repo_type {
        RepoType::SQLx => {
            let Ok(database_url) = env::var("TEST_DATABASE_URL") else {
                return None;
            };
            Some(
                receipt_repo::sqlx_repo::create_repos(database_url, 1)
                    .await
                    .unwrap(),
            )
        }
        RepoType::Mem => Some(receipt_repo::mem_repo::create_repos()),
    }
}

/// Catalog rows are shared between users (and between test runs on the same
/// database), so every test works with names it alone uses.
#[allow(dead_code)]
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn create_category(catalog_repo: &Arc<dyn CatalogRepo>, prefix: &str) -> Category {
    catalog_repo
        .create_category(NewCategory {
            name: unique_name(prefix),
            description: None,
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_vendor(catalog_repo: &Arc<dyn CatalogRepo>, prefix: &str) -> Vendor {
    catalog_repo
        .create_vendor(NewVendor {
            name: unique_name(prefix),
            address: None,
            phone: None,
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_payment_method(
    catalog_repo: &Arc<dyn CatalogRepo>,
    prefix: &str,
) -> PaymentMethod {
    catalog_repo
        .create_payment_method(NewPaymentMethod {
            name: unique_name(prefix),
            description: None,
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_tag(catalog_repo: &Arc<dyn CatalogRepo>, prefix: &str) -> Tag {
    catalog_repo.create_tag(unique_name(prefix)).await.unwrap()
}
