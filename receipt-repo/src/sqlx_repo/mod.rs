mod catalog_repo;
mod receipt_repo;
mod report_repo;
mod user_repo;

use crate::catalog_repo::CatalogRepo;
use crate::receipt_repo::ReceiptRepo;
use crate::report_repo::ReportRepo;
use crate::sqlx_repo::catalog_repo::SQLxCatalogRepo;
use crate::sqlx_repo::receipt_repo::SQLxReceiptRepo;
use crate::sqlx_repo::report_repo::SQLxReportRepo;
use crate::sqlx_repo::user_repo::SQLxUserRepo;
use crate::user_repo::UserRepo;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the pooled Postgres backend. The pool is owned by the returned
/// repos; dropping all of them closes the connections.
pub async fn create_repos(
    database_url: String,
    max_pool_size: u32,
) -> Result<
    (
        Arc<dyn UserRepo>,
        Arc<dyn CatalogRepo>,
        Arc<dyn ReceiptRepo>,
        Arc<dyn ReportRepo>,
    ),
    anyhow::Error,
> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&database_url)
        .await
        .context("Unable to connect to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Unable to run migrations")?;

    let user_repo = SQLxUserRepo::new(pool.clone());
    let catalog_repo = SQLxCatalogRepo::new(pool.clone());
    let receipt_repo = SQLxReceiptRepo::new(pool.clone());
    let report_repo = SQLxReportRepo::new(pool);
    Ok((
        Arc::new(user_repo),
        Arc::new(catalog_repo),
        Arc::new(receipt_repo),
        Arc::new(report_repo),
    ))
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map_or(false, |code| code == "23505")
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map_or(false, |code| code == "23503")
}

pub(crate) fn violated_constraint(e: &sqlx::Error) -> Option<&str> {
    e.as_database_error().and_then(|d| d.constraint())
}
