use actix_web::{web, Scope};
use chrono::NaiveDate;
use serde::Deserialize;

mod handlers;

pub fn report_service() -> Scope {
    web::scope("/reports")
        .service(handlers::spending_by_category)
        .service(handlers::spending_by_vendor)
        .service(handlers::total_spending)
        .service(handlers::most_used_category)
}

/// Inclusive date range for report queries.
#[derive(Deserialize)]
pub struct ReportRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
