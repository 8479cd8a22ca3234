use super::ReportRange;
use crate::error::HandlerError;
use crate::identity::UserId;
use actix_web::{web, HttpResponse, Responder};
use receipt_repo::report_repo::ReportRepo;
use std::sync::Arc;

#[get("/spending-by-category")]
pub async fn spending_by_category(
    report_repo: web::Data<Arc<dyn ReportRepo>>,
    user_id: web::ReqData<UserId>,
    range: web::Query<ReportRange>,
) -> Result<impl Responder, HandlerError> {
    let totals = report_repo
        .spending_by_category(*user_id, range.start_date, range.end_date)
        .await?;
    Ok(HttpResponse::Ok().json(totals))
}

#[get("/spending-by-vendor")]
pub async fn spending_by_vendor(
    report_repo: web::Data<Arc<dyn ReportRepo>>,
    user_id: web::ReqData<UserId>,
    range: web::Query<ReportRange>,
) -> Result<impl Responder, HandlerError> {
    let totals = report_repo
        .spending_by_vendor(*user_id, range.start_date, range.end_date)
        .await?;
    Ok(HttpResponse::Ok().json(totals))
}

#[get("/total-spending")]
pub async fn total_spending(
    report_repo: web::Data<Arc<dyn ReportRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let total = report_repo.total_spending(*user_id).await?;
    Ok(HttpResponse::Ok().json(total))
}

#[get("/most-used-category")]
pub async fn most_used_category(
    report_repo: web::Data<Arc<dyn ReportRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let usage = report_repo.most_used_category(*user_id).await?;
    Ok(HttpResponse::Ok().json(usage))
}
