use super::{ReceiptQuery, TagIds};
use crate::error::HandlerError;
use crate::identity::UserId;
use actix_web::{web, HttpResponse, Responder};
use receipt_repo::receipt_repo::{NewReceipt, NewReceiptItem, ReceiptRepo, ReceiptUpdate};
use std::sync::Arc;

#[get("")]
pub async fn get_all_receipts(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    query: web::Query<ReceiptQuery>,
) -> Result<impl Responder, HandlerError> {
    let receipts = receipt_repo
        .get_all_receipts(*user_id, query.filter(), query.page_options())
        .await?;
    Ok(HttpResponse::Ok().json(receipts))
}

#[post("")]
pub async fn create_receipt(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    new_receipt: web::Json<NewReceipt>,
) -> Result<impl Responder, HandlerError> {
    let receipt = receipt_repo
        .create_receipt(*user_id, new_receipt.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[get("/{receipt_id}")]
pub async fn get_receipt(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let receipt = receipt_repo
        .get_receipt(*user_id, receipt_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[put("/{receipt_id}")]
pub async fn update_receipt(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
    updated_receipt: web::Json<ReceiptUpdate>,
) -> Result<impl Responder, HandlerError> {
    let receipt = receipt_repo
        .update_receipt(*user_id, receipt_id.into_inner(), updated_receipt.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[delete("/{receipt_id}")]
pub async fn delete_receipt(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let receipt = receipt_repo
        .delete_receipt(*user_id, receipt_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[get("/{receipt_id}/tags")]
pub async fn get_receipt_tags(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let tags = receipt_repo
        .get_tags(*user_id, receipt_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(tags))
}

#[post("/{receipt_id}/tags")]
pub async fn add_receipt_tags(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
    tag_ids: web::Json<TagIds>,
) -> Result<impl Responder, HandlerError> {
    receipt_repo
        .add_tags(*user_id, receipt_id.into_inner(), &tag_ids.tag_ids)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/{receipt_id}/tags")]
pub async fn replace_receipt_tags(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
    tag_ids: web::Json<TagIds>,
) -> Result<impl Responder, HandlerError> {
    receipt_repo
        .replace_tags(*user_id, receipt_id.into_inner(), &tag_ids.tag_ids)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/{receipt_id}/items")]
pub async fn get_receipt_items(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let items = receipt_repo
        .get_items(*user_id, receipt_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/{receipt_id}/items")]
pub async fn add_receipt_items(
    receipt_repo: web::Data<Arc<dyn ReceiptRepo>>,
    user_id: web::ReqData<UserId>,
    receipt_id: web::Path<i32>,
    new_items: web::Json<Vec<NewReceiptItem>>,
) -> Result<impl Responder, HandlerError> {
    let items = receipt_repo
        .add_items(*user_id, receipt_id.into_inner(), new_items.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(items))
}
