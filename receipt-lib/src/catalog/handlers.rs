use crate::error::HandlerError;
use actix_web::{web, HttpResponse, Responder};
use receipt_repo::catalog_repo::{CatalogRepo, NewCategory, NewPaymentMethod, NewVendor};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct NewTag {
    pub name: String,
}

#[get("")]
pub async fn get_categories(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
) -> Result<impl Responder, HandlerError> {
    let categories = catalog_repo.get_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("")]
pub async fn create_category(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    new_category: web::Json<NewCategory>,
) -> Result<impl Responder, HandlerError> {
    let category = catalog_repo
        .create_category(new_category.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/{category_id}")]
pub async fn delete_category(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    category_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    catalog_repo
        .delete_category(category_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("")]
pub async fn get_vendors(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
) -> Result<impl Responder, HandlerError> {
    let vendors = catalog_repo.get_vendors().await?;
    Ok(HttpResponse::Ok().json(vendors))
}

#[post("")]
pub async fn create_vendor(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    new_vendor: web::Json<NewVendor>,
) -> Result<impl Responder, HandlerError> {
    let vendor = catalog_repo.create_vendor(new_vendor.into_inner()).await?;
    Ok(HttpResponse::Ok().json(vendor))
}

#[delete("/{vendor_id}")]
pub async fn delete_vendor(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    vendor_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    catalog_repo.delete_vendor(vendor_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("")]
pub async fn get_payment_methods(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
) -> Result<impl Responder, HandlerError> {
    let payment_methods = catalog_repo.get_payment_methods().await?;
    Ok(HttpResponse::Ok().json(payment_methods))
}

#[post("")]
pub async fn create_payment_method(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    new_payment_method: web::Json<NewPaymentMethod>,
) -> Result<impl Responder, HandlerError> {
    let payment_method = catalog_repo
        .create_payment_method(new_payment_method.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(payment_method))
}

#[delete("/{payment_method_id}")]
pub async fn delete_payment_method(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    payment_method_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    catalog_repo
        .delete_payment_method(payment_method_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("")]
pub async fn get_tags(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
) -> Result<impl Responder, HandlerError> {
    let tags = catalog_repo.get_tags().await?;
    Ok(HttpResponse::Ok().json(tags))
}

#[post("")]
pub async fn create_tag(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    new_tag: web::Json<NewTag>,
) -> Result<impl Responder, HandlerError> {
    let tag = catalog_repo.create_tag(new_tag.into_inner().name).await?;
    Ok(HttpResponse::Ok().json(tag))
}

#[delete("/{tag_id}")]
pub async fn delete_tag(
    catalog_repo: web::Data<Arc<dyn CatalogRepo>>,
    tag_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    catalog_repo.delete_tag(tag_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
