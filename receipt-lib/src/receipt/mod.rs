use actix_web::{web, Scope};
use chrono::NaiveDate;
use receipt_repo::receipt_repo::{Filter, PageOptions};
use serde::{Deserialize, Serialize};

mod handlers;

pub fn receipt_service() -> Scope {
    web::scope("/receipts")
        .service(handlers::get_all_receipts)
        .service(handlers::create_receipt)
        .service(handlers::get_receipt)
        .service(handlers::update_receipt)
        .service(handlers::delete_receipt)
        .service(handlers::get_receipt_tags)
        .service(handlers::add_receipt_tags)
        .service(handlers::replace_receipt_tags)
        .service(handlers::get_receipt_items)
        .service(handlers::add_receipt_items)
}

#[derive(Deserialize)]
pub struct ReceiptQuery {
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub category_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ReceiptQuery {
    fn filter(&self) -> Filter {
        Filter {
            from: self.from,
            until: self.until,
            category_id: self.category_id,
            vendor_id: self.vendor_id,
        }
    }

    fn page_options(&self) -> Option<PageOptions> {
        self.limit
            .map(|limit| PageOptions::new(self.offset.unwrap_or(0), limit))
    }
}

#[derive(Serialize, Deserialize)]
pub struct TagIds {
    pub tag_ids: Vec<i32>,
}
