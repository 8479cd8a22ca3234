use crate::catalog_repo::Tag;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::cmp::Ordering::Equal;
use thiserror::Error;

#[derive(Debug)]
pub struct PageOptions {
    pub offset: i64,
    pub limit: i64,
}

impl PageOptions {
    pub const fn new(offset: i64, limit: i64) -> PageOptions {
        PageOptions { offset, limit }
    }
}

#[derive(Debug, Default)]
pub struct Filter {
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub category_id: Option<i32>,
    pub vendor_id: Option<i32>,
}

impl Filter {
    pub const NONE: Filter = Filter {
        from: None,
        until: None,
        category_id: None,
        vendor_id: None,
    };
}

/// Receipts are owned by exactly one user. Every operation takes the owning
/// user's id and only touches that user's rows; an id that resolves to
/// another user's receipt behaves exactly like a nonexistent one.
#[async_trait]
pub trait ReceiptRepo: Sync + Send {
    async fn get_receipt(&self, user_id: i32, receipt_id: i32)
        -> Result<Receipt, ReceiptRepoError>;

    async fn get_all_receipts(
        &self,
        user_id: i32,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Receipt>, ReceiptRepoError>;

    async fn create_receipt(
        &self,
        user_id: i32,
        new_receipt: NewReceipt,
    ) -> Result<Receipt, ReceiptRepoError>;

    async fn update_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
        updated_receipt: ReceiptUpdate,
    ) -> Result<Receipt, ReceiptRepoError>;

    /// Removes the receipt together with its tag associations and line items
    /// in a single transaction.
    async fn delete_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Receipt, ReceiptRepoError>;

    /// Adds tag associations. Pairs that already exist are left as-is.
    async fn add_tags(
        &self,
        user_id: i32,
        receipt_id: i32,
        tag_ids: &[i32],
    ) -> Result<(), ReceiptRepoError>;

    /// Replaces the receipt's tag set so that it equals exactly `tag_ids`.
    /// The delete and inserts commit atomically; readers never observe a
    /// partial state.
    async fn replace_tags(
        &self,
        user_id: i32,
        receipt_id: i32,
        tag_ids: &[i32],
    ) -> Result<(), ReceiptRepoError>;

    /// Tags associated with the receipt, ordered by name.
    async fn get_tags(&self, user_id: i32, receipt_id: i32) -> Result<Vec<Tag>, ReceiptRepoError>;

    async fn add_items(
        &self,
        user_id: i32,
        receipt_id: i32,
        new_items: Vec<NewReceiptItem>,
    ) -> Result<Vec<ReceiptItem>, ReceiptRepoError>;

    /// Line items of the receipt, ordered by id.
    async fn get_items(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Vec<ReceiptItem>, ReceiptRepoError>;
}

#[derive(Error, Debug)]
pub enum ReceiptRepoError {
    #[error("Receipt with id {0} not found")]
    ReceiptNotFound(i32),
    #[error("Referenced {0} does not exist")]
    MissingReference(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Receipt {
    pub id: i32,
    pub filename: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i32,
    pub vendor_id: Option<i32>,
    pub payment_method_id: i32,
}

impl PartialOrd for Receipt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Receipt {
    fn cmp(&self, other: &Self) -> Ordering {
        let date_ordering = self.date.cmp(&other.date);
        if let Equal = date_ordering {
            self.id.cmp(&other.id)
        } else {
            date_ordering
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct NewReceipt {
    pub filename: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i32,
    pub vendor_id: Option<i32>,
    pub payment_method_id: i32,
}

impl NewReceipt {
    pub fn to_receipt(&self, id: i32) -> Receipt {
        Receipt {
            id,
            filename: self.filename.clone(),
            description: self.description.clone(),
            amount: self.amount,
            date: self.date,
            category_id: self.category_id,
            vendor_id: self.vendor_id,
            payment_method_id: self.payment_method_id,
        }
    }
}

/// Whole-row replacement of the editable columns. The stored-file reference
/// is set at creation and never changes afterwards.
#[derive(Serialize, Deserialize, Clone)]
pub struct ReceiptUpdate {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i32,
    pub vendor_id: Option<i32>,
    pub payment_method_id: i32,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ReceiptItem {
    pub id: i32,
    pub item_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct NewReceiptItem {
    pub item_name: String,
    pub quantity: i32,
    pub price: Decimal,
}
