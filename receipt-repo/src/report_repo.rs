use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spending reports over a user's receipts. Ranges are inclusive on both
/// ends; amounts are summed with decimal arithmetic.
#[async_trait]
pub trait ReportRepo: Sync + Send {
    /// Totals grouped by category name, largest first. Ties are ordered by
    /// label so the output is deterministic. Categories with no matching
    /// receipts do not appear.
    async fn spending_by_category(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SpendingTotal>, ReportRepoError>;

    /// Totals grouped by vendor name, largest first. Receipts without a
    /// vendor are not counted.
    async fn spending_by_vendor(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SpendingTotal>, ReportRepoError>;

    /// Sum of every receipt amount the user has. Zero when there are none.
    async fn total_spending(&self, user_id: i32) -> Result<Decimal, ReportRepoError>;

    /// The category appearing on the most of the user's receipts. Ties go to
    /// the earliest-created category.
    async fn most_used_category(
        &self,
        user_id: i32,
    ) -> Result<Option<CategoryUsage>, ReportRepoError>;
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct SpendingTotal {
    pub label: String,
    pub total: Decimal,
}

impl SpendingTotal {
    pub fn new(label: String, total: Decimal) -> SpendingTotal {
        SpendingTotal { label, total }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct CategoryUsage {
    pub id: i32,
    pub name: String,
    pub receipt_count: i64,
}

#[derive(Error, Debug)]
pub enum ReportRepoError {
    #[error("Invalid date range: {start_date} is after {end_date}")]
    InvalidDateRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub(crate) fn check_range(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), ReportRepoError> {
    if start_date > end_date {
        return Err(ReportRepoError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}
