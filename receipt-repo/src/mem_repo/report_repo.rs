use crate::mem_repo::{SharedState, State};
use crate::receipt_repo::Receipt;
use crate::report_repo::{check_range, CategoryUsage, ReportRepo, ReportRepoError, SpendingTotal};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub struct MemReportRepo {
    state: SharedState,
}

impl MemReportRepo {
    pub fn new(state: SharedState) -> MemReportRepo {
        MemReportRepo { state }
    }

    fn sum_by_label<F>(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        label_of: F,
    ) -> Result<Vec<SpendingTotal>, ReportRepoError>
    where
        F: Fn(&State, &Receipt) -> Option<String>,
    {
        let read_guard = self.state.read_lock()?;

        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for record in read_guard.receipts.values() {
            if record.user_id != user_id {
                continue;
            }
            let receipt = &record.receipt;
            if receipt.date < start_date || receipt.date > end_date {
                continue;
            }
            let Some(label) = label_of(&read_guard, receipt) else {
                continue;
            };
            *totals.entry(label).or_insert(Decimal::ZERO) += receipt.amount;
        }

        let mut totals: Vec<SpendingTotal> = totals
            .into_iter()
            .map(|(label, total)| SpendingTotal::new(label, total))
            .collect();
        totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
        Ok(totals)
    }
}

#[async_trait]
impl ReportRepo for MemReportRepo {
    async fn spending_by_category(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SpendingTotal>, ReportRepoError> {
        check_range(start_date, end_date)?;
        self.sum_by_label(user_id, start_date, end_date, |state, receipt| {
            state
                .categories
                .get(&receipt.category_id)
                .map(|c| c.name.clone())
        })
    }

    async fn spending_by_vendor(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SpendingTotal>, ReportRepoError> {
        check_range(start_date, end_date)?;
        self.sum_by_label(user_id, start_date, end_date, |state, receipt| {
            receipt
                .vendor_id
                .and_then(|vendor_id| state.vendors.get(&vendor_id))
                .map(|v| v.name.clone())
        })
    }

    async fn total_spending(&self, user_id: i32) -> Result<Decimal, ReportRepoError> {
        let read_guard = self.state.read_lock()?;
        let total = read_guard
            .receipts
            .values()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.receipt.amount)
            .sum::<Decimal>();
        Ok(total)
    }

    async fn most_used_category(
        &self,
        user_id: i32,
    ) -> Result<Option<CategoryUsage>, ReportRepoError> {
        let read_guard = self.state.read_lock()?;

        let mut counts: HashMap<i32, i64> = HashMap::new();
        for record in read_guard.receipts.values() {
            if record.user_id == user_id {
                *counts.entry(record.receipt.category_id).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<(i32, i64)> = counts.into_iter().collect();
        // Highest count wins; the earliest-created category breaks ties.
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(counts.first().map(|(category_id, receipt_count)| {
            let category = read_guard
                .categories
                .get(category_id)
                .expect("referenced categories cannot be deleted");
            CategoryUsage {
                id: category.id,
                name: category.name.clone(),
                receipt_count: *receipt_count,
            }
        }))
    }
}
