use crate::report_repo::{check_range, CategoryUsage, ReportRepo, ReportRepoError, SpendingTotal};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use tracing::instrument;

pub struct SQLxReportRepo {
    pool: Pool<Postgres>,
}

impl SQLxReportRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxReportRepo {
        SQLxReportRepo { pool }
    }
}

#[async_trait]
impl ReportRepo for SQLxReportRepo {
    #[instrument(skip(self))]
    async fn spending_by_category(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SpendingTotal>, ReportRepoError> {
        check_range(start_date, end_date)?;

        let rows: Vec<(String, Decimal)> = sqlx::query_as(
            "SELECT c.name, SUM(r.amount) AS total \
             FROM receipts r JOIN categories c ON r.category_id = c.id \
             WHERE r.user_id = $1 AND r.receipt_date BETWEEN $2 AND $3 \
             GROUP BY c.name ORDER BY total DESC, c.name ASC",
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get category spending for user {}", user_id))?;
        Ok(rows
            .into_iter()
            .map(|(label, total)| SpendingTotal::new(label, total))
            .collect())
    }

    #[instrument(skip(self))]
    async fn spending_by_vendor(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SpendingTotal>, ReportRepoError> {
        check_range(start_date, end_date)?;

        let rows: Vec<(String, Decimal)> = sqlx::query_as(
            "SELECT v.name, SUM(r.amount) AS total \
             FROM receipts r JOIN vendors v ON r.vendor_id = v.id \
             WHERE r.user_id = $1 AND r.receipt_date BETWEEN $2 AND $3 \
             GROUP BY v.name ORDER BY total DESC, v.name ASC",
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get vendor spending for user {}", user_id))?;
        Ok(rows
            .into_iter()
            .map(|(label, total)| SpendingTotal::new(label, total))
            .collect())
    }

    #[instrument(skip(self))]
    async fn total_spending(&self, user_id: i32) -> Result<Decimal, ReportRepoError> {
        let total: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM receipts WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .with_context(|| format!("Unable to get total spending for user {}", user_id))?;
        Ok(total)
    }

    #[instrument(skip(self))]
    async fn most_used_category(
        &self,
        user_id: i32,
    ) -> Result<Option<CategoryUsage>, ReportRepoError> {
        let row: Option<(i32, String, i64)> = sqlx::query_as(
            "SELECT c.id, c.name, COUNT(*) AS receipt_count \
             FROM receipts r JOIN categories c ON r.category_id = c.id \
             WHERE r.user_id = $1 \
             GROUP BY c.id, c.name ORDER BY receipt_count DESC, c.id ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get most used category for user {}", user_id))?;
        Ok(row.map(|(id, name, receipt_count)| CategoryUsage {
            id,
            name,
            receipt_count,
        }))
    }
}
