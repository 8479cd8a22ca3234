use crate::catalog_repo::Tag;
use crate::receipt_repo::ReceiptRepoError::ReceiptNotFound;
use crate::receipt_repo::{
    Filter, NewReceipt, PageOptions, Receipt, ReceiptItem, NewReceiptItem, ReceiptRepo,
    ReceiptRepoError, ReceiptUpdate,
};
use crate::sqlx_repo::{is_foreign_key_violation, violated_constraint};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Pool, Postgres, QueryBuilder};
use std::collections::BTreeSet;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct ReceiptEntry {
    id: i32,
    filename: Option<String>,
    description: String,
    amount: Decimal,
    receipt_date: NaiveDate,
    #[allow(dead_code)]
    user_id: i32,
    category_id: i32,
    vendor_id: Option<i32>,
    payment_method_id: i32,
}

impl From<ReceiptEntry> for Receipt {
    fn from(value: ReceiptEntry) -> Self {
        Receipt {
            id: value.id,
            filename: value.filename,
            description: value.description,
            amount: value.amount,
            date: value.receipt_date,
            category_id: value.category_id,
            vendor_id: value.vendor_id,
            payment_method_id: value.payment_method_id,
        }
    }
}

pub struct SQLxReceiptRepo {
    pool: Pool<Postgres>,
}

impl SQLxReceiptRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxReceiptRepo {
        SQLxReceiptRepo { pool }
    }

    /// Resolves the receipt only if it belongs to `user_id`; anything else is
    /// the same not-found.
    async fn check_owner<'e, E>(
        db_executor: E,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<(), ReceiptRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT id FROM receipts WHERE id = $1 AND user_id = $2")
                .bind(receipt_id)
                .bind(user_id)
                .fetch_optional(db_executor)
                .await
                .with_context(|| format!("Unable to look up receipt {}", receipt_id))?;
        found.map(|_| ()).ok_or(ReceiptNotFound(receipt_id))
    }

    async fn get_receipt_entry(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Option<ReceiptEntry>, ReceiptRepoError> {
        let receipt_entry: Option<ReceiptEntry> =
            sqlx::query_as("SELECT * FROM receipts WHERE id = $1 AND user_id = $2")
                .bind(receipt_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get receipt {}", receipt_id))?;
        Ok(receipt_entry)
    }
}

fn map_reference_error(e: sqlx::Error, context: &'static str) -> ReceiptRepoError {
    if is_foreign_key_violation(&e) {
        return match violated_constraint(&e) {
            Some(c) if c.contains("category_id") => ReceiptRepoError::MissingReference("category"),
            Some(c) if c.contains("vendor_id") => ReceiptRepoError::MissingReference("vendor"),
            Some(c) if c.contains("payment_method_id") => {
                ReceiptRepoError::MissingReference("payment method")
            }
            Some(c) if c.contains("user_id") => ReceiptRepoError::MissingReference("user"),
            Some(c) if c.contains("tag_id") => ReceiptRepoError::MissingReference("tag"),
            _ => ReceiptRepoError::Other(anyhow::Error::new(e).context(context)),
        };
    }
    ReceiptRepoError::Other(anyhow::Error::new(e).context(context))
}

#[async_trait]
impl ReceiptRepo for SQLxReceiptRepo {
    #[instrument(skip(self))]
    async fn get_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Receipt, ReceiptRepoError> {
        self.get_receipt_entry(user_id, receipt_id)
            .await?
            .ok_or(ReceiptNotFound(receipt_id))
            .map(|r| r.into())
    }

    #[instrument(skip(self))]
    async fn get_all_receipts(
        &self,
        user_id: i32,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Receipt>, ReceiptRepoError> {
        let mut query_builder = QueryBuilder::new("SELECT * FROM receipts WHERE user_id = ");
        query_builder.push_bind(user_id);
        if let Some(from) = filter.from {
            query_builder.push(" AND receipt_date >= ").push_bind(from);
        }
        if let Some(until) = filter.until {
            query_builder.push(" AND receipt_date <= ").push_bind(until);
        }
        if let Some(category_id) = filter.category_id {
            query_builder
                .push(" AND category_id = ")
                .push_bind(category_id);
        }
        if let Some(vendor_id) = filter.vendor_id {
            query_builder.push(" AND vendor_id = ").push_bind(vendor_id);
        }
        query_builder.push(" ORDER BY receipt_date DESC, id DESC");
        if let Some(po) = page_options {
            query_builder
                .push(" OFFSET ")
                .push_bind(po.offset)
                .push(" LIMIT ")
                .push_bind(po.limit);
        }
        let query = query_builder.build_query_as();
        let receipt_entries: Vec<ReceiptEntry> = query
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Unable to get receipts for user {}", user_id))?;
        Ok(receipt_entries.into_iter().map(|r| r.into()).collect())
    }

    #[instrument(skip(self, new_receipt))]
    async fn create_receipt(
        &self,
        user_id: i32,
        new_receipt: NewReceipt,
    ) -> Result<Receipt, ReceiptRepoError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO receipts(filename, description, amount, receipt_date, user_id, category_id, vendor_id, payment_method_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(&new_receipt.filename)
        .bind(&new_receipt.description)
        .bind(new_receipt.amount)
        .bind(new_receipt.date)
        .bind(user_id)
        .bind(new_receipt.category_id)
        .bind(new_receipt.vendor_id)
        .bind(new_receipt.payment_method_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, "Unable to insert receipt"))?;

        Ok(new_receipt.to_receipt(id))
    }

    #[instrument(skip(self, updated_receipt))]
    async fn update_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
        updated_receipt: ReceiptUpdate,
    ) -> Result<Receipt, ReceiptRepoError> {
        let receipt_entry: Option<ReceiptEntry> = sqlx::query_as(
            "UPDATE receipts SET description = $1, amount = $2, receipt_date = $3, category_id = $4, vendor_id = $5, payment_method_id = $6 \
             WHERE user_id = $7 AND id = $8 RETURNING *",
        )
        .bind(&updated_receipt.description)
        .bind(updated_receipt.amount)
        .bind(updated_receipt.date)
        .bind(updated_receipt.category_id)
        .bind(updated_receipt.vendor_id)
        .bind(updated_receipt.payment_method_id)
        .bind(user_id)
        .bind(receipt_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, "Unable to update receipt"))?;
        receipt_entry
            .ok_or(ReceiptNotFound(receipt_id))
            .map(|r| r.into())
    }

    #[instrument(skip(self))]
    async fn delete_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Receipt, ReceiptRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to start transaction")?;

        let receipt_entry: Option<ReceiptEntry> =
            sqlx::query_as("SELECT * FROM receipts WHERE id = $1 AND user_id = $2")
                .bind(receipt_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .with_context(|| format!("Unable to get receipt {}", receipt_id))?;
        let receipt_entry = receipt_entry.ok_or(ReceiptNotFound(receipt_id))?;

        // Dependent rows go first so the receipt row can be removed.
        sqlx::query("DELETE FROM receipt_tags WHERE receipt_id = $1")
            .bind(receipt_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Unable to delete tags of receipt {}", receipt_id))?;
        sqlx::query("DELETE FROM receipt_items WHERE receipt_id = $1")
            .bind(receipt_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Unable to delete items of receipt {}", receipt_id))?;
        sqlx::query("DELETE FROM receipts WHERE id = $1")
            .bind(receipt_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Unable to delete receipt {}", receipt_id))?;

        tx.commit().await.context("Unable to commit transaction")?;
        Ok(receipt_entry.into())
    }

    #[instrument(skip(self))]
    async fn add_tags(
        &self,
        user_id: i32,
        receipt_id: i32,
        tag_ids: &[i32],
    ) -> Result<(), ReceiptRepoError> {
        Self::check_owner(&self.pool, user_id, receipt_id).await?;

        let tag_ids: BTreeSet<i32> = tag_ids.iter().copied().collect();
        if tag_ids.is_empty() {
            return Ok(());
        }

        let mut query_builder = QueryBuilder::new("INSERT INTO receipt_tags(receipt_id, tag_id) ");
        query_builder.push_values(tag_ids, |mut b, tag_id| {
            b.push_bind(receipt_id);
            b.push_bind(tag_id);
        });
        query_builder.push(" ON CONFLICT DO NOTHING");
        query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_reference_error(e, "Unable to add receipt tags"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn replace_tags(
        &self,
        user_id: i32,
        receipt_id: i32,
        tag_ids: &[i32],
    ) -> Result<(), ReceiptRepoError> {
        let tag_ids: BTreeSet<i32> = tag_ids.iter().copied().collect();

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to start transaction")?;

        Self::check_owner(&mut *tx, user_id, receipt_id).await?;

        sqlx::query("DELETE FROM receipt_tags WHERE receipt_id = $1")
            .bind(receipt_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Unable to clear tags of receipt {}", receipt_id))?;

        if !tag_ids.is_empty() {
            let mut query_builder =
                QueryBuilder::new("INSERT INTO receipt_tags(receipt_id, tag_id) ");
            query_builder.push_values(tag_ids, |mut b, tag_id| {
                b.push_bind(receipt_id);
                b.push_bind(tag_id);
            });
            query_builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| map_reference_error(e, "Unable to replace receipt tags"))?;
        }

        tx.commit().await.context("Unable to commit transaction")?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_tags(&self, user_id: i32, receipt_id: i32) -> Result<Vec<Tag>, ReceiptRepoError> {
        Self::check_owner(&self.pool, user_id, receipt_id).await?;

        let rows: Vec<(i32, String)> = sqlx::query_as(
            "SELECT t.id, t.name FROM tags t JOIN receipt_tags rt ON t.id = rt.tag_id \
             WHERE rt.receipt_id = $1 ORDER BY t.name",
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get tags of receipt {}", receipt_id))?;
        Ok(rows.into_iter().map(|(id, name)| Tag { id, name }).collect())
    }

    #[instrument(skip(self, new_items))]
    async fn add_items(
        &self,
        user_id: i32,
        receipt_id: i32,
        new_items: Vec<NewReceiptItem>,
    ) -> Result<Vec<ReceiptItem>, ReceiptRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to start transaction")?;

        Self::check_owner(&mut *tx, user_id, receipt_id).await?;

        let mut items = Vec::with_capacity(new_items.len());
        for item in new_items {
            let id: i32 = sqlx::query_scalar(
                "INSERT INTO receipt_items(receipt_id, item_name, quantity, price) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(receipt_id)
            .bind(&item.item_name)
            .bind(item.quantity)
            .bind(item.price)
            .fetch_one(&mut *tx)
            .await
            .context("Unable to insert receipt item")?;
            items.push(ReceiptItem {
                id,
                item_name: item.item_name,
                quantity: item.quantity,
                price: item.price,
            });
        }

        tx.commit().await.context("Unable to commit transaction")?;
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn get_items(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Vec<ReceiptItem>, ReceiptRepoError> {
        Self::check_owner(&self.pool, user_id, receipt_id).await?;

        let rows: Vec<(i32, String, i32, Decimal)> = sqlx::query_as(
            "SELECT id, item_name, quantity, price FROM receipt_items WHERE receipt_id = $1 ORDER BY id",
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get items of receipt {}", receipt_id))?;
        Ok(rows
            .into_iter()
            .map(|(id, item_name, quantity, price)| ReceiptItem {
                id,
                item_name,
                quantity,
                price,
            })
            .collect())
    }
}
