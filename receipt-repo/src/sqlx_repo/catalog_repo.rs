use crate::catalog_repo::{
    CatalogRepo, CatalogRepoError, Category, NewCategory, NewPaymentMethod, NewVendor,
    PaymentMethod, Tag, Vendor,
};
use crate::sqlx_repo::{is_foreign_key_violation, is_unique_violation};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;

pub struct SQLxCatalogRepo {
    pool: Pool<Postgres>,
}

impl SQLxCatalogRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxCatalogRepo {
        SQLxCatalogRepo { pool }
    }

    async fn delete_row(
        &self,
        table: &'static str,
        id: i32,
        entity: &'static str,
        not_found: fn(i32) -> CatalogRepoError,
    ) -> Result<(), CatalogRepoError> {
        let query = format!("DELETE FROM {} WHERE id = $1", table);
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    CatalogRepoError::StillReferenced { entity, id }
                } else {
                    CatalogRepoError::Other(
                        anyhow::Error::new(e)
                            .context(format!("Unable to delete from {}", table)),
                    )
                }
            })?;
        if result.rows_affected() == 0 {
            Err(not_found(id))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogRepo for SQLxCatalogRepo {
    #[instrument(skip(self, new_category))]
    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, CatalogRepoError> {
        let id: i32 =
            sqlx::query_scalar("INSERT INTO categories(name, description) VALUES ($1, $2) RETURNING id")
                .bind(&new_category.name)
                .bind(&new_category.description)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        CatalogRepoError::DuplicateCategory(new_category.name.clone())
                    } else {
                        CatalogRepoError::Other(
                            anyhow::Error::new(e).context("Unable to insert category"),
                        )
                    }
                })?;
        Ok(Category {
            id,
            name: new_category.name,
            description: new_category.description,
        })
    }

    #[instrument(skip(self))]
    async fn get_categories(&self) -> Result<Vec<Category>, CatalogRepoError> {
        let rows: Vec<(i32, String, Option<String>)> =
            sqlx::query_as("SELECT id, name, description FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get categories")?;
        Ok(rows
            .into_iter()
            .map(|(id, name, description)| Category {
                id,
                name,
                description,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, category_id: i32) -> Result<(), CatalogRepoError> {
        self.delete_row(
            "categories",
            category_id,
            "Category",
            CatalogRepoError::CategoryNotFound,
        )
        .await
    }

    #[instrument(skip(self, new_vendor))]
    async fn create_vendor(&self, new_vendor: NewVendor) -> Result<Vendor, CatalogRepoError> {
        let inserted: Option<i32> = sqlx::query_scalar(
            "INSERT INTO vendors(name, address, phone) VALUES ($1, $2, $3) ON CONFLICT (name) DO NOTHING RETURNING id",
        )
        .bind(&new_vendor.name)
        .bind(&new_vendor.address)
        .bind(&new_vendor.phone)
        .fetch_optional(&self.pool)
        .await
        .context("Unable to insert vendor")?;

        match inserted {
            Some(id) => Ok(Vendor {
                id,
                name: new_vendor.name,
                address: new_vendor.address,
                phone: new_vendor.phone,
            }),
            // The name is taken, so hand back the row that owns it.
            None => {
                let (id, name, address, phone): (i32, String, Option<String>, Option<String>) =
                    sqlx::query_as("SELECT id, name, address, phone FROM vendors WHERE name = $1")
                        .bind(&new_vendor.name)
                        .fetch_one(&self.pool)
                        .await
                        .with_context(|| {
                            format!("Unable to get vendor {}", new_vendor.name)
                        })?;
                Ok(Vendor {
                    id,
                    name,
                    address,
                    phone,
                })
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_vendors(&self) -> Result<Vec<Vendor>, CatalogRepoError> {
        let rows: Vec<(i32, String, Option<String>, Option<String>)> =
            sqlx::query_as("SELECT id, name, address, phone FROM vendors ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get vendors")?;
        Ok(rows
            .into_iter()
            .map(|(id, name, address, phone)| Vendor {
                id,
                name,
                address,
                phone,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete_vendor(&self, vendor_id: i32) -> Result<(), CatalogRepoError> {
        self.delete_row(
            "vendors",
            vendor_id,
            "Vendor",
            CatalogRepoError::VendorNotFound,
        )
        .await
    }

    #[instrument(skip(self, new_payment_method))]
    async fn create_payment_method(
        &self,
        new_payment_method: NewPaymentMethod,
    ) -> Result<PaymentMethod, CatalogRepoError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO payment_methods(name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&new_payment_method.name)
        .bind(&new_payment_method.description)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert payment method")?;
        Ok(PaymentMethod {
            id,
            name: new_payment_method.name,
            description: new_payment_method.description,
        })
    }

    #[instrument(skip(self))]
    async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, CatalogRepoError> {
        let rows: Vec<(i32, String, Option<String>)> =
            sqlx::query_as("SELECT id, name, description FROM payment_methods ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get payment methods")?;
        Ok(rows
            .into_iter()
            .map(|(id, name, description)| PaymentMethod {
                id,
                name,
                description,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete_payment_method(&self, payment_method_id: i32) -> Result<(), CatalogRepoError> {
        self.delete_row(
            "payment_methods",
            payment_method_id,
            "Payment method",
            CatalogRepoError::PaymentMethodNotFound,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn create_tag(&self, name: String) -> Result<Tag, CatalogRepoError> {
        let id: i32 = sqlx::query_scalar("INSERT INTO tags(name) VALUES ($1) RETURNING id")
            .bind(&name)
            .fetch_one(&self.pool)
            .await
            .context("Unable to insert tag")?;
        Ok(Tag { id, name })
    }

    #[instrument(skip(self))]
    async fn get_tags(&self) -> Result<Vec<Tag>, CatalogRepoError> {
        let rows: Vec<(i32, String)> = sqlx::query_as("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Unable to get tags")?;
        Ok(rows.into_iter().map(|(id, name)| Tag { id, name }).collect())
    }

    #[instrument(skip(self))]
    async fn delete_tag(&self, tag_id: i32) -> Result<(), CatalogRepoError> {
        self.delete_row("tags", tag_id, "Tag", CatalogRepoError::TagNotFound)
            .await
    }
}
