use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference data shared by all receipts: categories, vendors, payment
/// methods and tags. Rows here are created and deleted through management
/// endpoints and are otherwise immutable.
#[async_trait]
pub trait CatalogRepo: Sync + Send {
    async fn create_category(&self, new_category: NewCategory)
        -> Result<Category, CatalogRepoError>;

    async fn get_categories(&self) -> Result<Vec<Category>, CatalogRepoError>;

    async fn delete_category(&self, category_id: i32) -> Result<(), CatalogRepoError>;

    /// Idempotent by name: creating a vendor that already exists returns the
    /// existing row instead of failing.
    async fn create_vendor(&self, new_vendor: NewVendor) -> Result<Vendor, CatalogRepoError>;

    async fn get_vendors(&self) -> Result<Vec<Vendor>, CatalogRepoError>;

    async fn delete_vendor(&self, vendor_id: i32) -> Result<(), CatalogRepoError>;

    async fn create_payment_method(
        &self,
        new_payment_method: NewPaymentMethod,
    ) -> Result<PaymentMethod, CatalogRepoError>;

    async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, CatalogRepoError>;

    async fn delete_payment_method(&self, payment_method_id: i32) -> Result<(), CatalogRepoError>;

    async fn create_tag(&self, name: String) -> Result<Tag, CatalogRepoError>;

    async fn get_tags(&self) -> Result<Vec<Tag>, CatalogRepoError>;

    async fn delete_tag(&self, tag_id: i32) -> Result<(), CatalogRepoError>;
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Vendor {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct NewVendor {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct PaymentMethod {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct NewPaymentMethod {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Error, Debug)]
pub enum CatalogRepoError {
    #[error("Category with id {0} not found")]
    CategoryNotFound(i32),
    #[error("Vendor with id {0} not found")]
    VendorNotFound(i32),
    #[error("Payment method with id {0} not found")]
    PaymentMethodNotFound(i32),
    #[error("Tag with id {0} not found")]
    TagNotFound(i32),
    #[error("Category {0} already exists")]
    DuplicateCategory(String),
    #[error("{entity} {id} is still referenced by receipts")]
    StillReferenced { entity: &'static str, id: i32 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
