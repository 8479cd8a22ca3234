use crate::catalog_repo::{
    CatalogRepo, CatalogRepoError, Category, NewCategory, NewPaymentMethod, NewVendor,
    PaymentMethod, Tag, Vendor,
};
use crate::mem_repo::SharedState;
use async_trait::async_trait;

pub struct MemCatalogRepo {
    state: SharedState,
}

impl MemCatalogRepo {
    pub fn new(state: SharedState) -> MemCatalogRepo {
        MemCatalogRepo { state }
    }
}

#[async_trait]
impl CatalogRepo for MemCatalogRepo {
    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard
            .categories
            .values()
            .any(|c| c.name == new_category.name)
        {
            return Err(CatalogRepoError::DuplicateCategory(new_category.name));
        }

        let id = write_guard.next_id();
        let category = Category {
            id,
            name: new_category.name,
            description: new_category.description,
        };
        write_guard.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn get_categories(&self) -> Result<Vec<Category>, CatalogRepoError> {
        let read_guard = self.state.read_lock()?;
        let mut categories: Vec<Category> = read_guard.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete_category(&self, category_id: i32) -> Result<(), CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if !write_guard.categories.contains_key(&category_id) {
            return Err(CatalogRepoError::CategoryNotFound(category_id));
        }
        if write_guard
            .receipts
            .values()
            .any(|record| record.receipt.category_id == category_id)
        {
            return Err(CatalogRepoError::StillReferenced {
                entity: "Category",
                id: category_id,
            });
        }

        write_guard.categories.remove(&category_id);
        Ok(())
    }

    async fn create_vendor(&self, new_vendor: NewVendor) -> Result<Vendor, CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if let Some(existing) = write_guard
            .vendors
            .values()
            .find(|v| v.name == new_vendor.name)
        {
            return Ok(existing.clone());
        }

        let id = write_guard.next_id();
        let vendor = Vendor {
            id,
            name: new_vendor.name,
            address: new_vendor.address,
            phone: new_vendor.phone,
        };
        write_guard.vendors.insert(id, vendor.clone());
        Ok(vendor)
    }

    async fn get_vendors(&self) -> Result<Vec<Vendor>, CatalogRepoError> {
        let read_guard = self.state.read_lock()?;
        let mut vendors: Vec<Vendor> = read_guard.vendors.values().cloned().collect();
        vendors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vendors)
    }

    async fn delete_vendor(&self, vendor_id: i32) -> Result<(), CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if !write_guard.vendors.contains_key(&vendor_id) {
            return Err(CatalogRepoError::VendorNotFound(vendor_id));
        }
        if write_guard
            .receipts
            .values()
            .any(|record| record.receipt.vendor_id == Some(vendor_id))
        {
            return Err(CatalogRepoError::StillReferenced {
                entity: "Vendor",
                id: vendor_id,
            });
        }

        write_guard.vendors.remove(&vendor_id);
        Ok(())
    }

    async fn create_payment_method(
        &self,
        new_payment_method: NewPaymentMethod,
    ) -> Result<PaymentMethod, CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        let id = write_guard.next_id();
        let payment_method = PaymentMethod {
            id,
            name: new_payment_method.name,
            description: new_payment_method.description,
        };
        write_guard.payment_methods.insert(id, payment_method.clone());
        Ok(payment_method)
    }

    async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, CatalogRepoError> {
        let read_guard = self.state.read_lock()?;
        let mut payment_methods: Vec<PaymentMethod> =
            read_guard.payment_methods.values().cloned().collect();
        payment_methods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(payment_methods)
    }

    async fn delete_payment_method(&self, payment_method_id: i32) -> Result<(), CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if !write_guard.payment_methods.contains_key(&payment_method_id) {
            return Err(CatalogRepoError::PaymentMethodNotFound(payment_method_id));
        }
        if write_guard
            .receipts
            .values()
            .any(|record| record.receipt.payment_method_id == payment_method_id)
        {
            return Err(CatalogRepoError::StillReferenced {
                entity: "Payment method",
                id: payment_method_id,
            });
        }

        write_guard.payment_methods.remove(&payment_method_id);
        Ok(())
    }

    async fn create_tag(&self, name: String) -> Result<Tag, CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        let id = write_guard.next_id();
        let tag = Tag { id, name };
        write_guard.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn get_tags(&self) -> Result<Vec<Tag>, CatalogRepoError> {
        let read_guard = self.state.read_lock()?;
        let mut tags: Vec<Tag> = read_guard.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn delete_tag(&self, tag_id: i32) -> Result<(), CatalogRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if !write_guard.tags.contains_key(&tag_id) {
            return Err(CatalogRepoError::TagNotFound(tag_id));
        }
        if write_guard
            .receipt_tags
            .values()
            .any(|tag_ids| tag_ids.contains(&tag_id))
        {
            return Err(CatalogRepoError::StillReferenced {
                entity: "Tag",
                id: tag_id,
            });
        }

        write_guard.tags.remove(&tag_id);
        Ok(())
    }
}
