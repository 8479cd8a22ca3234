use crate::catalog_repo::Tag;
use crate::mem_repo::{ReceiptRecord, SharedState, State};
use crate::receipt_repo::ReceiptRepoError::ReceiptNotFound;
use crate::receipt_repo::{
    Filter, NewReceipt, NewReceiptItem, PageOptions, Receipt, ReceiptItem, ReceiptRepo,
    ReceiptRepoError, ReceiptUpdate,
};
use async_trait::async_trait;
use std::collections::BTreeSet;

pub struct MemReceiptRepo {
    state: SharedState,
}

impl MemReceiptRepo {
    pub fn new(state: SharedState) -> MemReceiptRepo {
        MemReceiptRepo { state }
    }
}

fn check_references(
    state: &State,
    user_id: i32,
    category_id: i32,
    vendor_id: Option<i32>,
    payment_method_id: i32,
) -> Result<(), ReceiptRepoError> {
    if !state.users.contains_key(&user_id) {
        return Err(ReceiptRepoError::MissingReference("user"));
    }
    if !state.categories.contains_key(&category_id) {
        return Err(ReceiptRepoError::MissingReference("category"));
    }
    if let Some(vendor_id) = vendor_id {
        if !state.vendors.contains_key(&vendor_id) {
            return Err(ReceiptRepoError::MissingReference("vendor"));
        }
    }
    if !state.payment_methods.contains_key(&payment_method_id) {
        return Err(ReceiptRepoError::MissingReference("payment method"));
    }
    Ok(())
}

fn check_tags(state: &State, tag_ids: &BTreeSet<i32>) -> Result<(), ReceiptRepoError> {
    for tag_id in tag_ids {
        if !state.tags.contains_key(tag_id) {
            return Err(ReceiptRepoError::MissingReference("tag"));
        }
    }
    Ok(())
}

#[async_trait]
impl ReceiptRepo for MemReceiptRepo {
    async fn get_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Receipt, ReceiptRepoError> {
        let read_guard = self.state.read_lock()?;
        read_guard
            .receipt_owned_by(user_id, receipt_id)
            .cloned()
            .ok_or(ReceiptNotFound(receipt_id))
    }

    async fn get_all_receipts(
        &self,
        user_id: i32,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Receipt>, ReceiptRepoError> {
        let read_guard = self.state.read_lock()?;

        let mut receipts: Vec<Receipt> = read_guard
            .receipts
            .values()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.receipt.clone())
            .collect();
        receipts.sort_by(|a, b| b.cmp(a));

        let mut receipts: Box<dyn Iterator<Item = Receipt>> = Box::new(receipts.into_iter());
        if let Some(from) = filter.from {
            receipts = Box::new(receipts.filter(move |r| r.date >= from));
        }
        if let Some(until) = filter.until {
            receipts = Box::new(receipts.filter(move |r| r.date <= until));
        }
        if let Some(category_id) = filter.category_id {
            receipts = Box::new(receipts.filter(move |r| r.category_id == category_id));
        }
        if let Some(vendor_id) = filter.vendor_id {
            receipts = Box::new(receipts.filter(move |r| r.vendor_id == Some(vendor_id)));
        }

        if let Some(page_options) = page_options {
            receipts = Box::new(
                receipts
                    .skip(page_options.offset as usize)
                    .take(page_options.limit as usize),
            );
        }

        Ok(receipts.collect())
    }

    async fn create_receipt(
        &self,
        user_id: i32,
        new_receipt: NewReceipt,
    ) -> Result<Receipt, ReceiptRepoError> {
        let mut write_guard = self.state.write_lock()?;

        check_references(
            &write_guard,
            user_id,
            new_receipt.category_id,
            new_receipt.vendor_id,
            new_receipt.payment_method_id,
        )?;

        let id = write_guard.next_id();
        let receipt = new_receipt.to_receipt(id);
        write_guard.receipts.insert(
            id,
            ReceiptRecord {
                user_id,
                receipt: receipt.clone(),
            },
        );
        Ok(receipt)
    }

    async fn update_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
        updated_receipt: ReceiptUpdate,
    ) -> Result<Receipt, ReceiptRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard.receipt_owned_by(user_id, receipt_id).is_none() {
            return Err(ReceiptNotFound(receipt_id));
        }
        check_references(
            &write_guard,
            user_id,
            updated_receipt.category_id,
            updated_receipt.vendor_id,
            updated_receipt.payment_method_id,
        )?;

        let record = write_guard
            .receipts
            .get_mut(&receipt_id)
            .expect("ownership was checked above");
        let receipt = &mut record.receipt;
        receipt.description = updated_receipt.description;
        receipt.amount = updated_receipt.amount;
        receipt.date = updated_receipt.date;
        receipt.category_id = updated_receipt.category_id;
        receipt.vendor_id = updated_receipt.vendor_id;
        receipt.payment_method_id = updated_receipt.payment_method_id;
        Ok(receipt.clone())
    }

    async fn delete_receipt(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Receipt, ReceiptRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard.receipt_owned_by(user_id, receipt_id).is_none() {
            return Err(ReceiptNotFound(receipt_id));
        }

        write_guard.receipt_tags.remove(&receipt_id);
        write_guard.receipt_items.remove(&receipt_id);
        let record = write_guard
            .receipts
            .remove(&receipt_id)
            .expect("ownership was checked above");
        Ok(record.receipt)
    }

    async fn add_tags(
        &self,
        user_id: i32,
        receipt_id: i32,
        tag_ids: &[i32],
    ) -> Result<(), ReceiptRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard.receipt_owned_by(user_id, receipt_id).is_none() {
            return Err(ReceiptNotFound(receipt_id));
        }
        let tag_ids: BTreeSet<i32> = tag_ids.iter().copied().collect();
        check_tags(&write_guard, &tag_ids)?;

        write_guard
            .receipt_tags
            .entry(receipt_id)
            .or_insert_with(BTreeSet::new)
            .extend(tag_ids);
        Ok(())
    }

    async fn replace_tags(
        &self,
        user_id: i32,
        receipt_id: i32,
        tag_ids: &[i32],
    ) -> Result<(), ReceiptRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard.receipt_owned_by(user_id, receipt_id).is_none() {
            return Err(ReceiptNotFound(receipt_id));
        }
        let tag_ids: BTreeSet<i32> = tag_ids.iter().copied().collect();
        check_tags(&write_guard, &tag_ids)?;

        // The whole set swaps under the write lock, so readers see either the
        // old set or the new one.
        write_guard.receipt_tags.insert(receipt_id, tag_ids);
        Ok(())
    }

    async fn get_tags(&self, user_id: i32, receipt_id: i32) -> Result<Vec<Tag>, ReceiptRepoError> {
        let read_guard = self.state.read_lock()?;

        if read_guard.receipt_owned_by(user_id, receipt_id).is_none() {
            return Err(ReceiptNotFound(receipt_id));
        }

        let mut tags: Vec<Tag> = read_guard
            .receipt_tags
            .get(&receipt_id)
            .into_iter()
            .flatten()
            .map(|tag_id| {
                read_guard
                    .tags
                    .get(tag_id)
                    .expect("associated tags cannot be deleted")
                    .clone()
            })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn add_items(
        &self,
        user_id: i32,
        receipt_id: i32,
        new_items: Vec<NewReceiptItem>,
    ) -> Result<Vec<ReceiptItem>, ReceiptRepoError> {
        let mut write_guard = self.state.write_lock()?;

        if write_guard.receipt_owned_by(user_id, receipt_id).is_none() {
            return Err(ReceiptNotFound(receipt_id));
        }

        let mut items = Vec::with_capacity(new_items.len());
        for item in new_items {
            let id = write_guard.next_id();
            let item = ReceiptItem {
                id,
                item_name: item.item_name,
                quantity: item.quantity,
                price: item.price,
            };
            write_guard
                .receipt_items
                .entry(receipt_id)
                .or_insert_with(Vec::new)
                .push(item.clone());
            items.push(item);
        }
        Ok(items)
    }

    async fn get_items(
        &self,
        user_id: i32,
        receipt_id: i32,
    ) -> Result<Vec<ReceiptItem>, ReceiptRepoError> {
        let read_guard = self.state.read_lock()?;

        if read_guard.receipt_owned_by(user_id, receipt_id).is_none() {
            return Err(ReceiptNotFound(receipt_id));
        }

        Ok(read_guard
            .receipt_items
            .get(&receipt_id)
            .cloned()
            .unwrap_or_default())
    }
}
