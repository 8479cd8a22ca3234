use crate::catalog_repo::{CatalogRepo, Category, PaymentMethod, Tag, Vendor};
use crate::receipt_repo::{Receipt, ReceiptItem, ReceiptRepo};
use crate::report_repo::ReportRepo;
use crate::user_repo::{User, UserRepo};
use anyhow::anyhow;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod catalog_repo;
mod receipt_repo;
mod report_repo;
mod user_repo;

/// One map per table, guarded by a single lock. Ids come from a shared
/// counter so creation order is observable across entity kinds.
#[derive(Default)]
pub(crate) struct State {
    next_id: i32,
    pub(crate) users: HashMap<i32, User>,
    pub(crate) categories: HashMap<i32, Category>,
    pub(crate) vendors: HashMap<i32, Vendor>,
    pub(crate) payment_methods: HashMap<i32, PaymentMethod>,
    pub(crate) tags: HashMap<i32, Tag>,
    pub(crate) receipts: HashMap<i32, ReceiptRecord>,
    pub(crate) receipt_tags: HashMap<i32, BTreeSet<i32>>,
    pub(crate) receipt_items: HashMap<i32, Vec<ReceiptItem>>,
}

pub(crate) struct ReceiptRecord {
    pub(crate) user_id: i32,
    pub(crate) receipt: Receipt,
}

impl State {
    pub(crate) fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn receipt_owned_by(&self, user_id: i32, receipt_id: i32) -> Option<&Receipt> {
        self.receipts
            .get(&receipt_id)
            .filter(|record| record.user_id == user_id)
            .map(|record| &record.receipt)
    }
}

#[derive(Clone)]
pub(crate) struct SharedState {
    state: Arc<RwLock<State>>,
}

impl SharedState {
    fn new() -> SharedState {
        SharedState {
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    pub(crate) fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    pub(crate) fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

pub fn create_repos() -> (
    Arc<dyn UserRepo>,
    Arc<dyn CatalogRepo>,
    Arc<dyn ReceiptRepo>,
    Arc<dyn ReportRepo>,
) {
    let state = SharedState::new();
    (
        Arc::new(user_repo::MemUserRepo::new(state.clone())),
        Arc::new(catalog_repo::MemCatalogRepo::new(state.clone())),
        Arc::new(receipt_repo::MemReceiptRepo::new(state.clone())),
        Arc::new(report_repo::MemReportRepo::new(state)),
    )
}
