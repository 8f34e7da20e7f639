//! In-memory transaction repository

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Transaction, TransactionId, UserId};

/// Repository for transactions with a per-user index
pub struct TransactionRepository {
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: user_id -> transaction_ids
    by_user: RwLock<HashMap<UserId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create an empty transaction repository
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a transaction
    pub fn upsert(&self, txn: Transaction) -> TrackerResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_user.entry(txn.user_id).or_default();
        if !ids.contains(&txn.id) {
            ids.push(txn.id);
        }
        data.insert(txn.id, txn);

        Ok(())
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Remove a transaction, returning it if it existed
    pub fn remove(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_user.get_mut(&txn.user_id) {
                ids.retain(|i| *i != id);
            }
        }

        Ok(removed)
    }

    /// Snapshot of all transactions owned by a user
    pub fn for_user(&self, user_id: UserId) -> TrackerResult<Vec<Transaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_user = self
            .by_user
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_user
            .get(&user_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default())
    }
}

impl Default for TransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}
