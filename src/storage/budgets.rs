//! In-memory budget repository

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, BudgetId, Month, UserId};

/// Repository for budgets with a per-user index
pub struct BudgetRepository {
    data: RwLock<HashMap<BudgetId, Budget>>,
    /// Index: user_id -> budget_ids
    by_user: RwLock<HashMap<UserId, Vec<BudgetId>>>,
}

impl BudgetRepository {
    /// Create an empty budget repository
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a budget
    pub fn upsert(&self, budget: Budget) -> TrackerResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_user.entry(budget.user_id).or_default();
        if !ids.contains(&budget.id) {
            ids.push(budget.id);
        }
        data.insert(budget.id, budget);

        Ok(())
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> TrackerResult<Option<Budget>> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Remove a budget, returning it if it existed
    pub fn remove(&self, id: BudgetId) -> TrackerResult<Option<Budget>> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.remove(&id);
        if let Some(budget) = &removed {
            if let Some(ids) = by_user.get_mut(&budget.user_id) {
                ids.retain(|i| *i != id);
            }
        }

        Ok(removed)
    }

    /// Snapshot of all budgets owned by a user
    pub fn for_user(&self, user_id: UserId) -> TrackerResult<Vec<Budget>> {
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

    /// Snapshot of a user's budgets for one calendar month
    pub fn for_user_month(&self, user_id: UserId, month: Month) -> TrackerResult<Vec<Budget>> {
        Ok(self
            .for_user(user_id)?
            .into_iter()
            .filter(|b| b.month == month)
            .collect())
    }
}

impl Default for BudgetRepository {
    fn default() -> Self {
        Self::new()
    }
}
