//! In-memory category repository

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryId, UserId};

/// Repository for categories with a per-user index
///
/// Categories are never deleted; transactions and budgets keep referencing
/// them by ID for as long as the store lives.
pub struct CategoryRepository {
    data: RwLock<HashMap<CategoryId, Category>>,
    /// Index: user_id -> category_ids
    by_user: RwLock<HashMap<UserId, Vec<CategoryId>>>,
}

impl CategoryRepository {
    /// Create an empty category repository
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a category
    pub fn upsert(&self, category: Category) -> TrackerResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_user.entry(category.user_id).or_default();
        if !ids.contains(&category.id) {
            ids.push(category.id);
        }
        data.insert(category.id, category);

        Ok(())
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> TrackerResult<Option<Category>> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Snapshot of all categories owned by a user
    pub fn for_user(&self, user_id: UserId) -> TrackerResult<Vec<Category>> {
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

impl Default for CategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}
