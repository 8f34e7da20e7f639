//! Category service
//!
//! Creation and listing of categories, including the default category sets
//! seeded for a new user.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, FlowKind, UserId};
use crate::storage::MemoryStore;

/// Expense categories seeded for every new user
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Utilities",
    "Housing",
    "Healthcare",
    "Entertainment",
    "Shopping",
    "Education",
    "Personal Care",
    "Others",
];

/// Income categories seeded for every new user
pub const DEFAULT_INCOME_CATEGORIES: [&str; 5] =
    ["Salary", "Business", "Investments", "Freelance", "Other Income"];

/// Service for category management
pub struct CategoryService<'a> {
    store: &'a MemoryStore,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// Create a category for a user
    pub fn create(
        &self,
        user_id: UserId,
        name: impl Into<String>,
        kind: FlowKind,
    ) -> TrackerResult<Category> {
        let category = Category::new(user_id, name, kind);
        category
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.store.categories.upsert(category.clone())?;
        Ok(category)
    }

    /// Seed the default expense and income categories for a new user
    pub fn create_defaults(&self, user_id: UserId) -> TrackerResult<Vec<Category>> {
        let mut created = Vec::with_capacity(
            DEFAULT_EXPENSE_CATEGORIES.len() + DEFAULT_INCOME_CATEGORIES.len(),
        );

        for name in DEFAULT_EXPENSE_CATEGORIES {
            created.push(self.create(user_id, name, FlowKind::Expense)?);
        }
        for name in DEFAULT_INCOME_CATEGORIES {
            created.push(self.create(user_id, name, FlowKind::Income)?);
        }

        Ok(created)
    }

    /// List a user's categories sorted by name
    pub fn list(&self, user_id: UserId) -> TrackerResult<Vec<Category>> {
        let mut categories = self.store.categories.for_user(user_id)?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}
