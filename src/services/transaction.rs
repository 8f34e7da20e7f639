//! Transaction service
//!
//! Create, update and delete transactions with the cross-entity checks the
//! storage layer cannot express: the category must exist, belong to the
//! same user, and carry the same flow kind as the transaction.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryId, FlowKind, Money, Transaction, TransactionId, UserId};
use crate::storage::MemoryStore;

/// Service for transaction management
pub struct TransactionService<'a> {
    store: &'a MemoryStore,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// Record a transaction
    pub fn create(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        kind: FlowKind,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> TrackerResult<Transaction> {
        let txn = Transaction::new(user_id, category_id, kind, amount, date, description);
        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let category = self.owned_category(user_id, category_id)?;
        self.check_kind_matches(&txn, &category)?;

        self.store.transactions.upsert(txn.clone())?;
        Ok(txn)
    }

    /// Replace an existing transaction's fields
    pub fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        category_id: CategoryId,
        kind: FlowKind,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> TrackerResult<Transaction> {
        let existing = self
            .store
            .transactions
            .get(id)?
            .filter(|t| t.user_id == user_id)
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        let mut updated = Transaction::new(user_id, category_id, kind, amount, date, description);
        updated.id = existing.id;
        updated.created_at = existing.created_at;

        updated
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let category = self.owned_category(user_id, category_id)?;
        self.check_kind_matches(&updated, &category)?;

        self.store.transactions.upsert(updated.clone())?;
        Ok(updated)
    }

    /// Delete a transaction
    pub fn delete(&self, user_id: UserId, id: TransactionId) -> TrackerResult<()> {
        let owned = self
            .store
            .transactions
            .get(id)?
            .filter(|t| t.user_id == user_id)
            .is_some();
        if !owned {
            return Err(TrackerError::transaction_not_found(id.to_string()));
        }

        self.store.transactions.remove(id)?;
        Ok(())
    }

    /// List a user's transactions, most recent first
    pub fn list(&self, user_id: UserId) -> TrackerResult<Vec<Transaction>> {
        let mut transactions = self.store.transactions.for_user(user_id)?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    fn owned_category(&self, user_id: UserId, category_id: CategoryId) -> TrackerResult<Category> {
        self.store
            .categories
            .get(category_id)?
            .filter(|c| c.user_id == user_id)
            .ok_or_else(|| TrackerError::category_not_found(category_id.to_string()))
    }

    fn check_kind_matches(&self, txn: &Transaction, category: &Category) -> TrackerResult<()> {
        if txn.kind != category.kind {
            return Err(TrackerError::Validation(format!(
                "Transaction kind '{}' does not match category '{}' kind '{}'",
                txn.kind, category.name, category.kind
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CategoryService;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (MemoryStore, UserId, Category, Category) {
        let store = MemoryStore::new();
        let user = UserId::new();
        let (food, salary) = {
            let categories = CategoryService::new(&store);
            let food = categories.create(user, "Food", FlowKind::Expense).unwrap();
            let salary = categories.create(user, "Salary", FlowKind::Income).unwrap();
            (food, salary)
        };
        (store, user, food, salary)
    }

    #[test]
    fn test_create_transaction() {
        let (store, user, food, _) = setup();
        let service = TransactionService::new(&store);

        let txn = service
            .create(
                user,
                food.id,
                FlowKind::Expense,
                Money::from_cents(4250),
                date(2024, 6, 15),
                "Groceries",
            )
            .unwrap();

        assert_eq!(txn.amount.cents(), 4250);
        assert_eq!(service.list(user).unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_unknown_category() {
        let (store, user, _, _) = setup();
        let service = TransactionService::new(&store);

        let err = service
            .create(
                user,
                CategoryId::new(),
                FlowKind::Expense,
                Money::from_cents(100),
                date(2024, 6, 15),
                "",
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_rejects_foreign_category() {
        let (store, _, food, _) = setup();
        let service = TransactionService::new(&store);
        let stranger = UserId::new();

        let err = service
            .create(
                stranger,
                food.id,
                FlowKind::Expense,
                Money::from_cents(100),
                date(2024, 6, 15),
                "",
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_rejects_kind_mismatch() {
        let (store, user, food, salary) = setup();
        let service = TransactionService::new(&store);

        // Income transaction filed under an expense category
        let err = service
            .create(
                user,
                food.id,
                FlowKind::Income,
                Money::from_cents(100),
                date(2024, 6, 15),
                "",
            )
            .unwrap_err();
        assert!(err.is_validation());

        // Expense transaction filed under an income category
        let err = service
            .create(
                user,
                salary.id,
                FlowKind::Expense,
                Money::from_cents(100),
                date(2024, 6, 15),
                "",
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_preserves_identity() {
        let (store, user, food, _) = setup();
        let service = TransactionService::new(&store);

        let txn = service
            .create(
                user,
                food.id,
                FlowKind::Expense,
                Money::from_cents(1000),
                date(2024, 6, 15),
                "Lunch",
            )
            .unwrap();

        let updated = service
            .update(
                user,
                txn.id,
                food.id,
                FlowKind::Expense,
                Money::from_cents(1250),
                date(2024, 6, 16),
                "Lunch + tip",
            )
            .unwrap();

        assert_eq!(updated.id, txn.id);
        assert_eq!(updated.created_at, txn.created_at);
        assert_eq!(updated.amount.cents(), 1250);
        assert_eq!(updated.date, date(2024, 6, 16));
        assert_eq!(service.list(user).unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_transaction() {
        let (store, user, food, _) = setup();
        let service = TransactionService::new(&store);

        let err = service
            .update(
                user,
                TransactionId::new(),
                food.id,
                FlowKind::Expense,
                Money::from_cents(100),
                date(2024, 6, 15),
                "",
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (store, user, food, _) = setup();
        let service = TransactionService::new(&store);

        let txn = service
            .create(
                user,
                food.id,
                FlowKind::Expense,
                Money::from_cents(1000),
                date(2024, 6, 15),
                "",
            )
            .unwrap();

        service.delete(user, txn.id).unwrap();
        assert!(service.list(user).unwrap().is_empty());

        let err = service.delete(user, txn.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_foreign_transaction_denied() {
        let (store, user, food, _) = setup();
        let service = TransactionService::new(&store);

        let txn = service
            .create(
                user,
                food.id,
                FlowKind::Expense,
                Money::from_cents(1000),
                date(2024, 6, 15),
                "",
            )
            .unwrap();

        let err = service.delete(UserId::new(), txn.id).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.list(user).unwrap().len(), 1);
    }

    #[test]
    fn test_list_most_recent_first() {
        let (store, user, food, _) = setup();
        let service = TransactionService::new(&store);

        service
            .create(user, food.id, FlowKind::Expense, Money::from_cents(1), date(2024, 6, 1), "old")
            .unwrap();
        service
            .create(user, food.id, FlowKind::Expense, Money::from_cents(2), date(2024, 6, 20), "new")
            .unwrap();
        service
            .create(user, food.id, FlowKind::Expense, Money::from_cents(3), date(2024, 6, 10), "mid")
            .unwrap();

        let listed = service.list(user).unwrap();
        let dates: Vec<NaiveDate> = listed.iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 6, 20), date(2024, 6, 10), date(2024, 6, 1)]
        );
    }
}
