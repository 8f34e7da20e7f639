//! Service layer for spendtrack
//!
//! Services provide the validation and cross-entity checks on top of the
//! storage collaborator: kind matching for transactions, uniqueness for
//! budgets, and the snapshot wrappers around the reporting engine.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use transaction::TransactionService;
