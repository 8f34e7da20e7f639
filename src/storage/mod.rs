//! Storage collaborator for spendtrack
//!
//! An in-memory snapshot store, one repository per entity. The reporting
//! engine never touches this module - it works on the entity slices the
//! repositories hand out - so any storage backend with the same snapshot
//! surface can stand in.

pub mod budgets;
pub mod categories;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use transactions::TransactionRepository;

/// In-memory store composing all repositories
pub struct MemoryStore {
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            transactions: TransactionRepository::new(),
            categories: CategoryRepository::new(),
            budgets: BudgetRepository::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
