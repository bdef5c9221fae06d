use async_trait::async_trait;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::models::CreateExpenseCommand;
use crate::domain::expense::models::Expense;
use crate::domain::user::models::UserId;

/// Port for expense domain service operations.
#[async_trait]
pub trait ExpenseServicePort: Send + Sync + 'static {
    /// Record a new expense for a user.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the expense
    /// * `command` - Validated amount, purpose, account and optional date
    ///
    /// # Returns
    /// Stored expense (date defaulted to now when absent)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn add_expense(
        &self,
        user_id: UserId,
        command: CreateExpenseCommand,
    ) -> Result<Expense, ExpenseError>;

    /// List a user's expenses, most recent date first.
    ///
    /// # Returns
    /// Vector of expenses (empty if the user has none)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_expenses(&self, user_id: &UserId) -> Result<Vec<Expense>, ExpenseError>;
}

/// Persistence operations for expense aggregate.
#[async_trait]
pub trait ExpenseRepository: Send + Sync + 'static {
    /// Persist new expense to storage in a single write.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, expense: Expense) -> Result<Expense, ExpenseError>;

    /// Retrieve all expenses owned by a user, ordered by `date` descending
    /// then `created_at` descending.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Expense>, ExpenseError>;
}
