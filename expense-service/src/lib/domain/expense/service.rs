use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::models::CreateExpenseCommand;
use crate::domain::expense::models::Expense;
use crate::domain::expense::models::ExpenseId;
use crate::domain::expense::ports::ExpenseRepository;
use crate::domain::expense::ports::ExpenseServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for expense operations.
pub struct ExpenseService<ER>
where
    ER: ExpenseRepository,
{
    repository: Arc<ER>,
}

impl<ER> ExpenseService<ER>
where
    ER: ExpenseRepository,
{
    pub fn new(repository: Arc<ER>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<ER> ExpenseServicePort for ExpenseService<ER>
where
    ER: ExpenseRepository,
{
    async fn add_expense(
        &self,
        user_id: UserId,
        command: CreateExpenseCommand,
    ) -> Result<Expense, ExpenseError> {
        let now = Utc::now();

        let expense = Expense {
            id: ExpenseId::new(),
            user_id,
            amount: command.amount,
            purpose: command.purpose,
            account: command.account,
            date: command.date.unwrap_or(now),
            created_at: now,
        };

        let created = self.repository.create(expense).await?;

        tracing::debug!(
            expense_id = %created.id,
            user_id = %created.user_id,
            "Expense recorded"
        );

        Ok(created)
    }

    async fn list_expenses(&self, user_id: &UserId) -> Result<Vec<Expense>, ExpenseError> {
        self.repository.list_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::DateTime;
    use chrono::Duration;
    use chrono::TimeZone;
    use mockall::mock;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::expense::models::AccountName;
    use crate::domain::expense::models::Amount;
    use crate::domain::expense::models::Purpose;

    mock! {
        pub TestExpenseRepository {}

        #[async_trait]
        impl ExpenseRepository for TestExpenseRepository {
            async fn create(&self, expense: Expense) -> Result<Expense, ExpenseError>;
            async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Expense>, ExpenseError>;
        }
    }

    fn command(amount: &str, date: Option<DateTime<Utc>>) -> CreateExpenseCommand {
        CreateExpenseCommand::new(
            Amount::new(Decimal::from_str(amount).unwrap()).unwrap(),
            Purpose::new("lunch".to_string()).unwrap(),
            AccountName::new("cash".to_string()).unwrap(),
            date,
        )
    }

    #[tokio::test]
    async fn test_add_expense_defaults_date_to_now() {
        let mut repository = MockTestExpenseRepository::new();
        let user_id = UserId::new();

        repository
            .expect_create()
            .withf(move |expense| {
                expense.user_id == user_id
                    && expense.amount.value() == Decimal::from_str("10.5").unwrap()
                    && expense.purpose.as_str() == "lunch"
                    && expense.account.as_str() == "cash"
                    && expense.date == expense.created_at
            })
            .times(1)
            .returning(|expense| Ok(expense));

        let service = ExpenseService::new(Arc::new(repository));

        let before = Utc::now();
        let expense = service
            .add_expense(user_id, command("10.5", None))
            .await
            .unwrap();

        assert!(expense.date >= before);
        assert!(expense.date <= Utc::now());
    }

    #[tokio::test]
    async fn test_add_expense_keeps_explicit_date() {
        let mut repository = MockTestExpenseRepository::new();
        let date = Utc.with_ymd_and_hms(2023, 12, 24, 18, 0, 0).unwrap();

        repository
            .expect_create()
            .withf(move |expense| expense.date == date)
            .times(1)
            .returning(|expense| Ok(expense));

        let service = ExpenseService::new(Arc::new(repository));

        let expense = service
            .add_expense(UserId::new(), command("3", Some(date)))
            .await
            .unwrap();

        assert_eq!(expense.date, date);
        assert!(expense.created_at > date);
    }

    #[tokio::test]
    async fn test_add_expense_generates_distinct_ids() {
        let mut repository = MockTestExpenseRepository::new();
        repository
            .expect_create()
            .times(2)
            .returning(|expense| Ok(expense));

        let service = ExpenseService::new(Arc::new(repository));
        let user_id = UserId::new();

        let first = service
            .add_expense(user_id, command("1", None))
            .await
            .unwrap();
        let second = service
            .add_expense(user_id, command("1", None))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_add_expense_database_error() {
        let mut repository = MockTestExpenseRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(ExpenseError::DatabaseError("insert failed".to_string())));

        let service = ExpenseService::new(Arc::new(repository));

        let result = service.add_expense(UserId::new(), command("1", None)).await;
        assert!(matches!(result, Err(ExpenseError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_list_expenses_empty() {
        let mut repository = MockTestExpenseRepository::new();
        repository
            .expect_list_by_user()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = ExpenseService::new(Arc::new(repository));

        let expenses = service.list_expenses(&UserId::new()).await.unwrap();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_list_expenses_passes_owner() {
        let mut repository = MockTestExpenseRepository::new();
        let user_id = UserId::new();
        let now = Utc::now();
        let stored = vec![
            Expense {
                id: ExpenseId::new(),
                user_id,
                amount: Amount::new(Decimal::from(5)).unwrap(),
                purpose: Purpose::new("coffee".to_string()).unwrap(),
                account: AccountName::new("card".to_string()).unwrap(),
                date: now,
                created_at: now,
            },
            Expense {
                id: ExpenseId::new(),
                user_id,
                amount: Amount::new(Decimal::from(7)).unwrap(),
                purpose: Purpose::new("bus".to_string()).unwrap(),
                account: AccountName::new("cash".to_string()).unwrap(),
                date: now - Duration::days(1),
                created_at: now,
            },
        ];

        let returned = stored.clone();
        repository
            .expect_list_by_user()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let service = ExpenseService::new(Arc::new(repository));

        let expenses = service.list_expenses(&user_id).await.unwrap();
        assert_eq!(expenses, stored);
    }

    #[tokio::test]
    async fn test_list_expenses_database_error() {
        let mut repository = MockTestExpenseRepository::new();
        repository
            .expect_list_by_user()
            .times(1)
            .returning(|_| Err(ExpenseError::DatabaseError("timeout".to_string())));

        let service = ExpenseService::new(Arc::new(repository));

        let result = service.list_expenses(&UserId::new()).await;
        assert!(matches!(result, Err(ExpenseError::DatabaseError(_))));
    }
}
