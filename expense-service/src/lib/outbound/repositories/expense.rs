use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::models::AccountName;
use crate::domain::expense::models::Amount;
use crate::domain::expense::models::Expense;
use crate::domain::expense::models::ExpenseId;
use crate::domain::expense::models::Purpose;
use crate::domain::expense::ports::ExpenseRepository;
use crate::domain::user::models::UserId;

pub struct PostgresExpenseRepository {
    pool: PgPool,
}

impl PostgresExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: Uuid,
    user_id: Uuid,
    amount: Decimal,
    purpose: String,
    account: String,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = ExpenseError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        Ok(Expense {
            id: ExpenseId(row.id),
            user_id: UserId(row.user_id),
            amount: Amount::new(row.amount)?,
            purpose: Purpose::new(row.purpose)?,
            account: AccountName::new(row.account)?,
            date: row.date,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    async fn create(&self, expense: Expense) -> Result<Expense, ExpenseError> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, amount, purpose, account, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(expense.id.0)
        .bind(expense.user_id.0)
        .bind(expense.amount.value())
        .bind(expense.purpose.as_str())
        .bind(expense.account.as_str())
        .bind(expense.date)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %expense.user_id, "Failed to insert expense");
            ExpenseError::DatabaseError(e.to_string())
        })?;

        Ok(expense)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Expense>, ExpenseError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, user_id, amount, purpose, account, date, created_at
            FROM expenses
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to fetch expenses");
            ExpenseError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Expense::try_from).collect()
    }
}
