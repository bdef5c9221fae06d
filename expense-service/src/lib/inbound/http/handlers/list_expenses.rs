use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::expense::models::Expense;
use crate::domain::expense::ports::ExpenseServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ListExpensesResponseData>, ApiError> {
    state
        .expense_service
        .list_expenses(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|expenses| {
            let expenses = expenses.iter().map(ExpenseData::from).collect();
            ApiSuccess::new(StatusCode::OK, ListExpensesResponseData { expenses })
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListExpensesResponseData {
    pub expenses: Vec<ExpenseData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseData {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub purpose: String,
    pub account_name: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&Expense> for ExpenseData {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            amount: expense.amount.value(),
            purpose: expense.purpose.as_str().to_string(),
            account_name: expense.account.as_str().to_string(),
            date: expense.date,
            created_at: expense.created_at,
        }
    }
}
