use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::expense::errors::AmountError;
use crate::domain::expense::errors::ExpenseDateError;
use crate::domain::expense::errors::TextFieldError;
use crate::domain::expense::models::parse_expense_date;
use crate::domain::expense::models::AccountName;
use crate::domain::expense::models::Amount;
use crate::domain::expense::models::CreateExpenseCommand;
use crate::domain::expense::models::Expense;
use crate::domain::expense::models::Purpose;
use crate::domain::expense::ports::ExpenseServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_expense(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    payload: Result<Json<AddExpenseRequest>, JsonRejection>,
) -> Result<ApiSuccess<AddExpenseResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .expense_service
        .add_expense(auth_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref expense| ApiSuccess::new(StatusCode::OK, expense.into()))
}

/// HTTP request body for recording an expense (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddExpenseRequest {
    amount: Decimal,
    purpose: String,
    account_name: String,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseAddExpenseRequestError {
    #[error("{0}")]
    Amount(#[from] AmountError),

    #[error("{0}")]
    Field(#[from] TextFieldError),

    #[error("{0}")]
    Date(#[from] ExpenseDateError),
}

impl AddExpenseRequest {
    fn try_into_command(self) -> Result<CreateExpenseCommand, ParseAddExpenseRequestError> {
        let amount = Amount::new(self.amount)?;
        let purpose = Purpose::new(self.purpose)?;
        let account = AccountName::new(self.account_name)?;
        let date = parse_expense_date(self.date.as_deref())?;
        Ok(CreateExpenseCommand::new(amount, purpose, account, date))
    }
}

impl From<ParseAddExpenseRequestError> for ApiError {
    fn from(err: ParseAddExpenseRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddExpenseResponseData {
    pub message: String,
    pub expense_id: String,
}

impl From<&Expense> for AddExpenseResponseData {
    fn from(expense: &Expense) -> Self {
        Self {
            message: "Expense added successfully".to_string(),
            expense_id: expense.id.to_string(),
        }
    }
}
