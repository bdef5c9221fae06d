use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::expense::errors::AmountError;
use crate::domain::expense::errors::ExpenseDateError;
use crate::domain::expense::errors::TextFieldError;
use crate::domain::user::models::UserId;

/// Expense aggregate entity.
///
/// A single spend owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub amount: Amount,
    pub purpose: Purpose,
    pub account: AccountName,
    /// When the spend happened
    pub date: DateTime<Utc>,
    /// When the record was stored
    pub created_at: DateTime<Utc>,
}

/// Expense unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpenseId(pub Uuid);

impl ExpenseId {
    /// Generate a new random expense ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Monetary amount, strictly positive, stored with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    const SCALE: u32 = 2;

    /// Create a validated amount.
    ///
    /// Rounds half-even to cents first, so `0.001` is rejected as zero.
    ///
    /// # Errors
    /// * `NotPositive` - Zero or negative after rounding
    /// * `TooLarge` - Does not fit `NUMERIC(12,2)`
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        let value = value.round_dp(Self::SCALE);
        let max = Self::max();

        if value <= Decimal::ZERO {
            Err(AmountError::NotPositive)
        } else if value > max {
            Err(AmountError::TooLarge {
                max: max.to_string(),
            })
        } else {
            Ok(Self(value))
        }
    }

    fn max() -> Decimal {
        // 10 integer digits, 2 fractional
        Decimal::new(999_999_999_999, Self::SCALE)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

const MAX_TEXT_LENGTH: usize = 255;

fn validated_text(field: &'static str, value: String) -> Result<String, TextFieldError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if length == 0 {
        Err(TextFieldError::Empty { field })
    } else if length > MAX_TEXT_LENGTH {
        Err(TextFieldError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
            actual: length,
        })
    } else {
        Ok(trimmed.to_string())
    }
}

/// What the money was spent on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purpose(String);

impl Purpose {
    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - More than 255 characters
    pub fn new(purpose: String) -> Result<Self, TextFieldError> {
        validated_text("Purpose", purpose).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Label of the account the money came from (e.g. "cash").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - More than 255 characters
    pub fn new(account: String) -> Result<Self, TextFieldError> {
        validated_text("Account", account).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parse an optional client-supplied expense date.
///
/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` (midnight UTC).
/// Blank input means "not given".
///
/// # Errors
/// * `InvalidFormat` - Neither accepted form
pub fn parse_expense_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ExpenseDateError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| ExpenseDateError::InvalidFormat(raw.to_string()))
}

/// Command to record a new expense with domain types
#[derive(Debug)]
pub struct CreateExpenseCommand {
    pub amount: Amount,
    pub purpose: Purpose,
    pub account: AccountName,
    /// Defaults to the current server time when absent
    pub date: Option<DateTime<Utc>>,
}

impl CreateExpenseCommand {
    pub fn new(
        amount: Amount,
        purpose: Purpose,
        account: AccountName,
        date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            amount,
            purpose,
            account,
            date,
        }
    }
}
