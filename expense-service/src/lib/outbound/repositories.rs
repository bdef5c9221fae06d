pub mod expense;
pub mod user;

pub use expense::PostgresExpenseRepository;
pub use user::PostgresUserRepository;
