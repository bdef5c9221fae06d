#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CredentialStore;
use auth::HashCost;
use auth::TokenService;
use expense_service::domain::expense::errors::ExpenseError;
use expense_service::domain::expense::models::Expense;
use expense_service::domain::expense::ports::ExpenseRepository;
use expense_service::domain::expense::service::ExpenseService;
use expense_service::domain::user::errors::UserError;
use expense_service::domain::user::models::EmailAddress;
use expense_service::domain::user::models::User;
use expense_service::domain::user::models::UserId;
use expense_service::domain::user::ports::UserRepository;
use expense_service::domain::user::service::AuthService;
use expense_service::inbound::http::router::create_router;
use serde_json::json;
use tokio::sync::RwLock;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
    pub expenses: Arc<InMemoryExpenseRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(InMemoryExpenseRepository::default()), None).await
    }

    /// Spawn the application with an expense store whose every call fails
    pub async fn spawn_with_failing_expense_storage() -> Self {
        Self::spawn_with(
            Arc::new(InMemoryExpenseRepository::default()),
            Some(Arc::new(FailingExpenseRepository)),
        )
        .await
    }

    async fn spawn_with(
        expenses: Arc<InMemoryExpenseRepository>,
        failing: Option<Arc<FailingExpenseRepository>>,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let credential_store = CredentialStore::with_cost(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build credential store");
        let authenticator = Arc::new(Authenticator::from_parts(
            credential_store,
            TokenService::new(TEST_SECRET),
        ));

        let users = Arc::new(InMemoryUserRepository::default());
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));

        let router = match failing {
            Some(failing) => create_router(
                auth_service,
                Arc::new(ExpenseService::new(failing)),
                Arc::clone(&authenticator),
            ),
            None => create_router(
                auth_service,
                Arc::new(ExpenseService::new(Arc::clone(&expenses))),
                Arc::clone(&authenticator),
            ),
        };

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
            expenses,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and log in, returning (token, user_id)
    pub async fn register_and_login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let response = self
            .post("/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }
}

/// User storage keeping rows in memory; enforces email uniqueness.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn find(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }
}

/// Expense storage keeping rows in memory, listing like the SQL query does.
#[derive(Default)]
pub struct InMemoryExpenseRepository {
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseRepository {
    pub async fn count(&self) -> usize {
        self.expenses.read().await.len()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn create(&self, expense: Expense) -> Result<Expense, ExpenseError> {
        self.expenses.write().await.push(expense.clone());
        Ok(expense)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Expense>, ExpenseError> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .read()
            .await
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();

        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(expenses)
    }
}

/// Expense storage that behaves like an unreachable database.
pub struct FailingExpenseRepository;

#[async_trait]
impl ExpenseRepository for FailingExpenseRepository {
    async fn create(&self, _expense: Expense) -> Result<Expense, ExpenseError> {
        Err(ExpenseError::DatabaseError(
            "connection refused".to_string(),
        ))
    }

    async fn list_by_user(&self, _user_id: &UserId) -> Result<Vec<Expense>, ExpenseError> {
        Err(ExpenseError::DatabaseError(
            "connection refused".to_string(),
        ))
    }
}
