use actix_web::{test, web, App};
use secrecy::Secret;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use fintrack_be::{auth, dashboard, expense, income, reports, user};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

static JWT_SECRET: &str = "test_jwt_secret_for_integration_tests";

pub struct TestApp {
    pub pool: PgPool,
    pub test_id: String,
}

pub struct TestResponse {
    status: u16,
    body: bytes::Bytes,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub async fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }
}

macro_rules! test_app {
    ($pool:expr) => {{
        let jwt_secret = Secret::new(JWT_SECRET.to_string());
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new(jwt_secret))
                .service(auth::register)
                .service(auth::login)
                .service(auth::verify)
                .service(income::create_income)
                .service(income::list_incomes)
                .service(income::get_income)
                .service(income::update_income)
                .service(income::delete_income)
                .service(expense::create_expense)
                .service(expense::list_expenses)
                .service(expense::get_expense)
                .service(expense::update_expense)
                .service(expense::delete_expense)
                .service(dashboard::summary)
                .service(dashboard::recent_transactions)
                .service(dashboard::expense_categories)
                .service(dashboard::monthly_trend)
                .service(reports::yearly_report)
                .service(reports::period_report)
                .service(user::get_profile)
                .service(user::update_profile)
                .service(user::change_password)
                .service(user::delete_account),
        )
        .await
    }};
}

impl TestApp {
    /// Connect to the test database; None when no database is reachable
    /// so suites can skip instead of erroring
    pub async fn new() -> Option<Self> {
        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let test_id = format!("{timestamp}_{counter}");

        let database_url = std::env::var("DATABASE_URL").ok()?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await
            .ok()?;

        Some(TestApp { pool, test_id })
    }

    /// Generate a unique email for this test run
    pub fn unique_email(&self, prefix: &str) -> String {
        format!("{prefix}_{}_@test.com", self.test_id)
    }

    /// Generate a unique username for this test run
    pub fn unique_username(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.test_id)
    }

    /// Register a fresh user and return their bearer token
    pub async fn register_user(&self, prefix: &str) -> String {
        let payload = serde_json::json!({
            "username": self.unique_username(prefix),
            "email": self.unique_email(prefix),
            "password": "password123"
        });

        let response = self.post("/auth/register", &payload, None).await;
        assert_eq!(response.status(), 201, "test user registration failed");

        let body = response.json().await;
        body["token"].as_str().expect("missing token").to_string()
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let app = test_app!(self.pool);

        let mut req = test::TestRequest::get().uri(path);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }

    pub async fn post(&self, path: &str, payload: &Value, token: Option<&str>) -> TestResponse {
        let app = test_app!(self.pool);

        let mut req = test::TestRequest::post().uri(path).set_json(payload);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }

    pub async fn put(&self, path: &str, payload: &Value, token: Option<&str>) -> TestResponse {
        let app = test_app!(self.pool);

        let mut req = test::TestRequest::put().uri(path).set_json(payload);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }

    pub async fn delete(&self, path: &str, payload: &Value, token: Option<&str>) -> TestResponse {
        let app = test_app!(self.pool);

        let mut req = test::TestRequest::delete().uri(path).set_json(payload);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }
}
