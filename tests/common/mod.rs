#![allow(dead_code)]

//! Shared test harness: in-memory repository implementations and state setup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use shortlink::application::services::{AuthService, LinkService};
use shortlink::domain::entities::{Account, Link, NewAccount, NewLink};
use shortlink::domain::repositories::{AccountRepository, InsertOutcome, LinkRepository};
use shortlink::error::AppError;
use shortlink::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-signing-secret";

/// In-memory link store enforcing the same unique constraints as the
/// PostgreSQL schema.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    /// Inserts a link directly, bypassing the service layer and constraint
    /// checks. Tests control their own fixtures.
    pub fn seed_link(
        &self,
        owner_id: i64,
        short_code: &str,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Link {
        let now = Utc::now();
        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            owner_id,
            original_url: original_url.to_string(),
            short_code: short_code.to_string(),
            clicks: 0,
            expires_at,
            created_at: now,
            updated_at: now,
        };

        self.links.lock().unwrap().push(link.clone());
        link
    }

    pub fn get(&self, id: i64) -> Option<Link> {
        self.links.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    pub fn count(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.short_code == new_link.short_code) {
            return Ok(InsertOutcome::CodeTaken);
        }
        if links
            .iter()
            .any(|l| l.owner_id == new_link.owner_id && l.original_url == new_link.original_url)
        {
            return Ok(InsertOutcome::DuplicateUrl);
        }

        let now = Utc::now();
        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            owner_id: new_link.owner_id,
            original_url: new_link.original_url,
            short_code: new_link.short_code,
            clicks: 0,
            expires_at: new_link.expires_at,
            created_at: now,
            updated_at: now,
        };

        links.push(link.clone());
        Ok(InsertOutcome::Inserted(link))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_code == short_code)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.get(id))
    }

    async fn find_by_owner_and_url(
        &self,
        owner_id: i64,
        original_url: &str,
    ) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.owner_id == owner_id && l.original_url == original_url)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let mut owned: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();

        match links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.clicks += 1;
                link.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.id != id);
        Ok(links.len() < before)
    }
}

/// In-memory account store with a unique email constraint.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
    next_id: AtomicI64,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.iter().any(|a| a.email == new_account.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "accounts_email_key" }),
            ));
        }

        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: new_account.email,
            password_hash: new_account.password_hash,
            created_at: Utc::now(),
        };

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }
}

/// Application state wired to in-memory stores, plus direct handles to them
/// for seeding and assertions.
pub struct TestContext {
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
    pub accounts: Arc<InMemoryAccountRepository>,
}

pub fn create_test_state() -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::default());
    let accounts = Arc::new(InMemoryAccountRepository::default());

    let state = AppState {
        link_service: Arc::new(LinkService::new(links.clone())),
        auth_service: Arc::new(AuthService::new(
            accounts.clone(),
            TEST_JWT_SECRET.to_string(),
            3600,
        )),
    };

    TestContext {
        state,
        links,
        accounts,
    }
}

/// Registers an account and issues a bearer token for it.
pub async fn create_account(ctx: &TestContext, email: &str) -> (i64, String) {
    let account = ctx
        .state
        .auth_service
        .register(email, "password123")
        .await
        .unwrap();

    let token = ctx.state.auth_service.issue_token(account.id).unwrap();

    (account.id, token)
}
