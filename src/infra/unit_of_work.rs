//! Unit of Work: one entry point for repositories plus transactional
//! execution for multi-row writes.
//!
//! Writes that touch several tables (cascading deletes, batch inserts,
//! restaurant creation with its owner link) run through [`TransactionContext`]
//! so they commit or roll back as a whole.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;

use super::repositories::{
    open_time_repository, restaurant_repository, user_repository, OpenTimeRepository,
    OpenTimeStore, RestaurantRepository, RestaurantStore, RestaurantTypeRepository,
    RestaurantTypeStore, UserRepository, UserStore,
};
use crate::domain::{NewRestaurant, OAuthAccount, OpenTime, OpenTimeDraft, Restaurant, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method; tests
/// implement it by hand around the repository mocks.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn restaurants(&self) -> Arc<dyn RestaurantRepository>;

    fn open_times(&self) -> Arc<dyn OpenTimeRepository>;

    fn restaurant_types(&self) -> Arc<dyn RestaurantTypeRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn restaurants(&self) -> TxRestaurantRepository<'_> {
        TxRestaurantRepository { txn: self.txn }
    }

    pub fn open_times(&self) -> TxOpenTimeRepository<'_> {
        TxOpenTimeRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    restaurant_repo: Arc<RestaurantStore>,
    open_time_repo: Arc<OpenTimeStore>,
    restaurant_type_repo: Arc<RestaurantTypeStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            restaurant_repo: Arc::new(RestaurantStore::new(db.clone())),
            open_time_repo: Arc::new(OpenTimeStore::new(db.clone())),
            restaurant_type_repo: Arc::new(RestaurantTypeStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn restaurants(&self) -> Arc<dyn RestaurantRepository> {
        self.restaurant_repo.clone()
    }

    fn open_times(&self) -> Arc<dyn OpenTimeRepository> {
        self.open_time_repo.clone()
    }

    fn restaurant_types(&self) -> Arc<dyn RestaurantTypeRepository> {
        self.restaurant_type_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Backend default isolation; SQLite rejects explicit levels
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-bound user writes.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    /// Create an OAuth-only user (no password hash) and its provider record.
    pub async fn create_oauth(
        &self,
        username: String,
        email: String,
        provider: String,
        access_token: String,
    ) -> AppResult<(User, OAuthAccount)> {
        let user = user_repository::insert(self.txn, username, email, None).await?;
        let account = user_repository::insert_oauth(self.txn, user.id, provider, access_token).await?;
        Ok((user, account))
    }

    pub async fn save_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<()> {
        user_repository::link_restaurant(self.txn, user_id, restaurant_id).await
    }

    /// Delete the user, its OAuth record and its saved-restaurant links
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        user_repository::delete_cascade(self.txn, id).await
    }
}

/// Transaction-bound restaurant writes.
pub struct TxRestaurantRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRestaurantRepository<'a> {
    pub async fn create(&self, new: NewRestaurant) -> AppResult<Restaurant> {
        restaurant_repository::insert(self.txn, new).await
    }

    /// Delete the restaurant with its opening hours, favorites and tags
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        restaurant_repository::delete_cascade(self.txn, id).await
    }
}

/// Transaction-bound opening-hours writes.
pub struct TxOpenTimeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxOpenTimeRepository<'a> {
    pub async fn create_many(
        &self,
        restaurant_id: i32,
        drafts: &[OpenTimeDraft],
    ) -> AppResult<Vec<OpenTime>> {
        open_time_repository::insert_many(self.txn, restaurant_id, drafts).await
    }
}

/// Run `$body` inside a transaction with `$ctx` bound to its context.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
