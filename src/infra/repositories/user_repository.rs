//! User repository, including the saved-restaurant links.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::entities::{oauth, restaurant, user_restaurant, RestaurantEntity};
use crate::domain::{OAuthAccount, Restaurant, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a password account
    async fn create(&self, username: String, email: String, password_hash: String) -> AppResult<User>;

    /// Restaurants saved by the user, ordered by restaurant id
    async fn list_restaurants(&self, user_id: i32) -> AppResult<Vec<Restaurant>>;

    /// Save a restaurant for the user; saving twice is a no-op
    async fn save_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<()>;

    /// Returns false when the link did not exist
    async fn unsave_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<bool>;

    /// Whether the user has saved the restaurant
    async fn has_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<bool>;
}

pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, username: String, email: String, password_hash: String) -> AppResult<User> {
        insert(&self.db, username, email, Some(password_hash)).await
    }

    async fn list_restaurants(&self, user_id: i32) -> AppResult<Vec<Restaurant>> {
        let models = RestaurantEntity::find()
            .inner_join(user_restaurant::Entity)
            .filter(user_restaurant::Column::UserId.eq(user_id))
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Restaurant::from).collect())
    }

    async fn save_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<()> {
        link_restaurant(&self.db, user_id, restaurant_id).await
    }

    async fn unsave_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<bool> {
        let result = user_restaurant::Entity::delete_many()
            .filter(user_restaurant::Column::UserId.eq(user_id))
            .filter(user_restaurant::Column::RestaurantId.eq(restaurant_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn has_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<bool> {
        let link = user_restaurant::Entity::find_by_id((user_id, restaurant_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(link.is_some())
    }
}

/// Insert a user. A missing password hash marks the account as OAuth-only.
pub(crate) async fn insert<C: ConnectionTrait>(
    db: &C,
    username: String,
    email: String,
    password_hash: Option<String>,
) -> AppResult<User> {
    let is_oauth = password_hash.is_none();
    let active_model = ActiveModel {
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        is_oauth: Set(is_oauth),
        is_enable: Set(true),
        create_at: Set(chrono::Utc::now()),
        update_at: Set(None),
        ..Default::default()
    };

    let model = active_model.insert(db).await.map_err(AppError::from)?;
    Ok(User::from(model))
}

pub(crate) async fn insert_oauth<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    provider: String,
    access_token: String,
) -> AppResult<OAuthAccount> {
    let active_model = oauth::ActiveModel {
        user_id: Set(user_id),
        provider: Set(provider),
        access_token: Set(access_token),
        create_at: Set(chrono::Utc::now()),
        update_at: Set(None),
        ..Default::default()
    };

    let model = active_model.insert(db).await.map_err(AppError::from)?;
    Ok(OAuthAccount::from(model))
}

/// Idempotent insert into the user/restaurant junction.
pub(crate) async fn link_restaurant<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    restaurant_id: i32,
) -> AppResult<()> {
    let link = user_restaurant::ActiveModel {
        user_id: Set(user_id),
        restaurant_id: Set(restaurant_id),
    };

    user_restaurant::Entity::insert(link)
        .on_conflict(
            OnConflict::columns([
                user_restaurant::Column::UserId,
                user_restaurant::Column::RestaurantId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(AppError::from)?;

    Ok(())
}

/// Delete a user with its OAuth record and saved-restaurant links.
/// Returns false when the user does not exist.
pub(crate) async fn delete_cascade<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<bool> {
    oauth::Entity::delete_many()
        .filter(oauth::Column::UserId.eq(id))
        .exec(db)
        .await?;
    user_restaurant::Entity::delete_many()
        .filter(user_restaurant::Column::UserId.eq(id))
        .exec(db)
        .await?;

    let result = UserEntity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
