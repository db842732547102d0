//! Restaurant type repository and the restaurant/type tag links.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::restaurant_type::{self, ActiveModel, Entity as RestaurantTypeEntity};
use super::entities::restaurant_type_link;
use crate::domain::RestaurantType;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RestaurantTypeRepository: Send + Sync {
    /// All types ordered by name
    async fn list(&self) -> AppResult<Vec<RestaurantType>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<RestaurantType>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<RestaurantType>>;

    async fn create(&self, name: String, desc: Option<String>) -> AppResult<RestaurantType>;

    /// Types attached to a restaurant
    async fn list_by_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<RestaurantType>>;

    /// Attach a type to a restaurant; tagging twice is a no-op
    async fn tag(&self, restaurant_id: i32, type_id: i32) -> AppResult<()>;

    /// Returns false when the tag did not exist
    async fn untag(&self, restaurant_id: i32, type_id: i32) -> AppResult<bool>;
}

pub struct RestaurantTypeStore {
    db: DatabaseConnection,
}

impl RestaurantTypeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RestaurantTypeRepository for RestaurantTypeStore {
    async fn list(&self) -> AppResult<Vec<RestaurantType>> {
        let models = RestaurantTypeEntity::find()
            .order_by_asc(restaurant_type::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(RestaurantType::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<RestaurantType>> {
        let result = RestaurantTypeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RestaurantType::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<RestaurantType>> {
        let result = RestaurantTypeEntity::find()
            .filter(restaurant_type::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RestaurantType::from))
    }

    async fn create(&self, name: String, desc: Option<String>) -> AppResult<RestaurantType> {
        let active_model = ActiveModel {
            name: Set(name),
            desc: Set(desc),
            create_at: Set(chrono::Utc::now()),
            update_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(RestaurantType::from(model))
    }

    async fn list_by_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<RestaurantType>> {
        list_by_restaurant(&self.db, restaurant_id).await
    }

    async fn tag(&self, restaurant_id: i32, type_id: i32) -> AppResult<()> {
        let link = restaurant_type_link::ActiveModel {
            restaurant_id: Set(restaurant_id),
            restaurant_type_id: Set(type_id),
        };

        restaurant_type_link::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    restaurant_type_link::Column::RestaurantId,
                    restaurant_type_link::Column::RestaurantTypeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn untag(&self, restaurant_id: i32, type_id: i32) -> AppResult<bool> {
        let result = restaurant_type_link::Entity::delete_by_id((restaurant_id, type_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

pub(crate) async fn list_by_restaurant<C: ConnectionTrait>(
    db: &C,
    restaurant_id: i32,
) -> AppResult<Vec<RestaurantType>> {
    let models = RestaurantTypeEntity::find()
        .inner_join(restaurant_type_link::Entity)
        .filter(restaurant_type_link::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(restaurant_type::Column::Name)
        .all(db)
        .await
        .map_err(AppError::from)?;

    Ok(models.into_iter().map(RestaurantType::from).collect())
}
