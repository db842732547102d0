//! Opening-hours repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::open_time::{self, ActiveModel, Entity as OpenTimeEntity};
use crate::domain::{OpenTime, OpenTimeDraft, OpenTimePatch};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OpenTimeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<OpenTime>>;

    /// All opening hours of a restaurant ordered by day, then opening time
    async fn list_by_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<OpenTime>>;

    /// Apply a partial update. An empty patch writes nothing.
    async fn update(&self, id: i32, patch: OpenTimePatch) -> AppResult<Option<OpenTime>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

pub struct OpenTimeStore {
    db: DatabaseConnection,
}

impl OpenTimeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OpenTimeRepository for OpenTimeStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<OpenTime>> {
        let result = OpenTimeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(OpenTime::from))
    }

    async fn list_by_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<OpenTime>> {
        list_by_restaurant(&self.db, restaurant_id).await
    }

    async fn update(&self, id: i32, patch: OpenTimePatch) -> AppResult<Option<OpenTime>> {
        let Some(model) = OpenTimeEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(OpenTime::from(model)));
        }

        let mut patched = OpenTime::from(model.clone());
        patch.apply_to(&mut patched);

        let mut active: ActiveModel = model.into();
        active.day_of_week = Set(patched.day_of_week);
        active.open_time = Set(patched.open_time);
        active.close_time = Set(patched.close_time);
        active.update_at = Set(Some(chrono::Utc::now()));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(OpenTime::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = OpenTimeEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

pub(crate) async fn list_by_restaurant<C: ConnectionTrait>(
    db: &C,
    restaurant_id: i32,
) -> AppResult<Vec<OpenTime>> {
    let models = OpenTimeEntity::find()
        .filter(open_time::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(open_time::Column::DayOfWeek)
        .order_by_asc(open_time::Column::OpenTime)
        .all(db)
        .await
        .map_err(AppError::from)?;

    Ok(models.into_iter().map(OpenTime::from).collect())
}

/// Insert drafts one row each, in submission order.
pub(crate) async fn insert_many<C: ConnectionTrait>(
    db: &C,
    restaurant_id: i32,
    drafts: &[OpenTimeDraft],
) -> AppResult<Vec<OpenTime>> {
    let now = chrono::Utc::now();
    let mut created = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let active_model = ActiveModel {
            restaurant_id: Set(restaurant_id),
            day_of_week: Set(draft.day_of_week),
            open_time: Set(draft.open_time),
            close_time: Set(draft.close_time),
            create_at: Set(now),
            update_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(db).await.map_err(AppError::from)?;
        created.push(OpenTime::from(model));
    }

    Ok(created)
}
