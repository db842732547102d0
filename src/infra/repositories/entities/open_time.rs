//! Opening-hours database entity.

use chrono::NaiveTime;
use sea_orm::entity::prelude::*;

use crate::domain::OpenTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant_open_time")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub restaurant_id: i32,
    pub day_of_week: i32,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub create_at: DateTimeUtc,
    pub update_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OpenTime {
    fn from(model: Model) -> Self {
        OpenTime {
            id: model.id,
            restaurant_id: model.restaurant_id,
            day_of_week: model.day_of_week,
            open_time: model.open_time,
            close_time: model.close_time,
            create_at: model.create_at,
            update_at: model.update_at,
        }
    }
}
