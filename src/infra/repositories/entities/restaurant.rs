//! Restaurant database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Restaurant;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub lat: f64,
    #[sea_orm(column_type = "Double")]
    pub lng: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub desc: Option<String>,
    pub price: Option<i32>,
    pub is_enable: bool,
    pub create_at: DateTimeUtc,
    pub update_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::open_time::Entity")]
    OpenTime,
    #[sea_orm(has_many = "super::restaurant_type_link::Entity")]
    TypeLink,
    #[sea_orm(has_many = "super::user_restaurant::Entity")]
    UserLink,
}

impl Related<super::open_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpenTime.def()
    }
}

impl Related<super::restaurant_type_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TypeLink.def()
    }
}

impl Related<super::user_restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Restaurant {
    fn from(model: Model) -> Self {
        Restaurant {
            id: model.id,
            name: model.name,
            address: model.address,
            phone: model.phone,
            lat: model.lat,
            lng: model.lng,
            desc: model.desc,
            price: model.price,
            is_enable: model.is_enable,
            create_at: model.create_at,
            update_at: model.update_at,
        }
    }
}
