//! Restaurant type database entity.

use sea_orm::entity::prelude::*;

use crate::domain::RestaurantType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub desc: Option<String>,
    pub create_at: DateTimeUtc,
    pub update_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurant_type_link::Entity")]
    RestaurantLink,
}

impl Related<super::restaurant_type_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RestaurantType {
    fn from(model: Model) -> Self {
        RestaurantType {
            id: model.id,
            name: model.name,
            desc: model.desc,
            create_at: model.create_at,
            update_at: model.update_at,
        }
    }
}
