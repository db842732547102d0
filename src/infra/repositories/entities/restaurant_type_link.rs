//! Junction between restaurants and their types.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant_type_intermediary")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub restaurant_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub restaurant_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    #[sea_orm(
        belongs_to = "super::restaurant_type::Entity",
        from = "Column::RestaurantTypeId",
        to = "super::restaurant_type::Column::Id"
    )]
    RestaurantType,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::restaurant_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
