//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// NULL for OAuth-only accounts
    pub password_hash: Option<String>,
    pub is_oauth: bool,
    pub is_enable: bool,
    pub create_at: DateTimeUtc,
    pub update_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::oauth::Entity")]
    OAuth,
    #[sea_orm(has_many = "super::user_restaurant::Entity")]
    RestaurantLink,
}

impl Related<super::oauth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OAuth.def()
    }
}

impl Related<super::user_restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            is_oauth: model.is_oauth,
            is_enable: model.is_enable,
            create_at: model.create_at,
            update_at: model.update_at,
        }
    }
}
