//! OAuth credential entity, present only for OAuth-only users.

use sea_orm::entity::prelude::*;

use crate::domain::OAuthAccount;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "oauth")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub provider: String,
    pub access_token: String,
    pub create_at: DateTimeUtc,
    pub update_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OAuthAccount {
    fn from(model: Model) -> Self {
        OAuthAccount {
            id: model.id,
            user_id: model.user_id,
            provider: model.provider,
            access_token: model.access_token,
            create_at: model.create_at,
            update_at: model.update_at,
        }
    }
}
