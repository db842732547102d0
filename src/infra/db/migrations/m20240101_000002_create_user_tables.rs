//! Migration: users, their OAuth credentials and saved restaurants.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_restaurant_tables::Restaurant;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Username)
                            .string_len(30)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::PasswordHash).string_len(128).null())
                    .col(
                        ColumnDef::new(User::IsOauth)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(User::IsEnable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(User::CreateAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::UpdateAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Oauth::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Oauth::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Oauth::UserId).integer().not_null())
                    .col(ColumnDef::new(Oauth::Provider).string_len(30).not_null())
                    .col(ColumnDef::new(Oauth::AccessToken).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Oauth::CreateAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Oauth::UpdateAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oauth_user")
                            .from(Oauth::Table, Oauth::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRestaurantIntermediary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRestaurantIntermediary::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRestaurantIntermediary::RestaurantId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserRestaurantIntermediary::UserId)
                            .col(UserRestaurantIntermediary::RestaurantId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_link_user")
                            .from(
                                UserRestaurantIntermediary::Table,
                                UserRestaurantIntermediary::UserId,
                            )
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_link_restaurant")
                            .from(
                                UserRestaurantIntermediary::Table,
                                UserRestaurantIntermediary::RestaurantId,
                            )
                            .to(Restaurant::Table, Restaurant::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRestaurantIntermediary::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Oauth::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    IsOauth,
    IsEnable,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum Oauth {
    Table,
    Id,
    UserId,
    Provider,
    AccessToken,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum UserRestaurantIntermediary {
    Table,
    UserId,
    RestaurantId,
}
