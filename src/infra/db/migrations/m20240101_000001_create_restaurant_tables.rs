//! Migration: restaurants, their opening hours and type tags.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurant::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Restaurant::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Restaurant::Address).text().not_null())
                    .col(ColumnDef::new(Restaurant::Phone).string_len(20).null())
                    .col(ColumnDef::new(Restaurant::Lat).double().not_null())
                    .col(ColumnDef::new(Restaurant::Lng).double().not_null())
                    .col(ColumnDef::new(Restaurant::Desc).text().null())
                    .col(ColumnDef::new(Restaurant::Price).integer().null())
                    .col(
                        ColumnDef::new(Restaurant::IsEnable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Restaurant::CreateAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Restaurant::UpdateAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_name")
                    .table(Restaurant::Table)
                    .col(Restaurant::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lat_lng")
                    .table(Restaurant::Table)
                    .col(Restaurant::Lat)
                    .col(Restaurant::Lng)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RestaurantOpenTime::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantOpenTime::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RestaurantOpenTime::RestaurantId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantOpenTime::DayOfWeek)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RestaurantOpenTime::OpenTime).time().not_null())
                    .col(ColumnDef::new(RestaurantOpenTime::CloseTime).time().not_null())
                    .col(
                        ColumnDef::new(RestaurantOpenTime::CreateAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantOpenTime::UpdateAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_open_time_restaurant")
                            .from(RestaurantOpenTime::Table, RestaurantOpenTime::RestaurantId)
                            .to(Restaurant::Table, Restaurant::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup by restaurant, and by restaurant + day for the open-now filter
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_id")
                    .table(RestaurantOpenTime::Table)
                    .col(RestaurantOpenTime::RestaurantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_id_day_of_week")
                    .table(RestaurantOpenTime::Table)
                    .col(RestaurantOpenTime::RestaurantId)
                    .col(RestaurantOpenTime::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RestaurantType::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantType::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RestaurantType::Name)
                            .string_len(30)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RestaurantType::Desc).text().null())
                    .col(
                        ColumnDef::new(RestaurantType::CreateAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantType::UpdateAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RestaurantTypeIntermediary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantTypeIntermediary::RestaurantId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantTypeIntermediary::RestaurantTypeId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RestaurantTypeIntermediary::RestaurantId)
                            .col(RestaurantTypeIntermediary::RestaurantTypeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_type_link_restaurant")
                            .from(
                                RestaurantTypeIntermediary::Table,
                                RestaurantTypeIntermediary::RestaurantId,
                            )
                            .to(Restaurant::Table, Restaurant::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_type_link_type")
                            .from(
                                RestaurantTypeIntermediary::Table,
                                RestaurantTypeIntermediary::RestaurantTypeId,
                            )
                            .to(RestaurantType::Table, RestaurantType::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first
        manager
            .drop_table(Table::drop().table(RestaurantTypeIntermediary::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RestaurantType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RestaurantOpenTime::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Restaurant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Restaurant {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Lat,
    Lng,
    Desc,
    Price,
    IsEnable,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum RestaurantOpenTime {
    Table,
    Id,
    RestaurantId,
    DayOfWeek,
    OpenTime,
    CloseTime,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum RestaurantType {
    Table,
    Id,
    Name,
    Desc,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum RestaurantTypeIntermediary {
    Table,
    RestaurantId,
    RestaurantTypeId,
}
