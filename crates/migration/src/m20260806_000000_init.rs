//! Initial schema migration - creates all tables from scratch.
//!
//! Complete schema for the storefront:
//!
//! - `users`: accounts with store-credit balance and moderation flags
//! - `games`: catalog entries moving through pending/approved/rejected
//! - `frames`: cosmetic avatar frames
//! - `game_purchases`: game entitlements with the price paid
//! - `user_frames`: frame entitlements with the price paid
//! - `system_settings`: key/value flags (maintenance mode)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    Password,
    Username,
    AvatarUrl,
    Role,
    BalanceCents,
    IsBanned,
    IsVerified,
    TimeSpentHours,
    ActiveFrameId,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Title,
    Description,
    Genre,
    AgeRating,
    PriceCents,
    LogoUrl,
    FileUrl,
    ContactEmail,
    EngineType,
    Status,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Frames {
    Table,
    Id,
    Name,
    ImageUrl,
    PriceCents,
}

#[derive(Iden)]
enum GamePurchases {
    Table,
    UserId,
    GameId,
    PricePaidCents,
    PurchasedAt,
}

#[derive(Iden)]
enum UserFrames {
    Table,
    UserId,
    FrameId,
    PricePaidCents,
    PurchasedAt,
}

#[derive(Iden)]
enum SystemSettings {
    Table,
    Key,
    Value,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::AvatarUrl).string())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("user"),
                    )
                    .col(
                        ColumnDef::new(Users::BalanceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::IsBanned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::TimeSpentHours)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::ActiveFrameId).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Title).string().not_null())
                    .col(ColumnDef::new(Games::Description).string())
                    .col(ColumnDef::new(Games::Genre).string())
                    .col(ColumnDef::new(Games::AgeRating).string())
                    .col(
                        ColumnDef::new(Games::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::LogoUrl).string())
                    .col(ColumnDef::new(Games::FileUrl).string())
                    .col(ColumnDef::new(Games::ContactEmail).string())
                    .col(ColumnDef::new(Games::EngineType).string())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Games::CreatedBy).integer())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-games-status")
                    .table(Games::Table)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Frames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Frames::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Frames::Name).string().not_null())
                    .col(ColumnDef::new(Frames::ImageUrl).string().not_null())
                    .col(
                        ColumnDef::new(Frames::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GamePurchases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GamePurchases::UserId).integer().not_null())
                    .col(ColumnDef::new(GamePurchases::GameId).integer().not_null())
                    .col(
                        ColumnDef::new(GamePurchases::PricePaidCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GamePurchases::PurchasedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GamePurchases::UserId)
                            .col(GamePurchases::GameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-game_purchases-user_id")
                            .from(GamePurchases::Table, GamePurchases::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-game_purchases-game_id")
                            .from(GamePurchases::Table, GamePurchases::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserFrames::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserFrames::UserId).integer().not_null())
                    .col(ColumnDef::new(UserFrames::FrameId).integer().not_null())
                    .col(
                        ColumnDef::new(UserFrames::PricePaidCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFrames::PurchasedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserFrames::UserId)
                            .col(UserFrames::FrameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_frames-user_id")
                            .from(UserFrames::Table, UserFrames::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_frames-frame_id")
                            .from(UserFrames::Table, UserFrames::FrameId)
                            .to(Frames::Table, Frames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettings::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemSettings::Value).string().not_null())
                    .col(
                        ColumnDef::new(SystemSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserFrames::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePurchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Frames::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
