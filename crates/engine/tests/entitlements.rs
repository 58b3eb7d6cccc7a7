use chrono::Utc;
use sea_orm::{ActiveValue, Database, DatabaseConnection, EntityTrait, prelude::*};

use engine::{
    Engine, EngineError, GameStatus, GameSubmission, MoneyCents, PurchaseOutcome, frames,
    game_purchases, games, users,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

async fn seed_user(db: &DatabaseConnection, email: &str, balance_cents: i64) -> i32 {
    users::ActiveModel {
        email: ActiveValue::Set(email.to_string()),
        password: ActiveValue::Set("password".to_string()),
        username: ActiveValue::Set(email.split('@').next().unwrap().to_string()),
        role: ActiveValue::Set("user".to_string()),
        balance_cents: ActiveValue::Set(balance_cents),
        is_banned: ActiveValue::Set(false),
        is_verified: ActiveValue::Set(false),
        time_spent_hours: ActiveValue::Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn seed_game(db: &DatabaseConnection, title: &str, price_cents: i64) -> i32 {
    games::ActiveModel {
        title: ActiveValue::Set(title.to_string()),
        price_cents: ActiveValue::Set(price_cents),
        status: ActiveValue::Set(GameStatus::Approved.as_str().to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn seed_frame(db: &DatabaseConnection, name: &str, price_cents: i64) -> i32 {
    frames::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        image_url: ActiveValue::Set(format!("https://cdn.example/{name}.png")),
        price_cents: ActiveValue::Set(price_cents),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn balance_of(db: &DatabaseConnection, user_id: i32) -> i64 {
    users::Entity::find_by_id(user_id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .balance_cents
}

async fn entitlement_count(db: &DatabaseConnection, user_id: i32) -> usize {
    game_purchases::Entity::find()
        .filter(game_purchases::Column::UserId.eq(user_id))
        .all(db)
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn purchase_debits_price_and_records_entitlement() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 10_000).await;
    let game_id = seed_game(&db, "Starfall", 6_000).await;

    let outcome = engine.purchase_game(user_id, game_id).await.unwrap();
    assert_eq!(outcome, PurchaseOutcome::Purchased);
    assert_eq!(balance_of(&db, user_id).await, 4_000);

    let purchase = game_purchases::Entity::find_by_id((user_id, game_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(purchase.price_paid_cents, 6_000);
}

#[tokio::test]
async fn repeat_purchase_neither_charges_nor_errors() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 10_000).await;
    let game_id = seed_game(&db, "Starfall", 6_000).await;

    engine.purchase_game(user_id, game_id).await.unwrap();
    let outcome = engine.purchase_game(user_id, game_id).await.unwrap();

    assert_eq!(outcome, PurchaseOutcome::AlreadyOwned);
    assert_eq!(balance_of(&db, user_id).await, 4_000);
    assert_eq!(entitlement_count(&db, user_id).await, 1);
}

#[tokio::test]
async fn insufficient_funds_leaves_state_untouched() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "bob@example.com", 4_000).await;
    let game_id = seed_game(&db, "Starfall", 5_000).await;

    let err = engine.purchase_game(user_id, game_id).await.unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));
    assert_eq!(balance_of(&db, user_id).await, 4_000);
    assert_eq!(entitlement_count(&db, user_id).await, 0);
}

#[tokio::test]
async fn revoke_refunds_ninety_percent_of_recorded_price() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 10_000).await;
    let game_id = seed_game(&db, "Starfall", 6_000).await;

    engine.purchase_game(user_id, game_id).await.unwrap();

    // Catalog price changes must not affect the refund.
    let game = games::Entity::find_by_id(game_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut game: games::ActiveModel = game.into();
    game.price_cents = ActiveValue::Set(12_000);
    game.update(&db).await.unwrap();

    let refund = engine.revoke_game(user_id, game_id).await.unwrap();
    assert_eq!(refund, MoneyCents::new(5_400));
    assert_eq!(balance_of(&db, user_id).await, 9_400);
    assert_eq!(entitlement_count(&db, user_id).await, 0);
}

#[tokio::test]
async fn revoke_without_entitlement_is_a_noop() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 4_000).await;
    let game_id = seed_game(&db, "Starfall", 6_000).await;

    let err = engine.revoke_game(user_id, game_id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert_eq!(balance_of(&db, user_id).await, 4_000);
}

#[tokio::test]
async fn purchase_requires_existing_game_and_user() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 10_000).await;
    let game_id = seed_game(&db, "Starfall", 6_000).await;

    let err = engine.purchase_game(user_id, game_id + 1).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine.purchase_game(user_id + 1, game_id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert_eq!(balance_of(&db, user_id).await, 10_000);
}

#[tokio::test]
async fn frame_purchase_and_uninstall_roundtrip() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 10_000).await;
    let frame_id = seed_frame(&db, "golden", 2_000).await;

    let outcome = engine.purchase_frame(user_id, frame_id).await.unwrap();
    assert_eq!(outcome, PurchaseOutcome::Purchased);
    assert_eq!(balance_of(&db, user_id).await, 8_000);
    assert_eq!(engine.owned_frame_ids(user_id).await.unwrap(), vec![frame_id]);

    engine.set_active_frame(user_id, frame_id).await.unwrap();

    let refund = engine.revoke_frame(user_id, frame_id).await.unwrap();
    assert_eq!(refund, MoneyCents::new(1_800));
    assert_eq!(balance_of(&db, user_id).await, 9_800);
    assert!(engine.owned_frame_ids(user_id).await.unwrap().is_empty());

    // Uninstalling the active frame clears the profile reference.
    let user = users::Entity::find_by_id(user_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.active_frame_id, None);
}

#[tokio::test]
async fn set_active_frame_requires_ownership() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 10_000).await;
    let frame_id = seed_frame(&db, "golden", 2_000).await;

    let err = engine.set_active_frame(user_id, frame_id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn library_lists_purchased_games() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 10_000).await;
    let first = seed_game(&db, "Starfall", 1_000).await;
    let second = seed_game(&db, "Moonrise", 2_000).await;

    engine.purchase_game(user_id, first).await.unwrap();
    engine.purchase_game(user_id, second).await.unwrap();

    let library = engine.owned_games(user_id).await.unwrap();
    let mut ids: Vec<i32> = library.into_iter().map(|g| g.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let (engine, _db) = engine_with_db().await;

    engine
        .register("alice@example.com", "secret", "alice")
        .await
        .unwrap();
    let err = engine
        .register("alice@example.com", "other", "alice2")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn login_checks_credentials_and_ban() {
    let (engine, _db) = engine_with_db().await;
    let user = engine
        .register("alice@example.com", "secret", "alice")
        .await
        .unwrap();

    let found = engine.login("alice@example.com", "secret").await.unwrap();
    assert_eq!(found.id, user.id);

    let err = engine
        .login("alice@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidCredentials);

    engine.ban_user(user.id, true).await.unwrap();
    let err = engine.login("alice@example.com", "secret").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    // A lifted ban restores access.
    engine.ban_user(user.id, false).await.unwrap();
    engine.login("alice@example.com", "secret").await.unwrap();
}

#[tokio::test]
async fn balance_adjustments_enforce_the_floor() {
    let (engine, db) = engine_with_db().await;
    let user_id = seed_user(&db, "alice@example.com", 1_000).await;

    let new_balance = engine
        .add_balance(user_id, MoneyCents::new(500))
        .await
        .unwrap();
    assert_eq!(new_balance, MoneyCents::new(1_500));

    let err = engine
        .add_balance(user_id, MoneyCents::new(-2_000))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::BalanceUnderflow(_)));
    assert_eq!(balance_of(&db, user_id).await, 1_500);

    let err = engine
        .set_balance(user_id, MoneyCents::new(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::BalanceUnderflow(_)));

    engine
        .set_balance(user_id, MoneyCents::new(9_999))
        .await
        .unwrap();
    assert_eq!(balance_of(&db, user_id).await, 9_999);
}

#[tokio::test]
async fn submissions_start_pending_and_follow_moderation() {
    let (engine, _db) = engine_with_db().await;

    let game_id = engine
        .submit_game(GameSubmission {
            title: "Starfall".to_string(),
            price: MoneyCents::new(1_500),
            ..Default::default()
        })
        .await
        .unwrap();

    let pending = engine.list_games(GameStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(engine.list_games(GameStatus::Approved).await.unwrap().is_empty());

    engine
        .set_game_status(game_id, GameStatus::Approved)
        .await
        .unwrap();
    let approved = engine.list_games(GameStatus::Approved).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, game_id);
}

#[tokio::test]
async fn maintenance_flag_roundtrip() {
    let (engine, _db) = engine_with_db().await;

    assert!(!engine.maintenance_status().await.unwrap());
    engine.set_maintenance(true).await.unwrap();
    assert!(engine.maintenance_status().await.unwrap());
    engine.set_maintenance(false).await.unwrap();
    assert!(!engine.maintenance_status().await.unwrap());
}
