use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Statement};

use crate::{EngineError, MoneyCents, ResultEngine, users};

mod admin;
mod auth;
mod catalog;
mod purchases;

pub use catalog::GameSubmission;

/// Store engine: every operation runs against the injected database handle.
///
/// Handlers share one `Engine` behind an `Arc`; there is no in-process state
/// beyond the connection pool.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

pub(crate) async fn require_user<C>(conn: &C, user_id: i32) -> ResultEngine<users::Model>
where
    C: ConnectionTrait,
{
    users::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
}

/// Applies `balance_cents += delta` only if the result stays non-negative.
///
/// The check and the write are a single conditional UPDATE, so two
/// concurrent debits cannot both pass an affordability check before either
/// one lands. Returns `false` when no row qualified (missing user, or the
/// balance cannot cover a negative delta).
pub(crate) async fn apply_balance_delta<C>(
    conn: &C,
    user_id: i32,
    delta: MoneyCents,
) -> ResultEngine<bool>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    let result = conn
        .execute(Statement::from_sql_and_values(
            backend,
            "UPDATE users SET balance_cents = balance_cents + ? \
             WHERE id = ? AND balance_cents + ? >= 0",
            vec![delta.cents().into(), user_id.into(), delta.cents().into()],
        ))
        .await?;

    Ok(result.rows_affected() == 1)
}
