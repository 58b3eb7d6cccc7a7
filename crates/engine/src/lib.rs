pub use entitlements::{PurchaseOutcome, REFUND_RATE_PCT, refund_amount};
pub use error::EngineError;
pub use games::GameStatus;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, GameSubmission};

mod entitlements;
mod error;
mod money;
mod ops;

pub mod frames;
pub mod game_purchases;
pub mod games;
pub mod system_settings;
pub mod user_frames;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
