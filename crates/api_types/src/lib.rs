use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Moderation status of a game, as exposed on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Pending,
    Approved,
    Rejected,
}

impl GameStatus {
    /// Returns the canonical status string used by the engine/database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

pub mod auth {
    use super::*;

    /// `POST /auth` body; the `action` tag replaces the legacy string
    /// dispatch and is decoded once here.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum AuthRequest {
        Login {
            email: String,
            password: String,
        },
        Register {
            email: String,
            password: String,
            username: String,
        },
        PurchaseFrame {
            user_id: i32,
            frame_id: i32,
        },
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AuthLookup {
        Library,
        Frames,
        UserFrames,
    }

    /// `GET /auth` query: which collection to read.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthQuery {
        pub action: AuthLookup,
        pub user_id: Option<i32>,
    }

    /// `PUT /auth` body.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum ProfileUpdate {
        UpdateProfile {
            user_id: i32,
            username: Option<String>,
            avatar_url: Option<String>,
        },
        SetFrame {
            user_id: i32,
            frame_id: i32,
        },
    }

    /// `DELETE /auth` body: uninstall a frame for a partial refund.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FrameUninstall {
        pub user_id: i32,
        pub frame_id: i32,
    }

    /// Account fields returned to the client itself (no ban flag; a banned
    /// account cannot log in at all).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserProfile {
        pub id: i32,
        pub email: String,
        pub username: String,
        pub avatar_url: Option<String>,
        pub role: String,
        pub balance_cents: i64,
        pub is_verified: bool,
        pub time_spent_hours: i32,
        pub active_frame_id: Option<i32>,
    }
}

pub mod games {
    use super::*;

    /// `GET /games` query; defaults to the public (approved) catalog.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GamesQuery {
        pub status: Option<GameStatus>,
    }

    /// `POST /games` body.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum GameRequest {
        Submit {
            title: String,
            description: Option<String>,
            genre: Option<String>,
            age_rating: Option<String>,
            price_cents: i64,
            logo_url: Option<String>,
            file_url: Option<String>,
            contact_email: Option<String>,
            engine_type: Option<String>,
            user_id: Option<i32>,
        },
        Purchase {
            user_id: i32,
            game_id: i32,
        },
    }

    /// `PUT /games` body: moderation decision.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GameStatusUpdate {
        pub game_id: i32,
        pub status: GameStatus,
    }

    /// `DELETE /games` body: remove from library, refund 90%.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GameRevoke {
        pub user_id: i32,
        pub game_id: i32,
    }

    /// Public catalog entry (no submitter contact data).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GameView {
        pub id: i32,
        pub title: String,
        pub description: Option<String>,
        pub genre: Option<String>,
        pub age_rating: Option<String>,
        pub price_cents: i64,
        pub logo_url: Option<String>,
        pub file_url: Option<String>,
        pub status: GameStatus,
        pub created_by: Option<i32>,
    }

    /// Moderation queue entry; includes the submitter's contact fields.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PendingGameView {
        pub id: i32,
        pub title: String,
        pub description: Option<String>,
        pub genre: Option<String>,
        pub age_rating: Option<String>,
        pub price_cents: i64,
        pub logo_url: Option<String>,
        pub file_url: Option<String>,
        pub contact_email: Option<String>,
        pub engine_type: Option<String>,
        pub created_by: Option<i32>,
    }
}

pub mod frames {
    use super::*;

    /// Frame catalog entry.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FrameView {
        pub id: i32,
        pub name: String,
        pub image_url: String,
        pub price_cents: i64,
    }
}

pub mod admin {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AdminLookup {
        Users,
        PendingGames,
        MaintenanceStatus,
    }

    /// `GET /admin` query.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminQuery {
        pub action: AdminLookup,
        pub search: Option<String>,
    }

    /// `PUT /admin` body.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum AdminUpdate {
        BanUser {
            user_id: i32,
            #[serde(default = "default_true")]
            is_banned: bool,
        },
        VerifyUser {
            user_id: i32,
            #[serde(default = "default_true")]
            is_verified: bool,
        },
        UpdateBalance {
            user_id: i32,
            balance_cents: i64,
        },
        AddBalance {
            user_id: i32,
            amount_cents: i64,
        },
        ToggleMaintenance {
            #[serde(default)]
            enabled: bool,
        },
    }

    /// `POST /admin` body.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum AdminCreate {
        CreateFrame {
            name: String,
            image_url: String,
            price_cents: i64,
        },
    }

    /// Account fields shown in the moderation console.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminUserView {
        pub id: i32,
        pub email: String,
        pub username: String,
        pub avatar_url: Option<String>,
        pub role: String,
        pub balance_cents: i64,
        pub is_banned: bool,
        pub is_verified: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MaintenanceStatus {
        pub maintenance_mode: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NewBalance {
        pub new_balance_cents: i64,
    }
}

/// Response for creations that only need to hand back an id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: i32,
}

/// Response for revokes: the amount credited back.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefundResponse {
    pub refund_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_action_tag_decodes_login() {
        let req: auth::AuthRequest =
            serde_json::from_str(r#"{"action":"login","email":"a@b.c","password":"pw"}"#).unwrap();
        assert!(matches!(req, auth::AuthRequest::Login { .. }));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = serde_json::from_str::<auth::AuthRequest>(r#"{"action":"frobnicate"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn ban_flag_defaults_to_true() {
        let req: admin::AdminUpdate =
            serde_json::from_str(r#"{"action":"ban_user","user_id":3}"#).unwrap();
        match req {
            admin::AdminUpdate::BanUser { user_id, is_banned } => {
                assert_eq!(user_id, 3);
                assert!(is_banned);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn game_status_round_trips() {
        let status: GameStatus = serde_json::from_str(r#""approved""#).unwrap();
        assert_eq!(status, GameStatus::Approved);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""approved""#);
    }
}
