// src/api.rs
//! Signed calls against the two gift-code endpoints.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::signer::Signer;
use crate::transport::Transport;
use crate::Error;

pub const PLAYER_URL: &str = "https://wos-giftcode-api.centurygame.com/api/player";
pub const GIFT_CODE_URL: &str = "https://wos-giftcode-api.centurygame.com/api/gift_code";

/// JSON shape shared by both endpoints. `code == 0` denotes success;
/// `msg` carries the user-facing outcome text.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub code: i32,
    #[serde(default)]
    pub data: Option<PlayerData>,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub err_code: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerData {
    pub nickname: String,
    pub avatar_image: String,
}

/// A resolved player profile, as returned by the player-info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub fid: String,
    pub nickname: String,
    pub avatar_image: String,
}

#[derive(Clone)]
pub struct GiftCodeApi {
    transport: Transport,
    signer: Signer,
}

impl GiftCodeApi {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            signer: Signer::new(),
        }
    }

    /// Resolves one fid via `POST /api/player`.
    ///
    /// A non-zero `code` or missing payload is not an error, only
    /// "this identifier produced no profile".
    pub async fn lookup_player(&self, fid: &str, time: &str) -> Result<Option<PlayerProfile>, Error> {
        let sign = self.signer.sign(&format!("fid={fid}&time={time}"));
        let form = vec![
            ("sign".to_string(), sign),
            ("fid".to_string(), fid.to_string()),
            ("time".to_string(), time.to_string()),
        ];
        let resp = self.transport.post(PLAYER_URL, &form).await?;

        match resp.data {
            Some(data) if resp.code == 0 => Ok(Some(PlayerProfile {
                fid: fid.to_string(),
                nickname: data.nickname,
                avatar_image: data.avatar_image,
            })),
            _ => {
                info!("no profile for fid {fid} (code={}, msg={})", resp.code, resp.msg);
                Ok(None)
            }
        }
    }

    /// Submits the gift code for one fid via `POST /api/gift_code` and
    /// returns the remote `msg` verbatim ("SUCCESS", "RECEIVED",
    /// "CDK NOT FOUND", ...). The caller stores it without
    /// interpretation.
    pub async fn redeem(&self, fid: &str, gift_code: &str, time: &str) -> Result<String, Error> {
        let sign = self.signer.sign(&format!("cdk={gift_code}&fid={fid}&time={time}"));
        let form = vec![
            ("sign".to_string(), sign),
            ("cdk".to_string(), gift_code.to_string()),
            ("fid".to_string(), fid.to_string()),
            ("time".to_string(), time.to_string()),
        ];
        let resp = self.transport.post(GIFT_CODE_URL, &form).await?;
        Ok(resp.msg)
    }
}
