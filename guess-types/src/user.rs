use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UserId;

/// The player behind a request, as resolved from the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
}
