use serde::{Deserialize, Serialize};

use super::client::Ping;

/// Messages a client may send up the socket
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    Authenticate { token: String },
    JoinAdmin,
    JoinUser { user_id: String },
    Ping { data: Ping, responded: Option<()> },
}
