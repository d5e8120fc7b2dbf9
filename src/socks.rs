//! SOCKS link builder
//!
//! Link format: `socks://<base64(user:pass)>@<address>:<port>[?<stream params>][#<name>]`
//!
//! **Settings**: `servers: [{ address, port, users: [{ user, pass }] }]`.
//!
//! A server without users is written with the Base64 of a bare `:` (`Og==`). Otherwise the
//! last user of the last server provides the credentials.

use crate::OutboundLink;
use crate::config::{deserialize_null_default, deserialize_port};
use crate::constants::scheme;
use crate::link::LinkBuilder;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// SOCKS outbound settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocksSettings {
    /// Server list
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub servers: Vec<SocksServer>,
}

/// One SOCKS server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocksServer {
    /// Server address
    pub address: String,
    /// Server port
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Accounts; empty for an open proxy
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub users: Vec<SocksUser>,
}

/// One SOCKS account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocksUser {
    /// User name
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub user: String,
    /// Password
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub pass: String,
}

fn encode_credentials(user: &str, pass: &str) -> String {
    let user_info = format!("{}:{}", user, pass);
    base64::engine::general_purpose::STANDARD.encode(user_info.as_bytes())
}

impl OutboundLink for SocksSettings {
    const PROTOCOL: &'static str = "socks";
    const SCHEME: &'static str = scheme::SOCKS;

    fn apply(&self, link: LinkBuilder) -> LinkBuilder {
        self.servers.iter().fold(link, |link, server| {
            let link = link.server(&server.address, server.port);
            if server.users.is_empty() {
                return link.user(&encode_credentials("", ""));
            }
            server.users.iter().fold(link, |link, user| {
                link.user(&encode_credentials(&user.user, &user.pass))
            })
        })
    }
}
