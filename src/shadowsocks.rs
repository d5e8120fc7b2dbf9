//! Shadowsocks link builder
//!
//! Link format: `ss://<base64(password:method)>@<address>:<port>[?<stream params>][#<name>]`
//!
//! **Settings**: `servers: [{ address, port, method, password }]`. `address` and `port` are
//! required; `port` may be a number or a numeric string.
//!
//! **userinfo**: standard Base64 (with padding) of `password:method`. Note the order: the
//! password comes first.
//!
//! When several servers are listed, each one overwrites the previous, so the link carries the
//! last server only.

use crate::OutboundLink;
use crate::config::{deserialize_null_default, deserialize_port};
use crate::constants::scheme;
use crate::link::LinkBuilder;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Shadowsocks outbound settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShadowsocksSettings {
    /// Server list
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub servers: Vec<ShadowsocksServer>,
}

/// One Shadowsocks server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShadowsocksServer {
    /// Server address
    pub address: String,
    /// Server port
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Cipher (aes-256-gcm, chacha20-poly1305, 2022-blake3-aes-128-gcm, ...)
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub method: String,
    /// Password
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub password: String,
}

impl OutboundLink for ShadowsocksSettings {
    const PROTOCOL: &'static str = "shadowsocks";
    const SCHEME: &'static str = scheme::SHADOWSOCKS;

    fn apply(&self, link: LinkBuilder) -> LinkBuilder {
        self.servers.iter().fold(link, |link, server| {
            let user_info = format!("{}:{}", server.password, server.method);
            let encoded_user =
                base64::engine::general_purpose::STANDARD.encode(user_info.as_bytes());
            link.server(&server.address, server.port).user(&encoded_user)
        })
    }
}
