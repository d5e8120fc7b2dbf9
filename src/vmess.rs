//! VMess link builder
//!
//! Link format: `vmess://<id>@<address>:<port>?encryption=<security>[&<stream params>][#<name>]`
//!
//! This is the URI form (as used by xray's share-link proposal), not the Base64 JSON body
//! some clients export.
//!
//! **Settings**: `vnext: [{ address, port, users: [{ id, security }] }]`.
//!
//! ## Building rules
//!
//! 1. Every vnext entry sets the server; the last one wins.
//! 2. Every user sets the userinfo (last one wins) and appends its own `encryption` pair, so a
//!    multi-user entry yields one `encryption` pair per user in order.
//! 3. `security` is written verbatim; a user without one yields an empty `encryption=`.

use crate::OutboundLink;
use crate::config::{deserialize_null_default, deserialize_port};
use crate::constants::{key, scheme};
use crate::link::LinkBuilder;
use serde::{Deserialize, Serialize};

/// VMess outbound settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VMessSettings {
    /// Server list
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub vnext: Vec<VMessServer>,
}

/// One VMess server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VMessServer {
    /// Server address
    pub address: String,
    /// Server port
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Accounts on this server
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub users: Vec<VMessUser>,
}

/// One VMess account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VMessUser {
    /// User ID (UUID)
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub id: String,
    /// Encryption (auto, aes-128-gcm, chacha20-poly1305, none, zero)
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub security: String,
}

impl OutboundLink for VMessSettings {
    const PROTOCOL: &'static str = "vmess";
    const SCHEME: &'static str = scheme::VMESS;

    fn apply(&self, link: LinkBuilder) -> LinkBuilder {
        self.vnext.iter().fold(link, |link, vnext| {
            let link = link.server(&vnext.address, vnext.port);
            vnext.users.iter().fold(link, |link, user| {
                link.user(&user.id).query(key::ENCRYPTION, &user.security)
            })
        })
    }
}
