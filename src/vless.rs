//! VLESS link builder
//!
//! Link format: `vless://<id>@<address>:<port>?[flow=<flow>&]<stream params>[#<name>]`
//!
//! **Settings**: `vnext: [{ address, port, users: [{ id, flow, encryption }] }]`.
//!
//! Each vnext entry replaces the server and each user replaces the userinfo, so the last entry
//! wins. Every user with a non-empty `flow` (e.g. `xtls-rprx-vision`) appends a `flow` pair.

use crate::OutboundLink;
use crate::config::{deserialize_null_default, deserialize_port};
use crate::constants::{key, scheme};
use crate::link::LinkBuilder;
use serde::{Deserialize, Serialize};

/// VLESS outbound settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VLessSettings {
    /// Server list
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub vnext: Vec<VLessServer>,
}

/// One VLESS server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VLessServer {
    /// Server address
    pub address: String,
    /// Server port
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Accounts on this server
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub users: Vec<VLessUser>,
}

/// One VLESS account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VLessUser {
    /// User ID (UUID)
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub id: String,
    /// Flow control (for XTLS)
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub flow: String,
    /// Encryption, `none` for plain VLESS; not part of the link
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub encryption: String,
}

impl OutboundLink for VLessSettings {
    const PROTOCOL: &'static str = "vless";
    const SCHEME: &'static str = scheme::VLESS;

    fn apply(&self, link: LinkBuilder) -> LinkBuilder {
        self.vnext.iter().fold(link, |link, vnext| {
            let link = link.server(&vnext.address, vnext.port);
            vnext.users.iter().fold(link, |link, user| {
                link.user(&user.id).query_non_empty(key::FLOW, &user.flow)
            })
        })
    }
}
