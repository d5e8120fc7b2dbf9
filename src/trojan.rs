//! Trojan link builder
//!
//! Link format: `trojan://<password>@<address>:<port>[?<stream params>][#<name>]`
//!
//! **Settings**: `servers: [{ address, port, password }]`. The password goes into the
//! userinfo as is and is percent-encoded on output when it contains `@ / ? :` or other
//! reserved characters. The last server wins.

use crate::OutboundLink;
use crate::config::{deserialize_null_default, deserialize_port};
use crate::constants::scheme;
use crate::link::LinkBuilder;
use serde::{Deserialize, Serialize};

/// Trojan outbound settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrojanSettings {
    /// Server list
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub servers: Vec<TrojanServer>,
}

/// One Trojan server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrojanServer {
    /// Server address
    pub address: String,
    /// Server port
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Password
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub password: String,
}

impl OutboundLink for TrojanSettings {
    const PROTOCOL: &'static str = "trojan";
    const SCHEME: &'static str = scheme::TROJAN;

    fn apply(&self, link: LinkBuilder) -> LinkBuilder {
        self.servers.iter().fold(link, |link, server| {
            link.server(&server.address, server.port)
                .user(&server.password)
        })
    }
}
