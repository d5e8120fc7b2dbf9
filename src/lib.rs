//! # xray share link
//!
//! Converts the outbounds of an xray JSON configuration into share links, one URI per
//! outbound, in the form clients import.
//!
//! ## Supported Protocols
//!
//! - **Shadowsocks** (`ss://`): Base64 `password:method` userinfo
//! - **VMess** (`vmess://`): user id userinfo, `encryption` parameter
//! - **VLESS** (`vless://`): user id userinfo, optional `flow` parameter
//! - **SOCKS** (`socks://`): Base64 `user:pass` userinfo
//! - **Trojan** (`trojan://`): password userinfo
//!
//! Every other protocol (`freedom`, `blackhole`, `dns`, ...) yields no link.
//!
//! ## Link format
//!
//! ```text
//! ss://<base64(password:method)>@<host>:<port>?<stream params>#<name>
//! vmess://<id>@<host>:<port>?encryption=<security>&<stream params>#<name>
//! vless://<id>@<host>:<port>?[flow=<flow>&]<stream params>#<name>
//! socks://<base64(user:pass or ":")>@<host>:<port>?<stream params>#<name>
//! trojan://<password>@<host>:<port>?<stream params>#<name>
//! ```
//!
//! Stream parameters always start with `type` and `security`, followed by transport and
//! security specific keys; see [`stream`] for the full table.
//!
//! ## Processing rules
//!
//! - Outbounds are flattened in source order, group members in place of their group.
//! - A failing outbound (unsupported protocol, malformed settings) is skipped, never fatal.
//! - When a settings list has several servers or users, the last one ends up in the link.
//! - The link fragment is the outbound's `name`; an unnamed outbound gets no `#` part.
//! - IPv6 addresses are written in brackets (`[2001:db8::1]:443`).
//! - Output is deterministic: the same configuration always yields the same text.
//!
//! ## Example
//!
//! ```rust
//! use xray_share_link::{Configuration, share_links};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Configuration::from_json(r#"{
//!     "outbounds": [{
//!         "name": "Node1",
//!         "protocol": "trojan",
//!         "settings": { "servers": [{ "address": "1.2.3.4", "port": 443, "password": "pw" }] },
//!         "streamSettings": {}
//!     }]
//! }"#)?;
//!
//! let links = share_links(&config)?;
//! assert_eq!(links, ["trojan://pw@1.2.3.4:443?type=tcp&security=none#Node1"]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod constants;
mod convert;
mod error;
mod flatten;
mod link;
mod query;
mod shadowsocks;
mod socks;
pub mod stream;
mod trojan;
mod vless;
mod vmess;

#[cfg(test)]
mod links_comprehensive;

pub use config::{
    Configuration, GrpcSettings, HttpSettings, KcpSettings, Outbound, PacketHeader, ProtocolKind,
    QuicSettings, RealitySettings, StreamSettings, TcpHeader, TcpRequest, TcpRequestHeaders,
    TcpSettings, TlsSettings, WsHeaders, WsSettings,
};
pub use convert::{convert, convert_file, share_links, share_text, write_text};
pub use error::{ConvertError, Result};
pub use link::{LinkBuilder, ShareLink};
pub use query::{add_query, query_escape};
pub use shadowsocks::{ShadowsocksServer, ShadowsocksSettings};
pub use socks::{SocksServer, SocksSettings, SocksUser};
pub use stream::{Network, Security};
pub use trojan::{TrojanServer, TrojanSettings};
pub use vless::{VLessServer, VLessSettings, VLessUser};
pub use vmess::{VMessServer, VMessSettings, VMessUser};

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Protocol settings that know how to fill in a share link
pub trait OutboundLink: Sized + DeserializeOwned {
    /// Protocol name as written in the configuration
    const PROTOCOL: &'static str;
    /// Link scheme
    const SCHEME: &'static str;

    /// Decode the outbound's opaque `settings` object.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingSettings`] when there are no settings and
    /// [`ConvertError::SettingsDecode`] when they do not match the protocol's shape.
    fn decode(settings: Option<&Value>) -> Result<Self> {
        let settings =
            settings.ok_or_else(|| ConvertError::MissingSettings(Self::PROTOCOL.to_string()))?;
        serde_json::from_value(settings.clone())
            .map_err(|e| ConvertError::settings_decode(Self::PROTOCOL, e))
    }

    /// Set the server, userinfo and protocol specific query pairs.
    fn apply(&self, link: LinkBuilder) -> LinkBuilder;
}

/// Decoded settings of a linkable outbound
///
/// # Example
///
/// ```rust
/// use xray_share_link::{Configuration, Protocol};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Configuration::from_json(r#"{"outbounds": [{
///     "protocol": "socks",
///     "settings": { "servers": [{ "address": "10.0.0.1", "port": 1080 }] }
/// }]}"#)?;
///
/// match Protocol::decode(&config.outbounds[0])? {
///     Protocol::Socks(s) => assert_eq!(s.servers[0].port, 1080),
///     other => panic!("unexpected {:?}", other),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protocol {
    /// Shadowsocks
    Shadowsocks(ShadowsocksSettings),
    /// VMess
    VMess(VMessSettings),
    /// VLESS
    VLess(VLessSettings),
    /// SOCKS
    Socks(SocksSettings),
    /// Trojan
    Trojan(TrojanSettings),
}

impl Protocol {
    /// Decode the settings of `outbound` according to its protocol.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnsupportedProtocol`] for protocols without a link form, or the
    /// settings error of the matching [`OutboundLink::decode`].
    pub fn decode(outbound: &Outbound) -> Result<Self> {
        let settings = outbound.settings.as_ref();
        match outbound.protocol {
            ProtocolKind::Shadowsocks => Ok(Protocol::Shadowsocks(ShadowsocksSettings::decode(
                settings,
            )?)),
            ProtocolKind::Vmess => Ok(Protocol::VMess(VMessSettings::decode(settings)?)),
            ProtocolKind::Vless => Ok(Protocol::VLess(VLessSettings::decode(settings)?)),
            ProtocolKind::Socks => Ok(Protocol::Socks(SocksSettings::decode(settings)?)),
            ProtocolKind::Trojan => Ok(Protocol::Trojan(TrojanSettings::decode(settings)?)),
            ProtocolKind::Other(ref name) => Err(ConvertError::UnsupportedProtocol(name.clone())),
        }
    }

    /// Link scheme of this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Shadowsocks(_) => ShadowsocksSettings::SCHEME,
            Protocol::VMess(_) => VMessSettings::SCHEME,
            Protocol::VLess(_) => VLessSettings::SCHEME,
            Protocol::Socks(_) => SocksSettings::SCHEME,
            Protocol::Trojan(_) => TrojanSettings::SCHEME,
        }
    }

    /// Apply the protocol part of the link.
    pub fn apply(&self, link: LinkBuilder) -> LinkBuilder {
        match self {
            Protocol::Shadowsocks(s) => s.apply(link),
            Protocol::VMess(v) => v.apply(link),
            Protocol::VLess(v) => v.apply(link),
            Protocol::Socks(s) => s.apply(link),
            Protocol::Trojan(t) => t.apply(link),
        }
    }
}
