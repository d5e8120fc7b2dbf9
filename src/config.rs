//! xray configuration model
//!
//! Only the parts of an xray JSON document that matter for share links are modelled; every
//! other field is ignored. Field names follow xray's camelCase spelling.
//!
//! Protocol `settings` stay opaque ([`serde_json::Value`]) until a protocol builder decodes
//! them, so one malformed outbound cannot fail the whole document.

use crate::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Deserializes a port from JSON as either number or string (e.g. "8080").
pub(crate) fn deserialize_port<'de, D>(d: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Num(u16),
        Str(String),
    }
    match Port::deserialize(d)? {
        Port::Num(n) => Ok(n),
        Port::Str(s) => s.trim().parse().map_err(D::Error::custom),
    }
}

/// Deserializes a string list that xray also accepts as a single string.
fn deserialize_string_list<'de, D>(d: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    match Option::<OneOrMany>::deserialize(d)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::One(s)) => Ok(vec![s]),
        Some(OneOrMany::Many(v)) => Ok(v),
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn deserialize_null_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Root xray document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Legacy v2ray primary outbound
    #[serde(default, rename = "outbound", skip_serializing_if = "Option::is_none")]
    pub legacy_outbound: Option<Outbound>,
    /// Legacy v2ray secondary outbounds
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub outbound_detour: Vec<Outbound>,
    /// Outbound list
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub outbounds: Vec<Outbound>,
}

impl Configuration {
    /// Decodes a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Json`](crate::ConvertError::Json) when the text is not a valid
    /// configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and decodes a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`](crate::ConvertError::Io) when the file cannot be read and
    /// [`ConvertError::Json`](crate::ConvertError::Json) when it does not decode.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Protocol named by an outbound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProtocolKind {
    /// `shadowsocks`
    Shadowsocks,
    /// `vmess`
    Vmess,
    /// `vless`
    Vless,
    /// `socks`
    Socks,
    /// `trojan`
    Trojan,
    /// Anything else (`freedom`, `blackhole`, `dns`, ...)
    Other(String),
}

impl ProtocolKind {
    /// Name as written in the configuration.
    pub fn as_str(&self) -> &str {
        match self {
            ProtocolKind::Shadowsocks => "shadowsocks",
            ProtocolKind::Vmess => "vmess",
            ProtocolKind::Vless => "vless",
            ProtocolKind::Socks => "socks",
            ProtocolKind::Trojan => "trojan",
            ProtocolKind::Other(name) => name,
        }
    }
}

impl Default for ProtocolKind {
    fn default() -> Self {
        ProtocolKind::Other(String::new())
    }
}

impl From<String> for ProtocolKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "shadowsocks" => ProtocolKind::Shadowsocks,
            "vmess" => ProtocolKind::Vmess,
            "vless" => ProtocolKind::Vless,
            "socks" => ProtocolKind::Socks,
            "trojan" => ProtocolKind::Trojan,
            _ => ProtocolKind::Other(name),
        }
    }
}

impl From<ProtocolKind> for String {
    fn from(kind: ProtocolKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outbound {
    /// Display name, used as the link fragment
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    /// Routing tag; not part of the link
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tag: String,
    /// Protocol kind
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub protocol: ProtocolKind,
    /// Protocol specific settings, decoded by the matching builder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    /// Transport and security layering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_settings: Option<StreamSettings>,
    /// Members of a group outbound
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub outbounds: Vec<Outbound>,
}

impl Outbound {
    /// True when this entry only groups other outbounds.
    pub fn is_group(&self) -> bool {
        !self.outbounds.is_empty()
    }
}

/// Transport / security layering of an outbound
///
/// `network` and `security` are kept as written; empty values are defaulted by the
/// stream-settings translator, which also decides which blocks are consulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamSettings {
    /// Transport kind (tcp, kcp, ws, grpc, quic, http)
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub network: String,
    /// Security kind (none, tls, reality)
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub security: String,
    /// Raw TCP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_settings: Option<TcpSettings>,
    /// mKCP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kcp_settings: Option<KcpSettings>,
    /// WebSocket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WsSettings>,
    /// gRPC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_settings: Option<GrpcSettings>,
    /// QUIC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quic_settings: Option<QuicSettings>,
    /// HTTP/2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_settings: Option<HttpSettings>,
    /// TLS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_settings: Option<TlsSettings>,
    /// Reality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reality_settings: Option<RealitySettings>,
}

/// `tcpSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TcpSettings {
    /// Header obfuscation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<TcpHeader>,
}

/// `tcpSettings.header`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TcpHeader {
    /// `none` or `http`
    #[serde(default, rename = "type", deserialize_with = "deserialize_null_default")]
    pub header_type: String,
    /// Fake HTTP request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<TcpRequest>,
}

/// `tcpSettings.header.request`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TcpRequest {
    /// Candidate request paths
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub path: Vec<String>,
    /// Request headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<TcpRequestHeaders>,
}

/// Request headers carrying the `Host` candidates
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TcpRequestHeaders {
    /// `Host` header values
    #[serde(default, rename = "Host", deserialize_with = "deserialize_string_list")]
    pub host: Vec<String>,
}

/// Header block shared by mKCP and QUIC
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PacketHeader {
    /// Header disguise (none, srtp, utp, wechat-video, dtls, wireguard)
    #[serde(default, rename = "type", deserialize_with = "deserialize_null_default")]
    pub header_type: String,
}

/// `kcpSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KcpSettings {
    /// Obfuscation seed
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub seed: String,
    /// Header disguise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<PacketHeader>,
}

/// `wsSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WsSettings {
    /// Request path
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub path: String,
    /// Extra headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<WsHeaders>,
}

/// `wsSettings.headers`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WsHeaders {
    /// `Host` header
    #[serde(default, rename = "Host", deserialize_with = "deserialize_null_default")]
    pub host: String,
}

/// `grpcSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrpcSettings {
    /// Service name
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub service_name: String,
    /// Multi mode
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub multi_mode: bool,
}

/// `quicSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuicSettings {
    /// Packet encryption method
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub security: String,
    /// Encryption key
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub key: String,
    /// Header disguise; links read the mKCP header instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<PacketHeader>,
}

/// `httpSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HttpSettings {
    /// Candidate hosts
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub host: Vec<String>,
    /// Request path
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub path: String,
}

/// `tlsSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    /// SNI
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub server_name: String,
    /// uTLS fingerprint
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub fingerprint: String,
    /// ALPN protocols
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub alpn: Vec<String>,
}

/// `realitySettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealitySettings {
    /// SNI
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub server_name: String,
    /// uTLS fingerprint
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub fingerprint: String,
    /// Server public key
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub public_key: String,
    /// Short id
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub short_id: String,
    /// Spider crawl start path
    #[serde(default, rename = "spiderX", deserialize_with = "deserialize_null_default")]
    pub spider_x: String,
}
