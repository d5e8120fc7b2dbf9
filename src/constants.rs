//! Shared constants for link schemes, query keys and outcome messages.

/// Share-link schemes (without `://`).
pub mod scheme {
    /// Shadowsocks: `ss`
    pub const SHADOWSOCKS: &str = "ss";
    /// VMess: `vmess`
    pub const VMESS: &str = "vmess";
    /// VLESS: `vless`
    pub const VLESS: &str = "vless";
    /// SOCKS: `socks`
    pub const SOCKS: &str = "socks";
    /// Trojan: `trojan`
    pub const TROJAN: &str = "trojan";
}

/// Query parameter keys, in the spelling clients expect.
pub mod key {
    /// Transport kind.
    pub const TYPE: &str = "type";
    /// Security layer kind.
    pub const SECURITY: &str = "security";
    /// VMess user encryption.
    pub const ENCRYPTION: &str = "encryption";
    /// VLESS flow control.
    pub const FLOW: &str = "flow";
    /// Header obfuscation type (tcp, kcp, quic).
    pub const HEADER_TYPE: &str = "headerType";
    /// Request path.
    pub const PATH: &str = "path";
    /// Host header.
    pub const HOST: &str = "host";
    /// mKCP seed.
    pub const SEED: &str = "seed";
    /// gRPC mode (`gun` or `multi`).
    pub const MODE: &str = "mode";
    /// gRPC service name.
    pub const SERVICE_NAME: &str = "serviceName";
    /// QUIC encryption method.
    pub const QUIC_SECURITY: &str = "quicSecurity";
    /// QUIC key.
    pub const KEY: &str = "key";
    /// TLS / Reality fingerprint.
    pub const FINGERPRINT: &str = "fp";
    /// Server name indication.
    pub const SNI: &str = "sni";
    /// ALPN list.
    pub const ALPN: &str = "alpn";
    /// Reality public key.
    pub const PUBLIC_KEY: &str = "pbk";
    /// Reality short id.
    pub const SHORT_ID: &str = "sid";
    /// Reality spider path.
    pub const SPIDER_X: &str = "spx";
}

/// Network used when `streamSettings.network` is empty.
pub const DEFAULT_NETWORK: &str = "tcp";
/// Security used when `streamSettings.security` is empty.
pub const DEFAULT_SECURITY: &str = "none";

/// gRPC mode values.
pub const GRPC_MODE_MULTI: &str = "multi";
/// gRPC mode used when multi mode is off.
pub const GRPC_MODE_GUN: &str = "gun";

/// Separator between produced links.
pub const LINK_SEPARATOR: &str = "\n";
/// Separator for list-valued query parameters.
pub const LIST_SEPARATOR: &str = ",";
