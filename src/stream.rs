//! Stream-settings translator
//!
//! Maps an outbound's `streamSettings` onto query parameters, always in this order:
//!
//! 1. `type` (network, `tcp` when empty)
//! 2. `security` (`none` when empty)
//! 3. transport parameters, chosen by `network` alone
//! 4. security parameters, chosen by `security` alone
//!
//! Only the block matching the selected kind is read; other blocks present in the
//! configuration are ignored. Empty values are skipped, so no key is ever emitted with an
//! empty value.
//!
//! | Network | Parameters |
//! |---------|------------|
//! | `tcp`   | `headerType`, then (only with a header type) `path`, `host` |
//! | `kcp`   | `seed`, `headerType` |
//! | `ws`    | `path`, `host` |
//! | `grpc`  | `mode` (`multi`/`gun`, always), `serviceName` |
//! | `quic`  | `quicSecurity`, `key`, `headerType` (read from `kcpSettings`) |
//! | `http`  | `host`, `path` |
//!
//! | Security  | Parameters |
//! |-----------|------------|
//! | `tls`     | `fp`, `sni`, `alpn` |
//! | `reality` | `fp`, `sni`, `pbk`, `sid`, `spx` |

use crate::config::{
    GrpcSettings, HttpSettings, KcpSettings, RealitySettings, StreamSettings, TcpSettings,
    TlsSettings, WsSettings,
};
use crate::constants::{self, key};
use crate::link::LinkBuilder;
use std::fmt;

/// Transport kind selected by `streamSettings.network`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Network {
    /// Raw TCP
    #[default]
    Tcp,
    /// mKCP
    Kcp,
    /// WebSocket
    Ws,
    /// gRPC
    Grpc,
    /// QUIC
    Quic,
    /// HTTP/2
    Http,
    /// Any other transport; written as `type` with no extra parameters
    Other(String),
}

impl Network {
    /// Resolves a configured network name; an empty name means [`Network::Tcp`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "" => Network::default(),
            "tcp" => Network::Tcp,
            "kcp" => Network::Kcp,
            "ws" => Network::Ws,
            "grpc" => Network::Grpc,
            "quic" => Network::Quic,
            "http" => Network::Http,
            other => Network::Other(other.to_string()),
        }
    }

    /// Value written to the `type` parameter.
    pub fn as_str(&self) -> &str {
        match self {
            Network::Tcp => constants::DEFAULT_NETWORK,
            Network::Kcp => "kcp",
            Network::Ws => "ws",
            Network::Grpc => "grpc",
            Network::Quic => "quic",
            Network::Http => "http",
            Network::Other(name) => name,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Security layer selected by `streamSettings.security`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Security {
    /// Plain
    #[default]
    None,
    /// TLS
    Tls,
    /// Reality
    Reality,
    /// Any other layer; written as `security` with no extra parameters
    Other(String),
}

impl Security {
    /// Resolves a configured security name; an empty name means [`Security::None`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "" | "none" => Security::default(),
            "tls" => Security::Tls,
            "reality" => Security::Reality,
            other => Security::Other(other.to_string()),
        }
    }

    /// Value written to the `security` parameter.
    pub fn as_str(&self) -> &str {
        match self {
            Security::None => constants::DEFAULT_SECURITY,
            Security::Tls => "tls",
            Security::Reality => "reality",
            Security::Other(name) => name,
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appends the query parameters for `settings`; absent settings leave the builder untouched.
pub fn apply(settings: Option<&StreamSettings>, link: LinkBuilder) -> LinkBuilder {
    let Some(settings) = settings else {
        return link;
    };

    let network = Network::from_name(&settings.network);
    let security = Security::from_name(&settings.security);

    let link = link
        .query(key::TYPE, network.as_str())
        .query(key::SECURITY, security.as_str());
    let link = transport(&network, settings, link);
    security_layer(&security, settings, link)
}

fn transport(network: &Network, settings: &StreamSettings, link: LinkBuilder) -> LinkBuilder {
    match network {
        Network::Tcp => match settings.tcp_settings {
            Some(ref tcp) => tcp_query(tcp, link),
            None => link,
        },
        Network::Kcp => match settings.kcp_settings {
            Some(ref kcp) => kcp_query(kcp, link),
            None => link,
        },
        Network::Ws => match settings.ws_settings {
            Some(ref ws) => ws_query(ws, link),
            None => link,
        },
        Network::Grpc => match settings.grpc_settings {
            Some(ref grpc) => grpc_query(grpc, link),
            None => link,
        },
        Network::Quic => match settings.quic_settings {
            Some(ref quic) => {
                let link = link
                    .query_non_empty(key::QUIC_SECURITY, &quic.security)
                    .query_non_empty(key::KEY, &quic.key);
                // The header type comes from kcpSettings, not quicSettings.header; existing
                // links were generated that way.
                kcp_header_query(settings.kcp_settings.as_ref(), link)
            }
            None => link,
        },
        Network::Http => match settings.http_settings {
            Some(ref http) => http_query(http, link),
            None => link,
        },
        Network::Other(_) => link,
    }
}

fn tcp_query(tcp: &TcpSettings, link: LinkBuilder) -> LinkBuilder {
    let Some(ref header) = tcp.header else {
        return link;
    };
    if header.header_type.is_empty() {
        return link;
    }
    let link = link.query(key::HEADER_TYPE, &header.header_type);
    let Some(ref request) = header.request else {
        return link;
    };
    let link = link.query_list(key::PATH, &request.path);
    match request.headers {
        Some(ref headers) => link.query_list(key::HOST, &headers.host),
        None => link,
    }
}

fn kcp_query(kcp: &KcpSettings, link: LinkBuilder) -> LinkBuilder {
    let link = link.query_non_empty(key::SEED, &kcp.seed);
    kcp_header_query(Some(kcp), link)
}

fn kcp_header_query(kcp: Option<&KcpSettings>, link: LinkBuilder) -> LinkBuilder {
    match kcp.and_then(|kcp| kcp.header.as_ref()) {
        Some(header) => link.query_non_empty(key::HEADER_TYPE, &header.header_type),
        None => link,
    }
}

fn ws_query(ws: &WsSettings, link: LinkBuilder) -> LinkBuilder {
    let link = link.query_non_empty(key::PATH, &ws.path);
    match ws.headers {
        Some(ref headers) => link.query_non_empty(key::HOST, &headers.host),
        None => link,
    }
}

fn grpc_query(grpc: &GrpcSettings, link: LinkBuilder) -> LinkBuilder {
    let mode = if grpc.multi_mode {
        constants::GRPC_MODE_MULTI
    } else {
        constants::GRPC_MODE_GUN
    };
    link.query(key::MODE, mode)
        .query_non_empty(key::SERVICE_NAME, &grpc.service_name)
}

fn http_query(http: &HttpSettings, link: LinkBuilder) -> LinkBuilder {
    link.query_list(key::HOST, &http.host)
        .query_non_empty(key::PATH, &http.path)
}

fn security_layer(security: &Security, settings: &StreamSettings, link: LinkBuilder) -> LinkBuilder {
    match security {
        Security::Tls => match settings.tls_settings {
            Some(ref tls) => tls_query(tls, link),
            None => link,
        },
        Security::Reality => match settings.reality_settings {
            Some(ref reality) => reality_query(reality, link),
            None => link,
        },
        Security::None | Security::Other(_) => link,
    }
}

fn tls_query(tls: &TlsSettings, link: LinkBuilder) -> LinkBuilder {
    link.query_non_empty(key::FINGERPRINT, &tls.fingerprint)
        .query_non_empty(key::SNI, &tls.server_name)
        .query_list(key::ALPN, &tls.alpn)
}

fn reality_query(reality: &RealitySettings, link: LinkBuilder) -> LinkBuilder {
    link.query_non_empty(key::FINGERPRINT, &reality.fingerprint)
        .query_non_empty(key::SNI, &reality.server_name)
        .query_non_empty(key::PUBLIC_KEY, &reality.public_key)
        .query_non_empty(key::SHORT_ID, &reality.short_id)
        .query_non_empty(key::SPIDER_X, &reality.spider_x)
}
