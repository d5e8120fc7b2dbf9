//! Share-link generation tests
//!
//! Covers the five link builders, the stream-settings translator, the query encoder,
//! flattening and the conversion outcome strings.

#![cfg(test)]

use crate::error::ConvertError;
use crate::{
    Configuration, LinkBuilder, Network, Outbound, Protocol, Security, StreamSettings, add_query,
    convert, convert_file, query_escape, share_links, share_text, stream, write_text,
};
use serde_json::{Value, json};

fn config(value: Value) -> Configuration {
    serde_json::from_value(value).unwrap()
}

fn outbound(value: Value) -> Outbound {
    serde_json::from_value(value).unwrap()
}

fn link_of(value: Value) -> String {
    outbound(value).share_link().unwrap().to_string()
}

fn stream_query(value: Value) -> String {
    let settings: StreamSettings = serde_json::from_value(value).unwrap();
    stream::apply(Some(&settings), LinkBuilder::new("x"))
        .raw_query()
        .to_string()
}

// =============================================================================
// Query encoder
// =============================================================================

#[test]
fn query_add_to_empty_has_no_separator() {
    assert_eq!(add_query("", "type", "tcp"), "type=tcp");
}

#[test]
fn query_add_appends_with_ampersand() {
    assert_eq!(
        add_query("type=tcp", "security", "none"),
        "type=tcp&security=none"
    );
}

#[test]
fn query_duplicate_keys_are_kept_in_order() {
    let q = add_query("", "flow", "a");
    let q = add_query(&q, "flow", "b");
    assert_eq!(q, "flow=a&flow=b");
}

#[test]
fn query_escape_matches_form_component_rules() {
    assert_eq!(query_escape("/ray"), "%2Fray");
    assert_eq!(query_escape("a b"), "a+b");
    assert_eq!(query_escape("h2,http/1.1"), "h2%2Chttp%2F1.1");
    assert_eq!(query_escape("A-z_0.9~"), "A-z_0.9~");
    assert_eq!(query_escape("a+b=c&d"), "a%2Bb%3Dc%26d");
    assert_eq!(query_escape("名"), "%E5%90%8D");
}

// =============================================================================
// Link builder and serialization
// =============================================================================

#[test]
fn link_builder_server_and_user_last_write_wins() {
    let link = LinkBuilder::new("trojan")
        .server("a.example", 1)
        .user("first")
        .server("b.example", 2)
        .user("second")
        .build()
        .unwrap();
    assert_eq!(link.host, "b.example");
    assert_eq!(link.port, 2);
    assert_eq!(link.userinfo.as_deref(), Some("second"));
    assert_eq!(link.to_string(), "trojan://second@b.example:2");
}

#[test]
fn link_builder_without_server_fails() {
    let err = LinkBuilder::new("vless").user("id").build().unwrap_err();
    assert!(matches!(err, ConvertError::EmptyServers(ref s) if s == "vless"));
}

#[test]
fn link_empty_query_and_fragment_are_omitted() {
    let link = LinkBuilder::new("vless")
        .server("h", 80)
        .user("u")
        .build()
        .unwrap();
    assert_eq!(link.to_string(), "vless://u@h:80");
}

#[test]
fn link_fragment_is_escaped() {
    let link = LinkBuilder::new("vless")
        .server("h", 80)
        .user("u")
        .fragment("Node 1/α")
        .build()
        .unwrap();
    assert_eq!(link.to_string(), "vless://u@h:80#Node%201/%CE%B1");
}

#[test]
fn link_fragment_keeps_reserved_marks() {
    let link = LinkBuilder::new("vless")
        .server("h", 80)
        .fragment("a:b@c?d=e&f!(g)*")
        .build()
        .unwrap();
    assert_eq!(link.to_string(), "vless://h:80#a:b@c?d=e&f!(g)*");
}

#[test]
fn link_userinfo_escapes_delimiters_but_keeps_padding() {
    let link = LinkBuilder::new("ss")
        .server("h", 1)
        .user("Pz8/Om0=")
        .build()
        .unwrap();
    assert_eq!(link.to_string(), "ss://Pz8%2FOm0=@h:1");
}

#[test]
fn link_ipv6_host_is_bracketed() {
    let link = LinkBuilder::new("vless")
        .server("2001:db8::1", 443)
        .user("id")
        .build()
        .unwrap();
    assert_eq!(link.to_string(), "vless://id@[2001:db8::1]:443");

    let already = LinkBuilder::new("vless")
        .server("[::1]", 443)
        .user("id")
        .build()
        .unwrap();
    assert_eq!(already.to_string(), "vless://id@[::1]:443");
}

// =============================================================================
// Stream settings
// =============================================================================

#[test]
fn stream_absent_adds_nothing() {
    let query = stream::apply(None, LinkBuilder::new("x"));
    assert_eq!(query.raw_query(), "");
}

#[test]
fn stream_empty_defaults_to_tcp_none() {
    assert_eq!(stream_query(json!({})), "type=tcp&security=none");
    assert_eq!(
        stream_query(json!({"network": "", "security": ""})),
        "type=tcp&security=none"
    );
}

#[test]
fn stream_network_and_security_names() {
    assert_eq!(Network::from_name(""), Network::Tcp);
    assert_eq!(Network::from_name("grpc"), Network::Grpc);
    assert_eq!(
        Network::from_name("httpupgrade"),
        Network::Other("httpupgrade".to_string())
    );
    assert_eq!(Security::from_name(""), Security::None);
    assert_eq!(Security::from_name("reality"), Security::Reality);
    assert_eq!(Security::None.to_string(), "none");
    assert_eq!(Network::Tcp.to_string(), "tcp");
}

#[test]
fn stream_tcp_http_header_with_path_and_host_lists() {
    let q = stream_query(json!({
        "network": "tcp",
        "tcpSettings": {
            "header": {
                "type": "http",
                "request": {
                    "path": ["/a", "/b"],
                    "headers": { "Host": ["a.com", "b.com"] }
                }
            }
        }
    }));
    assert_eq!(
        q,
        "type=tcp&security=none&headerType=http&path=%2Fa%2C%2Fb&host=a.com%2Cb.com"
    );
}

#[test]
fn stream_tcp_host_accepts_single_string() {
    let q = stream_query(json!({
        "tcpSettings": {
            "header": { "type": "http", "request": { "headers": { "Host": "only.com" } } }
        }
    }));
    assert_eq!(q, "type=tcp&security=none&headerType=http&host=only.com");
}

#[test]
fn stream_tcp_request_ignored_without_header_type() {
    let q = stream_query(json!({
        "network": "tcp",
        "tcpSettings": {
            "header": { "type": "", "request": { "path": ["/a"] } }
        }
    }));
    assert_eq!(q, "type=tcp&security=none");
}

#[test]
fn stream_kcp_seed_and_header() {
    let q = stream_query(json!({
        "network": "kcp",
        "kcpSettings": { "seed": "s e", "header": { "type": "wechat-video" } }
    }));
    assert_eq!(q, "type=kcp&security=none&seed=s+e&headerType=wechat-video");
}

#[test]
fn stream_ws_path_and_host() {
    let q = stream_query(json!({
        "network": "ws",
        "wsSettings": { "path": "/ray", "headers": { "Host": "cdn.example" } }
    }));
    assert_eq!(q, "type=ws&security=none&path=%2Fray&host=cdn.example");
}

#[test]
fn stream_grpc_mode_always_written() {
    assert_eq!(
        stream_query(json!({ "network": "grpc", "grpcSettings": {} })),
        "type=grpc&security=none&mode=gun"
    );
    assert_eq!(
        stream_query(json!({
            "network": "grpc",
            "grpcSettings": { "multiMode": true, "serviceName": "svc" }
        })),
        "type=grpc&security=none&mode=multi&serviceName=svc"
    );
}

#[test]
fn stream_quic_reads_header_from_kcp_settings() {
    let q = stream_query(json!({
        "network": "quic",
        "quicSettings": { "security": "aes-128-gcm", "key": "k", "header": { "type": "srtp" } },
        "kcpSettings": { "seed": "ignored", "header": { "type": "utp" } }
    }));
    assert_eq!(
        q,
        "type=quic&security=none&quicSecurity=aes-128-gcm&key=k&headerType=utp"
    );

    let without_kcp = stream_query(json!({
        "network": "quic",
        "quicSettings": { "key": "k", "header": { "type": "srtp" } }
    }));
    assert_eq!(without_kcp, "type=quic&security=none&key=k");
}

#[test]
fn stream_http_host_list_and_path() {
    let q = stream_query(json!({
        "network": "http",
        "httpSettings": { "host": ["h1.com", "h2.com"], "path": "/p" }
    }));
    assert_eq!(q, "type=http&security=none&host=h1.com%2Ch2.com&path=%2Fp");
}

#[test]
fn stream_tls_fp_sni_alpn() {
    let q = stream_query(json!({
        "security": "tls",
        "tlsSettings": {
            "fingerprint": "chrome",
            "serverName": "t.example",
            "alpn": ["h2", "http/1.1"]
        }
    }));
    assert_eq!(
        q,
        "type=tcp&security=tls&fp=chrome&sni=t.example&alpn=h2%2Chttp%2F1.1"
    );
}

#[test]
fn stream_reality_parameters_in_order() {
    let q = stream_query(json!({
        "security": "reality",
        "realitySettings": {
            "fingerprint": "chrome",
            "serverName": "www.microsoft.com",
            "publicKey": "pbkX",
            "shortId": "0123",
            "spiderX": "/"
        }
    }));
    assert_eq!(
        q,
        "type=tcp&security=reality&fp=chrome&sni=www.microsoft.com&pbk=pbkX&sid=0123&spx=%2F"
    );
}

#[test]
fn stream_blocks_for_other_kinds_are_ignored() {
    let q = stream_query(json!({
        "network": "tcp",
        "security": "none",
        "wsSettings": { "path": "/ray" },
        "tlsSettings": { "serverName": "x" },
        "realitySettings": { "publicKey": "y" }
    }));
    assert_eq!(q, "type=tcp&security=none");
}

#[test]
fn stream_unknown_network_only_writes_type() {
    let q = stream_query(json!({
        "network": "httpupgrade",
        "security": "xtls",
        "tlsSettings": { "serverName": "x" }
    }));
    assert_eq!(q, "type=httpupgrade&security=xtls");
}

// =============================================================================
// Shadowsocks
// =============================================================================

#[test]
fn ss_link_base64_password_method() {
    let link = link_of(json!({
        "name": "Node1",
        "protocol": "shadowsocks",
        "settings": {
            "servers": [{
                "address": "1.2.3.4",
                "port": 8388,
                "method": "aes-256-gcm",
                "password": "p@ss"
            }]
        },
        "streamSettings": {}
    }));
    assert_eq!(
        link,
        "ss://cEBzczphZXMtMjU2LWdjbQ==@1.2.3.4:8388?type=tcp&security=none#Node1"
    );
}

#[test]
fn ss_multiple_servers_last_write_wins() {
    let link = link_of(json!({
        "name": "SS",
        "protocol": "shadowsocks",
        "settings": {
            "servers": [
                { "address": "1.1.1.1", "port": 1, "method": "chacha20-poly1305", "password": "pw1" },
                { "address": "2.2.2.2", "port": 2, "method": "aes-128-gcm", "password": "pw2" }
            ]
        }
    }));
    assert_eq!(link, "ss://cHcyOmFlcy0xMjgtZ2Nt@2.2.2.2:2#SS");
}

#[test]
fn ss_port_as_string() {
    let link = link_of(json!({
        "protocol": "shadowsocks",
        "settings": {
            "servers": [{ "address": "h", "port": "8388", "method": "m", "password": "???" }]
        }
    }));
    assert_eq!(link, "ss://Pz8%2FOm0=@h:8388");
}

// =============================================================================
// VMess
// =============================================================================

#[test]
fn vmess_link_encryption_then_stream() {
    let link = link_of(json!({
        "name": "VM",
        "protocol": "vmess",
        "settings": {
            "vnext": [{
                "address": "v.example",
                "port": 8443,
                "users": [{ "id": "u1", "security": "aes-128-gcm" }]
            }]
        },
        "streamSettings": { "network": "grpc", "grpcSettings": { "serviceName": "svc" } }
    }));
    assert_eq!(
        link,
        "vmess://u1@v.example:8443?encryption=aes-128-gcm&type=grpc&security=none&mode=gun&serviceName=svc#VM"
    );
}

#[test]
fn vmess_missing_security_writes_empty_encryption() {
    let link = link_of(json!({
        "protocol": "vmess",
        "settings": { "vnext": [{ "address": "h", "port": 1, "users": [{ "id": "u" }] }] }
    }));
    assert_eq!(link, "vmess://u@h:1?encryption=");
}

#[test]
fn vmess_multiple_entries_last_write_wins() {
    let link = link_of(json!({
        "name": "Multi",
        "protocol": "vmess",
        "settings": {
            "vnext": [
                { "address": "a", "port": 1, "users": [{ "id": "u1", "security": "aes-128-gcm" }] },
                { "address": "b", "port": 2, "users": [
                    { "id": "u2", "security": "none" },
                    { "id": "u3", "security": "zero" }
                ] }
            ]
        }
    }));
    // Server and id come from the last entry; every user contributed one encryption pair.
    assert_eq!(
        link,
        "vmess://u3@b:2?encryption=aes-128-gcm&encryption=none&encryption=zero#Multi"
    );
}

// =============================================================================
// VLESS
// =============================================================================

#[test]
fn vless_ws_tls_query_order() {
    let link = link_of(json!({
        "name": "WS",
        "protocol": "vless",
        "settings": {
            "vnext": [{
                "address": "example.com",
                "port": 443,
                "users": [{ "id": "uuid-1", "encryption": "none" }]
            }]
        },
        "streamSettings": {
            "network": "ws",
            "security": "tls",
            "wsSettings": { "path": "/ray", "headers": { "Host": "example.com" } },
            "tlsSettings": { "serverName": "example.com" }
        }
    }));
    assert_eq!(
        link,
        "vless://uuid-1@example.com:443?type=ws&security=tls&path=%2Fray&host=example.com&sni=example.com#WS"
    );
}

#[test]
fn vless_flow_precedes_stream_params() {
    let link = link_of(json!({
        "name": "R",
        "protocol": "vless",
        "settings": {
            "vnext": [{
                "address": "1.2.3.4",
                "port": 443,
                "users": [{ "id": "id", "flow": "xtls-rprx-vision", "encryption": "none" }]
            }]
        },
        "streamSettings": {
            "network": "tcp",
            "security": "reality",
            "realitySettings": {
                "fingerprint": "chrome",
                "serverName": "www.microsoft.com",
                "publicKey": "pbkX",
                "shortId": "0123",
                "spiderX": "/"
            }
        }
    }));
    assert_eq!(
        link,
        "vless://id@1.2.3.4:443?flow=xtls-rprx-vision&type=tcp&security=reality&fp=chrome&sni=www.microsoft.com&pbk=pbkX&sid=0123&spx=%2F#R"
    );
}

#[test]
fn vless_empty_flow_is_skipped() {
    let link = link_of(json!({
        "protocol": "vless",
        "settings": { "vnext": [{ "address": "h", "port": 1, "users": [{ "id": "u", "flow": "" }] }] }
    }));
    assert_eq!(link, "vless://u@h:1");
}

#[test]
fn vless_link_parses_with_url_crate() {
    let link = link_of(json!({
        "name": "My Node",
        "protocol": "vless",
        "settings": { "vnext": [{ "address": "example.com", "port": 443, "users": [{ "id": "uuid-1" }] }] },
        "streamSettings": { "network": "ws", "wsSettings": { "path": "/a b" } }
    }));
    let parsed = url::Url::parse(&link).unwrap();
    assert_eq!(parsed.scheme(), "vless");
    assert_eq!(parsed.username(), "uuid-1");
    assert_eq!(parsed.host_str(), Some("example.com"));
    assert_eq!(parsed.port(), Some(443));
    assert_eq!(parsed.fragment(), Some("My%20Node"));
    let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("type".to_string(), "ws".to_string()),
            ("security".to_string(), "none".to_string()),
            ("path".to_string(), "/a b".to_string()),
        ]
    );
}

// =============================================================================
// SOCKS
// =============================================================================

#[test]
fn socks_without_users_encodes_bare_colon() {
    let link = link_of(json!({
        "name": "S",
        "protocol": "socks",
        "settings": { "servers": [{ "address": "10.0.0.1", "port": 1080 }] },
        "streamSettings": {}
    }));
    assert_eq!(link, "socks://Og==@10.0.0.1:1080?type=tcp&security=none#S");
}

#[test]
fn socks_last_user_credentials() {
    let link = link_of(json!({
        "name": "S",
        "protocol": "socks",
        "settings": {
            "servers": [{
                "address": "10.0.0.1",
                "port": 1080,
                "users": [
                    { "user": "bob", "pass": "x" },
                    { "user": "alice", "pass": "s3cret" }
                ]
            }]
        }
    }));
    assert_eq!(link, "socks://YWxpY2U6czNjcmV0@10.0.0.1:1080#S");
}

// =============================================================================
// Trojan
// =============================================================================

#[test]
fn trojan_password_is_escaped_in_userinfo() {
    let link = link_of(json!({
        "name": "T",
        "protocol": "trojan",
        "settings": {
            "servers": [{ "address": "t.example", "port": 443, "password": "p@ss/w:rd" }]
        },
        "streamSettings": {
            "security": "tls",
            "tlsSettings": { "serverName": "t.example", "alpn": ["h2", "http/1.1"] }
        }
    }));
    assert_eq!(
        link,
        "trojan://p%40ss%2Fw%3Ard@t.example:443?type=tcp&security=tls&sni=t.example&alpn=h2%2Chttp%2F1.1#T"
    );
}

#[test]
fn trojan_without_name_has_no_fragment() {
    // The routing tag never stands in for the display name.
    let link = link_of(json!({
        "tag": "proxy",
        "protocol": "trojan",
        "settings": { "servers": [{ "address": "h", "port": 1, "password": "pw" }] }
    }));
    assert_eq!(link, "trojan://pw@h:1");

    let cfg = config(json!({ "outbounds": [{
        "tag": "proxy",
        "protocol": "trojan",
        "settings": { "servers": [{ "address": "h", "port": 1, "password": "pw" }] }
    }] }));
    assert_eq!(share_links(&cfg).unwrap(), ["trojan://pw@h:1"]);
}

// =============================================================================
// Per-outbound failures
// =============================================================================

#[test]
fn unsupported_protocol_is_rejected() {
    let err = outbound(json!({ "protocol": "freedom", "settings": {} }))
        .share_link()
        .unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedProtocol(ref p) if p == "freedom"));
    assert!(err.is_per_outbound());
}

#[test]
fn malformed_settings_fail_to_decode() {
    let err = outbound(json!({ "protocol": "vless", "settings": { "vnext": "oops" } }))
        .share_link()
        .unwrap_err();
    assert!(matches!(err, ConvertError::SettingsDecode { ref protocol, .. } if protocol == "vless"));
    assert!(err.to_string().starts_with("settings decode error (vless)"));
}

#[test]
fn port_out_of_range_fails_to_decode() {
    let err = outbound(json!({
        "protocol": "trojan",
        "settings": { "servers": [{ "address": "h", "port": 70000, "password": "pw" }] }
    }))
    .share_link()
    .unwrap_err();
    assert!(matches!(err, ConvertError::SettingsDecode { .. }));
}

#[test]
fn missing_settings_fail() {
    let err = outbound(json!({ "protocol": "trojan" }))
        .share_link()
        .unwrap_err();
    assert!(matches!(err, ConvertError::MissingSettings(ref p) if p == "trojan"));
}

#[test]
fn empty_server_list_fails() {
    let err = outbound(json!({ "protocol": "trojan", "settings": { "servers": [] } }))
        .share_link()
        .unwrap_err();
    assert!(matches!(err, ConvertError::EmptyServers(_)));
}

#[test]
fn protocol_decode_dispatch_each() {
    let cases = [
        ("shadowsocks", json!({ "servers": [{ "address": "h", "port": 1 }] })),
        ("vmess", json!({ "vnext": [{ "address": "h", "port": 1 }] })),
        ("vless", json!({ "vnext": [{ "address": "h", "port": 1 }] })),
        ("socks", json!({ "servers": [{ "address": "h", "port": 1 }] })),
        ("trojan", json!({ "servers": [{ "address": "h", "port": 1 }] })),
    ];
    let schemes: Vec<&str> = cases
        .iter()
        .map(|(protocol, settings)| {
            let o = outbound(json!({ "protocol": protocol, "settings": settings }));
            Protocol::decode(&o).unwrap().scheme()
        })
        .collect();
    assert_eq!(schemes, ["ss", "vmess", "vless", "socks", "trojan"]);
}

// =============================================================================
// Flattening
// =============================================================================

#[test]
fn flatten_keeps_source_order_and_expands_groups() {
    let cfg = config(json!({
        "outbound": { "name": "L", "protocol": "freedom" },
        "outboundDetour": [{ "name": "D", "protocol": "freedom" }],
        "outbounds": [
            { "name": "A", "protocol": "freedom" },
            { "name": "G", "outbounds": [
                { "name": "G1", "protocol": "freedom" },
                { "name": "G2", "outbounds": [{ "name": "G2a", "protocol": "freedom" }] }
            ] },
            { "name": "B", "protocol": "freedom" }
        ]
    }));
    let names: Vec<&str> = cfg
        .flatten_outbounds()
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(names, ["L", "D", "A", "G1", "G2a", "B"]);
}

#[test]
fn flatten_empty_and_null_lists() {
    assert!(config(json!({})).flatten_outbounds().is_empty());
    assert!(
        config(json!({ "outbounds": null, "outboundDetour": null }))
            .flatten_outbounds()
            .is_empty()
    );
}

// =============================================================================
// Conversion
// =============================================================================

fn mixed_config() -> Configuration {
    config(json!({
        "outbounds": [
            {
                "name": "T",
                "protocol": "trojan",
                "settings": { "servers": [{ "address": "h", "port": 1, "password": "pw" }] }
            },
            { "name": "direct", "protocol": "freedom", "settings": {} },
            { "name": "broken", "protocol": "vmess", "settings": { "vnext": 1 } },
            { "name": "group", "outbounds": [{
                "name": "S",
                "protocol": "socks",
                "settings": { "servers": [{ "address": "10.0.0.1", "port": 1080 }] }
            }] }
        ]
    }))
}

#[test]
fn share_links_skip_failures_and_keep_order() {
    let links = share_links(&mixed_config()).unwrap();
    assert_eq!(
        links,
        ["trojan://pw@h:1#T", "socks://Og==@10.0.0.1:1080#S"]
    );
}

#[test]
fn share_text_joins_with_newline() {
    assert_eq!(
        share_text(&mixed_config()).unwrap(),
        "trojan://pw@h:1#T\nsocks://Og==@10.0.0.1:1080#S"
    );
}

#[test]
fn share_links_empty_config_has_no_valid_outbounds() {
    let err = share_links(&Configuration::default()).unwrap_err();
    assert!(matches!(err, ConvertError::NoValidOutbounds));
    assert_eq!(err.to_string(), "no valid outbounds");
    assert!(!err.is_per_outbound());
}

#[test]
fn share_links_all_failed_has_no_valid_outbounds() {
    let cfg = config(json!({
        "outbounds": [
            { "protocol": "freedom" },
            { "protocol": "blackhole" },
            { "protocol": "vless", "settings": { "vnext": [] } }
        ]
    }));
    assert!(matches!(
        share_links(&cfg),
        Err(ConvertError::NoValidOutbounds)
    ));
}

#[test]
fn share_text_is_deterministic() {
    let cfg = mixed_config();
    assert_eq!(share_text(&cfg).unwrap(), share_text(&cfg).unwrap());
}

#[test]
fn convert_writes_links_and_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("links.txt");
    assert_eq!(convert(&mixed_config(), &out), "");
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, "trojan://pw@h:1#T\nsocks://Og==@10.0.0.1:1080#S");
}

#[test]
fn convert_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("links.txt");
    let cfg = mixed_config();
    assert_eq!(convert(&cfg, &out), "");
    let first = std::fs::read(&out).unwrap();
    assert_eq!(convert(&cfg, &out), "");
    assert_eq!(first, std::fs::read(&out).unwrap());
}

#[test]
fn convert_empty_config_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("links.txt");
    assert_eq!(convert(&Configuration::default(), &out), "no valid outbounds");
    assert!(!out.exists());
}

#[test]
fn convert_reports_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened for writing.
    let outcome = convert(&mixed_config(), dir.path());
    assert!(!outcome.is_empty());
    assert_ne!(outcome, "no valid outbounds");
}

#[test]
fn write_text_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("t.txt");
    write_text("a much longer first text", &out).unwrap();
    write_text("short", &out).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "short");
}

#[test]
fn convert_file_reads_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("config.json");
    let out = dir.path().join("links.txt");
    std::fs::write(
        &input,
        r#"{"outbounds":[{"name":"T","protocol":"trojan","settings":{"servers":[{"address":"h","port":1,"password":"pw"}]},"streamSettings":{}}]}"#,
    )
    .unwrap();
    assert_eq!(convert_file(&input, &out), "");
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "trojan://pw@h:1?type=tcp&security=none#T"
    );
}

#[test]
fn convert_file_reports_input_errors() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("links.txt");

    let missing = convert_file(dir.path().join("nope.json"), &out);
    assert!(!missing.is_empty());

    let malformed = dir.path().join("bad.json");
    std::fs::write(&malformed, "{ not json").unwrap();
    let outcome = convert_file(&malformed, &out);
    assert!(!outcome.is_empty());
    assert_ne!(outcome, "no valid outbounds");
    assert!(!out.exists());
}

#[test]
fn configuration_from_json_rejects_wrong_layout() {
    let err = Configuration::from_json(r#"{"outbounds": {}}"#).unwrap_err();
    assert!(matches!(err, ConvertError::Json(_)));
}
