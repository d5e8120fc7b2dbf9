//! Share link value and its builder
//!
//! Link format: `scheme://[userinfo@]host:port[?query][#fragment]`
//!
//! Each component is escaped by its own rule:
//!
//! | Component | Kept literal besides `A-Z a-z 0-9 - _ . ~` |
//! |-----------|---------------------------------------------|
//! | userinfo  | `$ & + , ; =` (so base64 padding survives, `/` becomes `%2F`) |
//! | host      | `! $ & ' ( ) * + , ; = : [ ] < > "` |
//! | query     | nothing; escaped when appended, see [`add_query`](crate::add_query) |
//! | fragment  | `$ & + , / : ; = ? @ ! ( ) *` |
//!
//! IPv6 literals are wrapped in brackets. An empty query drops the `?` and an empty fragment
//! drops the `#`.

use crate::error::{ConvertError, Result};
use crate::query::add_query;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const USERINFO: &AsciiSet = &UNRESERVED
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

const HOST: &AsciiSet = &UNRESERVED
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'[')
    .remove(b']')
    .remove(b'<')
    .remove(b'>')
    .remove(b'"');

const FRAGMENT: &AsciiSet = &UNRESERVED
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'?')
    .remove(b'@')
    .remove(b'!')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

/// A fully assembled share link
///
/// Produced by [`LinkBuilder::build`]; the string form comes from [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Scheme without `://`
    pub scheme: String,
    /// Unescaped userinfo
    pub userinfo: Option<String>,
    /// Server address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Raw, already escaped query
    pub query: String,
    /// Unescaped display name
    pub fragment: String,
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some(ref user) = self.userinfo {
            write!(f, "{}@", utf8_percent_encode(user, USERINFO))?;
        }
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]", utf8_percent_encode(&self.host, HOST))?;
        } else {
            write!(f, "{}", utf8_percent_encode(&self.host, HOST))?;
        }
        write!(f, ":{}", self.port)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", utf8_percent_encode(&self.fragment, FRAGMENT))?;
        }
        Ok(())
    }
}

/// By-value builder threaded through the protocol and stream-settings stages
///
/// Every method consumes the builder and returns the updated one. Setting the server or the
/// user again replaces the previous value; query pairs only ever accumulate.
///
/// ```rust
/// use xray_share_link::LinkBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let link = LinkBuilder::new("trojan")
///     .fragment("Node")
///     .server("example.com", 443)
///     .user("secret")
///     .query("type", "tcp")
///     .build()?;
/// assert_eq!(link.to_string(), "trojan://secret@example.com:443?type=tcp#Node");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkBuilder {
    scheme: String,
    userinfo: Option<String>,
    server: Option<(String, u16)>,
    query: String,
    fragment: String,
}

impl LinkBuilder {
    /// Starts a link with the given scheme.
    pub fn new(scheme: &str) -> Self {
        LinkBuilder {
            scheme: scheme.to_string(),
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn fragment(self, name: &str) -> Self {
        LinkBuilder {
            fragment: name.to_string(),
            ..self
        }
    }

    /// Sets the server address and port, replacing any earlier server.
    pub fn server(self, address: &str, port: u16) -> Self {
        LinkBuilder {
            server: Some((address.to_string(), port)),
            ..self
        }
    }

    /// Sets the unescaped userinfo, replacing any earlier value.
    pub fn user(self, userinfo: &str) -> Self {
        LinkBuilder {
            userinfo: Some(userinfo.to_string()),
            ..self
        }
    }

    /// Appends one query pair.
    pub fn query(self, key: &str, value: &str) -> Self {
        let query = add_query(&self.query, key, value);
        LinkBuilder { query, ..self }
    }

    /// Appends a list-valued query pair, joining the values with `,`; skipped when the
    /// joined value is empty.
    pub fn query_list(self, key: &str, values: &[String]) -> Self {
        self.query_non_empty(key, &values.join(crate::constants::LIST_SEPARATOR))
    }

    /// Appends a query pair only when `value` is non-empty.
    pub fn query_non_empty(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.query(key, value)
        }
    }

    /// Raw query assembled so far.
    pub fn raw_query(&self) -> &str {
        &self.query
    }

    /// Finishes the link.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::EmptyServers`] when no server was ever set.
    pub fn build(self) -> Result<ShareLink> {
        let (host, port) = self
            .server
            .ok_or_else(|| ConvertError::EmptyServers(self.scheme.clone()))?;
        Ok(ShareLink {
            scheme: self.scheme,
            userinfo: self.userinfo,
            host,
            port,
            query: self.query,
            fragment: self.fragment,
        })
    }
}
