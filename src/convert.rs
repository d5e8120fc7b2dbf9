//! Conversion orchestrator
//!
//! Flattens the configuration, builds one link per outbound, drops the outbounds that fail
//! and joins the rest with `\n`. Only [`convert`] and [`convert_file`] touch the filesystem.

use crate::Protocol;
use crate::config::{Configuration, Outbound};
use crate::constants::LINK_SEPARATOR;
use crate::error::{ConvertError, Result};
use crate::link::{LinkBuilder, ShareLink};
use crate::stream;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

impl Outbound {
    /// Builds the share link for this outbound.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnsupportedProtocol`] for protocols without a link form, and a
    /// settings error when the protocol settings are missing, malformed or list no server.
    pub fn share_link(&self) -> Result<ShareLink> {
        let protocol = Protocol::decode(self)?;
        let link = LinkBuilder::new(protocol.scheme()).fragment(&self.name);
        let link = protocol.apply(link);
        stream::apply(self.stream_settings.as_ref(), link).build()
    }
}

/// Builds the links of every convertible outbound, in source order.
///
/// Outbounds that fail are logged and skipped.
///
/// # Errors
///
/// Returns [`ConvertError::NoValidOutbounds`] when the configuration has no outbound or none
/// of them produced a link.
pub fn share_links(config: &Configuration) -> Result<Vec<String>> {
    let outbounds = config.flatten_outbounds();
    if outbounds.is_empty() {
        return Err(ConvertError::NoValidOutbounds);
    }

    let mut links = Vec::with_capacity(outbounds.len());
    for (index, outbound) in outbounds.iter().enumerate() {
        match outbound.share_link() {
            Ok(link) => {
                let link = link.to_string();
                debug!(index, name = %outbound.name, %link, "built share link");
                links.push(link);
            }
            Err(err) => {
                warn!(
                    index,
                    name = %outbound.name,
                    tag = %outbound.tag,
                    protocol = %outbound.protocol,
                    error = %err,
                    "skipping outbound"
                );
            }
        }
    }

    if links.is_empty() {
        return Err(ConvertError::NoValidOutbounds);
    }
    info!(count = links.len(), total = outbounds.len(), "converted outbounds");
    Ok(links)
}

/// All links joined with `\n`, without a trailing newline.
///
/// # Errors
///
/// Same as [`share_links`].
pub fn share_text(config: &Configuration) -> Result<String> {
    Ok(share_links(config)?.join(LINK_SEPARATOR))
}

/// Writes `text` to `path`, creating or truncating the file.
///
/// The file handle is closed when this returns, on success and on failure alike.
pub fn write_text(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn outcome(result: Result<()>) -> String {
    match result {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Converts `config` and writes the links to `text_path`.
///
/// Returns an empty string on success, otherwise the failure description
/// (`no valid outbounds`, or the I/O error). Nothing is written when no link was produced.
pub fn convert(config: &Configuration, text_path: impl AsRef<Path>) -> String {
    outcome(share_text(config).and_then(|text| write_text(&text, text_path)))
}

/// Reads an xray JSON file, converts it and writes the links to `text_path`.
///
/// Input errors (unreadable file, malformed JSON) are reported before anything else happens.
/// Otherwise behaves like [`convert`].
pub fn convert_file(config_path: impl AsRef<Path>, text_path: impl AsRef<Path>) -> String {
    let config_path = config_path.as_ref();
    debug!(path = %config_path.display(), "loading configuration");
    outcome(
        Configuration::load(config_path)
            .and_then(|config| share_text(&config))
            .and_then(|text| write_text(&text, text_path)),
    )
}
