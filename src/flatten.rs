//! Outbound flattener
//!
//! Produces the flat, source-ordered list of outbounds a configuration defines:
//!
//! 1. the legacy v2ray `outbound`, if any,
//! 2. the legacy `outboundDetour` entries,
//! 3. the `outbounds` entries.
//!
//! A group outbound (one carrying its own non-empty `outbounds` list) is replaced in place by
//! its members, recursively. Flattening never fails.

use crate::config::{Configuration, Outbound};

impl Configuration {
    /// Every individual outbound, in source order.
    pub fn flatten_outbounds(&self) -> Vec<&Outbound> {
        let mut flat = Vec::new();
        let roots = self
            .legacy_outbound
            .iter()
            .chain(&self.outbound_detour)
            .chain(&self.outbounds);
        for outbound in roots {
            push_flattened(outbound, &mut flat);
        }
        flat
    }
}

fn push_flattened<'a>(outbound: &'a Outbound, flat: &mut Vec<&'a Outbound>) {
    if outbound.is_group() {
        for member in &outbound.outbounds {
            push_flattened(member, flat);
        }
    } else {
        flat.push(outbound);
    }
}
