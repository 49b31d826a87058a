//! 16-byte effect identities.
//!
//! Every effect implementation is identified by a globally unique 16-byte
//! value, distinct from the type identity that groups effects by category.
//! Hosts match identities against previously published byte images, so the
//! layout of [`EffectUuid::to_bytes`] is load-bearing and must not change.

use core::fmt;

/// A 16-byte effect identity.
///
/// The field layout mirrors the host contract: three little-endian integer
/// fields, a clock sequence, and a 6-byte node. Equality is byte-wise, which
/// is exactly the matching rule the registry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectUuid {
    /// Low 32 bits of the timestamp.
    pub time_low: u32,
    /// Middle 16 bits of the timestamp.
    pub time_mid: u16,
    /// High 16 bits of the timestamp and version.
    pub time_hi: u16,
    /// Clock sequence.
    pub clock_seq: u16,
    /// Node identifier.
    pub node: [u8; 6],
}

impl EffectUuid {
    /// Length of the packed byte image.
    pub const LEN: usize = 16;

    /// Build an identity from its raw fields.
    pub const fn new(time_low: u32, time_mid: u16, time_hi: u16, clock_seq: u16, node: [u8; 6]) -> Self {
        Self {
            time_low,
            time_mid,
            time_hi,
            clock_seq,
            node,
        }
    }

    /// Pack the identity into the 16-byte image hosts compare against.
    ///
    /// Integer fields serialize little-endian, followed by the node bytes.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0..4].copy_from_slice(&self.time_low.to_le_bytes());
        out[4..6].copy_from_slice(&self.time_mid.to_le_bytes());
        out[6..8].copy_from_slice(&self.time_hi.to_le_bytes());
        out[8..10].copy_from_slice(&self.clock_seq.to_le_bytes());
        out[10..16].copy_from_slice(&self.node);
        out
    }

    /// Rebuild an identity from its packed byte image.
    pub fn from_bytes(raw: &[u8; Self::LEN]) -> Self {
        Self {
            time_low: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            time_mid: u16::from_le_bytes([raw[4], raw[5]]),
            time_hi: u16::from_le_bytes([raw[6], raw[7]]),
            clock_seq: u16::from_le_bytes([raw[8], raw[9]]),
            node: [raw[10], raw[11], raw[12], raw[13], raw[14], raw[15]],
        }
    }
}

impl fmt::Display for EffectUuid {
    /// Canonical lowercase form, e.g. `f27317f4-c984-4de6-9a90-545759495bf2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.time_low,
            self.time_mid,
            self.time_hi,
            self.clock_seq,
            self.node[0],
            self.node[1],
            self.node[2],
            self.node[3],
            self.node[4],
            self.node[5],
        )
    }
}
