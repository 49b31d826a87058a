//! Immutable effect descriptors and their host-visible byte image.
//!
//! A descriptor is the metadata a host reads before and after creating an
//! effect: identities, control-API version, capability flags, relative
//! resource costs, and display strings. The packed image layout is part of
//! the host contract and is bit-exact: hosts built against previously
//! published descriptors must keep working.

use timbre_core::EffectUuid;

/// Version of the control API the effects implement.
pub const CONTROL_API_VERSION: u32 = 0x00020000;

/// Fixed length of the name and implementor fields in the packed image.
pub const STRING_LEN: usize = 64;

/// Size in bytes of the packed descriptor image:
/// two identities, version, flags, two cost fields, two strings.
pub const DESCRIPTOR_LEN: usize = 2 * EffectUuid::LEN + 4 + 4 + 2 + 2 + 2 * STRING_LEN;

/// Capability flag bits.
///
/// The flags field is a bitset of packed subfields: bits 0..3 hold the
/// effect type, bits 3..6 the insertion-position hint, bits 6..9 the
/// volume-control capability. Values are host contract constants.
pub mod flags {
    /// Insert effect, processing the stream in place (type subfield zero).
    pub const TYPE_INSERT: u32 = 0;
    /// No insertion-position preference.
    pub const INSERT_ANY: u32 = 0;
    /// Prefer insertion at the head of the chain.
    pub const INSERT_FIRST: u32 = 1 << 3;
    /// Prefer insertion at the tail of the chain.
    pub const INSERT_LAST: u32 = 2 << 3;
    /// The effect implements volume control for its stream.
    pub const VOLUME_CTRL: u32 = 1 << 6;
}

/// Immutable metadata for one registered effect.
///
/// Built once into the static registry table at load time and shared by
/// reference by every handle bound to the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Type identity grouping effects by category.
    pub type_uuid: EffectUuid,
    /// Instance identity, globally unique across the registry.
    pub uuid: EffectUuid,
    /// Control API version ([`CONTROL_API_VERSION`]).
    pub api_version: u32,
    /// Capability flag bitset (see [`flags`]).
    pub flags: u32,
    /// Relative CPU load units. Placeholder pending real measurement.
    pub cpu_load: u16,
    /// Relative memory usage units. Placeholder pending real measurement.
    pub memory_usage: u16,
    /// Human-readable effect name.
    pub name: &'static str,
    /// Implementor display string.
    pub implementor: &'static str,
}

impl Descriptor {
    /// Pack the descriptor into its fixed-size byte image.
    ///
    /// Layout: type identity (16), instance identity (16), API version
    /// (u32 LE), flags (u32 LE), CPU load (u16 LE), memory usage (u16 LE),
    /// name (64, NUL-padded), implementor (64, NUL-padded).
    pub fn to_bytes(&self) -> [u8; DESCRIPTOR_LEN] {
        let mut out = [0u8; DESCRIPTOR_LEN];
        out[0..16].copy_from_slice(&self.type_uuid.to_bytes());
        out[16..32].copy_from_slice(&self.uuid.to_bytes());
        out[32..36].copy_from_slice(&self.api_version.to_le_bytes());
        out[36..40].copy_from_slice(&self.flags.to_le_bytes());
        out[40..42].copy_from_slice(&self.cpu_load.to_le_bytes());
        out[42..44].copy_from_slice(&self.memory_usage.to_le_bytes());
        pack_string(&mut out[44..44 + STRING_LEN], self.name);
        pack_string(&mut out[44 + STRING_LEN..], self.implementor);
        out
    }
}

/// Copy a display string into a fixed-length field, NUL-padded.
///
/// Strings longer than the field are truncated; the final byte is always a
/// NUL terminator.
fn pack_string(dst: &mut [u8], s: &str) {
    let len = s.len().min(dst.len() - 1);
    dst[..len].copy_from_slice(&s.as_bytes()[..len]);
}
