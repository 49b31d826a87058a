//! Identity registry and factory for the built-in effects.
//!
//! A never-mutated constant table pairs each instance identity with its
//! descriptor and a constructor for the matching effect variant. Lookup is
//! an exact byte-wise identity comparison in fixed enumeration order, first
//! match wins. The variant set is closed: there is no runtime registration.
//!
//! The identities and display strings below are load-bearing configuration
//! data published with earlier releases; hosts match against them byte for
//! byte, so they must never change.

use timbre_core::{Effect, EffectUuid};
use timbre_effects::{BassBoost, Compression, Equalizer, StereoWide, Virtualizer};

use crate::descriptor::{CONTROL_API_VERSION, Descriptor, flags};

/// Instance identity of the dynamic range compression effect.
pub const COMPRESSION_UUID: EffectUuid = EffectUuid::new(
    0xf27317f4,
    0xc984,
    0x4de6,
    0x9a90,
    [0x54, 0x57, 0x59, 0x49, 0x5b, 0xf2],
);

/// Instance identity of the headset virtualization effect.
pub const VIRTUALIZER_UUID: EffectUuid = EffectUuid::new(
    0x7c6cc5f8,
    0x6f34,
    0x4449,
    0xa282,
    [0xbe, 0xd8, 0x4f, 0x1a, 0x5b, 0x5a],
);

/// Instance identity of the stereo widener effect.
pub const STEREO_WIDE_UUID: EffectUuid = EffectUuid::new(
    0x37cc2c00,
    0xdddd,
    0x11db,
    0x8577,
    [0x00, 0x02, 0xa5, 0xd5, 0xc5, 0x1c],
);

/// Instance identity of the equalizer effect.
pub const EQUALIZER_UUID: EffectUuid = EffectUuid::new(
    0x58bc9000,
    0x0d7f,
    0x462e,
    0x90d2,
    [0x03, 0x5e, 0xdd, 0xd8, 0xb4, 0x34],
);

/// Instance identity of the bass boost effect.
pub const BASS_BOOST_UUID: EffectUuid = EffectUuid::new(
    0x42b5cbf5,
    0x4dd8,
    0x4e79,
    0xa5fb,
    [0xcc, 0xeb, 0x2c, 0xb5, 0x4e, 0x13],
);

/// Volume-control interface type identity (compression).
const TYPE_VOLUME: EffectUuid = EffectUuid::new(
    0x09e8ede0,
    0xddde,
    0x11db,
    0xb4f6,
    [0x00, 0x02, 0xa5, 0xd5, 0xc5, 0x1b],
);

/// Virtualizer type identity.
const TYPE_VIRTUALIZER: EffectUuid = EffectUuid::new(
    0x37cc2c00,
    0xdddd,
    0x11db,
    0x8577,
    [0x00, 0x02, 0xa5, 0xd5, 0xc5, 0x1b],
);

/// Equalizer type identity.
const TYPE_EQUALIZER: EffectUuid = EffectUuid::new(
    0x0bed4300,
    0xddd6,
    0x11db,
    0x8f34,
    [0x00, 0x02, 0xa5, 0xd5, 0xc5, 0x1b],
);

/// Bass boost type identity.
const TYPE_BASS_BOOST: EffectUuid = EffectUuid::new(
    0x0634f220,
    0xddd4,
    0x11db,
    0xa0fc,
    [0x00, 0x02, 0xa5, 0xd5, 0xc5, 0x1b],
);

/// Relative CPU cost shared by all entries. FIXME: should be measured.
const DEFAULT_CPU_LOAD: u16 = 10;
/// Relative memory cost shared by all entries.
const DEFAULT_MEMORY_USAGE: u16 = 1;

/// A registered effect: descriptor plus constructor for its variant.
pub struct Registration {
    /// Immutable metadata bound to every instance of this effect.
    pub descriptor: Descriptor,
    factory: fn() -> Box<dyn Effect + Send>,
}

impl Registration {
    /// Construct the effect variant with its default internal state.
    pub(crate) fn instantiate(&self) -> Box<dyn Effect + Send> {
        (self.factory)()
    }
}

fn make_compression() -> Box<dyn Effect + Send> {
    Box::new(Compression::new())
}

fn make_virtualizer() -> Box<dyn Effect + Send> {
    Box::new(Virtualizer::new())
}

fn make_stereo_wide() -> Box<dyn Effect + Send> {
    Box::new(StereoWide::new())
}

fn make_equalizer() -> Box<dyn Effect + Send> {
    Box::new(Equalizer::new())
}

fn make_bass_boost() -> Box<dyn Effect + Send> {
    Box::new(BassBoost::new())
}

static REGISTRATIONS: [Registration; 5] = [
    Registration {
        descriptor: Descriptor {
            type_uuid: TYPE_VOLUME,
            uuid: COMPRESSION_UUID,
            api_version: CONTROL_API_VERSION,
            flags: flags::INSERT_FIRST | flags::VOLUME_CTRL,
            cpu_load: DEFAULT_CPU_LOAD,
            memory_usage: DEFAULT_MEMORY_USAGE,
            name: "CyanogenMod's Dynamic Range Compression",
            implementor: "Antti S. Lankila",
        },
        factory: make_compression,
    },
    Registration {
        descriptor: Descriptor {
            type_uuid: TYPE_VIRTUALIZER,
            uuid: VIRTUALIZER_UUID,
            api_version: CONTROL_API_VERSION,
            flags: flags::INSERT_LAST,
            cpu_load: DEFAULT_CPU_LOAD,
            memory_usage: DEFAULT_MEMORY_USAGE,
            name: "CyanogenMod's Headset Virtualization",
            implementor: "Antti S. Lankila",
        },
        factory: make_virtualizer,
    },
    Registration {
        descriptor: Descriptor {
            type_uuid: STEREO_WIDE_UUID,
            uuid: STEREO_WIDE_UUID,
            api_version: CONTROL_API_VERSION,
            flags: flags::INSERT_LAST,
            cpu_load: DEFAULT_CPU_LOAD,
            memory_usage: DEFAULT_MEMORY_USAGE,
            name: "OmniROM's Stereo Widener",
            implementor: "Guillaume Lesniak",
        },
        factory: make_stereo_wide,
    },
    Registration {
        descriptor: Descriptor {
            type_uuid: TYPE_EQUALIZER,
            uuid: EQUALIZER_UUID,
            api_version: CONTROL_API_VERSION,
            flags: flags::INSERT_ANY,
            cpu_load: DEFAULT_CPU_LOAD,
            memory_usage: DEFAULT_MEMORY_USAGE,
            name: "CyanogenMod's Equalizer",
            implementor: "Antti S. Lankila",
        },
        factory: make_equalizer,
    },
    Registration {
        descriptor: Descriptor {
            type_uuid: TYPE_BASS_BOOST,
            uuid: BASS_BOOST_UUID,
            api_version: CONTROL_API_VERSION,
            flags: flags::INSERT_ANY,
            cpu_load: DEFAULT_CPU_LOAD,
            memory_usage: DEFAULT_MEMORY_USAGE,
            name: "CyanogenMod's Bass Boost",
            implementor: "Antti S. Lankila",
        },
        factory: make_bass_boost,
    },
];

/// All registered effects, in enumeration order.
pub fn registrations() -> &'static [Registration] {
    &REGISTRATIONS
}

/// Find the registration whose instance identity equals `uuid` byte for
/// byte. First match wins; duplicate identities across entries are a
/// configuration defect, not a runtime-detected condition.
pub fn lookup(uuid: &EffectUuid) -> Option<&'static Registration> {
    REGISTRATIONS.iter().find(|r| r.descriptor.uuid == *uuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_five_entries() {
        assert_eq!(registrations().len(), 5);
    }

    #[test]
    fn instance_identities_are_unique_across_the_table() {
        let table = registrations();
        for (i, a) in table.iter().enumerate() {
            for b in &table[i + 1..] {
                assert_ne!(
                    a.descriptor.uuid, b.descriptor.uuid,
                    "duplicate identity between '{}' and '{}'",
                    a.descriptor.name, b.descriptor.name
                );
            }
        }
    }

    #[test]
    fn lookup_finds_every_registered_identity() {
        for registration in registrations() {
            let found = lookup(&registration.descriptor.uuid).expect("registered identity");
            assert_eq!(found.descriptor, registration.descriptor);
        }
    }

    #[test]
    fn lookup_rejects_an_unregistered_identity() {
        let unknown = EffectUuid::new(0xdeadbeef, 0, 0, 0, [0; 6]);
        assert!(lookup(&unknown).is_none());
    }

    #[test]
    fn published_identities_are_byte_exact() {
        // Spot-check the compression identity against its published image.
        assert_eq!(
            COMPRESSION_UUID.to_bytes(),
            [
                0xf4, 0x17, 0x73, 0xf2, 0x84, 0xc9, 0xe6, 0x4d, 0x90, 0x9a, 0x54, 0x57, 0x59,
                0x49, 0x5b, 0xf2
            ]
        );
        assert_eq!(
            COMPRESSION_UUID.to_string(),
            "f27317f4-c984-4de6-9a90-545759495bf2"
        );
        assert_eq!(
            STEREO_WIDE_UUID.to_string(),
            "37cc2c00-dddd-11db-8577-0002a5d5c51c"
        );
    }

    #[test]
    fn every_entry_can_instantiate_its_variant() {
        for registration in registrations() {
            let mut effect = registration.instantiate();
            // Freshly constructed effects are disabled: passthrough.
            let input = [0.25_f32; 8];
            let mut output = [0.0_f32; 8];
            effect.process(&input, &mut output).unwrap();
            assert_eq!(input, output, "{}", registration.descriptor.name);
        }
    }
}
