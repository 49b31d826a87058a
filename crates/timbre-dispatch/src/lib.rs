//! Timbre Dispatch - effect registry, factory, and host lifecycle layer
//!
//! This crate is the boundary between a host audio pipeline and the closed
//! set of built-in effects. It maps 16-byte identities to effect variants,
//! binds each live instance to immutable descriptive metadata, and forwards
//! host calls through a uniform operation set.
//!
//! # Entry Points
//!
//! Three process-wide operations mirror the host contract:
//!
//! - [`create_effect`] - resolve an identity, construct the variant, return
//!   an owning [`EffectHandle`]
//! - [`release_effect`] - tear a handle down, effect first, immediately
//! - [`effect_descriptor`] - stateless descriptor lookup, no handle needed
//!
//! Exactly one error kind exists at this layer: [`DispatchError::InvalidIdentity`].
//! Everything else either always succeeds or relays the effect's own result
//! unmodified.
//!
//! # Example
//!
//! ```rust
//! use timbre_core::CommandCode;
//! use timbre_dispatch::{create_effect, effect_descriptor, release_effect, registry};
//!
//! let identity = registry::BASS_BOOST_UUID;
//! let descriptor = effect_descriptor(&identity).unwrap();
//! assert_eq!(descriptor.name, "CyanogenMod's Bass Boost");
//!
//! let mut handle = create_effect(&identity, 0, 0).unwrap();
//! handle.command(CommandCode::Enable.raw(), &[], &mut []).unwrap();
//!
//! let input = [0.0_f32; 256];
//! let mut output = [0.0_f32; 256];
//! handle.process(&input, &mut output).unwrap();
//!
//! release_effect(handle);
//! ```
//!
//! # Concurrency
//!
//! The registry table is a static: concurrent lookups from any number of
//! threads need no synchronization. A handle is exclusively owned and its
//! operations take `&mut self`; driving one handle from several contexts at
//! once is expressed as impossible rather than checked at runtime. The
//! process and command paths add no locking, logging, or allocation - the
//! only allocation in this crate is the box at create, reclaimed at
//! release.

pub mod descriptor;
pub mod handle;
pub mod registry;

use thiserror::Error;
use tracing::debug;

pub use descriptor::{CONTROL_API_VERSION, DESCRIPTOR_LEN, Descriptor, flags};
pub use handle::EffectHandle;
pub use registry::{Registration, lookup, registrations};

use timbre_core::{EffectUuid, status};

/// The single error kind of the dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The presented identity matches no registered effect.
    #[error("no registered effect matches identity {0}")]
    InvalidIdentity(EffectUuid),
}

impl DispatchError {
    /// The negative status code for the host binary contract.
    pub const fn status(&self) -> i32 {
        status::INVALID
    }
}

/// Library identification record exported alongside the entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryInfo {
    /// Library display name.
    pub name: &'static str,
    /// Implementor display string.
    pub implementor: &'static str,
    /// Control API version the library implements.
    pub version: u32,
}

/// This library's identification record.
pub const LIBRARY_INFO: LibraryInfo = LibraryInfo {
    name: "CyanogenMod's Effect Library",
    implementor: "Antti S. Lankila",
    version: CONTROL_API_VERSION,
};

/// Create an effect instance for `identity`.
///
/// Resolves the identity against the registry, constructs the matching
/// variant with its default state, and binds it to its descriptor.
/// `session_id` and `io_id` are opaque pass-through values recorded on the
/// handle and not interpreted here; a variant may ignore them or key
/// per-session state on them externally.
///
/// Fails with [`DispatchError::InvalidIdentity`] when nothing matches;
/// construction never begins before resolution succeeds, so a failed create
/// leaves nothing allocated.
pub fn create_effect(
    identity: &EffectUuid,
    session_id: i32,
    io_id: i32,
) -> Result<EffectHandle, DispatchError> {
    let registration =
        registry::lookup(identity).ok_or(DispatchError::InvalidIdentity(*identity))?;
    let effect = registration.instantiate();
    debug!(
        %identity,
        effect = registration.descriptor.name,
        session_id,
        io_id,
        "created effect instance"
    );
    Ok(EffectHandle::bind(
        effect,
        &registration.descriptor,
        session_id,
        io_id,
    ))
}

/// Release an effect handle.
///
/// Consumes the handle: the owned effect is destroyed first, immediately
/// and synchronously, then the handle's storage is reclaimed. Always
/// succeeds; ownership makes a second release unwritable.
pub fn release_effect(handle: EffectHandle) {
    debug!(identity = %handle.descriptor().uuid, "releasing effect instance");
    drop(handle);
}

/// Look up the descriptor for `identity` without creating anything.
///
/// Stateless and independent of any live handle. Fails with
/// [`DispatchError::InvalidIdentity`] for an unregistered identity.
pub fn effect_descriptor(identity: &EffectUuid) -> Result<&'static Descriptor, DispatchError> {
    match registry::lookup(identity) {
        Some(registration) => Ok(&registration.descriptor),
        None => Err(DispatchError::InvalidIdentity(*identity)),
    }
}
