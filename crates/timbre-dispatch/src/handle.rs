//! Host-visible handle binding one live effect to its descriptor.
//!
//! A handle exclusively owns exactly one effect instance and borrows the
//! static descriptor it was created from. It forwards the host's process
//! and command calls verbatim - no inspection, no transformation, no status
//! translation - and serves descriptor reads as value copies.

use timbre_core::{Effect, EffectError};

use crate::descriptor::{DESCRIPTOR_LEN, Descriptor};

/// One live effect bound to its descriptor.
///
/// Created only by [`create_effect`](crate::create_effect) and destroyed by
/// passing ownership to [`release_effect`](crate::release_effect) (or by
/// dropping). The owned effect is torn down first, immediately and
/// synchronously.
///
/// All mutating operations take `&mut self`: exclusive ownership is how the
/// host's serialization obligation is expressed, and why use-after-release
/// and double-release cannot be written at all.
pub struct EffectHandle {
    // Declared first so the effect drops before the descriptor borrow.
    effect: Box<dyn Effect + Send>,
    descriptor: &'static Descriptor,
    session_id: i32,
    io_id: i32,
}

impl EffectHandle {
    /// Bind an effect instance to its descriptor and session context.
    pub(crate) fn bind(
        effect: Box<dyn Effect + Send>,
        descriptor: &'static Descriptor,
        session_id: i32,
        io_id: i32,
    ) -> Self {
        Self {
            effect,
            descriptor,
            session_id,
            io_id,
        }
    }

    /// Forward one block of interleaved stereo audio to the bound effect.
    ///
    /// The result is exactly what the effect produced.
    #[inline]
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
        self.effect.process(input, output)
    }

    /// Forward one control command to the bound effect.
    ///
    /// Opcodes are interpreted only by the effect, never here. The result
    /// is exactly what the effect produced.
    #[inline]
    pub fn command(
        &mut self,
        opcode: u32,
        input: &[u8],
        reply: &mut [u8],
    ) -> Result<usize, EffectError> {
        self.effect.command(opcode, input, reply)
    }

    /// The bound descriptor.
    pub fn descriptor(&self) -> &'static Descriptor {
        self.descriptor
    }

    /// Value copy of the bound descriptor's packed byte image.
    ///
    /// Always succeeds; the copy stays valid independent of the registry's
    /// backing storage.
    pub fn descriptor_bytes(&self) -> [u8; DESCRIPTOR_LEN] {
        self.descriptor.to_bytes()
    }

    /// Opaque session context recorded at creation, uninterpreted here.
    pub fn session_id(&self) -> i32 {
        self.session_id
    }

    /// Opaque I/O context recorded at creation, uninterpreted here.
    pub fn io_id(&self) -> i32 {
        self.io_id
    }
}

impl core::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("effect", &self.descriptor.name)
            .field("uuid", &self.descriptor.uuid)
            .field("session_id", &self.session_id)
            .field("io_id", &self.io_id)
            .finish()
    }
}
