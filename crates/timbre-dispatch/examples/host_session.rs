//! Demonstration of a host driving the dispatch layer.
//!
//! Walks the full lifecycle the way a host pipeline would: enumerate the
//! registry, create an effect by identity, configure and enable it through
//! the command channel, process audio, and release.
//!
//! Run with: cargo run --example host_session
#![allow(missing_docs)]

use timbre_core::{CommandCode, StreamConfig};
use timbre_dispatch::{
    LIBRARY_INFO, create_effect, effect_descriptor, registrations, registry, release_effect,
};
use timbre_effects::compression::PARAM_STRENGTH;

const SAMPLE_RATE: u32 = 48_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    println!("{} ({})", LIBRARY_INFO.name, LIBRARY_INFO.implementor);
    println!("Registered effects:");
    for registration in registrations() {
        let d = &registration.descriptor;
        println!("  {}  {}", d.uuid, d.name);
    }
    println!();

    // Stateless describe, no handle needed.
    let descriptor = effect_descriptor(&registry::COMPRESSION_UUID).unwrap();
    println!(
        "Describe: {} (flags {:#x}, cpu {}, mem {})",
        descriptor.name, descriptor.flags, descriptor.cpu_load, descriptor.memory_usage
    );

    // Create and configure a compression instance.
    let mut handle = create_effect(&registry::COMPRESSION_UUID, 1, 1).unwrap();

    let config = StreamConfig {
        sample_rate: SAMPLE_RATE,
        channels: 2,
    };
    let mut payload = [0u8; StreamConfig::ENCODED_LEN];
    config.encode(&mut payload).unwrap();
    handle
        .command(CommandCode::SetConfig.raw(), &payload, &mut [])
        .unwrap();

    let mut param = [0u8; 8];
    param[0..4].copy_from_slice(&PARAM_STRENGTH.to_le_bytes());
    param[4..8].copy_from_slice(&800i32.to_le_bytes());
    handle
        .command(CommandCode::SetParam.raw(), &param, &mut [])
        .unwrap();
    handle
        .command(CommandCode::Enable.raw(), &[], &mut [])
        .unwrap();

    // Process one second of a loud 220 Hz tone in 512-frame blocks.
    let frames_per_block = 512;
    let input: Vec<f32> = (0..frames_per_block)
        .flat_map(|n| {
            let s = (std::f32::consts::TAU * 220.0 * n as f32 / SAMPLE_RATE as f32).sin() * 0.8;
            [s, s]
        })
        .collect();
    let mut output = vec![0.0; input.len()];

    let blocks = SAMPLE_RATE as usize / frames_per_block;
    for _ in 0..blocks {
        handle.process(&input, &mut output).unwrap();
    }

    let rms = |buf: &[f32]| {
        let sum_sq: f32 = buf.iter().map(|&s| s * s).sum();
        (sum_sq / buf.len() as f32).sqrt()
    };
    println!(
        "Processed {blocks} blocks: input RMS {:.3}, output RMS {:.3}",
        rms(&input),
        rms(&output)
    );

    release_effect(handle);
    println!("Released.");
}
