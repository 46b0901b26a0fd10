//! # m3db-vst2
//!
//! VST2 implementation layer for M3dB.
//!
//! This crate wraps an `m3db_core::Plugin` into the VST 2.4 binary
//! interface:
//!
//! - `#[repr(C)]` descriptor and opcode vocabulary ([`api`])
//! - Generic instance wrapper ([`Vst2Instance`]) with the dispatcher,
//!   parameter and process callbacks
//! - The `VSTPluginMain` entry point ([`export_vst2!`])
//!
//! ## Architecture
//!
//! ```text
//! User Plugin (implements m3db_core::Plugin)
//!        ↓
//! Vst2Instance<P> (owns the AEffect, resolves it in every callback)
//!        ↓
//! AEffect descriptor + extern "C" callbacks
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use m3db_core::{Buffer, Plugin, PluginConfig, Sample};
//! use m3db_vst2::{export_vst2, fourcc, Vst2Config};
//!
//! #[derive(Default)]
//! struct MyGain;
//!
//! impl Plugin for MyGain {
//!     fn process<S: Sample>(&mut self, buffer: &mut Buffer<S>) {
//!         buffer.apply_gain(S::from_f64(0.5));
//!     }
//! }
//!
//! static CONFIG: PluginConfig = PluginConfig::new("My Gain").with_vendor("My Company");
//! static VST2_CONFIG: Vst2Config = Vst2Config::new(fourcc(b"mygn"));
//!
//! export_vst2!(CONFIG, VST2_CONFIG, MyGain);
//! ```

pub mod api;
pub mod config;
pub mod export;
pub mod instance;
pub mod util;

// Re-exports
pub use api::{fourcc, AEffect, OpCode, PlugCategory};
pub use config::Vst2Config;
pub use export::plugin_main;
pub use instance::Vst2Instance;

// Re-export shared PluginConfig from m3db-core
pub use m3db_core::PluginConfig;
