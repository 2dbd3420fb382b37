// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Click ripples and pointer trails for web pages.
//!
//! Every click spawns an expanding ring and pointer movement leaves a short
//! trail of fading dots. Both are bounded FIFOs: at capacity the oldest
//! element is evicted before a new one is added, and every element removes
//! itself once its lifetime runs out.
//!
//! # Key entry points
//!
//! - [`effect::EffectManager`] - owns both queues and handles input
//! - [`options::Options`] - configuration with TOML/JSON support
//! - [`headless`] - in-memory backends for tests and native simulation
//! - `web` (feature `web`) - DOM, timer and Web Audio backends plus the
//!   JS-facing `MouseEffect` handle
//!
//! # Architecture
//!
//! The manager never touches the host directly. It talks to a
//! [`surface::Surface`], a [`schedule::Clock`], a [`schedule::Scheduler`] and
//! a [`sound::TonePlayer`], all injected at construction together with a
//! [`platform::MobileDetector`]. Removal tasks are cancelled when their element
//! is evicted early, and a late expiry for an unknown id is a no-op.

pub mod effect;
pub mod error;
pub mod headless;
pub mod input;
pub mod options;
pub mod platform;
pub mod schedule;
pub mod sound;
pub mod style;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;

pub use effect::EffectManager;
pub use error::EffectError;
pub use options::Options;
