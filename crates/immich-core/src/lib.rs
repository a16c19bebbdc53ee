//! Polling layer between `immich-api` and whatever hosts the readings.
//!
//! - **[`ReadingRegistry`]** discovers the reading set once (six static
//!   library counters plus one reading per named person) and refreshes
//!   every reading on each tick, isolating failures per reading.
//!
//! - **[`spawn_poller`]** runs the registry on a fixed interval until a
//!   `CancellationToken` fires.
//!
//! - **[`validate_setup`]** checks a host/API-key pair before it is stored
//!   and produces a display title; [`album_options`] backs the
//!   watched-album picker.
//!
//! - **[`ServerConfig`]** carries the runtime settings for one connection.

pub mod config;
pub mod error;
pub mod model;
pub mod poller;
pub mod registry;
pub mod setup;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_SCAN_INTERVAL, ServerConfig};
pub use error::CoreError;
pub use model::{Reading, ReadingDescriptor, ReadingKind, ReadingState, StaticReading};
pub use poller::spawn_poller;
pub use registry::ReadingRegistry;
pub use setup::{AlbumChoice, AlbumOptions, SetupInfo, album_options, validate_setup};
pub use store::TickSummary;

pub use immich_api::{ErrorKind, ImmichClient, TlsMode};
