//! Async client for the Immich photo and video server API.
//!
//! [`ImmichClient`] owns the HTTP relationship with one server: it attaches
//! the API key, classifies failures into [`Error`] (see [`ErrorKind`] for
//! the coarse taxonomy), and decodes JSON bodies into the typed shapes in
//! [`models`].

mod albums;
mod assets;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
mod people;
pub mod transport;
mod users;

pub use assets::ALLOWED_IMAGE_TYPES;
pub use auth::{Credentials, normalize_host};
pub use client::ImmichClient;
pub use error::{Error, ErrorKind};
pub use models::{
    AlbumContents, AlbumSummary, AssetInfo, AssetStatistics, AssetType, PeopleSnapshot, Person,
    PersonStatistics, UserInfo,
};
pub use transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
