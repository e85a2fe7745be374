//! Typed async client for the Swagger Petstore v3 API.
//!
//! # Overview
//! A `Configuration` holds the base path, default headers, credentials and
//! the transport. `PetApi`, `StoreApi` and `UserApi` each wrap a shared
//! `Arc<Configuration>` and expose one method per remote operation.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use petstore_core::{Configuration, FindPetsByStatusStatus, PetApi};
//!
//! let config = Arc::new(Configuration::new("https://petstore3.swagger.io/api/v3")?);
//! let pet_api = PetApi::new(config);
//! let pets = pet_api
//!     .find_pets_by_status(Some(FindPetsByStatusStatus::Available))
//!     .await?;
//! ```
//!
//! # Design
//! - Every operation is split into `build_*` (pure, produces an `HttpRequest`)
//!   and an async method that sends it through the `Transport` and decodes the
//!   response, so the I/O boundary is explicit and request shapes are testable.
//! - Enum-typed parameters are Rust enums; an out-of-set value cannot be
//!   constructed, and the wire literal comes from the enum itself.
//! - Each call performs exactly one exchange. There is no retry, caching or
//!   pagination; those policies belong to the caller.
//! - Models are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod configuration;
pub mod enums;
pub mod error;
pub mod http;
pub mod pet_api;
pub mod store_api;
pub mod transport;
pub mod types;
pub mod user_api;

pub use client::{parse_empty, parse_json, parse_text};
pub use configuration::{Configuration, ConfigurationBuilder, Credentials};
pub use enums::{FindPetsByStatusStatus, OrderStatus, PetStatus, UnknownEnumValue, WireEnum};
pub use error::{ApiError, ConfigurationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pet_api::PetApi;
pub use store_api::StoreApi;
pub use transport::{MockTransport, ReqwestTransport, Transport, TransportError, TransportErrorKind};
pub use types::{Category, Order, Pet, Tag, User};
pub use user_api::UserApi;
