//! InmoStore Client SDK for Rust
//!
//! This crate provides a client for the InmoStore website API: property
//! listings, panoramic scenes, images, development projects, unit models and
//! company settings, all read through versioned `GET` endpoints.
//!
//! # Example
//!
//! ```no_run
//! use inmostore_client::{Client, ClientConfig, Modo};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::new("your-api-id", "your-api-key"))?;
//!
//!     // Validate the key and fetch the server version
//!     let version = client.init().await?;
//!     println!("InmoStore API version: {}", version);
//!
//!     let inmueble_id: Uuid = "6f1c2a4e-0000-4000-8000-000000000001".parse()?;
//!     let imagenes = client.list_imagenes(Modo::Inmueble, inmueble_id).await?;
//!     for imagen in imagenes.items {
//!         println!("{:?}", imagen.image_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod endpoint;
mod error;
mod transport;
mod types;

pub use client::{
    Client, ClientConfig, ClientState, KeyPolicy, DEFAULT_API_ROOT, DEFAULT_TIMEOUT,
};
pub use endpoint::{Endpoint, REDACTED_KEY};
pub use error::{Error, Result};
pub use transport::{
    HttpResponse, ReqwestTransport, Transport, TransportError, TransportErrorKind,
};
pub use types::*;

pub use async_trait::async_trait;
pub use reqwest::Url;
