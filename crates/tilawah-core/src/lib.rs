pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod presentation;
pub mod reader;
pub mod store;
pub mod transport;

// Re-export main types for convenience
pub use auth::{CredentialStore, Session};
pub use client::QuranClient;
pub use config::Config;
pub use error::{AuthError, FetchError, TransportError};
pub use filter::filter_surahs;
pub use model::{Ayah, RevelationType, Surah, SurahContent, TranslatedAyah};
pub use reader::{ContentRequest, ReaderMode, ReaderState};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{HttpTransport, Transport};
