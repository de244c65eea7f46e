pub mod client;

pub use client::{EsaClient, DEFAULT_API_ROOT};
