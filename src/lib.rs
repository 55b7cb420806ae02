use std::error::Error;

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod routes;
pub mod store;
pub mod sync;

pub use client::HighlightsApi;
pub use model::Highlight;
pub use store::{HighlightStore, IdPolicy};
pub use sync::SyncClient;

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
