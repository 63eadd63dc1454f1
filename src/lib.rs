//! Flipt evaluation client for Rust.

#![warn(missing_docs)]

mod builder;
mod client;
mod constants;
mod context;
mod errors;
mod model;
mod transport;

pub use builder::ClientBuilder;
pub use client::Client;
pub use constants::PKG_VERSION;
pub use context::Context;
pub use errors::{ClientError, ErrorKind};

pub use model::enums::EvaluationReason;
pub use model::result::{BooleanEvaluationResult, VariantEvaluationResult};

pub use transport::http::HttpTransport;
pub use transport::{Transport, TransportRequest, TransportResponse};
