#![cfg_attr(docsrs, feature(doc_cfg))]
//! Typed async client for the Transcribe control-plane API.
//!
//! Every remote operation is a request type implementing [`Operation`]. A
//! [`Client`] validates the request, encodes it as AWS JSON 1.1, sends it
//! through a [`Transport`] and decodes either the operation's result or a
//! typed [`Error`].
//!
//! ```rust,ignore
//! use transcribe::{Client, model::GetVocabularyRequest};
//!
//! let client = Client::builder().region("us-east-1").build()?;
//! let vocabulary = client
//!     .get_vocabulary(&GetVocabularyRequest::new("my-vocabulary"))
//!     .await?;
//! ```
//!
//! Request signing is left to the transport. [`mock::MockTranscribe`]
//! serves requests from memory for tests and offline development.

pub mod client;
pub mod config;
mod dispatcher;
pub mod error;
pub mod metadata;
pub mod mock;
pub mod model;
pub mod operation;
pub mod protocol;
pub mod transport;
pub mod validate;

pub use client::Client;
pub use config::{ClientBuilder, ClientConfig};
pub use error::{ClientBuilderError, Error, ErrorKind, Result, TransportError};
pub use metadata::ResponseMetadata;
pub use operation::{NoOutput, Operation};
pub use transport::{HttpTransport, Transport};
pub use validate::Validate;
