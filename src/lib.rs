//! # A GraphQL client transport with file uploads
//!
//! This crate sends GraphQL operations over HTTP. Operations whose variables carry no files are
//! posted as plain JSON. Operations carrying files are posted as `multipart/form-data` following
//! the [GraphQL multipart request spec](https://github.com/jaydenseric/graphql-multipart-request-spec):
//! files are pulled out of the variables, replaced with `null`, and sent as indexed form parts
//! next to the `operations` and `map` fields.
//!
//! The crate does not perform network I/O itself. A [`Transport`](trait.Transport.html) executes
//! the encoded request; see `graphql-multipart-client-reqwest` for an implementation based on
//! `reqwest`.
//!
//! ## Features
//!
//! * Variables modelled as a typed tree where files are explicit variants
//! * Single files, lists of files and files nested at any depth
//! * Composable links run in order before the request is dispatched
//! * Bearer authentication link backed by a pluggable credential store
//! * Cancellation through `futures` abort handles
//!
//! ## Example
//!
//! ```no_run
//! use graphql_multipart_client::*;
//!
//! # async fn run<T: Transport>(transport: T) -> Result<()> {
//! let client = Client::builder("http://localhost:8000/graphql", transport).build()?;
//!
//! let mut variables = Variables::default();
//! variables.insert("name", "Wiring");
//! variables.insert("icon", Upload::new("icon.png", vec![0x89u8, 0x50, 0x4e, 0x47]));
//!
//! let response = client
//!     .send(
//!         Operation::new("mutation CreateService($name: String!, $icon: Upload!) { createService(name: $name, icon: $icon) { id } }")
//!             .operation_name("CreateService")
//!             .variables(variables),
//!     )
//!     .await?;
//! println!("{}", response.data);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(feature = "nightly", feature(doc_cfg))]

mod client;
mod config;
mod error;
mod link;
mod transport;

pub mod extract;
pub mod http;
pub mod types;

pub use client::{Client, ClientBuilder, HttpLink};
pub use config::ClientConfig;
pub use error::{BoxError, Error, Result};
pub use extract::{extract_files, Extracted, FileMap};
pub use link::{AuthLink, CredentialStore, FnLink, Link, MemoryCredentialStore};
pub use transport::Transport;
pub use types::{Operation, Response, ServerError, Upload, Value, VariablePath, Variables};

#[doc(no_inline)]
pub use futures_util::future::{AbortHandle, AbortRegistration};
