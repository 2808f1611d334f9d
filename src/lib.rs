//! # otc
//!
//! A generic REST resource dispatcher and the concurrent object store behind
//! it.
//!
//! Controllers are mounted under base paths. Each request is mapped onto one
//! of four actions by its method:
//!
//! | Method | Action | Path |
//! |---|---|---|
//! | `GET` | show | `{base}/{repo}/{id}` or `{base}/{id}` |
//! | `PUT` | create | `{base}/{repo}` or `{base}` |
//! | `POST` | edit | `{base}/{id}/{extra...}` |
//! | `DELETE` | destroy | `{base}/{repo}/{id}` or `{base}/{id}` |
//!
//! Anything else is `405`, as is any action the controller does not
//! implement. Actions return a tagged [`Reply`]; mappings are written as
//! JSON, text and bytes verbatim.
//!
//! What's in the box:
//!
//! - Base-path routing via a [`matchit`] radix tree
//! - Async I/O via tokio and hyper, HTTP/1.1 and HTTP/2
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//! - [`DataController`]: opaque payloads in a two-level concurrent store
//! - [`MediaController`]: media metadata plus content addressed by SHA-256
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use otc::{DataController, MethodMap, MountOptions, PathShape, Router, Server};
//!
//! #[tokio::main]
//! async fn main() -> otc::Result<()> {
//!     let app = Router::new().mount_with(
//!         "/data/",
//!         MountOptions::new()
//!             .shape(PathShape::RepositoryFirst)
//!             .methods(MethodMap::WithoutEdit),
//!         Arc::new(DataController::new()),
//!     );
//!
//!     Server::bind("0.0.0.0:8282".parse().unwrap()).await?.serve(app).await
//! }
//! ```
//!
//! ```text
//! $ curl -X PUT --data-binary val_1 localhost:8282/data/photos
//! {"oid":"3f2c…","size":5}
//! $ curl localhost:8282/data/photos/3f2c…
//! val_1
//! ```

mod controller;
mod dispatch;
mod error;
mod method;
mod payload;
mod reply;
mod response;
mod router;
mod server;
mod target;

pub mod config;
pub mod controllers;
pub mod logging;
pub mod media;
pub mod store;

pub use controller::Controller;
pub use controllers::{DataController, MediaController};
pub use error::{Error, Result};
pub use http::StatusCode;
pub use method::{Action, MethodMap};
pub use payload::{Payload, PayloadKind};
pub use reply::{Body, Reply};
pub use router::{BodyErrorPolicy, MountOptions, Router};
pub use server::Server;
pub use store::RepositoryStore;
pub use target::{PathShape, Target};
