//! API transport for the assistant service.
//!
//! Every logical operation is one authenticated JSON `POST`; responses are
//! accepted only with the operation's declared status and decoded into its
//! declared shape. The one exception is the direct storage `PUT` used by the
//! uploader, which carries the storage backend's own headers instead.

pub mod client;
pub mod http_client;
pub mod operation;
pub mod scrub;
pub mod types;

pub use client::ApiClient;
pub use http_client::{build_api_client, build_storage_client};
pub use operation::ApiOperation;
pub use scrub::{sanitize_error_body, scrub_secret_patterns};
