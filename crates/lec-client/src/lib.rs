//! # lec-client
//!
//! Adaptive persistence client for Lectern quiz questions.
//!
//! The backend's accepted paths and body shapes have drifted across
//! revisions, so saves and deletes are not sent to one fixed endpoint.
//! Instead the client walks an ordered catalog of candidate requests until
//! one is accepted, remembers what worked for the rest of the session, and
//! reports a single outcome to the operator.
//!
//! - [`catalog`]: ordered candidate endpoints and payload formats
//! - [`memory`]: last working endpoint per operation kind
//! - [`dispatcher`]: strictly sequential candidate search
//! - [`coordinator`]: delete and save flows, list refresh
//! - [`board`], [`bindings`], [`local`]: rendered list state, row handler
//!   lifecycle, and unsaved drafts
//! - [`console`]: event loop wiring it together

pub mod bindings;
pub mod board;
pub mod catalog;
pub mod collaborators;
pub mod console;
pub mod coordinator;
pub mod dispatcher;
pub mod extract;
pub mod local;
pub mod memory;
pub mod payload;
pub mod session;
pub mod transport;

mod error;

pub use error::{AttemptError, DispatchError, OperationError, TransportError};
pub use session::SessionContext;
pub use transport::{HttpTransport, Transport};
