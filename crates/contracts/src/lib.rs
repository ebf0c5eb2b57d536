//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Transmission Model
//! - An [`Event`] is handed to a [`Sender`] as `Arc<Event>`; fan-out shares one allocation
//! - Every transmission attempt produces one [`Response`] on the sender's response stream

mod config;
mod error;
mod event;
mod response;
mod sender;

pub use config::*;
pub use error::*;
pub use event::Event;
pub use response::Response;
pub use sender::{ResponseStream, Sender};
