//! Sender implementations
//!
//! Contains WriterSender and MockSender.

mod mock;
mod writer;

pub use self::mock::MockSender;
pub use self::writer::{WriterSender, WriterSenderConfig};
