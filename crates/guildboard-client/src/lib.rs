//! Client for the guild dashboard's JSON API.
//!
//! Library is unsafe-free. Requests are blocking and independent: share one [`ApiClient`]
//! between threads to run several at once.

#![forbid(unsafe_code)]

pub mod args;
pub mod client;
pub mod guild;
pub mod render;
pub mod transport;

pub use client::*;
pub use guild::GuildApi;
pub use transport::{HttpResponse, HttpTransport, UreqTransport};
