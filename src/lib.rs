//! Fiscaal.ai: Dutch tax-question chat assistant.
//!
//! The HTTP server proxies chat turns to an external answering service,
//! keeps transcripts for signed-in users and stores a small tax profile.
//! [`client`] holds the client-side chat and profile state machines.

pub mod app;
pub mod auth;
pub mod chats;
pub mod client;
pub mod config;
pub mod error;
pub mod mail;
pub mod profiles;
pub mod state;
pub mod tax;

#[cfg(test)]
mod testing;
