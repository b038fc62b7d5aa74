//! Shared domain types for the Shotboard client.
//!
//! Every entity here is owned by the storyboard server; the client only
//! holds transient copies decoded from its JSON responses, plus the DTOs
//! it sends back.

pub mod models;
pub mod types;
