//! View state and relay client for the portfolio site.
//!
//! Rendering is left to whatever UI layer embeds this crate; everything here
//! is the state the pages keep between events and the JSON calls they make.

pub mod client;
pub mod models;
pub mod state;

pub use client::{ClientError, RelayClient};
pub use models::{ChatEntry, ContactForm, RelayReply};
pub use state::{ChatVisibility, ChatWidget, ContactFormState, MobileMenu, ScrollSpy};
