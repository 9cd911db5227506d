//! Per-session view state. Nothing here is shared between visitors.

pub mod chat;
pub mod contact_form;
pub mod navigation;

pub use chat::{ChatVisibility, ChatWidget, PendingQuestion};
pub use contact_form::ContactFormState;
pub use navigation::{MobileMenu, ScrollSpy, PORTFOLIO_SECTIONS};
