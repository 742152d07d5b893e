//! Host-event dispatch for the Accursed class module.
//!
//! The host layer translates its hooks into [`HostEvent`]s, hands each one
//! to a [`ModuleSession`] together with the acting [`Character`], and
//! delivers the returned [`HostMessage`]s. All rules live in
//! `metal-rules`; this crate owns settings, event decoding, and message
//! formatting.
//!
//! [`Character`]: metal_rules::Character

/// Error types for the module boundary.
pub mod error;
/// Inbound host events.
pub mod event;
/// Outbound messages and their plain-text bodies.
pub mod message;
/// The event-handling session.
pub mod session;
/// World-level module settings.
pub mod settings;

/// Re-export error types.
pub use error::{ModuleError, ModuleResult};
/// Re-export event types.
pub use event::{HostEvent, ItemUse, RestKind};
/// Re-export the message type.
pub use message::HostMessage;
/// Re-export the session.
pub use session::ModuleSession;
/// Re-export the settings.
pub use settings::ModuleSettings;
