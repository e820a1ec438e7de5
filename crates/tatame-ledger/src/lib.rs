//! # tatame-ledger
//!
//! The membership payment ledger: the one piece of real policy in the system.
//! Governs the payment-status lifecycle per member record (manual initiation
//! → pending review → confirmed → automatic lapse after 30 days), the
//! role-gated admin roster, and the access gate.
//!
//! The state machine itself is pure ([`transition`]): it returns the intended
//! payment patch, and the service shell ([`service::Ledger`]) executes it as
//! a single revision-conditional write against the record store.

pub mod access;
pub mod roster;
pub mod service;
pub mod session;
pub mod transition;

pub use access::AccessDecision;
pub use service::Ledger;
pub use session::SessionContext;
