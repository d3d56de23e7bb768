//! Vault module — encrypted secret storage and the unlock pipeline.
//!
//! This module provides:
//! - `Secret`, `SecretDraft`, and `SecretKind` types (`secret`)
//! - The on-disk JSON vault record with atomic writes (`record`)
//! - `VaultStore` for creating and mutating the record (`store`)
//! - The verifier-based unlock protocol (`unlock`)
//! - Exponential-backoff rate limiting for unlock attempts (`limiter`)
//! - The in-memory session key slot (`session`)
//! - `VaultService`, the boundary surface callers talk to (`service`)

pub mod limiter;
pub mod record;
pub mod secret;
pub mod service;
pub mod session;
pub mod store;
pub mod unlock;

// Re-export the most commonly used items.
pub use limiter::RateLimiter;
pub use record::VaultRecord;
pub use secret::{Secret, SecretDraft, SecretKind};
pub use service::{UnlockOutcome, VaultService};
pub use session::VaultSession;
pub use store::VaultStore;
