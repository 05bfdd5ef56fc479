//! Audit logging for my-expenses
//!
//! Every create, update and delete of an expense, payment method, category or
//! person is recorded with before/after snapshots in an append-only JSONL log.
//!
//! - `AuditEntry`: one log entry with timestamp, operation, entity information
//!   and optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `generate_diff`: human-readable summary of what changed between two states.

mod diff;
mod entry;
mod logger;

pub use diff::{diff_of, generate_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
