//! Persistence context shared by the repositories of one request scope.

mod context;

pub use context::{ApplyFn, ChangeKind, StagedChange, SupportContext};
