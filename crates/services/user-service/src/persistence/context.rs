//! Persistence context - staged changes committed in one transaction.
//!
//! Repositories never write to the database directly. They stage inserts,
//! updates and deletes here, and [`SupportContext::save_changes`] applies
//! everything staged so far inside a single transaction.

use std::fmt;

use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tokio::sync::Mutex;
use uuid::Uuid;

use common::{AppError, AppResult};

/// Deferred write executed against the open transaction, yielding affected rows.
pub type ApplyFn =
    Box<dyn for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<u64, DbErr>> + Send>;

/// Kind of a staged change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Insert => write!(f, "insert"),
            ChangeKind::Update => write!(f, "update"),
            ChangeKind::Delete => write!(f, "delete"),
        }
    }
}

/// A pending write not yet committed to the store.
pub struct StagedChange {
    kind: ChangeKind,
    table: &'static str,
    id: Uuid,
    apply: ApplyFn,
}

impl StagedChange {
    /// Create a staged change from its write closure.
    pub fn new<F>(kind: ChangeKind, table: &'static str, id: Uuid, apply: F) -> Self
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<u64, DbErr>>
            + Send
            + 'static,
    {
        Self {
            kind,
            table,
            id,
            apply: Box::new(apply),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Debug for StagedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedChange")
            .field("kind", &self.kind)
            .field("table", &self.table)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Request-scoped persistence context.
///
/// Owns the connection used for reads and the ordered list of staged writes.
/// Share it between the repositories of one request through an `Arc`.
pub struct SupportContext {
    db: DatabaseConnection,
    staged: Mutex<Vec<StagedChange>>,
}

impl SupportContext {
    /// Create a new context over a database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Connection used for reads
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Append a change to the pending list
    pub async fn stage(&self, change: StagedChange) {
        tracing::debug!(
            kind = %change.kind,
            table = change.table,
            id = %change.id,
            "Staged change"
        );
        self.staged.lock().await.push(change);
    }

    /// Number of staged changes not yet saved
    pub async fn pending(&self) -> usize {
        self.staged.lock().await.len()
    }

    /// Commit all staged changes atomically.
    ///
    /// Returns the number of affected rows; `0` is a valid outcome. On failure
    /// the transaction is rolled back, the drained changes are dropped, and
    /// the store error is returned as is.
    pub async fn save_changes(&self) -> AppResult<u64> {
        let changes = std::mem::take(&mut *self.staged.lock().await);
        if changes.is_empty() {
            return Ok(0);
        }

        let count = changes.len();
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let mut affected = 0;
        for change in changes {
            let StagedChange {
                kind,
                table,
                id,
                apply,
            } = change;

            match apply(&txn).await {
                Ok(rows) => affected += rows,
                Err(e) => {
                    tracing::debug!(%kind, table, %id, "Staged change failed: {}", e);
                    if let Err(rollback_err) = txn.rollback().await {
                        tracing::error!("Transaction rollback failed: {}", rollback_err);
                    }
                    return Err(AppError::from(e));
                }
            }
        }

        txn.commit().await.map_err(AppError::from)?;
        tracing::info!(changes = count, rows = affected, "Saved staged changes");

        Ok(affected)
    }
}
