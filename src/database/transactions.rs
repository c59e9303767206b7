// ABOUTME: RAII transaction guard that rolls back unless explicitly committed
// ABOUTME: Every multi-row engine mutation runs inside exactly one guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Transaction management with RAII guards
//!
//! ```text
//! let mut guard = database.begin().await?;
//! for week_number in 1..=duration_weeks {
//!     for &weekday in &weekdays {
//!         workout_days::insert_day(guard.executor()?, program_id, week_number, weekday).await?;
//!     }
//! }
//! workout_days::activate_earliest_pending(guard.executor()?, program_id).await?;
//! guard.commit().await?;
//! ```
//!
//! If any step returns early with `?`, the guard is dropped and `SQLx` rolls the
//! transaction back, so a propagation across many weeks is applied entirely or
//! not at all.

use sqlx::{Database, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// RAII guard for database transactions ensuring automatic rollback on drop
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Wrap a transaction obtained from the pool
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created");
        Self {
            transaction: Some(transaction),
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed or the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot commit"))?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
        debug!("TransactionGuard committed");
        Ok(())
    }

    /// Connection to run queries on inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the guard is used after commit
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit")
        })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            warn!("TransactionGuard dropped without commit - rolling back");
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;
