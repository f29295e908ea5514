//! Snapshot, rollback and commit of document state.
//!
//! A snapshot records the document state and the length of the content
//! store. The store is append-only while a transaction is live, so
//! rolling back is a truncate plus a state restore.

use crate::document::{Document, DocumentState};
use crate::error::{DocumentError, Result};

#[derive(Debug, Clone)]
pub(crate) struct TransactionSnapshot {
    state: DocumentState,
    store_len: u64,
}

impl Document {
    /// Starts a transaction. A live transaction is replaced.
    pub fn begin_transaction(&mut self) {
        if self.transaction.is_some() {
            log::warn!("begin_transaction while a transaction is live; replacing its snapshot");
        }
        let store_len = self.store.len();
        log::debug!(
            "Transaction started at {} content bytes, page {}",
            store_len,
            self.state.current_page
        );
        self.transaction = Some(TransactionSnapshot {
            state: self.state.clone(),
            store_len,
        });
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Keeps everything written since `begin_transaction`.
    pub fn commit_transaction(&mut self) -> Result<()> {
        self.transaction
            .take()
            .ok_or(DocumentError::TransactionMisuse(
                "commit without an active transaction",
            ))?;
        log::debug!("Transaction committed");
        Ok(())
    }

    /// Restores the document to the moment `begin_transaction` was called.
    pub fn rollback_transaction(&mut self) -> Result<()> {
        let snapshot = self
            .transaction
            .take()
            .ok_or(DocumentError::TransactionMisuse(
                "rollback without an active transaction",
            ))?;
        if let Err(e) = self.store.truncate(snapshot.store_len) {
            self.transaction = Some(snapshot);
            return Err(e.into());
        }
        log::debug!(
            "Transaction rolled back to {} content bytes",
            snapshot.store_len
        );
        self.state = snapshot.state;
        Ok(())
    }

    /// Returns a new document equal to this one as it was when the
    /// transaction began. This document keeps its contents and the
    /// transaction ends.
    pub fn rolled_back_copy(&mut self) -> Result<Document> {
        let snapshot = self
            .transaction
            .take()
            .ok_or(DocumentError::TransactionMisuse(
                "rolled-back copy without an active transaction",
            ))?;
        let store = match self.store.fork(snapshot.store_len) {
            Ok(store) => store,
            Err(e) => {
                self.transaction = Some(snapshot);
                return Err(e.into());
            }
        };
        log::debug!(
            "Forked {} store at {} content bytes",
            store.name(),
            snapshot.store_len
        );
        Ok(Document {
            config: self.config.clone(),
            fonts: self.fonts.clone(),
            store,
            state: snapshot.state,
            transaction: None,
            page_width: self.page_width,
            page_height: self.page_height,
            scale: self.scale,
        })
    }
}
