use crate::{EngineError, ResultEngine, cache::TRANSACTIONS_PATH, client::Transport};

use super::Controller;

/// A delete the user still has to confirm.
///
/// Only [`Controller::request_delete`] creates one and
/// [`Controller::confirm_delete`] consumes it, so every attempt, retries
/// included, goes through a fresh confirmation. Dropping it cancels.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct PendingDelete {
    id: i64,
}

impl PendingDelete {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn prompt(&self) -> &'static str {
        "Delete this transaction?"
    }
}

#[derive(Debug)]
pub struct DeleteOutcome {
    pub id: i64,
    pub refresh: ResultEngine<()>,
}

impl<T> Controller<T> {
    pub fn request_delete(&self, id: i64) -> PendingDelete {
        PendingDelete { id }
    }
}

impl<T: Transport> Controller<T> {
    /// Issues `DELETE /transactions/{id}` and reloads the cache.
    ///
    /// The form is not touched either way.
    pub async fn confirm_delete(
        &mut self,
        pending: PendingDelete,
    ) -> ResultEngine<DeleteOutcome> {
        let id = pending.id;
        let path = format!("{TRANSACTIONS_PATH}/{id}");
        self.transport.delete(&path).await.map_err(|err| {
            tracing::warn!("delete of transaction {id} failed: {err}");
            EngineError::Delete(err)
        })?;
        tracing::info!("deleted transaction {id}");

        let refresh = self.refresh().await;
        Ok(DeleteOutcome { id, refresh })
    }
}
