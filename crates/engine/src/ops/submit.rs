use crate::{
    EngineError, ResultEngine,
    cache::TRANSACTIONS_PATH,
    client::Transport,
    form::FormMode,
    payload,
};

use super::Controller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created,
    Updated(i64),
}

impl Saved {
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Transaction added successfully!",
            Self::Updated(_) => "Transaction updated successfully!",
        }
    }
}

/// Result of a successful write.
///
/// The write itself succeeded; `refresh` tells whether the list reload
/// that follows it did too.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub saved: Saved,
    pub refresh: ResultEngine<()>,
}

impl<T: Transport> Controller<T> {
    /// Sends the form: `PUT /transactions/{id}` in edit mode,
    /// `POST /transactions` otherwise.
    ///
    /// On success the form is reset and the cache reloaded. On failure the
    /// form and cache are left as they were. Repeated calls are not
    /// de-duplicated.
    pub async fn submit(&mut self) -> ResultEngine<SubmitOutcome> {
        let body = payload::build(&self.form)?;
        let body = serde_json::to_value(&body)
            .map_err(|err| EngineError::Save(err.into()))?;

        let saved = match self.form.mode() {
            FormMode::Edit(id) => {
                let path = format!("{TRANSACTIONS_PATH}/{id}");
                self.transport.put(&path, body).await.map_err(|err| {
                    tracing::warn!("update of transaction {id} failed: {err}");
                    EngineError::Save(err)
                })?;
                Saved::Updated(id)
            }
            FormMode::Create => {
                self.transport
                    .post(TRANSACTIONS_PATH, body)
                    .await
                    .map_err(|err| {
                        tracing::warn!("create transaction failed: {err}");
                        EngineError::Save(err)
                    })?;
                Saved::Created
            }
        };
        tracing::info!("{saved:?}");

        self.form.start_create();
        let refresh = self.refresh().await;
        Ok(SubmitOutcome { saved, refresh })
    }
}
