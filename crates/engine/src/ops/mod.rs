use api_types::transaction::Transaction;

use crate::{
    EngineError, ResultEngine,
    cache::Cache,
    client::Transport,
    form::{FormField, TransactionForm},
    timestamp::TimestampCodec,
};

mod delete;
mod submit;

pub use delete::{DeleteOutcome, PendingDelete};
pub use submit::{Saved, SubmitOutcome};

/// Owns everything the transactions screen works on: the request client,
/// the cached collections and the form.
#[derive(Debug)]
pub struct Controller<T> {
    transport: T,
    cache: Cache,
    form: TransactionForm,
    codec: TimestampCodec,
}

impl<T> Controller<T> {
    /// Return a builder for `Controller`. Help to build the struct.
    pub fn builder(transport: T) -> ControllerBuilder<T> {
        ControllerBuilder {
            transport,
            codec: TimestampCodec::default(),
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn form(&self) -> &TransactionForm {
        &self.form
    }

    pub fn codec(&self) -> &TimestampCodec {
        &self.codec
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn start_create(&mut self) {
        self.form.start_create();
    }

    pub fn start_edit(&mut self, tx: &Transaction) {
        self.form.start_edit(tx, &self.codec);
    }

    /// Seeds the form from the cached transaction `id`.
    ///
    /// Returns `false` (form untouched) when `id` is not cached.
    pub fn edit_cached(&mut self, id: i64) -> bool {
        match self.cache.transaction(id) {
            Some(tx) => {
                self.form.start_edit(tx, &self.codec);
                true
            }
            None => false,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        self.form.field_mut(field)
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_editing()
    }
}

impl<T: Transport> Controller<T> {
    /// Reloads transactions, members and games from the server.
    pub async fn refresh(&mut self) -> ResultEngine<()> {
        self.cache.refresh(&self.transport).await
    }
}

/// The builder for `Controller`
pub struct ControllerBuilder<T> {
    transport: T,
    codec: TimestampCodec,
}

impl<T> ControllerBuilder<T> {
    /// Timezone used by the form's date field and list display.
    pub fn timezone(mut self, name: &str) -> Result<Self, EngineError> {
        self.codec = TimestampCodec::from_name(name)?;
        Ok(self)
    }

    pub fn codec(mut self, codec: TimestampCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Construct `Controller` with an empty cache and a blank form.
    pub fn build(self) -> Controller<T> {
        Controller {
            transport: self.transport,
            cache: Cache::default(),
            form: TransactionForm::default(),
            codec: self.codec,
        }
    }
}
