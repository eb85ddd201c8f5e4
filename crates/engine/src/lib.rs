//! Client-side controller for the play-session transactions API.
//!
//! The [`Controller`] keeps the last known server lists (transactions,
//! members, games) and a single form used both to add and to edit a
//! transaction. Writes are never applied locally: every successful create,
//! update or delete is followed by a full reload.

pub use api_types::{game::Game, member::Member, transaction::Transaction};
pub use cache::Cache;
pub use client::{HttpClient, Transport};
pub use error::{ClientError, EngineError};
pub use form::{FormField, FormMode, TransactionForm};
pub use ops::{
    Controller, ControllerBuilder, DeleteOutcome, PendingDelete, Saved, SubmitOutcome,
};
pub use timestamp::TimestampCodec;

pub mod cache;
pub mod client;
pub mod lookup;
pub mod payload;
pub mod timestamp;
pub mod view;

mod error;
mod form;
mod ops;

#[cfg(test)]
mod testing;

type ResultEngine<T> = Result<T, EngineError>;
