//! What the transactions table shows, independent of how it is drawn.

use crate::{
    cache::Cache,
    lookup::{self, Named},
    timestamp::TimestampCodec,
};

pub const NO_DATA: &str = "No transactions";

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// The single row shown when there are no transactions.
    Empty,
    Transaction(TransactionRow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: i64,
    pub member: String,
    pub game: String,
    pub play_time_hrs: String,
    pub cost: String,
    pub date: String,
}

impl TransactionRow {
    pub fn cells(&self) -> [String; 6] {
        [
            self.id.to_string(),
            self.member.clone(),
            self.game.clone(),
            self.play_time_hrs.clone(),
            self.cost.clone(),
            self.date.clone(),
        ]
    }
}

/// One row per cached transaction, in cache order.
pub fn rows(cache: &Cache, codec: &TimestampCodec) -> Vec<Row> {
    if cache.transactions().is_empty() {
        return vec![Row::Empty];
    }

    cache
        .transactions()
        .iter()
        .map(|tx| {
            Row::Transaction(TransactionRow {
                id: tx.transaction_id,
                member: reference(cache.members(), tx.member_id),
                game: reference(cache.games(), tx.game_id),
                play_time_hrs: tx.play_time_hrs.to_string(),
                cost: tx.cost.to_string(),
                date: codec.display(tx.transaction_date.as_deref()),
            })
        })
        .collect()
}

fn reference<T: Named>(items: &[T], id: Option<i64>) -> String {
    match id {
        Some(id) => lookup::resolve(items, id).into_owned(),
        None => "-".to_string(),
    }
}
