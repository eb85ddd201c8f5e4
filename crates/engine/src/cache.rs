use api_types::{
    envelope::{self, Envelope},
    game::Game,
    member::Member,
    transaction::Transaction,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{
    client::Transport,
    error::{ClientError, EngineError},
};

pub const TRANSACTIONS_PATH: &str = "/transactions";
pub const MEMBERS_PATH: &str = "/members";
pub const GAMES_PATH: &str = "/games";

/// Last known server state of the three collections.
///
/// Collections are only ever replaced together by [`Cache::refresh`].
#[derive(Debug, Default)]
pub struct Cache {
    transactions: Vec<Transaction>,
    members: Vec<Member>,
    games: Vec<Game>,
    loading: bool,
    last_refresh: Option<DateTime<Utc>>,
}

struct Snapshot {
    transactions: Vec<Transaction>,
    members: Vec<Member>,
    games: Vec<Game>,
}

impl Cache {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.transaction_id == id)
    }

    /// Reloads all three collections.
    ///
    /// Nothing is replaced unless every request and every decode succeeds.
    /// The loading flag is cleared before returning, on both paths.
    pub async fn refresh<T: Transport>(&mut self, transport: &T) -> Result<(), EngineError> {
        self.loading = true;
        let result = fetch(transport).await;
        self.loading = false;

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    "refreshed: {} transactions, {} members, {} games",
                    snapshot.transactions.len(),
                    snapshot.members.len(),
                    snapshot.games.len()
                );
                self.transactions = snapshot.transactions;
                self.members = snapshot.members;
                self.games = snapshot.games;
                self.last_refresh = Some(Utc::now());
                Ok(())
            }
            Err(err) => {
                tracing::warn!("refresh failed: {err}");
                Err(EngineError::Load(err))
            }
        }
    }
}

async fn fetch<T: Transport>(transport: &T) -> Result<Snapshot, ClientError> {
    let (transactions, members, games) = tokio::try_join!(
        transport.get(TRANSACTIONS_PATH),
        transport.get(MEMBERS_PATH),
        transport.get(GAMES_PATH),
    )?;

    Ok(Snapshot {
        transactions: decode(transactions, envelope::TRANSACTIONS)?,
        members: decode(members, envelope::DATA_ONLY)?,
        games: decode(games, envelope::DATA_ONLY)?,
    })
}

fn decode<T>(body: Value, accepted: &[envelope::Shape]) -> Result<Vec<T>, ClientError>
where
    T: serde::de::DeserializeOwned,
{
    Ok(Envelope::decode(body, accepted)?.into_items())
}
