use serde::{Deserialize, Serialize};

pub mod member {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Member {
        pub member_id: i64,
        pub name: String,
    }
}

pub mod game {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Game {
        pub game_id: i64,
        pub game_name: String,
    }
}

pub mod transaction {
    use super::*;

    /// A transaction as returned by `GET /transactions`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub transaction_id: i64,
        /// `None` when the server sends `null` or omits the reference.
        #[serde(default)]
        pub member_id: Option<i64>,
        #[serde(default)]
        pub game_id: Option<i64>,
        /// Play time in hours.
        pub play_time_hrs: f64,
        pub cost: f64,
        /// Canonical server timestamp, kept verbatim.
        ///
        /// Usually RFC3339 (`2024-01-01T10:00:00.000Z`), but naive
        /// `YYYY-MM-DD HH:MM:SS` values are seen too. Anything that is not a
        /// string decodes as `None`.
        #[serde(default, deserialize_with = "string_or_none")]
        pub transaction_date: Option<String>,
    }

    fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => Some(raw),
            _ => None,
        })
    }

    /// Request body for `POST /transactions` and `PUT /transactions/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionPayload {
        pub member_id: i64,
        pub game_id: i64,
        pub play_time_hrs: f64,
        pub cost: f64,
        /// Editing-format timestamp (`YYYY-MM-DDTHH:MM`), sent as typed.
        pub transaction_date: String,
    }
}

pub mod envelope {
    //! Decoding of list responses.
    //!
    //! List endpoints wrap their items in an object, and not every endpoint
    //! agrees on the key. Decoding walks an ordered list of accepted shapes
    //! and takes the first key that holds an array; when none matches the
    //! collection is empty.

    use serde::de::DeserializeOwned;
    use serde_json::Value;

    /// One accepted wrapper key.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Shape {
        /// `{"data": [...]}`
        Data,
        /// `{"transactions": [...]}`
        Transactions,
    }

    impl Shape {
        pub fn key(self) -> &'static str {
            match self {
                Self::Data => "data",
                Self::Transactions => "transactions",
            }
        }
    }

    /// Shapes accepted by `GET /transactions`, in priority order.
    pub const TRANSACTIONS: &[Shape] = &[Shape::Data, Shape::Transactions];
    /// Shapes accepted by `GET /members` and `GET /games`.
    pub const DATA_ONLY: &[Shape] = &[Shape::Data];

    #[derive(Debug, PartialEq)]
    pub enum Envelope<T> {
        Matched { shape: Shape, items: Vec<T> },
        Empty,
    }

    impl<T: DeserializeOwned> Envelope<T> {
        /// Decodes `body` against `accepted`.
        ///
        /// A matched key whose items do not decode is an error, not a
        /// fallthrough to the next shape.
        pub fn decode(body: Value, accepted: &[Shape]) -> Result<Self, serde_json::Error> {
            let Value::Object(mut map) = body else {
                return Ok(Self::Empty);
            };

            for shape in accepted {
                if let Some(Value::Array(items)) = map.remove(shape.key()) {
                    let items = serde_json::from_value(Value::Array(items))?;
                    return Ok(Self::Matched {
                        shape: *shape,
                        items,
                    });
                }
            }

            Ok(Self::Empty)
        }
    }

    impl<T> Envelope<T> {
        pub fn into_items(self) -> Vec<T> {
            match self {
                Self::Matched { items, .. } => items,
                Self::Empty => Vec::new(),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use serde_json::json;

        use super::*;
        use crate::{member::Member, transaction::Transaction};

        fn tx_json(id: i64) -> Value {
            json!({
                "transactionId": id,
                "memberId": 1,
                "gameId": 2,
                "playTimeHrs": 1.5,
                "cost": 9.99,
                "transactionDate": "2024-01-01T10:00:00.000Z",
            })
        }

        #[test]
        fn data_key_wins_over_transactions_key() {
            let body = json!({ "data": [tx_json(1)], "transactions": [tx_json(2)] });
            let env = Envelope::<Transaction>::decode(body, TRANSACTIONS).unwrap();
            match env {
                Envelope::Matched { shape, items } => {
                    assert_eq!(shape, Shape::Data);
                    assert_eq!(items.len(), 1);
                    assert_eq!(items[0].transaction_id, 1);
                }
                Envelope::Empty => panic!("expected a match"),
            }
        }

        #[test]
        fn transactions_key_is_the_fallback() {
            let body = json!({ "transactions": [tx_json(7)] });
            let items = Envelope::<Transaction>::decode(body, TRANSACTIONS)
                .unwrap()
                .into_items();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].transaction_id, 7);
        }

        #[test]
        fn empty_data_array_still_wins() {
            let body = json!({ "data": [], "transactions": [tx_json(7)] });
            let env = Envelope::<Transaction>::decode(body, TRANSACTIONS).unwrap();
            assert_eq!(
                env,
                Envelope::Matched {
                    shape: Shape::Data,
                    items: vec![]
                }
            );
        }

        #[test]
        fn null_data_falls_through() {
            let body = json!({ "data": null, "transactions": [tx_json(3)] });
            let items = Envelope::<Transaction>::decode(body, TRANSACTIONS)
                .unwrap()
                .into_items();
            assert_eq!(items[0].transaction_id, 3);
        }

        #[test]
        fn members_ignore_transactions_key() {
            let body = json!({ "transactions": [{ "memberId": 1, "name": "Ann" }] });
            let env = Envelope::<Member>::decode(body, DATA_ONLY).unwrap();
            assert_eq!(env, Envelope::Empty);
        }

        #[test]
        fn unrecognised_bodies_are_empty() {
            for body in [json!([]), json!("ok"), json!(null), json!({ "rows": [] })] {
                let env = Envelope::<Member>::decode(body, DATA_ONLY).unwrap();
                assert_eq!(env, Envelope::Empty);
            }
        }

        #[test]
        fn malformed_items_are_an_error() {
            let body = json!({ "data": [{ "memberId": "one" }] });
            assert!(Envelope::<Member>::decode(body, DATA_ONLY).is_err());
        }

        #[test]
        fn loose_rows_still_decode() {
            let body = json!({ "data": [{
                "transactionId": 4,
                "memberId": null,
                "playTimeHrs": 1,
                "cost": 0,
                "transactionDate": 1704103200000u64,
            }] });
            let items = Envelope::<Transaction>::decode(body, TRANSACTIONS)
                .unwrap()
                .into_items();
            assert_eq!(items[0].member_id, None);
            assert_eq!(items[0].game_id, None);
            assert_eq!(items[0].transaction_date, None);
        }

        #[test]
        fn missing_transaction_date_decodes_as_none() {
            let body = json!({ "data": [{
                "transactionId": 1,
                "memberId": 1,
                "gameId": 2,
                "playTimeHrs": 2,
                "cost": 4,
                "extra": true,
            }] });
            let items = Envelope::<Transaction>::decode(body, TRANSACTIONS)
                .unwrap()
                .into_items();
            assert_eq!(items[0].transaction_date, None);
            assert_eq!(items[0].play_time_hrs, 2.0);
        }
    }
}
