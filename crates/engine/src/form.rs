//! The single editable record behind both "add" and "edit".
//!
//! Every field except the identifier is kept as typed text; numbers are only
//! coerced when a payload is built (see [`crate::payload`]).

use api_types::transaction::Transaction;

use crate::timestamp::TimestampCodec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Member,
    Game,
    PlayTimeHrs,
    Cost,
    TransactionDate,
}

impl FormField {
    /// Editable fields in input order.
    pub const ALL: [FormField; 5] = [
        Self::Member,
        Self::Game,
        Self::PlayTimeHrs,
        Self::Cost,
        Self::TransactionDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Game => "Game",
            Self::PlayTimeHrs => "Play Hours",
            Self::Cost => "Cost",
            Self::TransactionDate => "Date & Time",
        }
    }

    pub fn next(self) -> Option<FormField> {
        let idx = Self::ALL.iter().position(|f| *f == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    transaction_id: Option<i64>,
    member_id: String,
    game_id: String,
    play_time_hrs: String,
    cost: String,
    transaction_date: String,
}

impl TransactionForm {
    /// Clears every field and switches to create mode.
    pub fn start_create(&mut self) {
        *self = Self::default();
    }

    /// Seeds the form from `tx` and switches to edit mode.
    pub fn start_edit(&mut self, tx: &Transaction, codec: &TimestampCodec) {
        let transaction_date = match tx.transaction_date.as_deref() {
            None => String::new(),
            Some(raw) => codec.encode(raw).unwrap_or_else(|| {
                tracing::warn!(
                    "transaction {} has an unreadable date {raw:?}",
                    tx.transaction_id
                );
                String::new()
            }),
        };

        *self = Self {
            transaction_id: Some(tx.transaction_id),
            member_id: tx.member_id.map(|id| id.to_string()).unwrap_or_default(),
            game_id: tx.game_id.map(|id| id.to_string()).unwrap_or_default(),
            play_time_hrs: tx.play_time_hrs.to_string(),
            cost: tx.cost.to_string(),
            transaction_date,
        };
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Member => &self.member_id,
            FormField::Game => &self.game_id,
            FormField::PlayTimeHrs => &self.play_time_hrs,
            FormField::Cost => &self.cost,
            FormField::TransactionDate => &self.transaction_date,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Member => &mut self.member_id,
            FormField::Game => &mut self.game_id,
            FormField::PlayTimeHrs => &mut self.play_time_hrs,
            FormField::Cost => &mut self.cost,
            FormField::TransactionDate => &mut self.transaction_date,
        }
    }

    pub fn transaction_id(&self) -> Option<i64> {
        self.transaction_id
    }

    pub fn is_editing(&self) -> bool {
        self.transaction_id.is_some()
    }

    pub fn mode(&self) -> FormMode {
        match self.transaction_id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    /// True when every text field is empty and no identifier is set.
    pub fn is_blank(&self) -> bool {
        self.transaction_id.is_none()
            && FormField::ALL.iter().all(|f| self.field(*f).is_empty())
    }
}
