//! Coercion of the text form into the wire payload.
//!
//! This is the only place where form text becomes numbers.

use api_types::transaction::TransactionPayload;

use crate::{
    error::EngineError,
    form::{FormField, TransactionForm},
};

const REQUIRED: [FormField; 3] = [
    FormField::Member,
    FormField::Game,
    FormField::TransactionDate,
];

/// Builds the create/update body from `form`.
///
/// Member, game and date must be filled in. Empty hours or cost count as
/// zero; anything else that is not a finite number is rejected.
pub fn build(form: &TransactionForm) -> Result<TransactionPayload, EngineError> {
    if let Some(missing) = REQUIRED
        .into_iter()
        .find(|field| form.field(*field).trim().is_empty())
    {
        return Err(EngineError::MissingField(missing));
    }

    Ok(TransactionPayload {
        member_id: coerce_id(form, FormField::Member)?,
        game_id: coerce_id(form, FormField::Game)?,
        play_time_hrs: coerce_number(form, FormField::PlayTimeHrs)?,
        cost: coerce_number(form, FormField::Cost)?,
        transaction_date: form.field(FormField::TransactionDate).to_string(),
    })
}

fn invalid(form: &TransactionForm, field: FormField) -> EngineError {
    EngineError::InvalidNumber {
        field,
        value: form.field(field).to_string(),
    }
}

fn coerce_id(form: &TransactionForm, field: FormField) -> Result<i64, EngineError> {
    form.field(field)
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid(form, field))
}

fn coerce_number(form: &TransactionForm, field: FormField) -> Result<f64, EngineError> {
    let raw = form.field(field).trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid(form, field)),
    }
}
