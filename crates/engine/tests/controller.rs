use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::{Value, json};

use engine::{
    ClientError, Controller, EngineError, FormField, HttpClient, Saved,
    view::{self, Row},
};

#[derive(Default)]
struct Backend {
    transactions: Vec<Value>,
    next_id: i64,
    received: Vec<(String, Value)>,
    games_down: bool,
}

type Shared = Arc<Mutex<Backend>>;

fn not_found(id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Transaction {id} not found") })),
    )
        .into_response()
}

async fn list_transactions(State(state): State<Shared>) -> Json<Value> {
    let state = state.lock().unwrap();
    Json(json!({ "transactions": state.transactions }))
}

async fn list_members() -> Json<Value> {
    Json(json!({ "data": [
        { "memberId": 1, "name": "Ann" },
        { "memberId": 2, "name": "Bob" },
    ] }))
}

async fn list_games(State(state): State<Shared>) -> Response {
    if state.lock().unwrap().games_down {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!({ "data": [{ "gameId": 7, "gameName": "Tekken" }] })).into_response()
}

async fn create(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let id = state.next_id;
    state.received.push(("POST /transactions".to_string(), body.clone()));

    let mut record = body;
    record["transactionId"] = json!(id);
    let typed = record["transactionDate"].as_str().unwrap_or_default().to_string();
    record["transactionDate"] = json!(format!("{typed}:00.000Z"));
    state.transactions.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state
        .received
        .push((format!("PUT /transactions/{id}"), body.clone()));

    let Some(record) = state
        .transactions
        .iter_mut()
        .find(|tx| tx["transactionId"] == json!(id))
    else {
        return not_found(id);
    };
    let mut updated = body;
    updated["transactionId"] = json!(id);
    *record = updated.clone();
    Json(updated).into_response()
}

async fn remove(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.transactions.len();
    state
        .transactions
        .retain(|tx| tx["transactionId"] != json!(id));
    if state.transactions.len() == before {
        return not_found(id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn spawn_backend() -> (String, Shared) {
    let state = Shared::default();
    let router = Router::new()
        .route("/transactions", get(list_transactions).post(create))
        .route("/transactions/{id}", put(update).delete(remove))
        .route("/members", get(list_members))
        .route("/games", get(list_games))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

async fn controller() -> (Controller<HttpClient>, Shared) {
    let (base_url, state) = spawn_backend().await;
    let client = HttpClient::new(&base_url).unwrap();
    let ctl = Controller::builder(client).timezone("UTC").unwrap().build();
    (ctl, state)
}

fn fill(ctl: &mut Controller<HttpClient>, member: &str, date: &str) {
    ctl.set_field(FormField::Member, member);
    ctl.set_field(FormField::Game, "7");
    ctl.set_field(FormField::PlayTimeHrs, "2");
    ctl.set_field(FormField::Cost, "12.50");
    ctl.set_field(FormField::TransactionDate, date);
}

#[tokio::test]
async fn empty_list_then_one_create() {
    let (mut ctl, _state) = controller().await;
    ctl.refresh().await.unwrap();
    assert_eq!(view::rows(ctl.cache(), ctl.codec()), vec![Row::Empty]);
    assert_eq!(ctl.cache().members().len(), 2);

    fill(&mut ctl, "1", "2024-05-01T18:30");
    let outcome = ctl.submit().await.unwrap();

    assert_eq!(outcome.saved, Saved::Created);
    assert!(outcome.refresh.is_ok());
    assert_eq!(ctl.cache().transactions().len(), 1);
    assert!(ctl.form().is_blank());
    assert!(!ctl.is_editing());

    let rows = view::rows(ctl.cache(), ctl.codec());
    let Row::Transaction(row) = &rows[0] else {
        panic!("expected a transaction row");
    };
    assert_eq!(row.member, "Ann");
    assert_eq!(row.game, "Tekken");
    assert_eq!(row.cost, "12.5");
    assert_eq!(row.date, "2024-05-01 18:30");
}

#[tokio::test]
async fn edit_sends_numbers_to_the_identifier() {
    let (mut ctl, state) = controller().await;
    ctl.refresh().await.unwrap();
    for member in ["1", "2", "1"] {
        fill(&mut ctl, member, "2024-01-01T09:00");
        ctl.submit().await.unwrap();
    }

    assert!(ctl.edit_cached(3));
    assert_eq!(ctl.form().field(FormField::TransactionDate), "2024-01-01T09:00");
    ctl.set_field(FormField::Member, "2");
    ctl.set_field(FormField::Game, "7");
    ctl.set_field(FormField::PlayTimeHrs, "1.5");
    ctl.set_field(FormField::Cost, "9.99");
    ctl.set_field(FormField::TransactionDate, "2024-01-01T10:00");

    let outcome = ctl.submit().await.unwrap();
    assert_eq!(outcome.saved, Saved::Updated(3));

    let (route, body) = state.lock().unwrap().received.last().cloned().unwrap();
    assert_eq!(route, "PUT /transactions/3");
    assert_eq!(
        body,
        json!({
            "memberId": 2,
            "gameId": 7,
            "playTimeHrs": 1.5,
            "cost": 9.99,
            "transactionDate": "2024-01-01T10:00",
        })
    );

    let ids = ctl
        .cache()
        .transactions()
        .iter()
        .map(|tx| tx.transaction_id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(ctl.cache().transaction(3).unwrap().member_id, Some(2));
}

#[tokio::test]
async fn server_message_is_surfaced_and_form_kept() {
    let (mut ctl, state) = controller().await;
    ctl.refresh().await.unwrap();
    fill(&mut ctl, "1", "2024-01-01T09:00");
    ctl.submit().await.unwrap();

    ctl.edit_cached(1);
    state.lock().unwrap().transactions.clear();
    ctl.set_field(FormField::Cost, "1");
    let before = ctl.form().clone();

    let err = ctl.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "Save failed: Transaction 1 not found");
    assert_eq!(ctl.form(), &before);
    assert_eq!(ctl.cache().transactions().len(), 1);
}

#[tokio::test]
async fn load_failure_keeps_the_previous_cache() {
    let (mut ctl, state) = controller().await;
    ctl.refresh().await.unwrap();
    fill(&mut ctl, "2", "2024-01-01T09:00");
    ctl.submit().await.unwrap();

    state.lock().unwrap().games_down = true;
    let err = ctl.refresh().await.unwrap_err();

    assert!(matches!(
        err,
        EngineError::Load(ClientError::Server { status, message: None }) if status.as_u16() == 500
    ));
    assert_eq!(
        err.to_string(),
        "Error loading transactions: request failed with status code 500"
    );
    assert_eq!(ctl.cache().transactions().len(), 1);
    assert_eq!(ctl.cache().games().len(), 1);
    assert!(!ctl.cache().is_loading());
}

#[tokio::test]
async fn delete_needs_a_fresh_confirmation_each_time() {
    let (mut ctl, _state) = controller().await;
    ctl.refresh().await.unwrap();
    fill(&mut ctl, "1", "2024-01-01T09:00");
    ctl.submit().await.unwrap();

    let outcome = ctl.confirm_delete(ctl.request_delete(1)).await.unwrap();
    assert_eq!(outcome.id, 1);
    assert!(outcome.refresh.is_ok());
    assert_eq!(view::rows(ctl.cache(), ctl.codec()), vec![Row::Empty]);

    let err = ctl.confirm_delete(ctl.request_delete(1)).await.unwrap_err();
    assert_eq!(err.to_string(), "Delete failed: Transaction 1 not found");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpClient::new(&format!("http://{addr}")).unwrap();
    let mut ctl = Controller::builder(client).build();

    let err = ctl.refresh().await.unwrap_err();
    assert!(matches!(err, EngineError::Load(ClientError::Transport(_))));
    assert!(!ctl.cache().is_loading());
}
