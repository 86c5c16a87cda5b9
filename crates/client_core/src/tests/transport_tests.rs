use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::domain::{Ingredient, OrderId, OrderStatus};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    catalog::CatalogStore,
    orders::{OrderBoard, Transition},
    types::CocktailFormDraft,
};

#[derive(Clone, Default)]
struct BackendState {
    cocktails: Arc<Mutex<Vec<Cocktail>>>,
    requests: Arc<Mutex<Vec<String>>>,
    next_id: Arc<Mutex<i64>>,
}

impl BackendState {
    async fn record(&self, request: impl Into<String>) {
        self.requests.lock().await.push(request.into());
    }
}

async fn list_cocktails(State(state): State<BackendState>) -> Json<Vec<Cocktail>> {
    state.record("GET /cocktails").await;
    Json(state.cocktails.lock().await.clone())
}

async fn create_cocktail(
    State(state): State<BackendState>,
    Json(payload): Json<CocktailPayload>,
) -> (StatusCode, Json<Cocktail>) {
    state.record("POST /cocktails").await;
    let id = {
        let mut next_id = state.next_id.lock().await;
        *next_id += 1;
        *next_id
    };
    let cocktail = payload.with_id(CocktailId::new(id.to_string()));
    state.cocktails.lock().await.push(cocktail.clone());
    (StatusCode::CREATED, Json(cocktail))
}

async fn get_cocktail(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Cocktail>, StatusCode> {
    state.record(format!("GET /cocktails/{id}")).await;
    state
        .cocktails
        .lock()
        .await
        .iter()
        .find(|cocktail| cocktail.id.as_str() == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn replace_cocktail(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(cocktail): Json<Cocktail>,
) -> Result<Json<Cocktail>, StatusCode> {
    state.record(format!("PUT /cocktails/{id}")).await;
    let mut cocktails = state.cocktails.lock().await;
    let slot = cocktails
        .iter_mut()
        .find(|existing| existing.id.as_str() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = cocktail.clone();
    Ok(Json(cocktail))
}

async fn delete_cocktail(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> StatusCode {
    state.record(format!("DELETE /cocktails/{id}")).await;
    let mut cocktails = state.cocktails.lock().await;
    let before = cocktails.len();
    cocktails.retain(|cocktail| cocktail.id.as_str() != id);
    if cocktails.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn list_orders() -> Json<serde_json::Value> {
    Json(serde_json::json!([{
        "id": 9,
        "customerName": "Ada Lovelace",
        "orderDate": "2023-06-01",
        "items": [{"name": "negroni", "quantity": 2, "price": 12.5}],
        "totalAmount": 25,
        "status": "pending",
        "deliveryLocation": "Berlin, Germany"
    }, {
        "id": "f3a9",
        "customerName": "Alan Turing",
        "orderDate": "2023-06-02",
        "items": [{"name": "gimlet", "quantity": 1, "price": 11}],
        "totalAmount": 11,
        "status": "pending",
        "deliveryLocation": "London, UK"
    }]))
}

async fn spawn_backend(state: BackendState) -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/cocktails", get(list_cocktails).post(create_cocktail))
        .route(
            "/cocktails/:id",
            get(get_cocktail)
                .put(replace_cocktail)
                .delete(delete_cocktail),
        )
        .route("/api/orders", get(list_orders))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_failing_backend() -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route(
        "/cocktails",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR })
            .post(|| async { StatusCode::BAD_REQUEST }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn margarita() -> CocktailPayload {
    CocktailPayload {
        name: "Margarita".into(),
        ingredients: vec![
            Ingredient::measured("Tequila", "2 oz"),
            Ingredient::plain("Salt"),
        ],
        instructions: "Shake with ice.".into(),
        image: None,
        category: Some("Cocktail".into()),
        glass: None,
        alcoholic: Some(true),
        price: Some(11.0),
    }
}

#[tokio::test]
async fn http_transport_round_trips_crud_requests() {
    let state = BackendState::default();
    let base = spawn_backend(state.clone()).await.expect("spawn backend");
    let transport = HttpTransport::new(&format!("{base}/cocktails")).expect("transport");

    let created = transport
        .create_cocktail(&margarita())
        .await
        .expect("create");
    assert_eq!(created.id, CocktailId::new("1"));

    let fetched = transport.get_cocktail(&created.id).await.expect("get");
    assert_eq!(fetched, created);

    let mut renamed = created.clone();
    renamed.name = "Tommy's Margarita".into();
    transport.update_cocktail(&renamed).await.expect("update");

    let listed = transport.list_cocktails().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Tommy's Margarita");

    transport
        .delete_cocktail(&created.id)
        .await
        .expect("delete");
    assert!(transport.list_cocktails().await.expect("list").is_empty());

    assert_eq!(
        *state.requests.lock().await,
        vec![
            "POST /cocktails",
            "GET /cocktails/1",
            "PUT /cocktails/1",
            "GET /cocktails",
            "DELETE /cocktails/1",
            "GET /cocktails",
        ]
    );
}

#[tokio::test]
async fn http_transport_treats_non_success_status_as_failure() {
    let state = BackendState::default();
    let base = spawn_backend(state).await.expect("spawn backend");
    let transport = HttpTransport::new(&format!("{base}/cocktails")).expect("transport");

    let err = transport
        .get_cocktail(&CocktailId::new("404"))
        .await
        .expect_err("missing cocktail");
    assert!(err.to_string().contains("404"), "unexpected error: {err}");

    transport
        .delete_cocktail(&CocktailId::new("404"))
        .await
        .expect_err("missing cocktail");
}

#[tokio::test]
async fn http_transport_reports_unreachable_service() {
    let transport = HttpTransport::new("http://127.0.0.1:9/cocktails").expect("transport");
    let err = transport.list_cocktails().await.expect_err("unreachable");
    assert!(
        format!("{err:#}").contains("failed to reach cocktail service"),
        "unexpected error: {err:#}"
    );
}

#[tokio::test]
async fn http_transport_fetches_orders_when_configured() {
    let base = spawn_backend(BackendState::default())
        .await
        .expect("spawn backend");
    let transport = HttpTransport::new(&format!("{base}/cocktails"))
        .expect("transport")
        .with_orders_url(&format!("{base}/api/orders"))
        .expect("orders url");

    let orders = transport.list_orders().await.expect("orders");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, OrderId::new("9"));
    assert_eq!(orders[0].delivery_location, "Berlin, Germany");
    assert_eq!(orders[1].id, OrderId::new("f3a9"));

    let mut board = OrderBoard::seeded();
    assert!(board.load(&transport).await);
    assert_eq!(
        board.approve(&OrderId::new("f3a9")),
        Ok(Transition::Applied(OrderStatus::Approved))
    );

    let without_orders = HttpTransport::new(&format!("{base}/cocktails")).expect("transport");
    without_orders
        .list_orders()
        .await
        .expect_err("no orders url");
}

#[test]
fn rejects_urls_that_cannot_hold_item_paths() {
    HttpTransport::new("not a url").expect_err("relative url");
    HttpTransport::new("mailto:bar@example.com").expect_err("opaque url");
}

#[tokio::test]
async fn store_refetches_list_after_successful_create() {
    let state = BackendState::default();
    let base = spawn_backend(state.clone()).await.expect("spawn backend");
    let transport = HttpTransport::new(&format!("{base}/cocktails")).expect("transport");
    let store = CatalogStore::new(Arc::new(transport));

    let draft = CocktailFormDraft {
        name: "Daiquiri".into(),
        ingredients_text: "Rum, 2 oz, Lime juice, 1 oz, Sugar".into(),
        instructions: "Shake.".into(),
        image: String::new(),
        price: "9.50".into(),
    };
    store.create(&draft).await.expect("create");

    assert_eq!(
        *state.requests.lock().await,
        vec!["POST /cocktails", "GET /cocktails"]
    );

    let cocktails = store.cocktails().await;
    assert_eq!(cocktails.len(), 1);
    assert_eq!(cocktails[0].id, CocktailId::new("1"));
    assert_eq!(
        cocktails[0].ingredients,
        vec![
            Ingredient::measured("Rum", "2 oz"),
            Ingredient::measured("Lime juice", "1 oz"),
            Ingredient::plain("Sugar"),
        ]
    );
    assert_eq!(cocktails[0].price, Some(9.5));
}

#[tokio::test]
async fn store_surfaces_backend_failures_as_last_error() {
    let base = spawn_failing_backend().await.expect("spawn backend");
    let transport = HttpTransport::new(&format!("{base}/cocktails")).expect("transport");
    let store = CatalogStore::new(Arc::new(transport));

    store.refresh().await.expect_err("refresh fails");
    let error = store.last_error().await.expect("last error");
    assert_eq!(error.code, shared::error::ErrorCode::FetchFailed);
    assert!(error.message.contains("500"), "unexpected: {}", error.message);

    let draft = CocktailFormDraft {
        name: "Gimlet".into(),
        ingredients_text: "Gin, 2 oz".into(),
        ..CocktailFormDraft::default()
    };
    store.create(&draft).await.expect_err("create fails");
    let error = store.last_error().await.expect("last error");
    assert_eq!(error.code, shared::error::ErrorCode::MutationFailed);
}
