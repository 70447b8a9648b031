//! Checkout orchestration tests
//!
//! Tests for the per-store submission pipeline:
//! - Validation failures reject before any network call
//! - One store's failure never blocks the others
//! - Partial success is reported distinctly
//! - A manual retry re-runs the whole flow from scratch
//!
//! Time is paused, so retry backoff waits complete instantly.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use expirapp_client::{
    AppError, AppResult, CheckoutOrchestrator, MemorySessionStore, OrderTransport, SessionStore,
};
use rust_decimal::Decimal;
use shared::models::cart::{Cart, CartItem, CartStore};
use shared::models::order::{CheckoutStatus, OrderPayload, OrderReceipt};
use shared::models::user::SessionUser;
use shared::types::{PaymentMethod, StoreId};

type ScriptedResponse = Result<OrderReceipt, (u16, String)>;

/// Transport that replays scripted responses per store and counts attempts.
#[derive(Default)]
struct ScriptedTransport {
    scripts: Mutex<HashMap<i64, VecDeque<ScriptedResponse>>>,
    attempts: Mutex<HashMap<i64, u32>>,
}

impl ScriptedTransport {
    fn script(&self, store_id: i64, responses: Vec<ScriptedResponse>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(store_id, responses.into());
    }

    fn attempts(&self, store_id: i64) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(&store_id)
            .copied()
            .unwrap_or(0)
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl OrderTransport for ScriptedTransport {
    async fn submit(&self, order: &OrderPayload) -> AppResult<OrderReceipt> {
        *self
            .attempts
            .lock()
            .unwrap()
            .entry(order.store_id)
            .or_default() += 1;

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&order.store_id)
            .and_then(|queue| queue.pop_front());

        match scripted {
            Some(Ok(receipt)) => Ok(receipt),
            Some(Err((status, message))) => Err(AppError::Api { status, message }),
            None => panic!("unscripted call for store {}", order.store_id),
        }
    }
}

/// Session carrying a user identity but no token.
struct UserOnlySession(SessionUser);

impl SessionStore for UserOnlySession {
    fn token(&self) -> Option<String> {
        None
    }
    fn current_user(&self) -> Option<SessionUser> {
        Some(self.0.clone())
    }
    fn store(&self, _token: &str, _user: &SessionUser) -> AppResult<()> {
        Ok(())
    }
    fn logout(&self) -> AppResult<()> {
        Ok(())
    }
}

fn buyer() -> SessionUser {
    SessionUser {
        id_usuario: 12345,
        nombre: "Ana".to_string(),
        correo: "ana@example.com".to_string(),
        rol: Some("comprador".to_string()),
        id_tienda: None,
    }
}

fn session() -> Arc<dyn SessionStore> {
    Arc::new(MemorySessionStore::authenticated("token-abc", buyer()))
}

fn cart_item(item_id: &str, price: &str, quantity: u32) -> CartItem {
    CartItem {
        item_id: item_id.to_string(),
        name: format!("Producto {item_id}"),
        size: None,
        expiry_date: None,
        original_price: Decimal::from(2) * price.parse::<Decimal>().unwrap(),
        sale_price: price.parse().unwrap(),
        quantity,
        image_url: String::new(),
        stock: None,
    }
}

fn store_group(store_id: i64, name: &str, items: Vec<CartItem>) -> CartStore {
    CartStore {
        id: StoreId(store_id),
        store: name.to_string(),
        items,
    }
}

fn receipt(order_id: i64) -> OrderReceipt {
    OrderReceipt {
        order_id: Some(order_id),
        message: None,
    }
}

fn two_store_cart() -> Cart {
    Cart::from(vec![
        store_group(1, "Supermercado A", vec![cart_item("p-1", "2.50", 1)]),
        store_group(2, "Tienda B", vec![cart_item("p-2", "1.00", 2)]),
    ])
}

#[tokio::test(start_paused = true)]
async fn empty_cart_is_rejected_before_any_network_call() {
    let transport = Arc::new(ScriptedTransport::default());
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());

    let err = orchestrator
        .submit(&Cart::new(), PaymentMethod::Card)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmptyCart));
    assert_eq!(transport.total_attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn missing_identity_is_rejected_before_any_network_call() {
    let transport = Arc::new(ScriptedTransport::default());
    let orchestrator = CheckoutOrchestrator::new(
        transport.clone(),
        Arc::new(MemorySessionStore::new()) as Arc<dyn SessionStore>,
    );

    let err = orchestrator
        .submit(&two_store_cart(), PaymentMethod::Card)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingIdentity));
    assert_eq!(transport.total_attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn missing_token_is_rejected_before_any_network_call() {
    let transport = Arc::new(ScriptedTransport::default());
    let orchestrator = CheckoutOrchestrator::new(
        transport.clone(),
        Arc::new(UserOnlySession(buyer())) as Arc<dyn SessionStore>,
    );

    let err = orchestrator
        .submit(&two_store_cart(), PaymentMethod::Card)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingToken));
    assert_eq!(transport.total_attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn all_stores_succeeding_concatenates_order_ids() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(1, vec![Ok(receipt(101))]);
    transport.script(2, vec![Ok(receipt(102))]);
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());

    let report = orchestrator
        .submit(&two_store_cart(), PaymentMethod::Card)
        .await
        .unwrap();

    assert_eq!(report.status(), CheckoutStatus::AllSucceeded);
    let message = report.user_message();
    assert!(message.contains("101"));
    assert!(message.contains("102"));
    assert_eq!(transport.attempts(1), 1);
    assert_eq!(transport.attempts(2), 1);
}

#[tokio::test(start_paused = true)]
async fn a_503_is_retried_before_succeeding() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(
        1,
        vec![
            Err((503, "Service Unavailable".to_string())),
            Ok(receipt(7)),
        ],
    );
    let cart = Cart::from(vec![store_group(
        1,
        "Supermercado A",
        vec![cart_item("p-1", "2.50", 1)],
    )]);
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());

    let report = orchestrator.submit(&cart, PaymentMethod::Card).await.unwrap();

    assert_eq!(report.status(), CheckoutStatus::AllSucceeded);
    assert!(transport.attempts(1) >= 2);
    assert!(transport.attempts(1) <= 3);
}

#[tokio::test(start_paused = true)]
async fn a_persistent_503_fails_after_three_attempts() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(
        1,
        vec![
            Err((503, "Service Unavailable".to_string())),
            Err((503, "Service Unavailable".to_string())),
            Err((503, "Service Unavailable".to_string())),
        ],
    );
    let cart = Cart::from(vec![store_group(
        1,
        "Supermercado A",
        vec![cart_item("p-1", "2.50", 1)],
    )]);
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());

    let report = orchestrator.submit(&cart, PaymentMethod::Card).await.unwrap();

    assert_eq!(report.status(), CheckoutStatus::AllFailed);
    assert_eq!(transport.attempts(1), 3);
    assert!(report.results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("503"));
}

#[tokio::test(start_paused = true)]
async fn a_400_fails_with_zero_retries() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(1, vec![Err((400, "Bad Request".to_string()))]);
    let cart = Cart::from(vec![store_group(
        1,
        "Supermercado A",
        vec![cart_item("p-1", "2.50", 1)],
    )]);
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());

    let report = orchestrator.submit(&cart, PaymentMethod::Card).await.unwrap();

    assert_eq!(report.status(), CheckoutStatus::AllFailed);
    assert_eq!(transport.attempts(1), 1);
}

#[tokio::test(start_paused = true)]
async fn one_store_failing_does_not_block_the_other() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(1, vec![Ok(receipt(101))]);
    transport.script(2, vec![Err((404, "Not Found".to_string()))]);
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());

    let report = orchestrator
        .submit(&two_store_cart(), PaymentMethod::Card)
        .await
        .unwrap();

    assert_eq!(report.status(), CheckoutStatus::Partial);
    assert_eq!(report.successes().count(), 1);
    assert_eq!(report.failures().count(), 1);

    let message = report.user_message();
    assert!(message.contains("Supermercado A"));
    assert!(message.contains("Tienda B"));
    assert_eq!(transport.attempts(1), 1);
    assert_eq!(transport.attempts(2), 1);
}

#[tokio::test(start_paused = true)]
async fn an_unparseable_product_id_fails_only_its_store() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(1, vec![Ok(receipt(101))]);
    let cart = Cart::from(vec![
        store_group(1, "Supermercado A", vec![cart_item("p-1", "2.50", 1)]),
        store_group(2, "Tienda B", vec![cart_item("a1", "1.00", 1)]),
    ]);
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());

    let report = orchestrator.submit(&cart, PaymentMethod::Card).await.unwrap();

    assert_eq!(report.status(), CheckoutStatus::Partial);
    // the invalid store never reached the network
    assert_eq!(transport.attempts(2), 0);
    assert!(report.results[1].error.is_some());
}

#[tokio::test(start_paused = true)]
async fn manual_retry_resubmits_every_store_from_scratch() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(1, vec![Ok(receipt(101))]);
    transport.script(2, vec![Err((400, "Bad Request".to_string()))]);
    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());
    let cart = two_store_cart();

    let first = orchestrator.submit(&cart, PaymentMethod::Card).await.unwrap();
    assert_eq!(first.status(), CheckoutStatus::Partial);

    // The whole flow re-validates and resubmits both stores, including the
    // one that already succeeded.
    transport.script(1, vec![Ok(receipt(201))]);
    transport.script(2, vec![Ok(receipt(202))]);
    let second = orchestrator.submit(&cart, PaymentMethod::Card).await.unwrap();

    assert_eq!(second.status(), CheckoutStatus::AllSucceeded);
    assert_eq!(transport.attempts(1), 2);
    assert_eq!(transport.attempts(2), 2);
}

#[tokio::test(start_paused = true)]
async fn payment_method_travels_in_the_payload() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.script(1, vec![Ok(receipt(1))]);
    let cart = Cart::from(vec![store_group(
        1,
        "Supermercado A",
        vec![cart_item("p-1", "2.50", 1)],
    )]);

    // serialize the payload the orchestrator would build
    let user = buyer();
    let payload = OrderPayload::for_store(
        shared::types::UserId(user.id_usuario),
        &cart.stores()[0],
        PaymentMethod::Pse,
    )
    .unwrap();
    let wire = serde_json::to_value(&payload).unwrap();
    assert_eq!(wire["payment_method"], "pse");
    assert_eq!(wire["client_id"], 12345);
    assert_eq!(wire["store_id"], 1);
    assert_eq!(wire["items"][0]["product_id"], 1);

    let orchestrator = CheckoutOrchestrator::new(transport.clone(), session());
    let report = orchestrator.submit(&cart, PaymentMethod::Pse).await.unwrap();
    assert_eq!(report.status(), CheckoutStatus::AllSucceeded);
}
