
use std::sync::Arc;

use serde_json::json;

use crate::adapter::Envelope;
use crate::error::ViewError;
use crate::fetcher::{FetcherOptions, HttpFetcher, OrderSource};
use crate::output::MemoryTarget;
use crate::present::{Outcome, Presenter};
use stub::StubBackend;

fn sample_combined() -> serde_json::Value {
    json!({
        "Order": {
            "orderUID": "b563feb7b2b84b6test",
            "trackNumber": "WBILMTESTTRACK",
            "entry": "WBIL",
            "locale": "en",
            "customerID": "test",
            "deliveryService": "meest",
            "smID": 99,
            "dateCreated": "2021-11-26T06:22:19Z",
            "oofShard": "1"
        },
        "Delivery": {
            "name": "Test Testov",
            "phone": "+9720000000",
            "city": "Kiryat Mozkin",
            "email": "test@gmail.com"
        },
        "Payment": {
            "transaction": "b563feb7b2b84b6test",
            "currency": "USD",
            "amount": 1817,
            "paymentDT": 1637907727
        },
        "Items": [
            {"chrtID": 9934930, "name": "Mascaras", "price": 453, "brand": "Vivienne Sabo"},
            {"chrtID": 9934931, "name": "Lipstick", "price": 120}
        ]
    })
}

fn http_presenter(base_url: &str, target: Arc<MemoryTarget>) -> Presenter {
    let fetcher = HttpFetcher::new(&FetcherOptions {
        base_url: base_url.to_string(),
        timeout_seconds: Some(5),
        proxy: None,
    })
    .unwrap();
    Presenter::new(Arc::new(fetcher), target, Envelope::Auto)
}

#[tokio::test]
async fn not_found_shows_status_code() {
    let backend = StubBackend::start(404, "").await;
    let target = Arc::new(MemoryTarget::default());
    let presenter = http_presenter(&backend.base_url(), target.clone());

    let outcome = presenter.present("999").await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed(ViewError::Fetch { status: 404 })
    ));
    assert_eq!(backend.paths().await, vec!["/orders/999"]);
    let shown = target.last().await.unwrap();
    assert!(shown.contains("404"));
    assert!(shown.contains("color: red;"));
}

#[tokio::test]
async fn valid_order_renders_every_field_and_items() {
    let body = sample_combined().to_string();
    let backend = StubBackend::start(200, &body).await;
    let target = Arc::new(MemoryTarget::default());
    let presenter = http_presenter(&backend.base_url(), target.clone());

    let outcome = presenter.present(" 42 ").await.unwrap();

    assert_eq!(backend.paths().await, vec!["/orders/42"]);
    let Outcome::Rendered { markup } = outcome else {
        panic!("expected rendered order");
    };
    for key in [
        "orderUID",
        "trackNumber",
        "entry",
        "locale",
        "customerID",
        "deliveryService",
        "smID",
        "dateCreated",
        "oofShard",
    ] {
        assert!(
            markup.contains(&format!("<tr><td><strong>{key}:</strong></td>")),
            "missing row for {key}"
        );
    }
    assert!(markup.contains("<h2>Заказ #b563feb7b2b84b6test</h2>"));
    assert!(markup.contains("<caption><strong>items</strong></caption>"));
    assert!(markup.contains(">Mascaras</td>"));
    assert!(!markup.contains("2021-11-26T06:22:19Z"));
    assert_eq!(target.writes().await[0], "<p>Загрузка...</p>");
}

#[tokio::test]
async fn invalid_json_is_parse_error() {
    let backend = StubBackend::start(200, "{not json").await;
    let target = Arc::new(MemoryTarget::default());
    let presenter = http_presenter(&backend.base_url(), target.clone());

    let outcome = presenter.present("5").await.unwrap();

    assert!(matches!(outcome, Outcome::Failed(ViewError::Parse { .. })));
    assert!(target
        .last()
        .await
        .unwrap()
        .contains("Некорректный ответ сервера"));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpFetcher::new(&FetcherOptions {
        base_url: format!("http://{addr}"),
        timeout_seconds: Some(5),
        proxy: None,
    })
    .unwrap();

    let err = fetcher.fetch_order("1").await.unwrap_err();
    assert!(matches!(err, ViewError::Network { .. }));
}

#[tokio::test]
async fn blank_input_never_touches_backend() {
    let backend = StubBackend::start(200, "{}").await;
    let target = Arc::new(MemoryTarget::default());
    let presenter = http_presenter(&backend.base_url(), target.clone());

    let outcome = presenter.present(" \t ").await.unwrap();

    assert!(matches!(outcome, Outcome::Prompted));
    assert!(backend.paths().await.is_empty());
    assert_eq!(target.writes().await, vec!["<p>Введите ID заказа</p>"]);
}

#[tokio::test]
async fn flat_order_gets_sub_tables() {
    let body = json!({
        "id": 7,
        "status": "delivered",
        "delivery": {"city": "Y"},
        "payment": {"amount": 5},
        "items": []
    })
    .to_string();
    let backend = StubBackend::start(200, &body).await;
    let target = Arc::new(MemoryTarget::default());
    let presenter = http_presenter(&backend.base_url(), target.clone());

    let Outcome::Rendered { markup } = presenter.present("7").await.unwrap() else {
        panic!("expected rendered order");
    };

    assert!(markup.contains("<h2>Заказ #7</h2>"));
    assert!(markup.contains("<caption><strong>delivery</strong></caption>"));
    assert!(markup.contains("<caption><strong>payment</strong></caption>"));
    assert!(markup.contains("(пусто)"));
}

#[tokio::test]
async fn base_url_prefix_is_kept() {
    let backend = StubBackend::start(404, "").await;
    let target = Arc::new(MemoryTarget::default());
    let presenter = http_presenter(&format!("{}/api/", backend.base_url()), target);

    presenter.present("abc").await.unwrap();

    assert_eq!(backend.paths().await, vec!["/api/orders/abc"]);
}
