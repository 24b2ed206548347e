use std::sync::Arc;

use async_trait::async_trait;
use order_viewer::adapter::{adapt, Envelope};
use order_viewer::error::ViewError;
use order_viewer::fetcher::OrderSource;
use order_viewer::output::{Layout, MemoryTarget};
use order_viewer::present::{Outcome, Presenter};
use order_viewer::render::{render_array, render_object, render_order};
use serde_json::{json, Value};

struct Canned(Value);

#[async_trait]
impl OrderSource for Canned {
    async fn fetch_order(&self, _id: &str) -> Result<Value, ViewError> {
        Ok(self.0.clone())
    }
}

#[test]
fn adapter_round_trip_matches_flat_shape() {
    let raw = json!({
        "Order": {"id": 1, "status": "new"},
        "Delivery": {"city": "X"},
        "Payment": {"amount": 10},
        "Items": [{"sku": "a"}]
    });
    let out = adapt(&raw, Envelope::Auto).unwrap();
    assert_eq!(
        Value::Object(out),
        json!({
            "id": 1,
            "status": "new",
            "Delivery": {"city": "X"},
            "Payment": {"amount": 10},
            "Items": [{"sku": "a"}]
        })
    );
}

#[test]
fn renderers_compose() {
    assert_eq!(render_array(&[]), "(пусто)");

    let delivery = json!({"city": "X", "zip": "2639809"});
    let table = render_object(delivery.as_object().unwrap(), Some("delivery"));
    assert_eq!(table.matches("<tr>").count(), 2);

    let order = json!({"id": 3, "Items": [{"sku": "a"}]});
    let html = render_order(order.as_object());
    assert!(html.contains(">sku</th>"));
    assert!(render_order(None).contains("Нет данных о заказе"));
}

#[tokio::test]
async fn presenter_output_fits_in_host_page() {
    let target = Arc::new(MemoryTarget::default());
    let presenter = Presenter::new(
        Arc::new(Canned(json!({"Order": {"id": 42, "status": "new"}}))),
        target.clone(),
        Envelope::Combined,
    );

    let outcome = presenter.present("42").await.unwrap();
    assert!(matches!(outcome, Outcome::Rendered { .. }));

    let markup = target.last().await.unwrap();
    let page = Layout::Page.wrap("42", &markup);
    assert!(page.contains("<div id=\"result\">"));
    assert!(page.contains("<td><strong>status:</strong></td><td>new</td>"));
}
