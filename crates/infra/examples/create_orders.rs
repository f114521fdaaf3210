//! Create a batch of orders, wait for the gateway to process them, then create
//! shipping items for the orders that went through.
//!
//! Configuration comes from the environment (a `.env` file is honored):
//! `DAAS_GATEWAY_USERNAME`, `DAAS_GATEWAY_PASSWORD`, `DAAS_GATEWAY_CLIENT_ID`,
//! `AWS_REGION` and optionally `DAAS_GATEWAY_ENV`.
//!
//! ```bash
//! RUST_LOG=info cargo run -p daasgateway-infra --example create_orders
//! ```

use anyhow::{Context, Result};
use daasgateway_domain::{CreateOrderRequest, CreateShippingItemRequest, OrderItem, Product};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn sample_order(index: usize) -> CreateOrderRequest {
    let mut item = OrderItem::new(Product::new("Drip coffee set"));
    item.quantity = Some(1);

    CreateOrderRequest {
        order_number: format!("DEMO-{}-{index}", chrono::Utc::now().format("%Y%m%d%H%M%S")),
        shipping_memo: Some("Leave at the door".to_string()),
        orderer_name: Some("Kim Minsu".to_string()),
        orderer_mobile_tel: Some("010-1234-5678".to_string()),
        receiver_name: "Kim Minsu".to_string(),
        receiver_mobile_tel: "010-1234-5678".to_string(),
        receiver_address1: "Teheran-ro 123".to_string(),
        receiver_address2: "5F".to_string(),
        receiver_postcode: "06236".to_string(),
        order_items: vec![item],
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = daasgateway_infra::connect_from_env().context("failed to configure client")?;

    let orders: Vec<CreateOrderRequest> = (1..=3).map(sample_order).collect();
    let mut group = client.create_orders(&orders).await.context("failed to create orders")?;
    info!(group = %group.id(), "Orders submitted");

    client.wait_until_completed(&mut group).await.context("order job group did not complete")?;

    let (succeeded, unsuccessful) = group.partition();
    let mut shippable = Vec::new();
    for job in &succeeded {
        let payload = client.job_payload(job).await?;
        if let Some(number) = payload["order_number"].as_str() {
            info!(order_number = number, "Order created");
            shippable.push(CreateShippingItemRequest::new(number));
        }
    }
    for job in &unsuccessful {
        let payload = client.job_payload(job).await?;
        let response = client.job_response(job).await?;
        warn!(
            order_number = payload["order_number"].as_str().unwrap_or("unknown"),
            status_code = ?job.status_code(),
            response = %response,
            "Order failed"
        );
    }

    if shippable.is_empty() {
        warn!("No orders succeeded; skipping shipping items");
        return Ok(());
    }

    let mut shipping = client
        .create_shipping_items(&shippable)
        .await
        .context("failed to create shipping items")?;
    client
        .wait_until_completed(&mut shipping)
        .await
        .context("shipping job group did not complete")?;

    info!(
        group = %shipping.id(),
        succeeded = shipping.succeeded_jobs().len(),
        failed = shipping.failed_job_count(),
        "Shipping items processed"
    );
    Ok(())
}
