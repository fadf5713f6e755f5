use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    dto::orders::{OrderConfirmation, OrderSummary, PlaceOrderRequest},
    entity::{
        Products,
        order_items::ActiveModel as OrderItemActive,
        orders::{ActiveModel as OrderActive, OrderStatus, PaymentStatus},
        products::Column as ProductCol,
    },
    error::{AppError, AppResult, is_unique_violation},
    state::AppState,
};

/// Validate the cart, snapshot prices from the store, and write the order
/// header plus all line items as one transaction. A failure anywhere rolls
/// the whole order back; an orphaned header is never left behind.
pub async fn place_order(
    state: &AppState,
    payload: PlaceOrderRequest,
) -> AppResult<OrderConfirmation> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".into()));
    }
    for item in &payload.items {
        if item.quantity <= 0 {
            return Err(AppError::BadRequest("quantity must be positive".into()));
        }
    }
    require_field(&payload.customer_name, "customer_name")?;
    require_field(&payload.customer_email, "customer_email")?;
    require_field(&payload.customer_phone, "customer_phone")?;
    require_field(&payload.shipping_address, "shipping_address")?;
    require_field(&payload.payment_method, "payment_method")?;

    // Unit prices come from the store, never from the client payload.
    let product_ids: Vec<Uuid> = payload.items.iter().map(|i| i.product_id).collect();
    let products: HashMap<Uuid, i64> = Products::find()
        .filter(ProductCol::Id.is_in(product_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| (p.id, p.discount_price.unwrap_or(p.price)))
        .collect();

    let mut total_amount: i64 = 0;
    let mut lines: Vec<(Uuid, i32, i64, i64)> = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        let unit_price = *products
            .get(&item.product_id)
            .ok_or_else(|| AppError::BadRequest(format!("unknown product {}", item.product_id)))?;
        let subtotal = unit_price * item.quantity as i64;
        total_amount += subtotal;
        lines.push((item.product_id, item.quantity, unit_price, subtotal));
    }

    let order_id = Uuid::new_v4();
    let order_number = build_order_number();

    let txn = state.orm.begin().await?;

    // Order numbers are unique only probabilistically; a collision trips
    // the unique index and surfaces as a retryable conflict.
    let order = OrderActive {
        id: Set(order_id),
        order_number: Set(order_number),
        status: Set(OrderStatus::Pending),
        payment_status: Set(PaymentStatus::Pending),
        total_amount: Set(total_amount),
        customer_name: Set(payload.customer_name),
        customer_email: Set(payload.customer_email),
        customer_phone: Set(payload.customer_phone),
        shipping_address: Set(payload.shipping_address),
        payment_method: Set(payload.payment_method),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::Conflict("order number collision, retry".into())
        } else {
            AppError::from(err)
        }
    })?;

    for (product_id, quantity, unit_price, subtotal) in lines {
        OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            unit_price: Set(unit_price),
            subtotal: Set(subtotal),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(order_id = %order.id, order_number = %order.order_number, "order placed");

    Ok(OrderConfirmation {
        success: true,
        order: OrderSummary {
            id: order.id,
            order_number: order.order_number,
        },
    })
}

fn require_field(value: &str, name: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{name} is required")));
    }
    Ok(())
}

/// Human-facing order reference: UTC timestamp plus a random suffix.
fn build_order_number() -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", stamp, &suffix[..6].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_shape() {
        let number = build_order_number();
        assert!(number.starts_with("ORD-"));
        // ORD- + 14-digit timestamp + - + 6-char suffix
        assert_eq!(number.len(), 4 + 14 + 1 + 6);
        let suffix = number.rsplit('-').next().unwrap();
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn order_numbers_differ() {
        assert_ne!(build_order_number(), build_order_number());
    }
}
