use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{
        OrderListResponse, OrderWithItems, UpdateOrderStatusRequest, UpdatePaymentStatusRequest,
    },
    entity::{
        OrderItems, Orders,
        order_items::Column as OrderItemCol,
        orders::{ActiveModel as OrderActive, Column as OrderCol, OrderStatus, PaymentStatus},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Order,
    response::Pagination,
    routes::params::{OrderListQuery, SortDirection},
    state::AppState,
};

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<OrderListResponse> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.paging();

    let mut condition = Condition::all();
    if let Some(raw) = query.status.as_deref() {
        let status = raw
            .parse::<OrderStatus>()
            .map_err(|_| AppError::BadRequest(format!("unknown order status: {raw}")))?;
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let direction = match query.order.as_deref() {
        Some(raw) => raw.parse::<SortDirection>()?,
        None => SortDirection::Desc,
    };

    let mut finder = Orders::find().filter(condition);
    finder = match direction {
        SortDirection::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortDirection::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    Ok(OrderListResponse {
        orders,
        pagination: Pagination::new(page, limit, total),
    })
}

pub async fn get_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<OrderWithItems> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(OrderWithItems {
        order: order.into(),
        items,
    })
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<Order> {
    ensure_admin(user)?;
    let status = payload
        .status
        .parse::<OrderStatus>()
        .map_err(|_| AppError::BadRequest(format!("unknown order status: {}", payload.status)))?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": payload.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(order.into())
}

pub async fn update_payment_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdatePaymentStatusRequest,
) -> AppResult<Order> {
    ensure_admin(user)?;
    let payment_status = payload.payment_status.parse::<PaymentStatus>().map_err(|_| {
        AppError::BadRequest(format!(
            "unknown payment status: {}",
            payload.payment_status
        ))
    })?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.payment_status = Set(payment_status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_payment_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "payment_status": payload.payment_status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(order.into())
}
