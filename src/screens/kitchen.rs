use crate::error::{Error, Result};
use crate::hooks::orders::OrdersHook;
use crate::models::{Order, OrderStatus};
use crate::status::{ensure_advance, ensure_deletable};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
    pub order: Order,
    pub next_status: Option<OrderStatus>,
    pub action: Option<&'static str>,
    pub can_delete: bool,
}

impl From<Order> for OrderCard {
    fn from(order: Order) -> Self {
        OrderCard {
            next_status: order.status.next(),
            action: order.status.action_label(),
            can_delete: order.status.can_delete(),
            order,
        }
    }
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct KitchenBoard {
    pub pending: Vec<OrderCard>,
    pub cooking: Vec<OrderCard>,
    pub ready: Vec<OrderCard>,
    pub delivered: Vec<OrderCard>,
}

pub fn board(orders: &[Order]) -> KitchenBoard {
    let mut board = KitchenBoard::default();

    for order in orders {
        let column = match order.status {
            OrderStatus::Pending => &mut board.pending,
            OrderStatus::Cooking => &mut board.cooking,
            OrderStatus::Ready => &mut board.ready,
            OrderStatus::Delivered => &mut board.delivered,
        };
        column.push(OrderCard::from(order.clone()));
    }

    board
}

/// Moves an order one step along its lifecycle, based on the status the
/// board is currently showing.
pub fn advance_order(orders: &OrdersHook, order_id: &str) -> Result<OrderStatus> {
    let order = orders
        .find(order_id)
        .ok_or_else(|| Error::not_found("orders", order_id))?;

    let next = order.status.next().ok_or_else(|| Error::InvalidTransition {
        id: order_id.to_string(),
        status: order.status,
        action: "advanced",
    })?;

    orders.commands().update_order_status(order_id, next)?;
    Ok(next)
}

/// Applies a status picked on an order card. Only the single next step is
/// accepted.
pub fn move_order(orders: &OrdersHook, order_id: &str, to: OrderStatus) -> Result<()> {
    let order = orders
        .find(order_id)
        .ok_or_else(|| Error::not_found("orders", order_id))?;

    ensure_advance(order_id, order.status, to)?;
    orders.commands().update_order_status(order_id, to)
}

/// Deletes an order nobody has started on. Anything past pending is refused
/// before the gateway is asked.
pub fn delete_order(orders: &OrdersHook, order_id: &str) -> Result<()> {
    let order = orders
        .find(order_id)
        .ok_or_else(|| Error::not_found("orders", order_id))?;

    ensure_deletable(order_id, order.status)?;
    orders.commands().delete_order(order_id)
}
