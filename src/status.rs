//! Order lifecycle: pending, cooking, ready, delivered. Kitchen actions move
//! an order one step forward at a time and delivered is terminal.

use crate::error::{Error, Result};
use crate::models::OrderStatus;

impl OrderStatus {
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Cooking),
            OrderStatus::Cooking => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Only orders nobody has started cooking may be deleted.
    pub fn can_delete(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Label of the kitchen button that advances an order out of this state.
    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            OrderStatus::Pending => Some("Start Cooking"),
            OrderStatus::Cooking => Some("Mark Ready"),
            OrderStatus::Ready => Some("Mark Delivered"),
            OrderStatus::Delivered => None,
        }
    }

    /// Shown after an order reaches this state.
    pub fn update_message(&self) -> &'static str {
        match self {
            OrderStatus::Cooking => "Order is now being prepared!",
            OrderStatus::Ready => "Order is ready for pickup!",
            OrderStatus::Delivered => "Order has been delivered!",
            OrderStatus::Pending => "Order status updated.",
        }
    }
}

/// Accepts `to` only if it is the single step after `from`.
pub fn ensure_advance(order_id: &str, from: OrderStatus, to: OrderStatus) -> Result<()> {
    if from.next() == Some(to) {
        Ok(())
    } else {
        Err(Error::InvalidTransition {
            id: order_id.to_string(),
            status: from,
            action: "advanced",
        })
    }
}

pub fn ensure_deletable(order_id: &str, status: OrderStatus) -> Result<()> {
    if status.can_delete() {
        Ok(())
    } else {
        Err(Error::InvalidTransition {
            id: order_id.to_string(),
            status,
            action: "deleted",
        })
    }
}
