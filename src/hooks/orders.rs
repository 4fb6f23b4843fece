use super::{lock, Mirror, SharedMirror};
use crate::error::Result;
use crate::gateway::{Gateway, Listener, OrderQuery, Subscription};
use crate::models::{CreateOrder, NewOrder, Order, OrderItem, OrderStatus};
use crate::notify::{Feed, Notification, Notifier};
use chrono::Utc;
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    /// The kitchen board.
    All,
    /// A customer's own order history.
    Customer(String),
}

impl OrderScope {
    fn query(&self) -> OrderQuery {
        match self {
            OrderScope::All => OrderQuery::All,
            OrderScope::Customer(user_id) => OrderQuery::Customer(user_id.clone()),
        }
    }
}

/// Fills in the food record of every item. A failed lookup is logged and
/// the item keeps no food.
pub(crate) fn join_items(gateway: &dyn Gateway, items: Vec<OrderItem>) -> Vec<OrderItem> {
    items
        .into_iter()
        .map(|mut item| {
            match gateway.get_food(&item.food_id) {
                Ok(food) => item.food = food,
                Err(e) => error!(error = %e, food = %item.food_id, "Error fetching food"),
            }
            item
        })
        .collect()
}

/// Fills in the customer and item display records of one order.
pub(crate) fn join_order(gateway: &dyn Gateway, mut order: Order) -> Order {
    if !order.user_id.is_empty() {
        match gateway.get_user(&order.user_id) {
            Ok(user) => order.user = user,
            Err(e) => error!(error = %e, user = %order.user_id, "Error fetching user"),
        }
    }

    order.items = join_items(gateway, std::mem::take(&mut order.items));
    order
}

#[derive(Clone)]
pub struct OrderCommands {
    gateway: Arc<dyn Gateway>,
    notifier: Arc<dyn Notifier>,
}

impl OrderCommands {
    pub fn new(gateway: Arc<dyn Gateway>, notifier: Arc<dyn Notifier>) -> Self {
        OrderCommands { gateway, notifier }
    }

    /// Writes a new order. It always starts out pending, is stamped with
    /// the current time, and its total is the sum of its item lines.
    pub fn create_order(&self, order: CreateOrder) -> Result<String> {
        let total_amount: f64 = order.items.iter().map(OrderItem::line_total).sum();
        if (total_amount - order.total_amount).abs() > 0.005 {
            warn!(
                given = order.total_amount,
                computed = total_amount,
                "order total does not match its items"
            );
        }

        let document = NewOrder {
            user_id: order.user_id,
            items: order.items,
            status: OrderStatus::Pending,
            created_at: Utc::now().timestamp_millis(),
            total_amount,
            customer_notes: order.customer_notes,
        };

        match self.gateway.add_order(&document) {
            Ok(id) => {
                self.notifier
                    .notify(Notification::info("Success", "Order placed successfully!"));
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "Error creating order");
                self.notifier
                    .notify(Notification::error("Error", "Failed to place order."));
                Err(e)
            }
        }
    }

    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<()> {
        match self.gateway.update_order_status(order_id, status) {
            Ok(()) => {
                self.notifier
                    .notify(Notification::info("Status Updated", status.update_message()));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, order = order_id, "Error updating order status");
                self.notifier
                    .notify(Notification::error("Error", "Failed to update order status."));
                Err(e)
            }
        }
    }

    pub fn delete_order(&self, order_id: &str) -> Result<()> {
        match self.gateway.delete_order(order_id) {
            Ok(()) => {
                self.notifier
                    .notify(Notification::info("Success", "Order deleted successfully."));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, order = order_id, "Error deleting order");
                self.notifier
                    .notify(Notification::error("Error", "Failed to delete order."));
                Err(e)
            }
        }
    }
}

/// Joined mirror of the orders visible in one scope.
pub struct OrdersHook {
    scope: OrderScope,
    commands: OrderCommands,
    mirror: SharedMirror<Vec<Order>>,
    _subscription: Subscription,
}

impl OrdersHook {
    pub fn open(
        gateway: Arc<dyn Gateway>,
        notifier: Arc<dyn Notifier>,
        scope: OrderScope,
    ) -> Result<Self> {
        let mirror: SharedMirror<Vec<Order>> = Arc::new(Mutex::new(Mirror::default()));

        let listener: Listener<Order> = {
            let mirror = Arc::clone(&mirror);
            let notifier = Arc::clone(&notifier);
            let gateway: Weak<dyn Gateway> = Arc::downgrade(&gateway);
            Arc::new(move |pushed: Result<Vec<Order>>| match pushed {
                Ok(orders) => {
                    let Some(gateway) = gateway.upgrade() else {
                        return;
                    };
                    let joined: Vec<Order> = orders
                        .into_iter()
                        .map(|order| join_order(gateway.as_ref(), order))
                        .collect();

                    debug!(orders = joined.len(), "orders mirror refreshed");
                    lock(&mirror).loaded(joined);
                    notifier.refreshed(Feed::Orders);
                }
                Err(e) => {
                    error!(error = %e, "Error fetching orders");
                    lock(&mirror).load_failed();
                    notifier.notify(Notification::error("Error", "Failed to fetch orders."));
                }
            })
        };

        let subscription = gateway.watch_orders(scope.query(), listener)?;

        Ok(OrdersHook {
            scope,
            commands: OrderCommands::new(gateway, notifier),
            mirror,
            _subscription: subscription,
        })
    }

    pub fn scope(&self) -> &OrderScope {
        &self.scope
    }

    pub fn commands(&self) -> &OrderCommands {
        &self.commands
    }

    pub fn orders(&self) -> Vec<Order> {
        lock(&self.mirror).data.clone()
    }

    pub fn loading(&self) -> bool {
        lock(&self.mirror).loading
    }

    pub fn failed(&self) -> bool {
        lock(&self.mirror).failed
    }

    pub fn find(&self, order_id: &str) -> Option<Order> {
        lock(&self.mirror)
            .data
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
    }

    pub fn by_status(&self, status: OrderStatus) -> Vec<Order> {
        lock(&self.mirror)
            .data
            .iter()
            .filter(|order| order.status == status)
            .cloned()
            .collect()
    }
}
