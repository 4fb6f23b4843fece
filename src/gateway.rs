//! The seam between the client and its data backend.
//!
//! Everything the screens know about foods, orders and users arrives through
//! [`Gateway`]: live watches that push a fresh result set whenever the
//! underlying collection changes, point lookups used to join display data,
//! and the handful of mutations the kitchen and the customers perform.
//! [`LocalGateway`] is the bundled document store on SQLite.

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{CreateFood, Food, FoodPatch, NewOrder, Order, OrderStatus, User};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info};
use uuid::Uuid;

/// Receives every result set a watch produces, or the error that replaced it.
pub type Listener<T> = Arc<dyn Fn(Result<Vec<T>>) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderQuery {
    /// Every order, newest first.
    All,
    /// One customer's orders, newest first.
    Customer(String),
    /// Delivered orders created inside an inclusive millisecond range.
    DeliveredBetween { start_ms: i64, end_ms: i64 },
}

/// Keeps a watch alive. Dropping it cancels the watch.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub trait Gateway: Send + Sync {
    fn watch_foods(&self, listener: Listener<Food>) -> Result<Subscription>;
    fn watch_orders(&self, query: OrderQuery, listener: Listener<Order>) -> Result<Subscription>;

    fn get_user(&self, id: &str) -> Result<Option<User>>;
    fn get_food(&self, id: &str) -> Result<Option<Food>>;

    fn add_food(&self, food: &CreateFood) -> Result<String>;
    fn update_food(&self, id: &str, patch: &FoodPatch) -> Result<()>;
    fn delete_food(&self, id: &str) -> Result<()>;

    fn add_order(&self, order: &NewOrder) -> Result<String>;
    fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()>;
    fn delete_order(&self, id: &str) -> Result<()>;
}

enum Watch {
    Foods {
        listener: Listener<Food>,
        last: Option<Vec<Food>>,
    },
    Orders {
        query: OrderQuery,
        listener: Listener<Order>,
        last: Option<Vec<Order>>,
    },
}

#[derive(Default)]
struct Watchers {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Watch>>,
    // Serialises deliveries so each listener sees pushes in commit order.
    // Listeners must not mutate the store.
    delivery: Mutex<()>,
}

impl Watchers {
    fn entries(&self) -> MutexGuard<'_, HashMap<u64, Watch>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn delivery(&self) -> MutexGuard<'_, ()> {
        self.delivery.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(self: &Arc<Self>, watch: Watch) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries().insert(id, watch);

        let watchers: Weak<Watchers> = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(watchers) = watchers.upgrade() {
                watchers.entries().remove(&id);
                debug!(watch = id, "watch cancelled");
            }
        })
    }
}

/// Records whether `fresh` differs from what the listener saw last.
fn changed<T: PartialEq + Clone>(last: &mut Option<Vec<T>>, fresh: &Result<Vec<T>>) -> bool {
    match fresh {
        Ok(items) => {
            if last.as_ref() == Some(items) {
                return false;
            }
            *last = Some(items.clone());
            true
        }
        Err(_) => {
            *last = None;
            true
        }
    }
}

pub struct LocalGateway {
    db: Database,
    watchers: Arc<Watchers>,
}

impl LocalGateway {
    pub fn new(db: Database) -> Result<Self> {
        db.initialize()?;

        Ok(LocalGateway {
            db,
            watchers: Arc::new(Watchers::default()),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(Database::open_in_memory()?)
    }

    /// Stores or replaces a customer profile. Only the identity provider
    /// writes this collection.
    pub fn register_user(&self, user: &User) -> Result<()> {
        let conn = self.conn()?;
        let body = serde_json::to_string(user)?;

        conn.execute(
            "INSERT INTO users (id, body) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET body = excluded.body",
            params![user.id, body],
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.conn.lock().map_err(|_| Error::Poisoned)
    }

    fn query_foods(&self) -> Result<Vec<Food>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, body FROM foods ORDER BY rowid")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, body)| Ok(serde_json::from_str::<CreateFood>(&body)?.into_food(id)))
            .collect()
    }

    fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>> {
        let conn = self.conn()?;

        let rows = match query {
            OrderQuery::All => {
                let mut stmt = conn.prepare(
                    "SELECT id, body FROM orders ORDER BY created_at DESC, rowid DESC",
                )?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            OrderQuery::Customer(user_id) => {
                let mut stmt = conn.prepare(
                    "SELECT id, body FROM orders
                     WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC",
                )?;
                let rows = stmt
                    .query_map([user_id], |row| {
                        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            OrderQuery::DeliveredBetween { start_ms, end_ms } => {
                let mut stmt = conn.prepare(
                    "SELECT id, body FROM orders
                     WHERE status = 'delivered' AND created_at >= ?1 AND created_at <= ?2
                     ORDER BY created_at DESC, rowid DESC",
                )?;
                let rows = stmt
                    .query_map(params![start_ms, end_ms], |row| {
                        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        rows.into_iter()
            .map(|(id, body)| Ok(serde_json::from_str::<NewOrder>(&body)?.into_order(id)))
            .collect()
    }

    fn refresh_foods(&self) {
        let _delivery = self.watchers.delivery();

        let mut pending = Vec::new();
        for watch in self.watchers.entries().values_mut() {
            if let Watch::Foods { listener, last } = watch {
                let fresh = self.query_foods();
                if changed(last, &fresh) {
                    pending.push((listener.clone(), fresh));
                }
            }
        }

        debug!(listeners = pending.len(), "pushing foods");
        for (listener, fresh) in pending {
            listener(fresh);
        }
    }

    fn refresh_orders(&self) {
        let _delivery = self.watchers.delivery();

        let mut pending = Vec::new();
        for watch in self.watchers.entries().values_mut() {
            if let Watch::Orders {
                query,
                listener,
                last,
            } = watch
            {
                let fresh = self.query_orders(query);
                if changed(last, &fresh) {
                    pending.push((listener.clone(), fresh));
                }
            }
        }

        debug!(listeners = pending.len(), "pushing orders");
        for (listener, fresh) in pending {
            listener(fresh);
        }
    }
}

impl Gateway for LocalGateway {
    fn watch_foods(&self, listener: Listener<Food>) -> Result<Subscription> {
        let _delivery = self.watchers.delivery();

        let fresh = self.query_foods();
        let last = fresh.as_ref().ok().cloned();
        let subscription = self.watchers.register(Watch::Foods {
            listener: listener.clone(),
            last,
        });

        listener(fresh);
        Ok(subscription)
    }

    fn watch_orders(&self, query: OrderQuery, listener: Listener<Order>) -> Result<Subscription> {
        let _delivery = self.watchers.delivery();

        let fresh = self.query_orders(&query);
        let last = fresh.as_ref().ok().cloned();
        let subscription = self.watchers.register(Watch::Orders {
            query,
            listener: listener.clone(),
            last,
        });

        listener(fresh);
        Ok(subscription)
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn()?;

        let body: Option<String> = conn
            .query_row("SELECT body FROM users WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;

        match body {
            Some(body) => {
                let mut user: User = serde_json::from_str(&body)?;
                user.id = id.to_string();
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    fn get_food(&self, id: &str) -> Result<Option<Food>> {
        let conn = self.conn()?;

        let body: Option<String> = conn
            .query_row("SELECT body FROM foods WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;

        match body {
            Some(body) => Ok(Some(
                serde_json::from_str::<CreateFood>(&body)?.into_food(id.to_string()),
            )),
            None => Ok(None),
        }
    }

    fn add_food(&self, food: &CreateFood) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO foods (id, body) VALUES (?1, ?2)",
                params![id, serde_json::to_string(food)?],
            )?;
        }

        info!(food = %id, title = %food.title, "menu item added");
        self.refresh_foods();
        Ok(id)
    }

    fn update_food(&self, id: &str, patch: &FoodPatch) -> Result<()> {
        {
            let conn = self.conn()?;

            let body: String = conn
                .query_row("SELECT body FROM foods WHERE id = ?1", [id], |row| row.get(0))
                .optional()?
                .ok_or_else(|| Error::not_found("foods", id))?;

            let mut food = serde_json::from_str::<CreateFood>(&body)?.into_food(id.to_string());
            patch.apply(&mut food);

            conn.execute(
                "UPDATE foods SET body = ?1 WHERE id = ?2",
                params![serde_json::to_string(&CreateFood::from(food))?, id],
            )?;
        }

        info!(food = %id, "menu item updated");
        self.refresh_foods();
        Ok(())
    }

    fn delete_food(&self, id: &str) -> Result<()> {
        let removed = {
            let conn = self.conn()?;
            conn.execute("DELETE FROM foods WHERE id = ?1", [id])?
        };

        if removed > 0 {
            info!(food = %id, "menu item deleted");
            self.refresh_foods();
        }
        Ok(())
    }

    fn add_order(&self, order: &NewOrder) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO orders (id, user_id, status, created_at, body) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id,
                    order.user_id,
                    order.status.as_str(),
                    order.created_at,
                    serde_json::to_string(order)?
                ],
            )?;
        }

        info!(order = %id, customer = %order.user_id, total = order.total_amount, "order created");
        self.refresh_orders();
        Ok(id)
    }

    fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        {
            let conn = self.conn()?;

            let body: String = conn
                .query_row("SELECT body FROM orders WHERE id = ?1", [id], |row| row.get(0))
                .optional()?
                .ok_or_else(|| Error::not_found("orders", id))?;

            let mut order: NewOrder = serde_json::from_str(&body)?;
            order.status = status;

            conn.execute(
                "UPDATE orders SET status = ?1, body = ?2 WHERE id = ?3",
                params![status.as_str(), serde_json::to_string(&order)?, id],
            )?;
        }

        info!(order = %id, %status, "order status updated");
        self.refresh_orders();
        Ok(())
    }

    fn delete_order(&self, id: &str) -> Result<()> {
        let removed = {
            let conn = self.conn()?;
            conn.execute("DELETE FROM orders WHERE id = ?1", [id])?
        };

        if removed > 0 {
            info!(order = %id, "order deleted");
            self.refresh_orders();
        }
        Ok(())
    }
}
