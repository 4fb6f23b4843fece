use crate::cart::Cart;
use crate::error::{Error, Result};
use crate::gateway::{Gateway, LocalGateway};
use crate::hooks::auth::AuthSession;
use crate::hooks::foods::{FoodCommands, FoodsHook};
use crate::hooks::lock;
use crate::hooks::orders::{OrderCommands, OrderScope, OrdersHook};
use crate::hooks::stats::StatsHook;
use crate::identity::LocalIdentityProvider;
use crate::notify::Notifier;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Everything the screens share: the gateway, the customer's session and
/// cart, and whichever live views are currently mounted.
pub struct AppState {
    gateway: Arc<LocalGateway>,
    notifier: Arc<dyn Notifier>,
    pub auth: AuthSession,
    pub cart: Mutex<Cart>,
    foods: Mutex<Option<FoodsHook>>,
    orders: Mutex<Option<OrdersHook>>,
    stats: Mutex<Option<StatsHook>>,
}

impl AppState {
    pub fn new(gateway: Arc<LocalGateway>, notifier: Arc<dyn Notifier>) -> Self {
        let provider = Arc::new(LocalIdentityProvider::new(Arc::clone(&gateway)));

        AppState {
            auth: AuthSession::new(provider, Arc::clone(&notifier)),
            gateway,
            notifier,
            cart: Mutex::new(Cart::new()),
            foods: Mutex::new(None),
            orders: Mutex::new(None),
            stats: Mutex::new(None),
        }
    }

    fn gateway(&self) -> Arc<dyn Gateway> {
        self.gateway.clone()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn food_commands(&self) -> FoodCommands {
        FoodCommands::new(self.gateway(), Arc::clone(&self.notifier))
    }

    pub fn order_commands(&self) -> OrderCommands {
        OrderCommands::new(self.gateway(), Arc::clone(&self.notifier))
    }

    /// The menu mirror is opened on first use and stays open.
    pub fn with_foods<R>(&self, f: impl FnOnce(&FoodsHook) -> R) -> Result<R> {
        let mut foods = lock(&self.foods);
        if foods.is_none() {
            *foods = Some(FoodsHook::open(self.gateway(), Arc::clone(&self.notifier))?);
        }

        foods.as_ref().map(f).ok_or(Error::NotMounted("menu"))
    }

    /// Opens the orders view for `scope`, replacing a view of another scope.
    pub fn mount_orders(&self, scope: OrderScope) -> Result<()> {
        let mut orders = lock(&self.orders);
        if orders.as_ref().map(|hook| hook.scope()) == Some(&scope) {
            return Ok(());
        }

        // Drop the old watch before opening the new one
        *orders = None;
        *orders = Some(OrdersHook::open(
            self.gateway(),
            Arc::clone(&self.notifier),
            scope,
        )?);
        debug!("orders view mounted");
        Ok(())
    }

    pub fn unmount_orders(&self) {
        lock(&self.orders).take();
    }

    /// Closes the orders view only if it shows one customer's history. The
    /// kitchen board does not belong to a session and stays open.
    pub fn unmount_customer_orders(&self) {
        let mut orders = lock(&self.orders);
        if matches!(
            orders.as_ref().map(|hook| hook.scope()),
            Some(OrderScope::Customer(_))
        ) {
            *orders = None;
            debug!("customer orders view unmounted");
        }
    }

    pub fn with_orders<R>(&self, f: impl FnOnce(&OrdersHook) -> R) -> Result<R> {
        lock(&self.orders)
            .as_ref()
            .map(f)
            .ok_or(Error::NotMounted("orders"))
    }

    pub fn mount_stats(&self, date: NaiveDate) -> Result<()> {
        let mut stats = lock(&self.stats);
        if stats.as_ref().map(|hook| hook.date()) == Some(date) {
            return Ok(());
        }

        *stats = None;
        *stats = Some(StatsHook::open(
            self.gateway(),
            Arc::clone(&self.notifier),
            date,
        )?);
        debug!(%date, "stats view mounted");
        Ok(())
    }

    pub fn unmount_stats(&self) {
        lock(&self.stats).take();
    }

    pub fn with_stats<R>(&self, f: impl FnOnce(&StatsHook) -> R) -> Result<R> {
        lock(&self.stats)
            .as_ref()
            .map(f)
            .ok_or(Error::NotMounted("statistics"))
    }
}
