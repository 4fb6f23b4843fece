use super::orders::join_items;
use super::{lock, Mirror, SharedMirror};
use crate::error::Result;
use crate::gateway::{Gateway, Listener, OrderQuery, Subscription};
use crate::models::{DailyStats, Order};
use crate::notify::{Feed, Notification, Notifier};
use crate::stats::{aggregate, day_bounds};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, Weak};
use tracing::error;

/// Live figures for one day's delivered orders.
pub struct StatsHook {
    date: NaiveDate,
    mirror: SharedMirror<Option<DailyStats>>,
    _subscription: Subscription,
}

impl StatsHook {
    pub fn open(
        gateway: Arc<dyn Gateway>,
        notifier: Arc<dyn Notifier>,
        date: NaiveDate,
    ) -> Result<Self> {
        let mirror: SharedMirror<Option<DailyStats>> = Arc::new(Mutex::new(Mirror::default()));
        let (start_ms, end_ms) = day_bounds(date);

        let listener: Listener<Order> = {
            let mirror = Arc::clone(&mirror);
            let notifier = Arc::clone(&notifier);
            let gateway: Weak<dyn Gateway> = Arc::downgrade(&gateway);
            Arc::new(move |pushed: Result<Vec<Order>>| match pushed {
                Ok(orders) => {
                    let Some(gateway) = gateway.upgrade() else {
                        return;
                    };
                    let orders: Vec<Order> = orders
                        .into_iter()
                        .map(|mut order| {
                            order.items = join_items(gateway.as_ref(), std::mem::take(&mut order.items));
                            order
                        })
                        .collect();

                    lock(&mirror).loaded(Some(aggregate(date, &orders)));
                    notifier.refreshed(Feed::Stats);
                }
                Err(e) => {
                    error!(error = %e, %date, "Error fetching stats");
                    lock(&mirror).load_failed();
                    notifier.notify(Notification::error("Error", "Failed to load statistics."));
                }
            })
        };

        let subscription =
            gateway.watch_orders(OrderQuery::DeliveredBetween { start_ms, end_ms }, listener)?;

        Ok(StatsHook {
            date,
            mirror,
            _subscription: subscription,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn stats(&self) -> Option<DailyStats> {
        lock(&self.mirror).data.clone()
    }

    pub fn loading(&self) -> bool {
        lock(&self.mirror).loading
    }

    pub fn failed(&self) -> bool {
        lock(&self.mirror).failed
    }
}
