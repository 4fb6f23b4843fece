use crate::models::{CategoryStats, DailyStats, FoodCategory, Order};
use chrono::{Days, Local, NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sums one day of delivered orders. Revenue per category is taken from
/// the prices captured on the order items; items whose food could not be
/// joined are left out of the category figures but still count towards
/// the order totals.
pub fn aggregate(date: NaiveDate, orders: &[Order]) -> DailyStats {
    let mut category_stats: BTreeMap<FoodCategory, CategoryStats> = FoodCategory::ALL
        .iter()
        .map(|category| (*category, CategoryStats::default()))
        .collect();

    for order in orders {
        for item in &order.items {
            if let Some(food) = &item.food {
                let entry = category_stats.entry(food.category).or_default();
                entry.count += item.qty;
                entry.revenue += item.line_total();
            }
        }
    }

    DailyStats {
        date: date.format("%Y-%m-%d").to_string(),
        total_revenue: orders.iter().map(|order| order.total_amount).sum(),
        total_orders: u32::try_from(orders.len()).unwrap_or(u32::MAX),
        category_stats,
    }
}

fn local_midnight_ms(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

/// The local calendar day as an inclusive millisecond range.
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    (local_midnight_ms(date), local_midnight_ms(next) - 1)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CategoryRow {
    pub name: &'static str,
    pub count: u32,
    pub revenue: f64,
}

/// Chart rows in menu order.
pub fn category_rows(stats: &DailyStats) -> Vec<CategoryRow> {
    FoodCategory::ALL
        .iter()
        .map(|category| {
            let figures = stats
                .category_stats
                .get(category)
                .copied()
                .unwrap_or_default();
            CategoryRow {
                name: category.display_name(),
                count: figures.count,
                revenue: figures.revenue,
            }
        })
        .collect()
}
