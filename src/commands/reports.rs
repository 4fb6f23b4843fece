use super::AppStateExt;
use crate::models::DailyStats;
use crate::screens::report;
use crate::stats::{category_rows, CategoryRow};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tauri::AppHandle;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub date: String,
    pub loading: bool,
    pub failed: bool,
    pub stats: Option<DailyStats>,
    pub rows: Vec<CategoryRow>,
    pub can_go_forward: bool,
}

/// Mounts the report for `date` (YYYY-MM-DD, defaults to today), or for the
/// currently shown date moved by `shift_days`.
#[tauri::command]
pub fn open_daily_stats(app: AppHandle, date: Option<String>, shift_days: Option<i64>) -> Result<String, String> {
    let state = app.kitchen();
    let today = Local::now().date_naive();

    let base = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date {}: {}", raw, e))?,
        None => state.with_stats(|stats| stats.date()).unwrap_or(today),
    };

    let mut target = report::shift_date(base, shift_days.unwrap_or(0));
    if target > today {
        target = today;
    }

    state.mount_stats(target).map_err(|e| e.to_string())?;
    Ok(target.format("%Y-%m-%d").to_string())
}

#[tauri::command]
pub fn get_daily_stats(app: AppHandle) -> Result<StatsView, String> {
    let today = Local::now().date_naive();

    app.kitchen()
        .with_stats(|hook| {
            let stats = hook.stats();
            StatsView {
                date: hook.date().format("%Y-%m-%d").to_string(),
                loading: hook.loading(),
                failed: hook.failed(),
                rows: stats.as_ref().map(category_rows).unwrap_or_default(),
                stats,
                can_go_forward: report::can_go_forward(hook.date(), today),
            }
        })
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn close_daily_stats(app: AppHandle) {
    app.kitchen().unmount_stats();
}
