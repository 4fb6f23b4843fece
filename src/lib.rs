pub mod cart;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod hooks;
pub mod identity;
pub mod logging;
pub mod models;
pub mod notify;
pub mod screens;
pub mod state;
pub mod stats;
pub mod status;

#[cfg(feature = "desktop")]
mod commands;


#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use crate::commands::{auth, catalog, menu, orders, reports, TauriNotifier};
    use crate::config::AppConfig;
    use crate::db::Database;
    use crate::gateway::LocalGateway;
    use crate::logging;
    use crate::state::AppState;
    use std::sync::Arc;
    use tauri::{
        menu::{Menu, MenuItem},
        tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
        Manager,
    };
    use tracing::info;

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        let result = tauri::Builder::default()
            .plugin(tauri_plugin_dialog::init())
            .setup(|app| {
                let data_dir = app.path().app_data_dir()?;
                std::fs::create_dir_all(&data_dir)?;

                let config = AppConfig::load(&data_dir)?;
                logging::init(&config.log)?;

                // Open the document store behind the gateway
                let db_path = config.database_path(&data_dir);
                let gateway = Arc::new(LocalGateway::new(Database::open(&db_path)?)?);
                info!(store = %db_path.display(), "document store ready");

                let notifier = Arc::new(TauriNotifier::new(app.handle().clone()));
                app.manage(AppState::new(gateway, notifier));

                // Create tray menu
                let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
                let menu = Menu::with_items(app, &[&quit])?;

                let mut tray = TrayIconBuilder::new()
                    .tooltip("Kitchen Orders")
                    .menu(&menu)
                    .show_menu_on_left_click(false);
                if let Some(icon) = app.default_window_icon() {
                    tray = tray.icon(icon.clone());
                }

                let _tray = tray
                    .on_tray_icon_event(|tray, event| {
                        if let TrayIconEvent::Click {
                            button: MouseButton::Left,
                            button_state: MouseButtonState::Up,
                            ..
                        } = event
                        {
                            let app = tray.app_handle();
                            if let Some(window) = app.get_webview_window("main") {
                                if window.is_visible().unwrap_or(false) {
                                    let _ = window.hide();
                                } else {
                                    let _ = window.show();
                                    let _ = window.set_focus();
                                }
                            }
                        }
                    })
                    .on_menu_event(|app, event| {
                        if event.id == "quit" {
                            app.exit(0);
                        }
                    })
                    .build(app)?;

                Ok(())
            })
            .invoke_handler(tauri::generate_handler![
                // Session
                auth::sign_in,
                auth::sign_out,
                auth::current_user,
                // Customer menu and cart
                menu::get_menu,
                menu::get_cart,
                menu::add_to_cart,
                menu::remove_from_cart,
                menu::set_cart_quantity,
                menu::clear_cart,
                menu::place_order,
                menu::open_my_orders,
                menu::get_my_orders,
                // Kitchen orders
                orders::open_kitchen_orders,
                orders::close_orders,
                orders::get_kitchen_board,
                orders::advance_order,
                orders::update_order_status,
                orders::delete_order,
                // Menu management
                catalog::get_foods,
                catalog::get_food_form,
                catalog::save_food,
                catalog::toggle_food_availability,
                catalog::delete_food,
                // Daily statistics
                reports::open_daily_stats,
                reports::get_daily_stats,
                reports::close_daily_stats,
            ])
            .run(tauri::generate_context!());

        if let Err(e) = result {
            eprintln!("error while running kitchen orders: {}", e);
            std::process::exit(1);
        }
    }
}
