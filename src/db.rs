use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Document store backing the bundled gateway. Every collection keeps the
/// JSON body of each document plus the columns its queries filter on.
pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::Poisoned)?;

        conn.execute_batch(
            "
            -- Menu items
            CREATE TABLE IF NOT EXISTS foods (
                id TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );

            -- Customer profiles, written by the identity provider
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );

            -- Orders
            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at INTEGER NOT NULL,
                body TEXT NOT NULL
            );
            ",
        )?;

        // Run migrations for existing stores (pass connection to avoid deadlock)
        Self::migrate_conn(&conn)?;

        conn.execute_batch(
            "
            CREATE INDEX IF NOT EXISTS idx_orders_user ON orders (user_id, created_at);
            CREATE INDEX IF NOT EXISTS idx_orders_status ON orders (status, created_at);
            ",
        )?;

        Ok(())
    }

    fn migrate_conn(conn: &Connection) -> Result<()> {
        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(orders)")?
            .query_map([], |row| row.get::<_, String>(1))?
            .filter_map(|r| r.ok())
            .collect();

        // Stores created before status queries kept the status in the body only
        if !columns.contains(&"status".to_string()) {
            conn.execute(
                "ALTER TABLE orders ADD COLUMN status TEXT NOT NULL DEFAULT 'pending'",
                [],
            )?;
            conn.execute(
                "UPDATE orders SET status = COALESCE(json_extract(body, '$.status'), 'pending')",
                [],
            )?;
        }

        Ok(())
    }
}
