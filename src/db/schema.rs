use rusqlite::Connection;

/// Turn on foreign key enforcement. SQLite scopes this pragma to a single
/// connection, so every pooled connection needs it.
pub fn enable_foreign_keys(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

/// Initialize the database schema.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    enable_foreign_keys(conn)?;
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS organizations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Accounts belong to exactly one organization
        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            organization_id INTEGER NOT NULL REFERENCES organizations(id),
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS idx_accounts_org ON accounts(organization_id);

        -- Deals carry organization_id directly (denormalized from the account).
        -- start_date/end_date are ISO 'YYYY-MM-DD' text so range tests compare lexically.
        CREATE TABLE IF NOT EXISTS deals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL REFERENCES accounts(id),
            organization_id INTEGER NOT NULL REFERENCES organizations(id),
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            value REAL NOT NULL,
            status TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS idx_deals_org_status ON deals(organization_id, status);
        CREATE INDEX IF NOT EXISTS idx_deals_account ON deals(account_id);
        "#,
    )
}
