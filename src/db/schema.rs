//! SQL DDL for the dashboard tables.
//! Statements are separated by `;` and applied one by one, so comments
//! below must not contain semicolons.

/// SQLite schema:
/// - `users`, `fitness`, `account_book` use UUID v4 text keys
/// - `category` and `item` keys are chosen by the caller
/// - amounts are decimal strings, dates `YYYY-MM-DD`, timestamps RFC3339
/// - every foreign key cascades on delete
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL,
    password TEXT NOT NULL, -- salted SHA-256 hex digest
    email TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS fitness (
    fitness_id TEXT PRIMARY KEY NOT NULL,
    activity_date TEXT NOT NULL,
    activities TEXT NOT NULL, -- JSON array of activity tags
    status INTEGER NOT NULL DEFAULT 0,
    user_id TEXT NULL REFERENCES users(user_id) ON DELETE CASCADE ON UPDATE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (user_id, activity_date)
);

CREATE TABLE IF NOT EXISTS category (
    category_id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    remark TEXT NULL
);

CREATE TABLE IF NOT EXISTS item (
    item_id TEXT PRIMARY KEY NOT NULL,
    category_id TEXT NOT NULL REFERENCES category(category_id) ON DELETE CASCADE ON UPDATE RESTRICT,
    name TEXT NOT NULL,
    remark TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS account_book (
    entry_id TEXT PRIMARY KEY NOT NULL,
    date TEXT NOT NULL,
    category_id TEXT NOT NULL REFERENCES category(category_id) ON DELETE CASCADE ON UPDATE RESTRICT,
    item_id TEXT NOT NULL REFERENCES item(item_id) ON DELETE CASCADE ON UPDATE RESTRICT,
    expense TEXT NOT NULL,
    refund TEXT NOT NULL DEFAULT '0.00',
    remarks TEXT NOT NULL DEFAULT '',
    user_id TEXT NULL REFERENCES users(user_id) ON DELETE CASCADE ON UPDATE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_item_category ON item(category_id);
CREATE INDEX IF NOT EXISTS idx_account_book_user_date ON account_book(user_id, date);
"#;
