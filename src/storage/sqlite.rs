use anyhow::Result;
use rusqlite::{params, params_from_iter, types::Type, types::Value, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::{path::Path, str::FromStr};

use super::traits::{ItemFilter, ItemRange, Storage, StorageRead, StorageTx, StorageWrite};
use crate::types::{
    default_picture_url, CatalogBrand, CatalogItem, CatalogType, ItemId, NewCatalogItem,
};

const DB_SCHEMA_VERSION: i64 = 1;

const ITEM_COLUMNS: &str = "id, name, description, price, picture_file_name, picture_url, catalog_type_id, catalog_brand_id";

#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

pub struct SqliteTx {
    conn: Connection,
}

impl StorageTx for SqliteTx {
    fn commit(self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }
}

fn open_conn(path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(std::time::Duration::from_millis(500))?;
    Ok(conn)
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn map_type_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogType> {
    Ok(CatalogType {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn map_brand_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogBrand> {
    Ok(CatalogBrand {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn map_item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogItem> {
    let price_str: String = row.get(3)?;
    let price = Decimal::from_str(&price_str)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err)))?;
    Ok(CatalogItem {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price,
        picture_file_name: row.get(4)?,
        picture_url: row.get(5)?,
        catalog_type_id: row.get(6)?,
        catalog_brand_id: row.get(7)?,
    })
}

/// Renders the filter as a `WHERE` clause plus its positional values.
fn filter_clause(filter: &ItemFilter) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    if let Some(prefix) = &filter.name_prefix {
        values.push(Value::Text(prefix.clone()));
        let n = values.len();
        // LIKE folds ASCII case and treats % and _ as wildcards; prefix match must not.
        clauses.push(format!("substr(name, 1, length(?{n})) = ?{n}"));
    }
    if let Some(type_id) = filter.catalog_type_id {
        values.push(Value::Integer(type_id));
        clauses.push(format!("catalog_type_id = ?{}", values.len()));
    }
    if let Some(brand_id) = filter.catalog_brand_id {
        values.push(Value::Integer(brand_id));
        clauses.push(format!("catalog_brand_id = ?{}", values.len()));
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), values)
    }
}

fn db_list_types(conn: &Connection) -> rusqlite::Result<Vec<CatalogType>> {
    let mut stmt = conn.prepare("SELECT id, type FROM catalog_types ORDER BY id")?;
    let rows = stmt
        .query_map([], map_type_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_list_brands(conn: &Connection) -> rusqlite::Result<Vec<CatalogBrand>> {
    let mut stmt = conn.prepare("SELECT id, brand FROM catalog_brands ORDER BY id")?;
    let rows = stmt
        .query_map([], map_brand_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_load_type(conn: &Connection, id: i64) -> rusqlite::Result<Option<CatalogType>> {
    conn.query_row(
        "SELECT id, type FROM catalog_types WHERE id = ?1",
        params![id],
        map_type_row,
    )
    .optional()
}

fn db_load_brand(conn: &Connection, id: i64) -> rusqlite::Result<Option<CatalogBrand>> {
    conn.query_row(
        "SELECT id, brand FROM catalog_brands WHERE id = ?1",
        params![id],
        map_brand_row,
    )
    .optional()
}

fn db_load_item(conn: &Connection, id: ItemId) -> rusqlite::Result<Option<CatalogItem>> {
    conn.query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM catalog_items WHERE id = ?1"),
        params![id],
        map_item_row,
    )
    .optional()
}

fn db_count_items(conn: &Connection, filter: &ItemFilter) -> rusqlite::Result<u64> {
    let (where_clause, values) = filter_clause(filter);
    let sql = format!("SELECT COUNT(*) FROM catalog_items {where_clause}");
    let count: i64 = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
    Ok(count as u64)
}

fn db_list_items(
    conn: &Connection,
    filter: &ItemFilter,
    range: ItemRange,
) -> rusqlite::Result<Vec<CatalogItem>> {
    let (where_clause, mut values) = filter_clause(filter);
    values.push(Value::Integer(to_sql_int(range.limit)));
    let limit_idx = values.len();
    values.push(Value::Integer(to_sql_int(range.offset)));
    let offset_idx = values.len();

    let sql = format!(
        r#"
        SELECT {ITEM_COLUMNS}
        FROM catalog_items
        {where_clause}
        ORDER BY name, id
        LIMIT ?{limit_idx} OFFSET ?{offset_idx}
        "#
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), map_item_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_insert_type(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    conn.execute("INSERT INTO catalog_types (type) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

fn db_insert_brand(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    conn.execute("INSERT INTO catalog_brands (brand) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

fn db_insert_item(conn: &Connection, item: &NewCatalogItem) -> rusqlite::Result<ItemId> {
    conn.execute(
        r#"
        INSERT INTO catalog_items (
            name, description, price, picture_file_name, picture_url,
            catalog_type_id, catalog_brand_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            item.name,
            item.description,
            item.price.to_string(),
            item.picture_file_name,
            item.picture_url.as_deref().unwrap_or_default(),
            item.catalog_type_id,
            item.catalog_brand_id
        ],
    )?;
    let id = conn.last_insert_rowid();

    if item.picture_url.is_none() {
        conn.execute(
            "UPDATE catalog_items SET picture_url = ?1 WHERE id = ?2",
            params![default_picture_url(id), id],
        )?;
    }
    Ok(id)
}

fn db_replace_item(conn: &Connection, item: &CatalogItem) -> rusqlite::Result<usize> {
    conn.execute(
        r#"
        UPDATE catalog_items
        SET name = ?2,
            description = ?3,
            price = ?4,
            picture_file_name = ?5,
            picture_url = ?6,
            catalog_type_id = ?7,
            catalog_brand_id = ?8
        WHERE id = ?1
        "#,
        params![
            item.id,
            item.name,
            item.description,
            item.price.to_string(),
            item.picture_file_name,
            item.picture_url,
            item.catalog_type_id,
            item.catalog_brand_id
        ],
    )
}

fn db_delete_item(conn: &Connection, id: ItemId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM catalog_items WHERE id = ?1", params![id])
}

impl StorageRead for SqliteTx {
    fn list_types(&self) -> Result<Vec<CatalogType>> {
        Ok(db_list_types(&self.conn)?)
    }

    fn list_brands(&self) -> Result<Vec<CatalogBrand>> {
        Ok(db_list_brands(&self.conn)?)
    }

    fn load_type(&self, id: i64) -> Result<Option<CatalogType>> {
        Ok(db_load_type(&self.conn, id)?)
    }

    fn load_brand(&self, id: i64) -> Result<Option<CatalogBrand>> {
        Ok(db_load_brand(&self.conn, id)?)
    }

    fn load_item(&self, id: ItemId) -> Result<Option<CatalogItem>> {
        Ok(db_load_item(&self.conn, id)?)
    }

    fn count_items(&self, filter: &ItemFilter) -> Result<u64> {
        Ok(db_count_items(&self.conn, filter)?)
    }

    fn list_items(&self, filter: &ItemFilter, range: ItemRange) -> Result<Vec<CatalogItem>> {
        Ok(db_list_items(&self.conn, filter, range)?)
    }
}

impl StorageWrite for SqliteTx {
    fn insert_type(&self, name: &str) -> Result<i64> {
        Ok(db_insert_type(&self.conn, name)?)
    }

    fn insert_brand(&self, name: &str) -> Result<i64> {
        Ok(db_insert_brand(&self.conn, name)?)
    }

    fn insert_item(&self, item: &NewCatalogItem) -> Result<ItemId> {
        Ok(db_insert_item(&self.conn, item)?)
    }

    fn replace_item(&self, item: &CatalogItem) -> Result<usize> {
        Ok(db_replace_item(&self.conn, item)?)
    }

    fn delete_item(&self, id: ItemId) -> Result<usize> {
        Ok(db_delete_item(&self.conn, id)?)
    }
}

impl Storage for SqliteStorage {
    type Tx = SqliteTx;

    fn begin_tx(&self) -> Result<Self::Tx> {
        let conn = open_conn(&self.path)?;
        conn.execute("BEGIN IMMEDIATE", [])?;
        Ok(SqliteTx { conn })
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = format!("{}{}", self.path, suffix);
            if std::path::Path::new(&sidecar).exists() {
                std::fs::remove_file(&sidecar)?;
            }
        }
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = open_conn(&self.path)?;
        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE catalog_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL
            );
            CREATE TABLE catalog_brands (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                brand TEXT NOT NULL
            );
            CREATE TABLE catalog_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL CHECK (length(name) > 0),
                description TEXT NOT NULL,
                price TEXT NOT NULL CHECK (CAST(price AS REAL) >= 0),
                picture_file_name TEXT NOT NULL,
                picture_url TEXT NOT NULL,
                catalog_type_id INTEGER NOT NULL REFERENCES catalog_types(id),
                catalog_brand_id INTEGER NOT NULL REFERENCES catalog_brands(id)
            );
            CREATE INDEX catalog_items_name_idx ON catalog_items(name, id);
            CREATE INDEX catalog_items_type_idx ON catalog_items(catalog_type_id);
            CREATE INDEX catalog_items_brand_idx ON catalog_items(catalog_brand_id);
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_SCHEMA),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl StorageRead for SqliteStorage {
    fn list_types(&self) -> Result<Vec<CatalogType>> {
        let rows = self.with_conn(db_list_types)?;
        Ok(rows)
    }

    fn list_brands(&self) -> Result<Vec<CatalogBrand>> {
        let rows = self.with_conn(db_list_brands)?;
        Ok(rows)
    }

    fn load_type(&self, id: i64) -> Result<Option<CatalogType>> {
        let row = self.with_conn(|conn| db_load_type(conn, id))?;
        Ok(row)
    }

    fn load_brand(&self, id: i64) -> Result<Option<CatalogBrand>> {
        let row = self.with_conn(|conn| db_load_brand(conn, id))?;
        Ok(row)
    }

    fn load_item(&self, id: ItemId) -> Result<Option<CatalogItem>> {
        let row = self.with_conn(|conn| db_load_item(conn, id))?;
        Ok(row)
    }

    fn count_items(&self, filter: &ItemFilter) -> Result<u64> {
        let count = self.with_conn(|conn| db_count_items(conn, filter))?;
        Ok(count)
    }

    fn list_items(&self, filter: &ItemFilter, range: ItemRange) -> Result<Vec<CatalogItem>> {
        let rows = self.with_conn(|conn| db_list_items(conn, filter, range))?;
        Ok(rows)
    }
}
