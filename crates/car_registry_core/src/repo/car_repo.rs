//! Car repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert-only writes and full-table reads over `cars`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writes call `NewCar::validate()` before any SQL runs.
//! - Reads return rows in insertion order (`id ASC`).
//! - Reads reject invalid persisted rows instead of masking them.
//! - `atomically` leaves no trace of its writes unless the work succeeds.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::car::{CarField, CarId, CarRecord, CarValidationError, NewCar};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CARS_TABLE: &str = "cars";

const CAR_SELECT_SQL: &str = "SELECT
    id,
    owner_name,
    make,
    model,
    year
FROM cars";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for registry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Payload failed record invariants; nothing was written.
    Validation(CarValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted row cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted car data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "car repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "car repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "car repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<CarValidationError> for RepoError {
    fn from(value: CarValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the car registry.
pub trait CarRepository {
    /// Validates and inserts one row, returning its auto-incremented id.
    fn insert_car(&self, car: &NewCar) -> RepoResult<CarId>;
    /// Loads one row by id.
    fn get_car(&self, id: CarId) -> RepoResult<Option<CarRecord>>;
    /// Loads every row in insertion order.
    fn list_cars(&self) -> RepoResult<Vec<CarRecord>>;
    /// Counts stored rows.
    fn count_cars(&self) -> RepoResult<u64>;
    /// Runs `work` so its writes are kept only when it returns `Ok`.
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        E: From<RepoError>,
        F: FnOnce(&Self) -> Result<T, E>;
}

/// SQLite-backed car repository.
pub struct SqliteCarRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCarRepository<'conn> {
    /// Wraps a connection after checking it was opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_car_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CarRepository for SqliteCarRepository<'_> {
    fn insert_car(&self, car: &NewCar) -> RepoResult<CarId> {
        car.validate()?;

        self.conn.execute(
            "INSERT INTO cars (owner_name, make, model, year) VALUES (?1, ?2, ?3, ?4);",
            params![
                car.owner_name.as_str(),
                car.make.as_str(),
                car.model.as_str(),
                car.year,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=car_insert module=repo status=ok car_id={id}");
        Ok(id)
    }

    fn get_car(&self, id: CarId) -> RepoResult<Option<CarRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAR_SELECT_SQL} WHERE id = ?1;"))?;
        let record = stmt.query_row([id], read_car_row).optional()?;
        record.map(checked_record).transpose()
    }

    fn list_cars(&self) -> RepoResult<Vec<CarRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAR_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut cars = Vec::new();

        while let Some(row) = rows.next()? {
            cars.push(checked_record(read_car_row(row)?)?);
        }

        Ok(cars)
    }

    fn count_cars(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cars;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        E: From<RepoError>,
        F: FnOnce(&Self) -> Result<T, E>,
    {
        // Dropping `tx` without commit rolls back.
        let tx = self.conn.unchecked_transaction().map_err(RepoError::from)?;
        let value = work(self)?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }
}

fn read_car_row(row: &Row<'_>) -> rusqlite::Result<CarRecord> {
    Ok(CarRecord {
        id: row.get("id")?,
        owner_name: row.get("owner_name")?,
        make: row.get("make")?,
        model: row.get("model")?,
        year: row.get("year")?,
    })
}

fn checked_record(record: CarRecord) -> RepoResult<CarRecord> {
    if let Err(err) = record.validate() {
        return Err(RepoError::InvalidData(format!(
            "row {} fails `{}` check: {err}",
            record.id,
            err.field().column()
        )));
    }
    Ok(record)
}

fn ensure_car_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, CARS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(CARS_TABLE));
    }

    let columns = std::iter::once("id").chain(CarField::ALL.iter().map(|field| field.column()));
    for column in columns {
        if !table_has_column(conn, CARS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: CARS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
