//! Place repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `places` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Place::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Deletion is permanent. There is no tombstone state for places.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::place::{ActorId, Place, PlaceId, PlaceValidationError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PLACE_SELECT_SQL: &str = "SELECT
    uuid,
    owner,
    name,
    visited,
    notes,
    visited_on,
    photo_ref
FROM places";

const REQUIRED_PLACE_COLUMNS: &[&str] = &[
    "uuid",
    "owner",
    "name",
    "visited",
    "notes",
    "visited_on",
    "photo_ref",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for place persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PlaceValidationError),
    Db(DbError),
    NotFound(PlaceId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
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
            Self::NotFound(id) => write!(f, "place not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted place data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column is missing: {table}.{column}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PlaceValidationError> for RepoError {
    fn from(value: PlaceValidationError) -> Self {
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

/// Repository interface for place CRUD and list-view queries.
pub trait PlaceRepository {
    /// Creates one place and returns its stable id.
    fn create_place(&self, place: &Place) -> RepoResult<PlaceId>;
    /// Gets one place by id.
    fn get_place(&self, id: PlaceId) -> RepoResult<Option<Place>>;
    /// Lists the owner's unvisited places sorted by name ascending.
    fn list_unvisited(&self, owner: &ActorId) -> RepoResult<Vec<Place>>;
    /// Lists visited places across all owners.
    ///
    /// Deliberately not owner-filtered: the upstream application exposes a
    /// global visited projection while the unvisited one is owner-scoped.
    /// Kept as observed; likely an upstream bug rather than intent.
    fn list_visited(&self) -> RepoResult<Vec<Place>>;
    /// Sets the visited flag with an optional visit date.
    fn set_visited(&self, id: PlaceId, visited_on: Option<NaiveDate>) -> RepoResult<()>;
    /// Removes one place permanently.
    fn delete_place(&self, id: PlaceId) -> RepoResult<()>;
}

/// SQLite-backed place repository.
pub struct SqlitePlaceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlaceRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PlaceRepository for SqlitePlaceRepository<'_> {
    fn create_place(&self, place: &Place) -> RepoResult<PlaceId> {
        place.validate()?;

        self.conn.execute(
            "INSERT INTO places (
                uuid,
                owner,
                name,
                visited,
                notes,
                visited_on,
                photo_ref
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                place.id.to_string(),
                place.owner.as_str(),
                place.name.as_str(),
                bool_to_int(place.visited),
                place.notes.as_deref(),
                place.visited_on.map(|date| date.to_string()),
                place.photo_ref.as_deref(),
            ],
        )?;

        Ok(place.id)
    }

    fn get_place(&self, id: PlaceId) -> RepoResult<Option<Place>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLACE_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_place_row(row)?));
        }

        Ok(None)
    }

    fn list_unvisited(&self, owner: &ActorId) -> RepoResult<Vec<Place>> {
        // BINARY collation keeps the contract case-sensitive lexical ascending.
        let mut stmt = self.conn.prepare(&format!(
            "{PLACE_SELECT_SQL}
             WHERE owner = ?1
               AND visited = 0
             ORDER BY name ASC;"
        ))?;

        let mut rows = stmt.query([owner.as_str()])?;
        collect_places(&mut rows)
    }

    fn list_visited(&self) -> RepoResult<Vec<Place>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLACE_SELECT_SQL} WHERE visited = 1;"))?;

        let mut rows = stmt.query([])?;
        collect_places(&mut rows)
    }

    fn set_visited(&self, id: PlaceId, visited_on: Option<NaiveDate>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE places
             SET
                visited = 1,
                visited_on = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), visited_on.map(|date| date.to_string())],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_place(&self, id: PlaceId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM places WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn collect_places(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Place>> {
    let mut places = Vec::new();
    while let Some(row) = rows.next()? {
        places.push(parse_place_row(row)?);
    }
    Ok(places)
}

fn parse_place_row(row: &Row<'_>) -> RepoResult<Place> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in places.uuid"))
    })?;

    let owner_text: String = row.get("owner")?;
    let owner = ActorId::parse(&owner_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid owner value `{owner_text}` in places.owner"))
    })?;

    let visited = match row.get::<_, i64>("visited")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid visited value `{other}` in places.visited"
            )));
        }
    };

    let visited_on = match row.get::<_, Option<String>>("visited_on")? {
        Some(value) => Some(value.parse::<NaiveDate>().map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid visit date `{value}` in places.visited_on"
            ))
        })?),
        None => None,
    };

    let place = Place {
        id,
        owner,
        name: row.get("name")?,
        visited,
        notes: row.get("notes")?,
        visited_on,
        photo_ref: row.get("photo_ref")?,
    };
    place.validate()?;
    Ok(place)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "places")? {
        return Err(RepoError::MissingRequiredTable("places"));
    }

    for &column in REQUIRED_PLACE_COLUMNS {
        if !table_has_column(conn, "places", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "places",
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
