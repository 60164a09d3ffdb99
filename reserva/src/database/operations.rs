//! Database CRUD operations for reservations.
//!
//! The statement-level helpers here take a plain `&Connection` so the same
//! code serves both autocommit calls on [`SqliteStore`] and calls made
//! inside a [`super::SqliteTransaction`].

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::store::ReservationStore;
use crate::{Reservation, ReservationId};

use super::connection::SqliteStore;
use super::schema::{
    COUNT_RESERVATIONS, DELETE_ALL_RESERVATIONS, DELETE_RESERVATION_BY_ID, INSERT_RESERVATION,
    LIST_RESERVATIONS, SELECT_BY_NAME, SELECT_RESERVATION_BY_ID,
};

/// Deserializes a reservation from a `(id, name)` row.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    Ok(Reservation::persisted(ReservationId::from(id), name))
}

fn collect_rows(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, row_to_reservation)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(super) fn insert(conn: &Connection, reservation: Reservation) -> Result<Reservation> {
    if let Some(id) = reservation.id() {
        return Err(Error::storage(format!(
            "reservation {id} is already persisted"
        )));
    }
    conn.execute(INSERT_RESERVATION, params![reservation.name()])?;
    let id = ReservationId::from(conn.last_insert_rowid());
    log::debug!("inserted reservation {id} ({})", reservation.name());
    Ok(reservation.with_id(id))
}

pub(super) fn delete_all(conn: &Connection) -> Result<usize> {
    Ok(conn.execute(DELETE_ALL_RESERVATIONS, [])?)
}

pub(super) fn delete_by_id(conn: &Connection, id: ReservationId) -> Result<bool> {
    Ok(conn.execute(DELETE_RESERVATION_BY_ID, params![id.value()])? > 0)
}

pub(super) fn find_by_id(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
    Ok(conn
        .query_row(SELECT_RESERVATION_BY_ID, params![id.value()], row_to_reservation)
        .optional()?)
}

pub(super) fn find_all(conn: &Connection) -> Result<Vec<Reservation>> {
    collect_rows(conn, LIST_RESERVATIONS, [])
}

pub(super) fn find_by_name(conn: &Connection, name: &str) -> Result<Vec<Reservation>> {
    collect_rows(conn, SELECT_BY_NAME, params![name])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row(COUNT_RESERVATIONS, [], |row| row.get(0))?;
    Ok(count as usize)
}

#[async_trait]
impl ReservationStore for SqliteStore {
    async fn create(&self, reservation: Reservation) -> Result<Reservation> {
        self.with_connection(|conn| insert(conn, reservation)).await
    }

    async fn delete_all(&self) -> Result<usize> {
        self.with_connection(delete_all).await
    }

    async fn delete_by_id(&self, id: ReservationId) -> Result<bool> {
        self.with_connection(|conn| delete_by_id(conn, id)).await
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.with_connection(|conn| find_by_id(conn, id)).await
    }

    async fn find_all(&self) -> Result<Vec<Reservation>> {
        self.with_connection(find_all).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Reservation>> {
        self.with_connection(|conn| find_by_name(conn, name)).await
    }

    async fn count(&self) -> Result<usize> {
        self.with_connection(count).await
    }
}
