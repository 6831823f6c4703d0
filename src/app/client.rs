//! Client use cases.

use crate::domain::Client;
use crate::error::AppError;
use rusqlite::{params, Connection};

pub fn client_get(conn: &Connection, id: i64) -> Result<Client, AppError> {
    log::debug!("client_get id={}", id);
    conn.query_row(
        "SELECT id, fio, login, birthday, email FROM clients WHERE id = ?1",
        [id],
        |row| {
            Ok(Client {
                id: row.get(0)?,
                full_name: row.get(1)?,
                login: row.get(2)?,
                birthday: row.get(3)?,
                email: row.get(4)?,
            })
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => AppError::NotFound(format!("client {}", id)),
        other => AppError::from(other),
    })
}

/// Insert a new row and return the id storage assigned. `client.id` is ignored.
pub fn client_insert(conn: &Connection, client: &Client) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO clients (fio, login, birthday, email) VALUES (?1, ?2, ?3, ?4)",
        params![
            &client.full_name,
            &client.login,
            &client.birthday,
            &client.email
        ],
    )?;
    let id = conn.last_insert_rowid();
    log::debug!("client_insert id={}", id);
    Ok(id)
}

/// Delete by id. Missing rows are not an error.
pub fn client_delete(conn: &Connection, id: i64) -> Result<(), AppError> {
    let affected = conn.execute("DELETE FROM clients WHERE id = ?1", [id])?;
    log::debug!("client_delete id={} affected={}", id, affected);
    Ok(())
}
