//! Query execution.
//!
//! One linear request/response path per call: acquire a connection from the
//! pool, prepare the statement, read its declared output columns, bind the
//! positional arguments, fetch all matching rows, and map them into a
//! [`Table`]. The acquired connection is scoped to the call and returns to
//! the pool on every exit path, including errors. No retry, no local timeout
//! beyond the pool's acquire timeout.

use crate::db::params::{QueryParam, bind_param};
use crate::db::pool;
use crate::db::table::{ColumnDescriptor, Table, TableSchema};
use crate::db::types::row_to_json_map;
use crate::error::DbResult;
use sqlx::postgres::PgStatement;
use sqlx::{Column, Executor, PgPool, Statement, TypeInfo};
use std::time::Instant;
use tracing::debug;

/// Execute a parameterized query against the shared pool and return the
/// result as a [`Table`].
///
/// If the shared pool has not been initialized yet, it is created first from
/// the environment fallback; concurrent first callers still produce exactly
/// one pool.
pub async fn fetch_as_table(sql: &str, params: &[QueryParam]) -> DbResult<Table> {
    let pool = pool::shared_pool().await?;
    fetch_as_table_on(pool, sql, params).await
}

/// Prepare a query against the shared pool and return its declared output
/// schema without executing it.
pub async fn describe(sql: &str) -> DbResult<TableSchema> {
    let pool = pool::shared_pool().await?;
    describe_on(pool, sql).await
}

/// Execute a parameterized query on the given pool.
pub(crate) async fn fetch_as_table_on(
    pool: &PgPool,
    sql: &str,
    params: &[QueryParam],
) -> DbResult<Table> {
    let start = Instant::now();
    let mut conn = pool.acquire().await?;

    let stmt = (&mut *conn).prepare(sql).await?;
    let schema = statement_schema(&stmt);

    let mut query = stmt.query();
    for param in params {
        query = bind_param(query, param);
    }
    let rows = query.fetch_all(&mut *conn).await?;

    debug!(
        sql = %sql,
        params = params.len(),
        rows = rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "query executed"
    );

    // Zero rows produce a table with no columns: the declared names are
    // discarded, so an empty result carries no schema.
    if rows.is_empty() {
        return Ok(Table::empty());
    }

    let json_rows = rows.iter().map(row_to_json_map).collect();
    Ok(Table::new(schema.column_names(), json_rows))
}

/// Prepare a query on the given pool and return its declared output schema.
pub(crate) async fn describe_on(pool: &PgPool, sql: &str) -> DbResult<TableSchema> {
    let mut conn = pool.acquire().await?;
    let stmt = (&mut *conn).prepare(sql).await?;
    Ok(statement_schema(&stmt))
}

/// Read the declared output columns of a prepared statement, in declared
/// order.
fn statement_schema(stmt: &PgStatement<'_>) -> TableSchema {
    TableSchema::new(
        stmt.columns()
            .iter()
            .map(|col| ColumnDescriptor::new(col.name(), col.type_info().name(), col.ordinal()))
            .collect(),
    )
}
