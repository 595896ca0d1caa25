//! `PostgreSQL` implementation of the `Repository` trait.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sabor_core::aggregate::Aggregate;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::repository::{Page, PageRequest, Repository, ScanScope};
use sabor_core::{EntityId, IdSet};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::debug;

/// A query under construction, ready for more `bind` calls.
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// An owned list of identifiers kept in a side table, one row per entry.
#[derive(Debug, Clone, Copy)]
pub struct ChildTable {
    /// Side table name.
    pub table: &'static str,
    /// Column holding the owning record's identity.
    pub owner_column: &'static str,
    /// Column holding the listed identifier.
    pub value_column: &'static str,
}

/// How an aggregate is laid out in `PostgreSQL`.
///
/// Every table has `id BIGSERIAL`, `created_at` and `updated_at` in addition
/// to the domain columns listed here.
pub trait PgMapping: Aggregate {
    /// Main table name.
    const TABLE: &'static str;
    /// Domain columns, in the order [`PgMapping::bind_fields`] binds them.
    const COLUMNS: &'static [&'static str];
    /// Column matched by `ScanScope::Parent`.
    const PARENT_COLUMN: Option<&'static str> = None;
    /// Side table for a collection of identifiers.
    const CHILDREN: Option<ChildTable> = None;

    /// Binds the domain columns, in `COLUMNS` order.
    fn bind_fields<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;

    /// Rebuilds the aggregate from a row and its side-table entries.
    ///
    /// # Errors
    ///
    /// Returns the driver error if a column is missing or cannot be decoded.
    fn from_row(row: &PgRow, children: Vec<EntityId>) -> Result<Self, sqlx::Error>;

    /// The entries to write to the side table, in order.
    fn child_ids(&self) -> Vec<EntityId> {
        Vec::new()
    }
}

/// PostgreSQL-backed repository for any aggregate with a [`PgMapping`].
#[derive(Debug, Clone)]
pub struct PgRepository<T> {
    pool: PgPool,
    _aggregate: PhantomData<fn() -> T>,
}

impl<T: PgMapping> PgRepository<T> {
    /// Creates a new `PgRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _aggregate: PhantomData,
        }
    }

    fn select_sql(tail: &str) -> String {
        format!(
            "SELECT id, created_at, updated_at, {} FROM {} {tail}",
            T::COLUMNS.join(", "),
            T::TABLE
        )
    }

    async fn hydrate(&self, rows: Vec<PgRow>) -> Result<Vec<Record<T>>, sqlx::Error> {
        let ids = rows
            .iter()
            .map(|row| row.try_get::<EntityId, _>("id"))
            .collect::<Result<Vec<_>, _>>()?;
        let mut children = self.load_children(&ids).await?;
        rows.iter()
            .map(|row| {
                let id: EntityId = row.try_get("id")?;
                Self::record_from_row(row, children.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    fn record_from_row(row: &PgRow, children: Vec<EntityId>) -> Result<Record<T>, sqlx::Error> {
        Ok(Record {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            fields: T::from_row(row, children)?,
        })
    }

    fn returning_sql() -> String {
        format!("RETURNING id, created_at, updated_at, {}", T::COLUMNS.join(", "))
    }

    async fn load_children(
        &self,
        owners: &[EntityId],
    ) -> Result<HashMap<EntityId, Vec<EntityId>>, sqlx::Error> {
        let mut children: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        let Some(child) = T::CHILDREN else {
            return Ok(children);
        };
        if owners.is_empty() {
            return Ok(children);
        }
        let sql = format!(
            "SELECT {owner} AS owner_id, {value} AS value_id FROM {table} \
             WHERE {owner} = ANY($1) ORDER BY {owner}, position",
            owner = child.owner_column,
            value = child.value_column,
            table = child.table,
        );
        let rows = sqlx::query(&sql).bind(owners).fetch_all(&self.pool).await?;
        for row in rows {
            children
                .entry(row.try_get("owner_id")?)
                .or_default()
                .push(row.try_get("value_id")?);
        }
        Ok(children)
    }

    async fn write_children(
        tx: &mut Transaction<'_, Postgres>,
        id: EntityId,
        fields: &T,
    ) -> Result<(), sqlx::Error> {
        let Some(child) = T::CHILDREN else {
            return Ok(());
        };
        let delete = format!(
            "DELETE FROM {} WHERE {} = $1",
            child.table, child.owner_column
        );
        sqlx::query(&delete).bind(id).execute(&mut **tx).await?;

        let values = fields.child_ids();
        if values.is_empty() {
            return Ok(());
        }
        let insert = format!(
            "INSERT INTO {table} ({owner}, position, {value}) \
             SELECT $1, (t.ord - 1)::INTEGER, t.value_id \
             FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS t(value_id, ord)",
            table = child.table,
            owner = child.owner_column,
            value = child.value_column,
        );
        sqlx::query(&insert)
            .bind(id)
            .bind(values.as_slice())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn fetch_page(
        &self,
        scope: ScanScope,
        request: PageRequest,
    ) -> Result<Page<Record<T>>, sqlx::Error> {
        let (filter, parent) = match (scope, T::PARENT_COLUMN) {
            (ScanScope::All, _) => (String::new(), None),
            (ScanScope::Parent(id), Some(column)) => (format!("WHERE {column} = $1"), Some(id)),
            (ScanScope::Parent(_), None) => ("WHERE FALSE".to_owned(), None),
        };

        let count_sql = format!("SELECT COUNT(*) AS total FROM {} {filter}", T::TABLE);
        let mut count = sqlx::query(&count_sql);
        if let Some(id) = parent {
            count = count.bind(id);
        }
        let total: i64 = count.fetch_one(&self.pool).await?.try_get("total")?;

        let rows_sql = Self::select_sql(&format!(
            "{filter} ORDER BY id LIMIT {} OFFSET {}",
            request.size,
            request.offset()
        ));
        let mut rows = sqlx::query(&rows_sql);
        if let Some(id) = parent {
            rows = rows.bind(id);
        }
        let rows = rows.fetch_all(&self.pool).await?;
        let content = self.hydrate(rows).await?;
        Ok(Page::new(
            content,
            request,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn insert_row(&self, fields: T, now: DateTime<Utc>) -> Result<Record<T>, sqlx::Error> {
        let placeholders = (1..=T::COLUMNS.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let stamp = T::COLUMNS.len() + 1;
        let sql = format!(
            "INSERT INTO {} ({}, created_at, updated_at) VALUES ({placeholders}, ${stamp}, ${stamp}) {}",
            T::TABLE,
            T::COLUMNS.join(", "),
            Self::returning_sql(),
        );

        let mut tx = self.pool.begin().await?;
        let row = fields
            .bind_fields(sqlx::query(&sql))
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
        let id: EntityId = row.try_get("id")?;
        Self::write_children(&mut tx, id, &fields).await?;
        tx.commit().await?;

        debug!(table = T::TABLE, id, "row inserted");
        Self::record_from_row(&row, fields.child_ids())
    }

    async fn update_row(&self, record: &Record<T>) -> Result<Option<Record<T>>, sqlx::Error> {
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let n = T::COLUMNS.len();
        let sql = format!(
            "UPDATE {} SET {assignments}, updated_at = ${} WHERE id = ${} {}",
            T::TABLE,
            n + 1,
            n + 2,
            Self::returning_sql(),
        );

        let mut tx = self.pool.begin().await?;
        let row = record
            .fields
            .bind_fields(sqlx::query(&sql))
            .bind(record.updated_at)
            .bind(record.id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Self::write_children(&mut tx, record.id, &record.fields).await?;
        tx.commit().await?;

        debug!(table = T::TABLE, id = record.id, "row updated");
        Self::record_from_row(&row, record.fields.child_ids()).map(Some)
    }
}

fn store_error(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

#[async_trait]
impl<T: PgMapping> Repository<T> for PgRepository<T> {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Record<T>>, DomainError> {
        let sql = Self::select_sql("WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await.map_err(store_error)?.pop())
    }

    async fn find_by_ids(&self, ids: &IdSet) -> Result<Vec<Record<T>>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<EntityId> = ids.iter().copied().collect();
        let sql = Self::select_sql("WHERE id = ANY($1) ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(ids.as_slice())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        self.hydrate(rows).await.map_err(store_error)
    }

    async fn find_page(
        &self,
        scope: ScanScope,
        request: PageRequest,
    ) -> Result<Page<Record<T>>, DomainError> {
        self.fetch_page(scope, request).await.map_err(store_error)
    }

    async fn insert(&self, fields: T, now: DateTime<Utc>) -> Result<Record<T>, DomainError> {
        self.insert_row(fields, now).await.map_err(store_error)
    }

    async fn update(&self, record: &Record<T>) -> Result<Record<T>, DomainError> {
        self.update_row(record)
            .await
            .map_err(store_error)?
            .ok_or(DomainError::NotFound {
                entity: T::NAME,
                id: record.id,
            })
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        debug!(table = T::TABLE, id, "row deleted");
        Ok(())
    }
}
