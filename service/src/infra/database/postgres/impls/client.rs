//! [`Client`]-related [`Database`] implementations.

use common::{
    list::Limit,
    operations::{By, Insert, Select, Update},
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{client, Client},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::client::list::{Filter, Selector, SortField},
};

impl_by_id!(Client, client::Id, "clients");

/// Columns of the `clients` table.
const COLUMNS: &str = "\
    id, name, email, phone, kind, status, \
    budget_min, budget_max, \
    preferred_locations, preferred_property_kinds, \
    source, notes, created_at";

/// Builds a [`Client`] out of the provided `clients` table [`Row`].
fn from_row(row: &Row) -> Client {
    Client {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        kind: row.get("kind"),
        status: row.get("status"),
        budget_min: row.get("budget_min"),
        budget_max: row.get("budget_max"),
        preferred_locations: row.get("preferred_locations"),
        preferred_property_kinds: row.get("preferred_property_kinds"),
        source: row.get("source"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Client>, client::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Client>, client::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: client::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM clients \
             WHERE id = $1::UUID \
             LIMIT 1"
        );
        self.query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Client>, Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Client>, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector {
            filter: Filter { status },
            sort,
            limit,
        } = by.into_inner();
        let limit = limit.map(Limit::sql);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let limit_idx = limit.as_ref().map(|l| {
            ps.push(l);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM clients \
             WHERE true \
                   {status_filtering} \
             ORDER BY {ordering}, id \
             {limiting}",
            status_filtering = status_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND status = ${i}::INT2"))
            }),
            ordering = sort.map_or_else(
                || "created_at DESC".to_owned(),
                |s| {
                    let column = match s.field {
                        SortField::CreatedAt => "created_at",
                        SortField::Name => "LOWER(name)",
                    };
                    format!("{column} {}", s.order.sql())
                },
            ),
            limiting = limit_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("LIMIT ${i}::INT8"))
            }),
        );
        Ok(self
            .query(sql.as_str(), ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Client>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Client>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(client): Insert<Client>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(client)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Client>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(client): Update<Client>,
    ) -> Result<Self::Ok, Self::Err> {
        let Client {
            id,
            name,
            email,
            phone,
            kind,
            status,
            budget_min,
            budget_max,
            preferred_locations,
            preferred_property_kinds,
            source,
            notes,
            created_at,
        } = client;

        const SQL: &str = "\
            INSERT INTO clients (\
                id, name, email, phone, kind, status, \
                budget_min, budget_max, \
                preferred_locations, preferred_property_kinds, \
                source, notes, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::INT2, $6::INT2, \
                $7::NUMERIC, $8::NUMERIC, \
                $9::VARCHAR[], $10::INT2[], \
                $11::INT2, $12::TEXT, $13::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                kind = EXCLUDED.kind, \
                status = EXCLUDED.status, \
                budget_min = EXCLUDED.budget_min, \
                budget_max = EXCLUDED.budget_max, \
                preferred_locations = EXCLUDED.preferred_locations, \
                preferred_property_kinds = \
                    EXCLUDED.preferred_property_kinds, \
                source = EXCLUDED.source, \
                notes = EXCLUDED.notes, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &email,
                &phone,
                &kind,
                &status,
                &budget_min,
                &budget_max,
                &preferred_locations,
                &preferred_property_kinds,
                &source,
                &notes,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
