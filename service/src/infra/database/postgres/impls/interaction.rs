//! [`Interaction`]-related [`Database`] implementations.

use common::{
    list::Limit,
    operations::{By, Insert, Select, Update},
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{interaction, Interaction},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::interaction::list::{Filter, Selector, SortField},
};

impl_by_id!(Interaction, interaction::Id, "interactions");

/// Columns of the `interactions` table.
const COLUMNS: &str = "\
    id, client_id, property_id, kind, \
    title, description, occurred_at, outcome, created_at";

/// Builds an [`Interaction`] out of the provided `interactions` table
/// [`Row`].
fn from_row(row: &Row) -> Interaction {
    Interaction {
        id: row.get("id"),
        client_id: row.get("client_id"),
        property_id: row.get("property_id"),
        kind: row.get("kind"),
        title: row.get("title"),
        description: row.get("description"),
        occurred_at: row.get("occurred_at"),
        outcome: row.get("outcome"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Interaction>, interaction::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Interaction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Interaction>, interaction::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: interaction::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM interactions \
             WHERE id = $1::UUID \
             LIMIT 1"
        );
        self.query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Interaction>, Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Interaction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Interaction>, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector {
            filter:
                Filter {
                    client_id,
                    property_id,
                },
            sort,
            limit,
        } = by.into_inner();
        let limit = limit.map(Limit::sql);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let client_idx = client_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let property_idx = property_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let limit_idx = limit.as_ref().map(|l| {
            ps.push(l);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM interactions \
             WHERE true \
                   {client_filtering} \
                   {property_filtering} \
             ORDER BY {ordering}, id \
             {limiting}",
            client_filtering = client_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND client_id = ${i}::UUID"))
            }),
            property_filtering =
                property_idx.into_iter().format_with("", |i, f| {
                    f(&format_args!("AND property_id = ${i}::UUID"))
                }),
            ordering = sort.map_or_else(
                || "created_at DESC".to_owned(),
                |s| {
                    let column = match s.field {
                        SortField::CreatedAt => "created_at",
                        SortField::OccurredAt => "occurred_at",
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

impl<C> Database<Insert<Interaction>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Interaction>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(interaction): Insert<Interaction>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(interaction))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Interaction>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(interaction): Update<Interaction>,
    ) -> Result<Self::Ok, Self::Err> {
        let Interaction {
            id,
            client_id,
            property_id,
            kind,
            title,
            description,
            occurred_at,
            outcome,
            created_at,
        } = interaction;

        const SQL: &str = "\
            INSERT INTO interactions (\
                id, client_id, property_id, kind, \
                title, description, occurred_at, outcome, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::INT2, \
                $5::VARCHAR, $6::TEXT, $7::TIMESTAMPTZ, $8::INT2, \
                $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET client_id = EXCLUDED.client_id, \
                property_id = EXCLUDED.property_id, \
                kind = EXCLUDED.kind, \
                title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                occurred_at = EXCLUDED.occurred_at, \
                outcome = EXCLUDED.outcome, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &client_id,
                &property_id,
                &kind,
                &title,
                &description,
                &occurred_at,
                &outcome,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
