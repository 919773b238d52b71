//! [`Reminder`]-related [`Database`] implementations.

use common::{
    list::Limit,
    operations::{By, Insert, Select, Update},
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{reminder, Reminder},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::reminder::list::{Filter, Selector, SortField},
};

impl_by_id!(Reminder, reminder::Id, "reminders");

/// Columns of the `reminders` table.
const COLUMNS: &str = "\
    id, title, description, due_at, kind, priority, status, \
    client_id, property_id, created_at";

/// Builds a [`Reminder`] out of the provided `reminders` table [`Row`].
fn from_row(row: &Row) -> Reminder {
    Reminder {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        due_at: row.get("due_at"),
        kind: row.get("kind"),
        priority: row.get("priority"),
        status: row.get("status"),
        client_id: row.get("client_id"),
        property_id: row.get("property_id"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Reminder>, reminder::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reminder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reminder>, reminder::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: reminder::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM reminders \
             WHERE id = $1::UUID \
             LIMIT 1"
        );
        self.query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Reminder>, Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Reminder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Reminder>, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector {
            filter:
                Filter {
                    kind,
                    status,
                    client_id,
                    property_id,
                },
            sort,
            limit,
        } = by.into_inner();
        let limit = limit.map(Limit::sql);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let kind_idx = kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
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
             FROM reminders \
             WHERE true \
                   {kind_filtering} \
                   {status_filtering} \
                   {client_filtering} \
                   {property_filtering} \
             ORDER BY {ordering}, id \
             {limiting}",
            kind_filtering = kind_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND kind = ${i}::INT2"))
            }),
            status_filtering = status_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND status = ${i}::INT2"))
            }),
            client_filtering = client_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND client_id = ${i}::UUID"))
            }),
            property_filtering =
                property_idx.into_iter().format_with("", |i, f| {
                    f(&format_args!("AND property_id = ${i}::UUID"))
                }),
            ordering = sort.map_or_else(
                || "due_at ASC".to_owned(),
                |s| {
                    let column = match s.field {
                        SortField::DueAt => "due_at",
                        SortField::CreatedAt => "created_at",
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

impl<C> Database<Insert<Reminder>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Reminder>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reminder): Insert<Reminder>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(reminder))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Reminder>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(reminder): Update<Reminder>,
    ) -> Result<Self::Ok, Self::Err> {
        let Reminder {
            id,
            title,
            description,
            due_at,
            kind,
            priority,
            status,
            client_id,
            property_id,
            created_at,
        } = reminder;

        const SQL: &str = "\
            INSERT INTO reminders (\
                id, title, description, due_at, kind, priority, status, \
                client_id, property_id, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::TEXT, $4::TIMESTAMPTZ, \
                $5::INT2, $6::INT2, $7::INT2, \
                $8::UUID, $9::UUID, $10::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                due_at = EXCLUDED.due_at, \
                kind = EXCLUDED.kind, \
                priority = EXCLUDED.priority, \
                status = EXCLUDED.status, \
                client_id = EXCLUDED.client_id, \
                property_id = EXCLUDED.property_id, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &due_at,
                &kind,
                &priority,
                &status,
                &client_id,
                &property_id,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
