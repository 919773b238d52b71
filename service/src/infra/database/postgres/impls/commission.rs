//! [`Commission`]-related [`Database`] implementations.

use common::{
    list::Limit,
    operations::{By, Insert, Select, Update},
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{commission, Commission},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::commission::list::{Filter, Selector, SortField},
};

impl_by_id!(Commission, commission::Id, "commissions");

/// Columns of the `commissions` table.
const COLUMNS: &str = "\
    id, property_id, client_id, deal, \
    deal_value, rate, amount, status, \
    closing_date, payment_date, notes, created_at";

/// Builds a [`Commission`] out of the provided `commissions` table [`Row`].
fn from_row(row: &Row) -> Commission {
    Commission {
        id: row.get("id"),
        property_id: row.get("property_id"),
        client_id: row.get("client_id"),
        deal: row.get("deal"),
        deal_value: row.get("deal_value"),
        rate: row.get("rate"),
        amount: row.get("amount"),
        status: row.get("status"),
        closing_date: row.get("closing_date"),
        payment_date: row.get("payment_date"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Commission>, commission::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Commission>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Commission>, commission::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: commission::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM commissions \
             WHERE id = $1::UUID \
             LIMIT 1"
        );
        self.query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Commission>, Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Commission>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Commission>, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector {
            filter:
                Filter {
                    property_id,
                    client_id,
                },
            sort,
            limit,
        } = by.into_inner();
        let limit = limit.map(Limit::sql);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let property_idx = property_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let client_idx = client_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let limit_idx = limit.as_ref().map(|l| {
            ps.push(l);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM commissions \
             WHERE true \
                   {property_filtering} \
                   {client_filtering} \
             ORDER BY {ordering}, id \
             {limiting}",
            property_filtering =
                property_idx.into_iter().format_with("", |i, f| {
                    f(&format_args!("AND property_id = ${i}::UUID"))
                }),
            client_filtering = client_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND client_id = ${i}::UUID"))
            }),
            ordering = sort.map_or_else(
                || "created_at DESC".to_owned(),
                |s| {
                    let column = match s.field {
                        SortField::CreatedAt => "created_at",
                        SortField::ClosingDate => "closing_date",
                        SortField::DealValue => "deal_value",
                    };
                    format!("{column} {} NULLS LAST", s.order.sql())
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

impl<C> Database<Insert<Commission>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Commission>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(commission): Insert<Commission>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(commission))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Commission>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(commission): Update<Commission>,
    ) -> Result<Self::Ok, Self::Err> {
        let Commission {
            id,
            property_id,
            client_id,
            deal,
            deal_value,
            rate,
            amount,
            status,
            closing_date,
            payment_date,
            notes,
            created_at,
        } = commission;

        const SQL: &str = "\
            INSERT INTO commissions (\
                id, property_id, client_id, deal, \
                deal_value, rate, amount, status, \
                closing_date, payment_date, notes, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::INT2, \
                $5::NUMERIC, $6::NUMERIC, $7::NUMERIC, $8::INT2, \
                $9::DATE, $10::DATE, $11::TEXT, $12::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET property_id = EXCLUDED.property_id, \
                client_id = EXCLUDED.client_id, \
                deal = EXCLUDED.deal, \
                deal_value = EXCLUDED.deal_value, \
                rate = EXCLUDED.rate, \
                amount = EXCLUDED.amount, \
                status = EXCLUDED.status, \
                closing_date = EXCLUDED.closing_date, \
                payment_date = EXCLUDED.payment_date, \
                notes = EXCLUDED.notes, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &client_id,
                &deal,
                &deal_value,
                &rate,
                &amount,
                &status,
                &closing_date,
                &payment_date,
                &notes,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
