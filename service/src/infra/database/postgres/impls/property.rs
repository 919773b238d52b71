//! [`Property`]-related [`Database`] implementations.

use common::{
    list::Limit,
    operations::{By, Insert, Select, Update},
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::property::list::{Filter, Selector, SortField},
};

impl_by_id!(Property, property::Id, "properties");

/// Columns of the `properties` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, title, description, address, city, zip_code, \
    kind, listing, status, price, \
    bedrooms, bathrooms, area_sqft, \
    features, images, latitude, longitude, \
    owner_id, commission_rate, contract_end_date, \
    created_at";

/// Builds a [`Property`] out of the provided `properties` table [`Row`].
///
/// [`Property::portal_listings`] are left empty.
fn from_row(row: &Row) -> Property {
    Property {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        address: row.get("address"),
        city: row.get("city"),
        zip_code: row.get("zip_code"),
        kind: row.get("kind"),
        listing: row.get("listing"),
        status: row.get("status"),
        price: row.get("price"),
        bedrooms: row
            .get::<_, Option<i32>>("bedrooms")
            .map(u16::try_from)
            .transpose()
            .expect("`bedrooms` overflow"),
        bathrooms: row
            .get::<_, Option<i32>>("bathrooms")
            .map(u16::try_from)
            .transpose()
            .expect("`bathrooms` overflow"),
        area_sqft: row
            .get::<_, Option<i64>>("area_sqft")
            .map(u32::try_from)
            .transpose()
            .expect("`area_sqft` overflow"),
        features: row.get("features"),
        images: row.get("images"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        owner_id: row.get("owner_id"),
        commission_rate: row.get("commission_rate"),
        contract_end_date: row.get("contract_end_date"),
        portal_listings: vec![],
        created_at: row.get("created_at"),
    }
}

/// Returns the `properties` table column to sort by the provided
/// [`SortField`].
const fn column(field: SortField) -> &'static str {
    match field {
        SortField::CreatedAt => "created_at",
        SortField::Price => "price",
        SortField::Title => "title",
        SortField::ContractEndDate => "contract_end_date",
    }
}

impl<C> Postgres<C>
where
    C: Connection,
{
    /// Fills [`Property::portal_listings`] of the provided [`Property`]s.
    async fn attach_portal_listings(
        &self,
        properties: &mut [Property],
    ) -> Result<(), Traced<database::Error>> {
        if properties.is_empty() {
            return Ok(());
        }
        let ids = properties.iter().map(|p| p.id).collect::<Vec<_>>();

        const SQL: &str = "\
            SELECT property_id, portal, url, listed_on \
            FROM property_portal_listings \
            WHERE property_id = ANY($1::UUID[]) \
            ORDER BY property_id, position";
        let mut listings = self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                (
                    row.get::<_, property::Id>("property_id"),
                    property::PortalListing {
                        portal: row.get("portal"),
                        url: row.get("url"),
                        listed_on: row.get("listed_on"),
                    },
                )
            })
            .into_group_map();

        for p in properties {
            p.portal_listings = listings.remove(&p.id).unwrap_or_default();
        }
        Ok(())
    }
}

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE id = $1::UUID \
             LIMIT 1"
        );
        let Some(row) = self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let mut property = [from_row(&row)];
        self.attach_portal_listings(&mut property)
            .await
            .map_err(tracerr::wrap!())?;
        let [property] = property;
        Ok(Some(property))
    }
}

impl<C> Database<Select<By<Vec<Property>, Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector {
            filter:
                Filter {
                    owner_id,
                    status,
                    contract_ends_within,
                },
            sort,
            limit,
        } = by.into_inner();
        let limit = limit.map(Limit::sql);
        let (ends_from, ends_to) = contract_ends_within.unzip();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let owner_idx = owner_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let ends_idx = ends_from.as_ref().zip(ends_to.as_ref()).map(|(f, t)| {
            ps.push(f);
            ps.push(t);
            (ps.len() - 1, ps.len())
        });
        let limit_idx = limit.as_ref().map(|l| {
            ps.push(l);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE true \
                   {owner_filtering} \
                   {status_filtering} \
                   {contract_filtering} \
             ORDER BY {ordering}, id \
             {limiting}",
            owner_filtering = owner_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND owner_id = ${i}::UUID"))
            }),
            status_filtering = status_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND status = ${i}::INT2"))
            }),
            contract_filtering =
                ends_idx.into_iter().format_with("", |(from, to), f| {
                    f(&format_args!(
                        "AND contract_end_date BETWEEN ${from}::DATE \
                                                   AND ${to}::DATE"
                    ))
                }),
            ordering = sort.map_or_else(
                || "created_at DESC".to_owned(),
                |s| format!("{} {}", column(s.field), s.order.sql()),
            ),
            limiting = limit_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("LIMIT ${i}::INT8"))
            }),
        );
        let mut properties = self
            .query(sql.as_str(), ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect::<Vec<_>>();

        self.attach_portal_listings(&mut properties)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(properties)
    }
}

impl<C> Database<Insert<Property>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            title,
            description,
            address,
            city,
            zip_code,
            kind,
            listing,
            status,
            price,
            bedrooms,
            bathrooms,
            area_sqft,
            features,
            images,
            latitude,
            longitude,
            owner_id,
            commission_rate,
            contract_end_date,
            portal_listings,
            created_at,
        } = property;

        let bedrooms = bedrooms.map(i32::from);
        let bathrooms = bathrooms.map(i32::from);
        let area_sqft = area_sqft.map(i64::from);

        const SQL: &str = "\
            INSERT INTO properties (\
                id, title, description, address, city, zip_code, \
                kind, listing, status, price, \
                bedrooms, bathrooms, area_sqft, \
                features, images, latitude, longitude, \
                owner_id, commission_rate, contract_end_date, \
                created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::TEXT, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, \
                $7::INT2, $8::INT2, $9::INT2, $10::NUMERIC, \
                $11::INT4, $12::INT4, $13::INT8, \
                $14::VARCHAR[], $15::VARCHAR[], \
                $16::FLOAT8, $17::FLOAT8, \
                $18::UUID, $19::NUMERIC, $20::DATE, \
                $21::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                address = EXCLUDED.address, \
                city = EXCLUDED.city, \
                zip_code = EXCLUDED.zip_code, \
                kind = EXCLUDED.kind, \
                listing = EXCLUDED.listing, \
                status = EXCLUDED.status, \
                price = EXCLUDED.price, \
                bedrooms = EXCLUDED.bedrooms, \
                bathrooms = EXCLUDED.bathrooms, \
                area_sqft = EXCLUDED.area_sqft, \
                features = EXCLUDED.features, \
                images = EXCLUDED.images, \
                latitude = EXCLUDED.latitude, \
                longitude = EXCLUDED.longitude, \
                owner_id = EXCLUDED.owner_id, \
                commission_rate = EXCLUDED.commission_rate, \
                contract_end_date = EXCLUDED.contract_end_date, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &address,
                &city,
                &zip_code,
                &kind,
                &listing,
                &status,
                &price,
                &bedrooms,
                &bathrooms,
                &area_sqft,
                &features,
                &images,
                &latitude,
                &longitude,
                &owner_id,
                &commission_rate,
                &contract_end_date,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())?;

        const DELETE_LISTINGS_SQL: &str = "\
            DELETE FROM property_portal_listings \
            WHERE property_id = $1::UUID";
        self.exec(DELETE_LISTINGS_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?;

        const INSERT_LISTING_SQL: &str = "\
            INSERT INTO property_portal_listings (\
                property_id, position, portal, url, listed_on \
            ) VALUES (\
                $1::UUID, $2::INT4, $3::VARCHAR, $4::VARCHAR, $5::DATE \
            )";
        for (position, listing) in (0_i32..).zip(&portal_listings) {
            self.exec(
                INSERT_LISTING_SQL,
                &[
                    &id,
                    &position,
                    &listing.portal,
                    &listing.url,
                    &listing.listed_on,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?;
        }
        Ok(())
    }
}

