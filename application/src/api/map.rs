//! [`Map`]-related definitions.

use juniper::{GraphQLInputObject, GraphQLObject};
use service::view;

use crate::{api, Context};

/// `Property`s placed on a map.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "PropertyMap", context = Context)]
pub struct Map {
    /// `Property`s having both coordinates set.
    pub properties: Vec<api::Property>,

    /// `Center` of the map.
    pub center: Center,
}

impl From<view::Map> for Map {
    fn from(map: view::Map) -> Self {
        Self {
            properties: map.properties.into_iter().map(Into::into).collect(),
            center: map.center.into(),
        }
    }
}

/// Geographical point a map is centered at.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "MapCenter")]
pub struct Center {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl From<view::map::Center> for Center {
    fn from(center: view::map::Center) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
        }
    }
}

/// Filter of `Property`s placed on a map.
#[derive(Clone, Copy, Debug, Default, GraphQLInputObject)]
#[graphql(name = "MapFilter")]
pub struct Filter {
    /// Status the `Property`s should have.
    pub status: Option<api::property::Status>,

    /// Kind of listing the `Property`s should have.
    pub listing: Option<api::property::ListingKind>,
}

impl From<Filter> for view::map::MapFilter {
    fn from(filter: Filter) -> Self {
        Self {
            status: filter.status.map(Into::into),
            listing: filter.listing.map(Into::into),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::view;

    use super::Map;

    #[test]
    fn empty_map_is_centered_at_default() {
        let map = Map::from(view::Map::of(vec![], &Default::default()));

        assert!(map.properties.is_empty());
        assert!((map.center.latitude - 40.7128).abs() < f64::EPSILON);
        assert!((map.center.longitude + 74.0060).abs() < f64::EPSILON);
    }
}
