//! Map view of [`Property`] entities.

use crate::domain::{property, Property};

use super::Filter;

/// [`Property`]s placed on a map.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    /// [`Property`]s having coordinates.
    pub properties: Vec<Property>,

    /// [`Center`] of the map.
    pub center: Center,
}

impl Map {
    /// Places the provided [`Property`]s matching the [`MapFilter`] on a
    /// [`Map`].
    ///
    /// [`Property`]s without both coordinates set are left out.
    #[must_use]
    pub fn of(
        properties: impl IntoIterator<Item = Property>,
        filter: &MapFilter,
    ) -> Self {
        let properties = properties
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect::<Vec<_>>();
        let center = Center::of(&properties);
        Self { properties, center }
    }
}

/// Geographical point the map is centered at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Center {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl Default for Center {
    /// New York City.
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.0060,
        }
    }
}

impl Center {
    /// Calculates the midpoint of the bounding box of the provided
    /// [`Property`]s.
    ///
    /// [`Center::default()`] is returned if none of them has coordinates.
    #[must_use]
    pub fn of<'a>(properties: impl IntoIterator<Item = &'a Property>) -> Self {
        let bbox = properties
            .into_iter()
            .filter_map(Property::coordinates)
            .map(|(lat, lng)| (f64::from(lat), f64::from(lng)))
            .fold(None, |bbox: Option<[f64; 4]>, (lat, lng)| {
                Some(match bbox {
                    None => [lat, lat, lng, lng],
                    Some([min_lat, max_lat, min_lng, max_lng]) => [
                        min_lat.min(lat),
                        max_lat.max(lat),
                        min_lng.min(lng),
                        max_lng.max(lng),
                    ],
                })
            });
        bbox.map_or_else(Self::default, |[min_lat, max_lat, min_lng, max_lng]| {
            Self {
                latitude: (min_lat + max_lat) / 2.0,
                longitude: (min_lng + max_lng) / 2.0,
            }
        })
    }
}

/// [`Filter`] of [`Property`] entities placed on a [`Map`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MapFilter {
    /// [`property::Status`] to match, if any.
    pub status: Option<property::Status>,

    /// [`property::ListingKind`] to match, if any.
    pub listing: Option<property::ListingKind>,
}

impl Filter<Property> for MapFilter {
    fn matches(&self, p: &Property) -> bool {
        p.coordinates().is_some()
            && self.status.map_or(true, |s| s == p.status)
            && self.listing.map_or(true, |l| l == p.listing)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{property, Property},
        view::fixture,
    };

    use super::{Center, Map, MapFilter};

    fn located(lat: f64, lng: f64) -> Property {
        let mut p = fixture::property("Pin");
        p.latitude = property::Latitude::new(lat);
        p.longitude = property::Longitude::new(lng);
        p
    }

    #[test]
    fn default_center() {
        assert_eq!(
            Center::of(&[]),
            Center {
                latitude: 40.7128,
                longitude: -74.0060,
            },
        );
        assert_eq!(
            Center::of(&[fixture::property("Nowhere")]),
            Center::default(),
        );
    }

    #[test]
    fn center_is_bounding_box_midpoint() {
        let center = Center::of(&[
            located(10.0, 20.0),
            located(30.0, -40.0),
            located(20.0, 0.0),
        ]);

        assert_eq!(
            center,
            Center {
                latitude: 20.0,
                longitude: -10.0,
            },
        );
    }

    #[test]
    fn leaves_out_unlocated_properties() {
        let pinned = located(1.0, 2.0);
        let mut rented = located(1.0, 1.0);
        rented.status = property::Status::Rented;

        let map = Map::of(
            [
                pinned.clone(),
                located(0.0, 2.0),
                fixture::property("Nowhere"),
                rented,
            ],
            &MapFilter {
                status: Some(property::Status::Available),
                listing: None,
            },
        );

        assert_eq!(map.properties, [pinned]);
        assert_eq!(
            map.center,
            Center {
                latitude: 1.0,
                longitude: 2.0,
            },
        );
    }
}
