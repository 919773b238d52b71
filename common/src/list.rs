//! Definitions for selecting ordered lists of entities.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};

/// Order of a [`Sort`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    #[default]
    Asc,

    /// Descending order.
    Desc,
}

impl Order {
    /// Returns the SQL keyword of this [`Order`].
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort key of a list: a field `F` and its [`Order`].
///
/// Textually represented as the field name, optionally prefixed with `-` for
/// the [`Order::Desc`]ending order (`-created_at`, for example).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sort<F> {
    /// Field to sort by.
    pub field: F,

    /// [`Order`] to sort in.
    pub order: Order,
}

impl<F> Sort<F> {
    /// Creates a new ascending [`Sort`] by the provided `field`.
    #[must_use]
    pub const fn asc(field: F) -> Self {
        Self {
            field,
            order: Order::Asc,
        }
    }

    /// Creates a new descending [`Sort`] by the provided `field`.
    #[must_use]
    pub const fn desc(field: F) -> Self {
        Self {
            field,
            order: Order::Desc,
        }
    }
}

impl<F: fmt::Display> fmt::Display for Sort<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            Order::Asc => write!(f, "{}", self.field),
            Order::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// Error of parsing a [`Sort`] from a string.
#[derive(Clone, Debug, Display, Error)]
#[display("unknown sort field: `{field}`")]
pub struct SortParseError {
    /// Unrecognized field name.
    pub field: String,
}

impl<F: FromStr> FromStr for Sort<F> {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (order, field) = match s.strip_prefix('-') {
            Some(field) => (Order::Desc, field),
            None => (Order::Asc, s),
        };
        let field = F::from_str(field).map_err(|_| SortParseError {
            field: field.to_owned(),
        })?;
        Ok(Self { field, order })
    }
}

/// Selector of an ordered list of entities.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Selector<F, S> {
    /// Filter the entities should match.
    pub filter: F,

    /// [`Sort`] to order the entities by.
    pub sort: S,

    /// Maximum number of entities to select, if any.
    pub limit: Option<Limit>,
}

impl<F: Default, S: Default> Default for Selector<F, S> {
    fn default() -> Self {
        Self {
            filter: F::default(),
            sort: S::default(),
            limit: None,
        }
    }
}

/// Maximum number of entities in a list.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Limit(u16);

impl Limit {
    /// Upper bound of a [`Limit`].
    pub const MAX: Self = Self(1000);

    /// Creates a new [`Limit`] clamping it to the [`Limit::MAX`].
    #[must_use]
    pub fn new(limit: u16) -> Self {
        Self(limit.min(Self::MAX.0))
    }

    /// Returns this [`Limit`] as a [`usize`].
    #[must_use]
    pub fn get(self) -> usize {
        self.0.into()
    }

    /// Returns this [`Limit`] as an SQL `LIMIT` value.
    #[must_use]
    pub fn sql(self) -> i64 {
        self.0.into()
    }
}

impl TryFrom<i32> for Limit {
    type Error = &'static str;

    /// Clamps the provided `limit` to the [`Limit::MAX`].
    ///
    /// # Errors
    ///
    /// If the provided `limit` is negative.
    fn try_from(limit: i32) -> Result<Self, Self::Error> {
        if limit < 0 {
            return Err("`Limit` must not be negative");
        }
        Ok(Self::new(u16::try_from(limit).unwrap_or(u16::MAX)))
    }
}

#[cfg(test)]
mod spec {
    use strum::{Display, EnumString};

    use super::{Limit, Order, Sort};

    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
    #[strum(serialize_all = "snake_case")]
    enum Field {
        CreatedAt,
        DueDate,
    }

    #[test]
    fn parses_sort_key() {
        assert_eq!(
            "-due_date".parse::<Sort<Field>>().unwrap(),
            Sort::desc(Field::DueDate),
        );
        assert_eq!(
            "created_at".parse::<Sort<Field>>().unwrap(),
            Sort::asc(Field::CreatedAt),
        );

        let err = "-deadline".parse::<Sort<Field>>().unwrap_err();
        assert_eq!(err.field, "deadline");
        assert!("--due_date".parse::<Sort<Field>>().is_err());
        assert!("".parse::<Sort<Field>>().is_err());
    }

    #[test]
    fn displays_sort_key() {
        assert_eq!(Sort::desc(Field::CreatedAt).to_string(), "-created_at");
        assert_eq!(Sort::asc(Field::DueDate).to_string(), "due_date");
        assert_eq!(Order::Desc.sql(), "DESC");
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(Limit::new(5).get(), 5);
        assert_eq!(Limit::new(5000), Limit::MAX);
        assert!(Limit::try_from(-1).is_err());
        assert_eq!(Limit::try_from(10).unwrap().sql(), 10);
    }

    #[test]
    fn clamps_limits_beyond_u16() {
        assert_eq!(Limit::try_from(70_000), Ok(Limit::MAX));
        assert_eq!(Limit::try_from(i32::MAX), Ok(Limit::MAX));
        assert_eq!(Limit::try_from(0).unwrap().get(), 0);
        assert!(Limit::try_from(i32::MIN).is_err());
    }
}
