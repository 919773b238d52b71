//! Macros for defining validated text types.

/// Macro for defining a validated text newtype.
///
/// The defined type holds a trimmed string of at most `max` characters,
/// which must be non-empty unless `empty` is specified.
///
/// # Example
///
/// ```rust
/// # use common::define_text;
/// define_text! {
///     #[doc = "Title of a listing."]
///     struct Title(max = 16);
/// }
///
/// define_text! {
///     #[doc = "Notes of a listing."]
///     struct Notes(max = 16, empty);
/// }
///
/// assert_eq!(Title::new("  Loft ").unwrap().as_ref(), "Loft");
/// assert!(Title::new("   ").is_none());
/// assert!(Title::new("x".repeat(17)).is_none());
/// assert_eq!(Notes::new("").unwrap().as_ref(), "");
/// ```
#[macro_export]
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        struct $name:ident(max = $max:literal);
    ) => {
        $crate::define_text!(@impl #[doc = $doc] $name, $max, false);
    };

    (
        #[doc = $doc:literal]
        struct $name:ident(max = $max:literal, empty);
    ) => {
        $crate::define_text!(@impl #[doc = $doc] $name, $max, true);
        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self(::std::string::String::new())
            }
        }
    };

    (@impl #[doc = $doc:literal] $name:ident, $max:literal, $empty:literal) => {
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[doc = $doc]
        pub struct $name(::std::string::String);

        impl $name {
            /// Maximum number of characters allowed.
            pub const MAX_LEN: usize = $max;

            /// Creates a new value out of the provided text, trimming it.
            ///
            /// [`None`] is returned if the trimmed text is invalid.
            #[must_use]
            pub fn new(
                text: impl ::core::convert::Into<::std::string::String>,
            ) -> ::core::option::Option<Self> {
                let text = text.into();
                let trimmed = text.trim();
                if !Self::check(trimmed) {
                    return None;
                }
                Some(Self(if trimmed.len() == text.len() {
                    text
                } else {
                    trimmed.to_owned()
                }))
            }

            /// Checks whether the provided text is valid as is.
            #[must_use]
            pub fn check(text: impl ::core::convert::AsRef<str>) -> bool {
                let text = text.as_ref();
                text.trim() == text
                    && ($empty || !text.is_empty())
                    && text.chars().count() <= Self::MAX_LEN
            }

            /// Returns the text of this value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(::core::concat!(
                    "invalid `",
                    ::core::stringify!($name),
                    "`",
                ))
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(TEXT, VARCHAR);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &'a [u8],
            ) -> Result<
                Self,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                <::std::string::String as
                    $crate::private::postgres_types::FromSql<'a>>::from_sql(
                    ty, raw,
                )
                .map(Self)
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(TEXT, VARCHAR);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                <&str as $crate::private::postgres_types::ToSql>::to_sql(
                    &self.0.as_str(),
                    ty,
                    w,
                )
            }
        }
    };
}

#[cfg(test)]
mod spec {
    crate::define_text! {
        #[doc = "Short text."]
        struct Short(max = 5);
    }

    crate::define_text! {
        #[doc = "Optional text."]
        struct Optional(max = 5, empty);
    }

    #[test]
    fn trims_input() {
        assert_eq!(Short::new(" abc\n").unwrap().as_str(), "abc");
        assert_eq!(Short::new("abc").unwrap().to_string(), "abc");
    }

    #[test]
    fn checks_length_in_chars() {
        assert!(Short::new("абвгд").is_some());
        assert!(Short::new("абвгде").is_none());
    }

    #[test]
    fn empty_text() {
        assert!(Short::new("").is_none());
        assert!(Short::new("  ").is_none());
        assert_eq!(Optional::new("  ").unwrap(), Optional::default());
    }

    #[test]
    fn check_rejects_untrimmed() {
        assert!(Short::check("abc"));
        assert!(!Short::check(" abc"));
    }
}
