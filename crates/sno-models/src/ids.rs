//! Strongly-typed identifiers.
//!
//! Every table uses `BIGSERIAL` keys; wrapping them keeps a `CourseId` from
//! being passed where a `LectureId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
            ToSchema,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = i64, example = 1)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// User (and lecturer) identifier.
    UserId
);

define_id!(
    /// Lecture identifier.
    LectureId
);

define_id!(
    /// Course identifier.
    CourseId
);

define_id!(
    /// Uploaded file identifier.
    FileId
);

define_id!(
    /// Forum identifier.
    ForumId
);

define_id!(
    /// Lecture summary identifier.
    SummaryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&LectureId(42)).unwrap(), "42");
        let id: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(id, UserId(7));
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!(" 12 ".parse::<CourseId>().unwrap(), CourseId(12));
        assert!("twelve".parse::<CourseId>().is_err());
    }

    #[test]
    fn test_debug_names_the_type() {
        assert_eq!(format!("{:?}", ForumId(3)), "ForumId(3)");
        assert_eq!(LectureId(9).to_string(), "9");
    }
}
