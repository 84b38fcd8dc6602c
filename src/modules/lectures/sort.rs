//! Ordering of filtered lecture listings.

use std::cmp::Ordering;

use tracing::debug;

use sno_models::Lecture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Date,
}

impl SortKey {
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case is descending, anything else ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LectureSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl LectureSort {
    /// Resolves the requested ordering. An absent key sorts by title in the
    /// requested direction. Keys match exactly (`title`, `date`); anything
    /// else, `DATE` included, falls back to title ascending whatever
    /// direction was asked for.
    pub fn from_params(sort_by: Option<&str>, sort_direction: Option<&str>) -> Self {
        let direction = SortDirection::parse(sort_direction);

        match sort_by.filter(|s| !s.is_empty()) {
            None | Some("title") => Self {
                key: SortKey::Title,
                direction,
            },
            Some("date") => Self {
                key: SortKey::Date,
                direction,
            },
            Some(key) => {
                debug!(sort_by = %key, "Unknown sort key, falling back to title ascending");
                Self::default()
            }
        }
    }

    /// Total order used by in-memory listings. Undated lectures come first
    /// ascending and last descending; ties are broken by ascending id.
    pub fn compare(&self, a: &Lecture, b: &Lecture) -> Ordering {
        let by_key = match self.key {
            SortKey::Title => a.title.cmp(&b.title),
            // None < Some, so undated lectures lead.
            SortKey::Date => a.date.cmp(&b.date),
        };
        let by_key = match self.direction {
            SortDirection::Asc => by_key,
            SortDirection::Desc => by_key.reverse(),
        };
        by_key.then_with(|| a.id.cmp(&b.id))
    }

    pub fn apply(&self, lectures: &mut [Lecture]) {
        lectures.sort_by(|a, b| self.compare(a, b));
    }

    /// `ORDER BY` body matching [`LectureSort::compare`].
    pub fn order_by_sql(&self) -> String {
        let nulls = match self.direction {
            SortDirection::Asc => "NULLS FIRST",
            SortDirection::Desc => "NULLS LAST",
        };
        let column = match self.key {
            // Byte order, same as String::cmp.
            SortKey::Title => "title COLLATE \"C\"",
            SortKey::Date => self.key.column(),
        };
        format!("{column} {} {nulls}, id ASC", self.direction.keyword())
    }
}
