//! Composable filter over lectures.
//!
//! A [`LectureSpecification`] is a list of independent [`LectureClause`]s
//! joined by AND. It is a plain value: the Postgres repository folds it into
//! a `WHERE` clause, the in-memory repository calls [`LectureSpecification::matches`].
//! Both must agree on every clause, so each clause documents its exact rule.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;

use sno_models::{Lecture, LectureFilterParams, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LectureClause {
    /// Case-insensitive substring of the title.
    TitleContains(String),
    /// Exact lecturer.
    LecturerIs(UserId),
    /// Lecture date at or after the instant. Undated lectures never match.
    DateFrom(DateTime<Utc>),
    /// Lecture date strictly before the instant. Undated lectures never match.
    DateBefore(DateTime<Utc>),
    /// Lecture has a date at all.
    Dated,
}

impl LectureClause {
    pub fn matches(&self, lecture: &Lecture) -> bool {
        match self {
            LectureClause::TitleContains(needle) => lecture
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            LectureClause::LecturerIs(id) => lecture.lecturer_id == Some(*id),
            LectureClause::DateFrom(from) => lecture.date.is_some_and(|d| d >= *from),
            LectureClause::DateBefore(until) => lecture.date.is_some_and(|d| d < *until),
            LectureClause::Dated => lecture.date.is_some(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureSpecification {
    clauses: Vec<LectureClause>,
}

impl LectureSpecification {
    /// Matches every lecture.
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(mut self, clause: LectureClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[LectureClause] {
        &self.clauses
    }

    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, lecture: &Lecture) -> bool {
        self.clauses.iter().all(|clause| clause.matches(lecture))
    }
}

/// Parsed filter criteria. Every field is optional and an absent field
/// imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureCriteria {
    pub title: Option<String>,
    pub lecturer_id: Option<UserId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl LectureCriteria {
    /// Lenient parse of the raw query. A value that does not parse drops
    /// only its own criterion.
    pub fn from_params(params: &LectureFilterParams) -> Self {
        let title = params
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let lecturer_id = params
            .lecturer_id
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match raw.parse::<UserId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    debug!(value = %raw, error = %e, "Ignoring unparseable lecturer id");
                    None
                }
            });

        Self {
            title,
            lecturer_id,
            start_date: parse_day("start_date", params.start_date.as_deref()),
            end_date: parse_day("end_date", params.end_date.as_deref()),
        }
    }
}

fn parse_day(name: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(day) => Some(day),
        Err(e) => {
            debug!(criterion = name, value = %raw, error = %e, "Ignoring unparseable date");
            None
        }
    }
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Builds the conjunction of every present criterion.
///
/// The end day is inclusive, so the upper bound is midnight of the next day
/// (exclusive). For the last representable day there is no next day, so
/// only undated lectures are excluded.
pub fn build(criteria: &LectureCriteria) -> LectureSpecification {
    let mut spec = LectureSpecification::all();

    if let Some(title) = &criteria.title {
        spec = spec.and(LectureClause::TitleContains(title.clone()));
    }
    if let Some(lecturer_id) = criteria.lecturer_id {
        spec = spec.and(LectureClause::LecturerIs(lecturer_id));
    }
    if let Some(start) = criteria.start_date {
        spec = spec.and(LectureClause::DateFrom(start_of(start)));
    }
    if let Some(end) = criteria.end_date {
        match end.succ_opt() {
            Some(next_day) => spec = spec.and(LectureClause::DateBefore(start_of(next_day))),
            None => spec = spec.and(LectureClause::Dated),
        }
    }

    spec
}
