//! Mentor profiles and the filtered mentor search.

use catalyst_entity::{Collection, EntityResult, EntityState, KindSpec, Page};
use serde::{Deserialize, Serialize};

use crate::seed;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image_url: String,
}

impl EntityState for Mentor {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

pub const MENTORS: KindSpec<Mentor> =
    KindSpec::new("mentor", "mentors", Mentor::default).with_seed(seed::mentors);

/// Partial update of a mentor profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Search parameters for browsing mentors.
///
/// The term matches case-insensitively as a substring of the name, title,
/// company or any specialty. The specialties filter keeps mentors carrying
/// at least one of the given tags (exact match). A mentor must satisfy both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorQuery {
    pub search_term: Option<String>,
    pub specialties: Vec<String>,
}

impl MentorQuery {
    /// Query matching `term` only.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            specialties: Vec::new(),
        }
    }

    pub fn with_specialty(mut self, tag: impl Into<String>) -> Self {
        self.specialties.push(tag.into());
        self
    }

    /// Add the tags of a comma-separated list, skipping blank entries.
    pub fn with_specialties_csv(mut self, csv: &str) -> Self {
        self.specialties.extend(
            csv.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// `true` when neither a term nor specialties are set.
    pub fn is_unfiltered(&self) -> bool {
        self.matcher().is_unfiltered()
    }

    /// Predicate for this query, with the term normalized once.
    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            term: self
                .search_term
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_lowercase),
            specialties: &self.specialties,
        }
    }
}

/// A [`MentorQuery`] ready to test mentors. Blank terms count as absent.
struct Matcher<'q> {
    term: Option<String>,
    specialties: &'q [String],
}

impl Matcher<'_> {
    fn is_unfiltered(&self) -> bool {
        self.term.is_none() && self.specialties.is_empty()
    }

    fn matches(&self, mentor: &Mentor) -> bool {
        self.matches_term(mentor) && self.matches_specialties(mentor)
    }

    fn matches_term(&self, mentor: &Mentor) -> bool {
        let Some(term) = self.term.as_deref() else {
            return true;
        };
        [&mentor.name, &mentor.title, &mentor.company]
            .into_iter()
            .chain(mentor.specialties.iter())
            .any(|field| field.to_lowercase().contains(term))
    }

    fn matches_specialties(&self, mentor: &Mentor) -> bool {
        self.specialties.is_empty()
            || self.specialties.iter().any(|tag| mentor.specialties.contains(tag))
    }
}

/// Filtered, cursor-paged mentor search.
///
/// The cursor is a mentor id from a previous page of the *same* query;
/// reusing it with different filters gives well-formed but meaningless
/// pages.
pub fn search_mentors(
    mentors: &Collection<Mentor>,
    query: &MentorQuery,
    cursor: Option<&str>,
    limit: usize,
) -> EntityResult<Page<Mentor>> {
    let matcher = query.matcher();
    mentors.scan_filter(cursor, limit, |mentor| matcher.matches(mentor))
}
