use crate::constants::MIN_QUERY_CHARS;
use crate::types::Club;

/// A normalized free-text query. Only queries of at least
/// [`MIN_QUERY_CHARS`] characters exist; shorter input clears the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        (needle.chars().count() >= MIN_QUERY_CHARS).then_some(Self(needle))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match on name, school, city or any tag.
    pub fn matches(&self, club: &Club) -> bool {
        let needle = self.0.as_str();
        contains(&club.name, needle)
            || contains(&club.school, needle)
            || contains(&club.city, needle)
            || club.tags.iter().any(|tag| contains(tag, needle))
    }

    /// Matches in collection order, computed as the caller pulls them.
    pub fn filter<'a>(&'a self, clubs: &'a [Club]) -> impl Iterator<Item = &'a Club> + 'a {
        clubs.iter().filter(move |club| self.matches(club))
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
