//! Plain data handed to the rendering boundary. Nothing here knows about
//! markup.

use crate::constants::{ALL_FILTER, ALL_LABEL, EMPTY_PROVINCE, NO_SEARCH_MATCH, OTHER_FILTER, OTHER_LABEL};
use crate::types::{Club, LatLng};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkView {
    pub kind: String,
    pub url: String,
    /// Only http(s) and mailto URLs become anchors
    pub navigable: bool,
}

impl LinkView {
    fn new(kind: &str, url: &str) -> Self {
        let lower = url.trim_start().to_ascii_lowercase();
        let navigable = ["http://", "https://", "mailto:"].iter().any(|s| lower.starts_with(s));
        Self { kind: kind.to_string(), url: url.to_string(), navigable }
    }
}

/// Everything the detail panel shows for one club.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub club_id: String,
    pub logo_url: Option<String>,
    pub name: String,
    pub school: String,
    pub city: String,
    /// Shown verbatim; an absent province renders as empty
    pub province: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub tags: Vec<String>,
    pub links: Vec<LinkView>,
    /// Target of the locate action, absent when the club has no coordinates
    pub locate: Option<LatLng>,
}

impl From<&Club> for DetailView {
    fn from(club: &Club) -> Self {
        Self {
            club_id: club.id.clone(),
            logo_url: club.logo().map(str::to_string),
            name: club.name.clone(),
            school: club.school.clone(),
            city: club.city.clone(),
            province: club.province.clone().unwrap_or_default(),
            short_description: club.short_description.clone().filter(|s| !s.is_empty()),
            long_description: club.long_description.clone().filter(|s| !s.is_empty()),
            tags: club.tags.clone(),
            links: club.external_links.iter().map(|l| LinkView::new(&l.kind, &l.url)).collect(),
            locate: club.coordinates(),
        }
    }
}

/// One selectable row in a search result or a province member list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubRow {
    pub club_id: String,
    pub name: String,
    pub affiliation: String,
    pub logo_url: Option<String>,
}

impl From<&Club> for ClubRow {
    fn from(club: &Club) -> Self {
        Self {
            club_id: club.id.clone(),
            name: club.name.clone(),
            affiliation: club.affiliation(),
            logo_url: club.logo().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum SearchView {
    /// Query too short; the results area is emptied
    Cleared,
    NoMatches,
    Results(Vec<ClubRow>),
}

impl SearchView {
    pub fn rows(&self) -> &[ClubRow] {
        match self {
            SearchView::Results(rows) => rows,
            _ => &[],
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        matches!(self, SearchView::NoMatches).then_some(NO_SEARCH_MATCH)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceEntry {
    pub value: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceListView {
    pub entries: Vec<ProvinceEntry>,
}

impl ProvinceListView {
    /// `all` first, then `provinces` in the given order, then the catch-all.
    pub fn new(provinces: Vec<String>, active: Option<&str>) -> Self {
        let active = active.unwrap_or(ALL_FILTER);
        let entry = |value: &str, label: &str| ProvinceEntry {
            value: value.to_string(),
            label: label.to_string(),
            active: value == active,
        };

        let mut entries = Vec::with_capacity(provinces.len() + 2);
        entries.push(entry(ALL_FILTER, ALL_LABEL));
        entries.extend(
            provinces
                .iter()
                .filter(|p| p.as_str() != ALL_FILTER && p.as_str() != OTHER_FILTER)
                .map(|p| entry(p, p)),
        );
        entries.push(entry(OTHER_FILTER, OTHER_LABEL));
        Self { entries }
    }

    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.value.as_str()).collect()
    }
}

/// Member list shown after a province is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProvinceClubsView {
    Empty,
    Members { title: String, rows: Vec<ClubRow> },
}

impl ProvinceClubsView {
    pub fn new(label: &str, rows: Vec<ClubRow>) -> Self {
        if rows.is_empty() {
            ProvinceClubsView::Empty
        } else {
            ProvinceClubsView::Members { title: format!("{}社团 ({}个)", label, rows.len()), rows }
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ProvinceClubsView::Members { title, .. } => Some(title),
            ProvinceClubsView::Empty => None,
        }
    }

    pub fn rows(&self) -> &[ClubRow] {
        match self {
            ProvinceClubsView::Members { rows, .. } => rows,
            ProvinceClubsView::Empty => &[],
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        matches!(self, ProvinceClubsView::Empty).then_some(EMPTY_PROVINCE)
    }
}

/// Contents of the side panel's main area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelView {
    Detail(DetailView),
    ProvinceClubs(ProvinceClubsView),
}
