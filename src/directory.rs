//! The directory controller: owns the club collection and all session state,
//! and turns user intent into map operations and panel view-models.

use crate::config::MapConfig;
use crate::constants::LOAD_FAILED_ALERT;
use crate::error::DataLoadError;
use crate::loader::DataSource;
use crate::map::{IconSpec, MapView, MarkerSpec};
use crate::province::{ordered_provinces, ProvinceFilter};
use crate::search::SearchQuery;
use crate::types::{Club, LatLng};
use crate::view::{ClubRow, DetailView, ProvinceClubsView, ProvinceListView, SearchView};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct Directory<M: MapView> {
    /// Read-only once loaded, so sessions over the same load share it
    clubs: Arc<[Club]>,
    filter: ProvinceFilter,
    /// Ids of the clubs currently on the clustering layer
    markers: Vec<String>,
    map: M,
    settings: MapConfig,
    sidebar_open: bool,
    pending_alert: Option<String>,
}

impl<M: MapView> Directory<M> {
    /// Empty directory with the map at its initial view.
    pub fn new(mut map: M, settings: MapConfig) -> Self {
        map.set_view(settings.center, settings.zoom);
        Self {
            clubs: Vec::<Club>::new().into(),
            filter: ProvinceFilter::None,
            markers: Vec::new(),
            map,
            settings,
            sidebar_open: false,
            pending_alert: None,
        }
    }

    /// Directory over an already loaded collection, markers rendered.
    pub fn with_clubs(map: M, settings: MapConfig, clubs: Vec<Club>) -> Self {
        Self::shared(map, settings, clubs.into())
    }

    /// Fresh session over a collection loaded elsewhere.
    pub fn shared(map: M, settings: MapConfig, clubs: Arc<[Club]>) -> Self {
        let mut directory = Self::new(map, settings);
        directory.install(clubs);
        directory
    }

    /// Fetch the collection once. On failure the collection stays empty and a
    /// single alert is queued for the user.
    pub async fn load(&mut self, source: &dyn DataSource) -> Result<usize, DataLoadError> {
        info!("Loading clubs from {}", source.describe());
        match source.fetch().await {
            Ok(clubs) => {
                let count = clubs.len();
                self.install(clubs.into());
                info!("Loaded {} clubs, {} on the map", count, self.markers.len());
                Ok(count)
            }
            Err(e) => {
                error!("Failed to load clubs from {}: {}", source.describe(), e);
                self.install(Vec::<Club>::new().into());
                self.queue_alert(LOAD_FAILED_ALERT);
                Err(e)
            }
        }
    }

    fn install(&mut self, clubs: Arc<[Club]>) {
        self.clubs = clubs;
        self.render_markers(&ProvinceFilter::None);
    }

    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    pub fn shared_clubs(&self) -> Arc<[Club]> {
        Arc::clone(&self.clubs)
    }

    pub fn filter(&self) -> &ProvinceFilter {
        &self.filter
    }

    pub fn marker_ids(&self) -> &[String] {
        &self.markers
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn settings(&self) -> &MapConfig {
        &self.settings
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn find(&self, club_id: &str) -> Option<&Club> {
        self.clubs.iter().find(|c| c.id == club_id)
    }

    /// The queued load-failure alert, handed out at most once.
    pub fn take_alert(&mut self) -> Option<String> {
        self.pending_alert.take()
    }

    pub fn queue_alert(&mut self, message: impl Into<String>) {
        self.pending_alert = Some(message.into());
    }

    /// Replace every marker with the coordinate-bearing clubs that pass
    /// `filter`. Returns the number of markers placed.
    pub fn render_markers(&mut self, filter: &ProvinceFilter) -> usize {
        self.map.clear_markers();
        self.markers.clear();

        for club in self.clubs.iter() {
            let Some(position) = club.coordinates() else {
                continue;
            };
            if !filter.matches(club) {
                continue;
            }

            let icon_url = club.logo().unwrap_or(&self.settings.placeholder_logo);
            self.map.add_marker(MarkerSpec {
                club_id: club.id.clone(),
                position,
                icon: IconSpec::logo(icon_url),
                popup: club.name.clone(),
            });
            self.markers.push(club.id.clone());
        }

        debug!("Rendered {} markers for filter {}", self.markers.len(), filter);
        self.markers.len()
    }

    /// Detail panel for one club; opens the sidebar.
    pub fn show_detail(&mut self, club_id: &str) -> Option<DetailView> {
        let Some(club) = self.find(club_id) else {
            warn!("No club with id {}", club_id);
            return None;
        };
        let view = DetailView::from(club);
        self.sidebar_open = true;
        Some(view)
    }

    /// Re-center the map on a club at the close zoom level. Clubs without
    /// coordinates leave the view as it is.
    pub fn locate(&mut self, club_id: &str) -> Option<LatLng> {
        let target = self.find(club_id)?.coordinates();
        match target {
            Some(center) => {
                self.map.set_view(center, self.settings.locate_zoom);
                Some(center)
            }
            None => {
                debug!("Club {} has no coordinates to locate", club_id);
                None
            }
        }
    }

    /// Detail plus locate, as done when a list or search row is picked.
    pub fn select_club(&mut self, club_id: &str) -> Option<DetailView> {
        let view = self.show_detail(club_id)?;
        self.locate(club_id);
        Some(view)
    }

    pub fn search(&self, raw: &str) -> SearchView {
        let Some(query) = SearchQuery::parse(raw) else {
            return SearchView::Cleared;
        };

        let rows: Vec<ClubRow> = query.filter(&self.clubs).map(ClubRow::from).collect();
        debug!("Search {:?} matched {} clubs", query.as_str(), rows.len());
        if rows.is_empty() {
            SearchView::NoMatches
        } else {
            SearchView::Results(rows)
        }
    }

    pub fn province_list(&self) -> ProvinceListView {
        ProvinceListView::new(ordered_provinces(&self.clubs), self.filter.value())
    }

    /// Members of `filter`, coordinates not required.
    pub fn province_clubs(&self, filter: &ProvinceFilter) -> ProvinceClubsView {
        let rows = self.clubs.iter().filter(|c| filter.matches(c)).map(ClubRow::from).collect();
        ProvinceClubsView::new(filter.label(), rows)
    }

    /// Make `value` the current filter, re-render the markers and list the
    /// members in the opened sidebar.
    pub fn select_province(&mut self, value: &str) -> ProvinceClubsView {
        let filter = ProvinceFilter::from_value(value);
        self.render_markers(&filter);
        self.filter = filter;
        self.sidebar_open = true;
        self.province_clubs(&self.filter)
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }
}
