//! User interactions as values. The page posts a [`UiEvent`] for every click,
//! keystroke and input change; [`Directory::dispatch`] applies it and reports
//! which parts of the page changed.

use crate::directory::Directory;
use crate::map::MapView;
use crate::view::{PanelView, ProvinceListView, SearchView};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UiEvent {
    /// Page finished loading
    Ready,
    ProvinceSelected(String),
    SearchInput(String),
    SearchResultSelected(String),
    /// Row picked from a province member list
    ClubSelected(String),
    MarkerClicked(String),
    Locate(String),
    ToggleSidebar,
    CloseSidebar,
    KeyDown(String),
}

/// Page regions touched by one event. `None` means leave as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Update {
    pub panel: Option<PanelView>,
    pub search: Option<SearchView>,
    pub province_list: Option<ProvinceListView>,
    pub clear_search_input: bool,
    pub sidebar_open: bool,
    pub alert: Option<String>,
}

impl<M: MapView> Directory<M> {
    pub fn dispatch(&mut self, event: UiEvent) -> Update {
        debug!(?event, "Dispatching UI event");
        let mut update = Update::default();

        match event {
            UiEvent::Ready => {
                // A fresh page has an empty marker layer
                let filter = self.filter().clone();
                self.render_markers(&filter);
                update.province_list = Some(self.province_list());
                update.alert = self.take_alert();
            }
            UiEvent::ProvinceSelected(value) => {
                let members = self.select_province(&value);
                update.panel = Some(PanelView::ProvinceClubs(members));
                update.province_list = Some(self.province_list());
            }
            UiEvent::SearchInput(text) => {
                update.search = Some(self.search(&text));
            }
            UiEvent::SearchResultSelected(id) => {
                if let Some(detail) = self.select_club(&id) {
                    update.panel = Some(PanelView::Detail(detail));
                    update.search = Some(SearchView::Cleared);
                    update.clear_search_input = true;
                }
            }
            UiEvent::ClubSelected(id) => {
                update.panel = self.select_club(&id).map(PanelView::Detail);
            }
            UiEvent::MarkerClicked(id) => {
                update.panel = self.show_detail(&id).map(PanelView::Detail);
            }
            UiEvent::Locate(id) => {
                self.locate(&id);
            }
            UiEvent::ToggleSidebar => self.open_sidebar(),
            UiEvent::CloseSidebar => self.close_sidebar(),
            UiEvent::KeyDown(key) => {
                if key == "Escape" && self.sidebar_open() {
                    self.close_sidebar();
                }
            }
        }

        update.sidebar_open = self.sidebar_open();
        update
    }
}
