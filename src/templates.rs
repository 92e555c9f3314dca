//! Rendering boundary: view-models in, escaped HTML out.

use askama::Template;

use crate::config::MapConfig;
use crate::error::Result;
use crate::view::{DetailView, PanelView, ProvinceClubsView, ProvinceListView, SearchView};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub provinces: &'a ProvinceListView,
    /// Serialized map settings, read by the glue script from a data attribute
    pub map_config: String,
    pub sidebar_open: bool,
    /// Sent back with every event so the host can find this page's controller
    pub session_id: &'a str,
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate<'a> {
    pub view: &'a DetailView,
}

#[derive(Template)]
#[template(path = "province_clubs.html")]
pub struct ProvinceClubsTemplate<'a> {
    pub view: &'a ProvinceClubsView,
}

#[derive(Template)]
#[template(path = "province_list.html")]
pub struct ProvinceListTemplate<'a> {
    pub view: &'a ProvinceListView,
}

#[derive(Template)]
#[template(path = "search_results.html")]
pub struct SearchResultsTemplate<'a> {
    pub view: &'a SearchView,
}

pub fn render_index(
    provinces: &ProvinceListView,
    map: &MapConfig,
    sidebar_open: bool,
    session_id: &str,
) -> Result<String> {
    let map_config = serde_json::json!({
        "center": map.center,
        "zoom": map.zoom,
        "tileUrl": map.tile_url,
        "attribution": map.attribution,
        "cluster": map.cluster_options(),
    })
    .to_string();

    Ok(IndexTemplate { provinces, map_config, sidebar_open, session_id }.render()?)
}

pub fn render_panel(panel: &PanelView) -> Result<String> {
    let html = match panel {
        PanelView::Detail(view) => DetailTemplate { view }.render()?,
        PanelView::ProvinceClubs(view) => ProvinceClubsTemplate { view }.render()?,
    };
    Ok(html)
}

pub fn render_province_list(view: &ProvinceListView) -> Result<String> {
    Ok(ProvinceListTemplate { view }.render()?)
}

pub fn render_search(view: &SearchView) -> Result<String> {
    Ok(SearchResultsTemplate { view }.render()?)
}
