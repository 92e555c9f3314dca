//! Contract with the browser mapping library.
//!
//! The controller never talks to Leaflet directly; it drives a [`MapView`].
//! In the served page the view is a [`CommandBuffer`] whose commands are
//! shipped to the glue script after every event.

use crate::constants::{ICON_ANCHOR, ICON_SIZE, POPUP_ANCHOR};
use crate::types::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconSpec {
    pub url: String,
    pub size: (u32, u32),
    pub anchor: (i32, i32),
    pub popup_anchor: (i32, i32),
}

impl IconSpec {
    /// Square logo icon anchored at its bottom centre
    pub fn logo(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size: ICON_SIZE,
            anchor: ICON_ANCHOR,
            popup_anchor: POPUP_ANCHOR,
        }
    }
}

/// A marker to place on the clustering layer. Clicking it raises a
/// `MarkerClicked` event carrying `club_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub club_id: String,
    pub position: LatLng,
    pub icon: IconSpec,
    pub popup: String,
}

/// Clustering layer settings handed to the mapping library at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterOptions {
    pub max_cluster_radius: u32,
    pub disable_clustering_at_zoom: u8,
    pub spiderfy_on_max_zoom: bool,
    pub show_coverage_on_hover: bool,
    pub zoom_to_bounds_on_click: bool,
}

pub trait MapView {
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: MarkerSpec);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapCommand {
    SetView { center: LatLng, zoom: u8 },
    ClearMarkers,
    AddMarker(MarkerSpec),
}

/// Records map operations until they are drained.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<MapCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<MapCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn commands(&self) -> &[MapCommand] {
        &self.commands
    }
}

impl MapView for CommandBuffer {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.commands.push(MapCommand::SetView { center, zoom });
    }

    fn clear_markers(&mut self) {
        // Older adds are dead once the layer is cleared
        self.commands.retain(|c| !matches!(c, MapCommand::AddMarker(_) | MapCommand::ClearMarkers));
        self.commands.push(MapCommand::ClearMarkers);
    }

    fn add_marker(&mut self, marker: MarkerSpec) {
        self.commands.push(MapCommand::AddMarker(marker));
    }
}
