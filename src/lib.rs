pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod events;
pub mod loader;
pub mod logging;
pub mod map;
pub mod province;
pub mod search;
pub mod server;
pub mod templates;
pub mod types;
pub mod view;

pub use directory::Directory;
pub use error::{AppError, DataLoadError};
pub use events::{UiEvent, Update};
pub use province::ProvinceFilter;
pub use types::{Club, ExternalLink, LatLng};
