use serde::{Deserialize, Deserializer, Serialize};

/// One organization entry from the static data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub external_links: Vec<ExternalLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalLink {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub url: String,
}

/// A point on the map, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl Club {
    /// Stored coordinates, if both are present and finite. Clubs without them
    /// never become markers.
    pub fn coordinates(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }

    /// Province with empty strings treated as absent
    pub fn province(&self) -> Option<&str> {
        self.province.as_deref().filter(|p| !p.is_empty())
    }

    pub fn logo(&self) -> Option<&str> {
        self.logo_url.as_deref().filter(|u| !u.is_empty())
    }

    /// "school - city", the secondary line of list rows
    pub fn affiliation(&self) -> String {
        format!("{} - {}", self.school, self.city)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Club;

    /// Club with only the required fields set
    pub fn club(id: &str, name: &str, province: Option<&str>, coords: Option<(f64, f64)>) -> Club {
        Club {
            id: id.to_string(),
            name: name.to_string(),
            school: format!("{} School", name),
            city: "Somewhere".to_string(),
            province: province.map(str::to_string),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            logo_url: None,
            short_description: None,
            long_description: None,
            tags: Vec::new(),
            external_links: Vec::new(),
        }
    }
}
