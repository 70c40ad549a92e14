//! User selection: turns a picked body's descriptor into a display summary.

use serde::Serialize;

use crate::body::BodyDescriptor;

/// Frozen snapshot of a body's descriptor, taken when it was picked.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub display_name: String,
    pub distance_from_center: f64,
    pub visual_size: f64,
    pub orbital_period: f64,
}

impl SelectionSummary {
    pub fn from_descriptor(descriptor: &BodyDescriptor) -> Self {
        Self {
            display_name: display_name(&descriptor.texture_id),
            distance_from_center: descriptor.distance_from_center,
            visual_size: descriptor.visual_size,
            orbital_period: descriptor.orbital_period(),
        }
    }
}

/// Holds the most recent selection. The last pick always wins.
#[derive(Clone, Debug, Default)]
pub struct SelectionBridge {
    current: Option<SelectionSummary>,
}

impl SelectionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current selection with a summary of `descriptor`.
    pub fn select(&mut self, descriptor: &BodyDescriptor) -> &SelectionSummary {
        let summary = SelectionSummary::from_descriptor(descriptor);
        log::debug!("selected {}", summary.display_name);
        self.current.insert(summary)
    }

    pub fn current(&self) -> Option<&SelectionSummary> {
        self.current.as_ref()
    }
}

/// Derives a human label from a texture identity.
///
/// Strips any directory and extension, then a leading resolution token such as
/// `2k_`, so `/textures/2k_saturn.jpg` becomes `saturn`. When nothing usable is
/// left the raw identity is returned unchanged.
pub fn display_name(texture_id: &str) -> String {
    match parse_display_name(texture_id) {
        Some(name) => name.to_string(),
        None => {
            log::trace!("texture identity {texture_id:?} has no parsable name, using it as-is");
            texture_id.to_string()
        }
    }
}

fn parse_display_name(texture_id: &str) -> Option<&str> {
    let file = texture_id
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(texture_id);
    let stem = file.split('.').next().unwrap_or(file);
    let name = strip_resolution_prefix(stem).unwrap_or(stem);
    (!name.is_empty()).then_some(name)
}

/// Strips a `<digits>k_` prefix, as long as something follows it.
fn strip_resolution_prefix(stem: &str) -> Option<&str> {
    let (token, rest) = stem.split_once('_')?;
    let digits = token.strip_suffix(|c: char| c == 'k' || c == 'K')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || rest.is_empty() {
        return None;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_path_prefix_and_extension() {
        assert_eq!(display_name("/textures/2k_saturn.jpg"), "saturn");
        assert_eq!(display_name("/textures/2k_earth.jpg"), "earth");
        assert_eq!(display_name("assets\\8k_mars.png"), "mars");
        assert_eq!(display_name("4K_venus"), "venus");
    }

    #[test]
    fn test_display_name_falls_back_to_raw_identity() {
        assert_eq!(display_name("custom_asset"), "custom_asset");
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("/textures/.jpg"), "/textures/.jpg");
        assert_eq!(display_name("textures/"), "textures/");
    }

    #[test]
    fn test_display_name_keeps_unprefixed_stem() {
        assert_eq!(display_name("/textures/pluto.jpg"), "pluto");
        assert_eq!(display_name("/textures/k_ring.jpg"), "k_ring");
        assert_eq!(display_name("/textures/2k_.jpg"), "2k_");
        assert_eq!(display_name("/textures/2x_io.jpg"), "2x_io");
    }

    #[test]
    fn test_summary_from_descriptor() {
        let descriptor = BodyDescriptor::new(17.0, 11.2, 0.4, "/textures/2k_jupiter.jpg");
        let summary = SelectionSummary::from_descriptor(&descriptor);
        assert_eq!(summary.display_name, "jupiter");
        assert_eq!(summary.distance_from_center, 17.0);
        assert_eq!(summary.visual_size, 11.2);
        assert!((summary.orbital_period - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_last_selection_wins() {
        let mars = BodyDescriptor::new(13.0, 0.53, 0.8, "/textures/2k_mars.jpg");
        let venus = BodyDescriptor::new(7.0, 0.95, 1.6, "/textures/2k_venus.jpg");

        let mut bridge = SelectionBridge::new();
        assert!(bridge.current().is_none());

        bridge.select(&mars);
        let returned = bridge.select(&venus).clone();

        assert_eq!(bridge.current(), Some(&returned));
        assert_eq!(returned, SelectionSummary::from_descriptor(&venus));
    }
}
