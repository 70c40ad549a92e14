//! Overlay state: the selected-body detail panel and the theme song toggle.

use std::fmt;

use orrery_orbit::SelectionSummary;

/// Text of the detail panel shown for the selected body.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsPanel {
    pub title: String,
    pub lines: [String; 3],
}

/// Builds the detail panel, or `None` when nothing is selected.
pub fn details_panel(selection: Option<&SelectionSummary>) -> Option<DetailsPanel> {
    let summary = selection?;
    Some(DetailsPanel {
        title: capitalize_words(&summary.display_name),
        lines: [
            format!("Distance from Sun: {} AU", summary.distance_from_center),
            format!("Size: {} Earth radii", summary.visual_size),
            format!("Orbital Period: {:.2} Earth years", summary.orbital_period),
        ],
    })
}

impl fmt::Display for DetailsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// Playback state of the theme song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeState {
    Paused,
    Playing,
}

/// Two-state play/pause toggle. Decoding and output belong to the audio layer.
#[derive(Debug, Clone)]
pub struct ThemeToggle {
    state: ThemeState,
    volume: f32,
}

impl ThemeToggle {
    /// Starts paused, like the button before its first press.
    pub fn new(volume: f32) -> Self {
        Self {
            state: ThemeState::Paused,
            volume,
        }
    }

    /// Flips between playing and paused and returns the new state.
    pub fn toggle(&mut self) -> ThemeState {
        self.state = match self.state {
            ThemeState::Paused => ThemeState::Playing,
            ThemeState::Playing => ThemeState::Paused,
        };
        self.state
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// Button label offering the opposite action.
    pub fn label(&self) -> &'static str {
        match self.state {
            ThemeState::Paused => "Play Theme Song",
            ThemeState::Playing => "Pause Theme Song",
        }
    }

    /// Volume to apply, or `None` while paused.
    pub fn applied_volume(&self) -> Option<f32> {
        (self.state == ThemeState::Playing).then_some(self.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, distance: f64, size: f64, period: f64) -> SelectionSummary {
        SelectionSummary {
            display_name: name.to_string(),
            distance_from_center: distance,
            visual_size: size,
            orbital_period: period,
        }
    }

    #[test]
    fn test_no_selection_no_panel() {
        assert!(details_panel(None).is_none());
    }

    #[test]
    fn test_panel_formats_summary() {
        let panel = details_panel(Some(&summary("saturn", 21.0, 9.4, 1.0 / 0.3))).unwrap();
        assert_eq!(panel.title, "Saturn");
        assert_eq!(
            panel.lines,
            [
                "Distance from Sun: 21 AU".to_string(),
                "Size: 9.4 Earth radii".to_string(),
                "Orbital Period: 3.33 Earth years".to_string(),
            ]
        );
        assert_eq!(
            panel.to_string(),
            "Saturn\nDistance from Sun: 21 AU\nSize: 9.4 Earth radii\nOrbital Period: 3.33 Earth years"
        );
    }

    #[test]
    fn test_title_capitalizes_each_word() {
        assert_eq!(capitalize_words("custom asset"), "Custom Asset");
        assert_eq!(capitalize_words("custom_asset"), "Custom_asset");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn test_theme_toggle_labels() {
        let mut theme = ThemeToggle::new(0.5);
        assert_eq!(theme.label(), "Play Theme Song");
        assert_eq!(theme.applied_volume(), None);

        assert_eq!(theme.toggle(), ThemeState::Playing);
        assert_eq!(theme.label(), "Pause Theme Song");
        assert_eq!(theme.applied_volume(), Some(0.5));

        assert_eq!(theme.toggle(), ThemeState::Paused);
        assert_eq!(theme.state(), ThemeState::Paused);
    }

    #[test]
    fn test_theme_starts_paused() {
        let theme = ThemeToggle::new(0.8);
        assert_eq!(theme.state(), ThemeState::Paused);
        assert_eq!(theme.applied_volume(), None);
    }
}
