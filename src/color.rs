use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: genre → Color32
// ---------------------------------------------------------------------------

/// Assigns every genre of the dataset a fixed colour, so a genre keeps its
/// colour in the chart and table no matter which other genres are selected.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map over `genres`, in the given order.
    pub fn new<'a>(genres: impl IntoIterator<Item = &'a String>) -> Self {
        let genres: Vec<&String> = genres.into_iter().collect();
        let palette = generate_palette(genres.len());
        let mapping = genres
            .into_iter()
            .zip(palette)
            .map(|(g, c)| (g.clone(), c))
            .collect();

        ColorMap { mapping }
    }

    /// Look up the colour for a genre; unknown genres are grey.
    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping.get(genre).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn colours_are_stable_per_genre() {
        let genres: Vec<String> = ["Drama", "Action", "Comedy"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = ColorMap::new(&genres);
        let again = ColorMap::new(&genres);

        assert_eq!(map.color_for("Action"), again.color_for("Action"));
        assert_ne!(map.color_for("Action"), map.color_for("Drama"));
        assert_eq!(map.color_for("Western"), Color32::GRAY);
    }
}
