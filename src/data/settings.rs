//! Aquarium metadata, fish roster and configured filter media.

use serde::{Deserialize, Serialize};

use super::maintenance::{FilterCategory, FilterMedium, DAY_MS};

/// A fish kept in the aquarium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fish {
    pub name: String,
    pub species: String,
    pub description: String,
    pub image_url: String,
}

/// Plain description of the aquarium.
///
/// Every field has a default, so a configuration file only needs to name
/// what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AquariumSettings {
    pub volume_liters: f64,
    pub filter_description: String,
    pub food_description: String,
    pub fish: Vec<Fish>,
    pub filter_media: Vec<FilterMedium>,
}

impl Default for AquariumSettings {
    fn default() -> Self {
        Self::demo(super::reading::now_ms())
    }
}

impl AquariumSettings {
    /// The demonstration aquarium, with filter media aged relative to `now_ms`.
    pub fn demo(now_ms: i64) -> Self {
        Self {
            volume_liters: 120.0,
            filter_description: "Eheim Classic 2213 external filter".to_string(),
            food_description: "Tetra Pro Colour & NLS Thera+A".to_string(),
            fish: vec![
                fish(
                    "Neon Tetra",
                    "Paracheirodon innesi",
                    "A peaceful, colourful schooling fish that brings the tank to life.",
                    "https://i.imgur.com/8x215yT.jpeg",
                ),
                fish(
                    "Bristlenose Pleco (L144)",
                    "Ancistrus sp.",
                    "Known for grazing algae off glass and decor. Peaceful and mostly nocturnal.",
                    "https://i.imgur.com/O4VN3ZT.jpeg",
                ),
                fish(
                    "Kribensis",
                    "Pelvicachromis pulcher",
                    "A vivid cichlid that colours up when breeding. Can be territorial towards its own kind.",
                    "https://i.imgur.com/b84MtNe.jpeg",
                ),
                fish(
                    "Bronze Corydoras",
                    "Corydoras aeneus",
                    "Cleans up leftover food on the substrate. Should be kept in groups.",
                    "https://i.imgur.com/k2K4gUf.jpeg",
                ),
            ],
            filter_media: vec![
                FilterMedium {
                    id: "sponge_fine".to_string(),
                    name: "Sponge (Fine Pore)".to_string(),
                    category: FilterCategory::Mechanical,
                    last_changed_ms: now_ms - 10 * DAY_MS,
                    change_interval_days: 30,
                    consequence: "It can clog and seriously slow the water flow.".to_string(),
                },
                FilterMedium {
                    id: "activated_carbon".to_string(),
                    name: "Activated Carbon".to_string(),
                    category: FilterCategory::Chemical,
                    last_changed_ms: now_ms - 40 * DAY_MS,
                    change_interval_days: 21,
                    consequence: "The water can turn cloudy and start to smell.".to_string(),
                },
                FilterMedium {
                    id: "ceramic_rings".to_string(),
                    name: "Ceramic Rings".to_string(),
                    category: FilterCategory::Biological,
                    last_changed_ms: now_ms - 100 * DAY_MS,
                    change_interval_days: 180,
                    consequence: "Biological capacity drops; ammonia and nitrite can build up."
                        .to_string(),
                },
            ],
        }
    }
}

fn fish(name: &str, species: &str, description: &str, image_url: &str) -> Fish {
    Fish {
        name: name.to_string(),
        species: species.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
    }
}
