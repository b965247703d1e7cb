//! Library of common filter media that can be added to an aquarium.

use std::collections::HashSet;

use super::maintenance::{FilterCategory, FilterMedium};

/// A filter medium template without a replacement timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: FilterCategory,
    pub change_interval_days: u32,
    pub consequence: &'static str,
}

impl CatalogEntry {
    /// Create an active medium from this entry, freshly replaced at `now_ms`.
    pub fn instantiate(&self, now_ms: i64) -> FilterMedium {
        FilterMedium {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            last_changed_ms: now_ms,
            change_interval_days: self.change_interval_days,
            consequence: self.consequence.to_string(),
        }
    }
}

const fn entry(
    id: &'static str,
    name: &'static str,
    category: FilterCategory,
    change_interval_days: u32,
    consequence: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        category,
        change_interval_days,
        consequence,
    }
}

use FilterCategory::{Biological, Chemical, Extra, Mechanical};

/// Built-in media library, grouped by category.
pub const CATALOG: &[CatalogEntry] = &[
    entry(
        "filter_floss",
        "Filter Floss / Perlon Wool",
        Mechanical,
        7,
        "Flow slows down, clogging starts and the water turns cloudy.",
    ),
    entry(
        "sponge_coarse",
        "Sponge (Coarse Pore)",
        Mechanical,
        30,
        "It holds fewer large particles and the biological load rises.",
    ),
    entry(
        "sponge_fine",
        "Sponge (Fine Pore)",
        Mechanical,
        30,
        "It can clog and seriously slow the water flow.",
    ),
    entry(
        "ceramic_noodles",
        "Ceramic Noodles",
        Mechanical,
        365,
        "Pores clog and both mechanical and biological filtration drop.",
    ),
    entry(
        "brush_filter",
        "Brush Filter",
        Mechanical,
        730,
        "Large debris passes through and loads the rest of the system. Needs periodic cleaning.",
    ),
    entry(
        "filter_pad",
        "Filter Pad (Elofiber)",
        Mechanical,
        14,
        "It clogs, blocks the flow and lowers water quality.",
    ),
    entry(
        "ceramic_rings",
        "Ceramic Rings",
        Biological,
        180,
        "Biological capacity drops; ammonia and nitrite can build up.",
    ),
    entry(
        "sintered_glass",
        "Sintered Glass (Substrat Pro, Matrix)",
        Biological,
        365,
        "Pores clog and the surface available to bacteria shrinks.",
    ),
    entry(
        "bio_balls",
        "Bio-balls",
        Biological,
        730,
        "Organic waste on the surface slows bacterial activity.",
    ),
    entry(
        "lava_rock",
        "Lava Rock",
        Biological,
        365,
        "Clogged pores lose their capacity to hold beneficial bacteria.",
    ),
    entry(
        "bio_sponge",
        "Biological Sponge",
        Biological,
        180,
        "Pores clog and the bacterial surface and efficiency drop.",
    ),
    entry(
        "marinepure_block",
        "Bio Block (MarinePure)",
        Biological,
        730,
        "The biofilm layer thickens and efficiency drops.",
    ),
    entry(
        "activated_carbon",
        "Activated Carbon",
        Chemical,
        21,
        "Once saturated it can release absorbed chemicals back into the water.",
    ),
    entry(
        "zeolite",
        "Zeolite",
        Chemical,
        60,
        "It stops binding ammonia and loads the biological cycle.",
    ),
    entry(
        "phosphate_remover",
        "Phosphate Remover Resin",
        Chemical,
        45,
        "Phosphate rises, which can trigger algae blooms.",
    ),
    entry(
        "silicate_remover",
        "Silicate Remover",
        Chemical,
        60,
        "Silicate rises, leading to diatom (brown algae) problems.",
    ),
    entry(
        "purigen",
        "Purigen",
        Chemical,
        90,
        "It absorbs less organic waste and nitrate can rise. (Regenerable)",
    ),
    entry("peat_moss", "Peat Moss", Chemical, 30, "It stops lowering pH and softening the water."),
    entry(
        "ion_exchange_resin",
        "Ion Exchange Resin",
        Chemical,
        90,
        "It stops softening and purifying the water.",
    ),
    entry(
        "mineral_stones",
        "Mineral Stones",
        Extra,
        180,
        "Trace element release into the water drops.",
    ),
];

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Catalog entries whose id is not already in `existing`, in category order.
pub fn available<'a, I>(existing: I) -> Vec<&'static CatalogEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut entries: Vec<&'static CatalogEntry> =
        CATALOG.iter().filter(|e| !taken.contains(e.id)).collect();
    // Stable sort keeps the library order within a category
    entries.sort_by_key(|e| e.category);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<&str> = CATALOG.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn catalog_intervals_are_positive() {
        assert!(CATALOG.iter().all(|e| e.change_interval_days > 0));
    }

    #[test]
    fn available_excludes_existing() {
        let all = available(std::iter::empty());
        assert_eq!(all.len(), CATALOG.len());

        let rest = available(["zeolite", "sponge_fine"]);
        assert_eq!(rest.len(), CATALOG.len() - 2);
        assert!(rest.iter().all(|e| e.id != "zeolite" && e.id != "sponge_fine"));
    }

    #[test]
    fn available_is_grouped_by_category() {
        let entries = available(std::iter::empty());
        assert!(entries.windows(2).all(|w| w[0].category <= w[1].category));
        assert_eq!(entries[0].id, "filter_floss");
    }

    #[test]
    fn instantiate_sets_timestamp() {
        let medium = find("purigen").unwrap().instantiate(1234);
        assert_eq!(medium.id, "purigen");
        assert_eq!(medium.last_changed_ms, 1234);
        assert_eq!(medium.change_interval_days, 90);
        assert_eq!(medium.category, FilterCategory::Chemical);
    }

    #[test]
    fn find_unknown_is_none() {
        assert!(find("unobtainium").is_none());
    }
}
