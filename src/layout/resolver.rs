use serde::Serialize;
use tracing::debug;

use super::catalog::{self, LayoutSpec, PlacementDescriptor, CATALOG};

/// Template used when a requested key is not in the catalog.
pub const DEFAULT_LAYOUT_KEY: &str = "layout1";

/// Smallest column/row count a bento grid is rendered with.
const MIN_GRID_TRACKS: u32 = 2;

/// Column and row track counts implied by a placement list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    pub columns: u32,
    pub rows: u32,
}

/// How a grid picks its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSelection {
    Named(String),
    Seeded(u64),
}

impl Default for LayoutSelection {
    fn default() -> Self {
        Self::Named(DEFAULT_LAYOUT_KEY.to_string())
    }
}

/// Output of a full resolution: selected key, placements and grid size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLayout {
    pub key: &'static str,
    pub placements: Vec<PlacementDescriptor>,
    pub dimensions: GridDimensions,
}

fn spec_or_default(layout_key: &str) -> &'static LayoutSpec {
    match catalog::lookup(layout_key) {
        Some(spec) => spec,
        None => {
            debug!(
                layout_key,
                fallback = DEFAULT_LAYOUT_KEY,
                "Unknown layout key, using default"
            );
            &CATALOG[0]
        }
    }
}

/// Maps a template key and item count to exactly `item_count` placements.
///
/// Unknown keys resolve against [`DEFAULT_LAYOUT_KEY`]. Counts past the largest
/// hand-written table repeat its last descriptor; zero items yields an empty list.
pub fn resolve_layout(layout_key: &str, item_count: usize) -> Vec<PlacementDescriptor> {
    spec_or_default(layout_key).placements(item_count)
}

/// Picks a template by `seed % catalog size` (catalog order) and resolves it.
pub fn resolve_layout_by_seed(
    seed: u64,
    item_count: usize,
) -> (&'static str, Vec<PlacementDescriptor>) {
    let index = (seed % CATALOG.len() as u64) as usize;
    let spec = &CATALOG[index];
    (spec.key, spec.placements(item_count))
}

/// Largest column and row span across `placements`, each floored at 2.
pub fn compute_grid_dimensions(placements: &[PlacementDescriptor]) -> GridDimensions {
    let (columns, rows) = placements.iter().fold((0u32, 0u32), |(cols, rows), p| {
        (cols.max(p.col_span() as u32), rows.max(p.row_span() as u32))
    });

    GridDimensions {
        columns: columns.max(MIN_GRID_TRACKS),
        rows: rows.max(MIN_GRID_TRACKS),
    }
}

/// Resolves a selection into placements plus grid dimensions.
pub fn resolve(selection: &LayoutSelection, item_count: usize) -> ResolvedLayout {
    let (key, placements) = match selection {
        LayoutSelection::Seeded(seed) => resolve_layout_by_seed(*seed, item_count),
        LayoutSelection::Named(key) => {
            let spec = spec_or_default(key);
            (spec.key, spec.placements(item_count))
        }
    };
    let dimensions = compute_grid_dimensions(&placements);

    ResolvedLayout {
        key,
        placements,
        dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::catalog::SizeTag;

    #[test]
    fn test_layout1_four_items() {
        let placements = resolve_layout("layout1", 4);
        assert_eq!(
            placements,
            vec![
                PlacementDescriptor::HERO,
                PlacementDescriptor::SQUARE,
                PlacementDescriptor::SQUARE,
                PlacementDescriptor::WIDE,
            ]
        );
        assert_eq!(placements[0].size(), SizeTag::Hero);
        assert_eq!(
            compute_grid_dimensions(&placements),
            GridDimensions {
                columns: 2,
                rows: 2
            }
        );
    }

    #[test]
    fn test_every_layout_returns_requested_count() {
        for spec in CATALOG.iter() {
            for count in 0..=12 {
                let placements = resolve_layout(spec.key, count);
                assert_eq!(placements.len(), count, "{} with {}", spec.key, count);
                for p in &placements {
                    assert!(p.col_span() >= 1 && p.row_span() >= 1);
                }
            }
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_default() {
        assert_eq!(resolve_layout("nope", 5), resolve_layout(DEFAULT_LAYOUT_KEY, 5));
        let resolved = resolve(&LayoutSelection::Named("nope".into()), 3);
        assert_eq!(resolved.key, DEFAULT_LAYOUT_KEY);
    }

    #[test]
    fn test_seed_selection_is_deterministic() {
        for seed in [0u64, 1, 2, 3, 7, 1_000_003, u64::MAX] {
            let first = resolve_layout_by_seed(seed, 5);
            let second = resolve_layout_by_seed(seed, 5);
            assert_eq!(first, second);
            assert_eq!(first.0, CATALOG[(seed % 3) as usize].key);
        }
        assert_eq!(resolve_layout_by_seed(1, 4).0, "layout2");
        assert_eq!(resolve_layout_by_seed(5, 4).0, "layout3");
    }

    #[test]
    fn test_seed_takes_effect_through_resolve() {
        let resolved = resolve(&LayoutSelection::Seeded(2), 4);
        assert_eq!(resolved.key, "layout3");
        assert_eq!(resolved.placements, resolve_layout("layout3", 4));
    }

    #[test]
    fn test_dimensions_floor() {
        assert_eq!(
            compute_grid_dimensions(&[]),
            GridDimensions {
                columns: 2,
                rows: 2
            }
        );
        let squares = [PlacementDescriptor::SQUARE; 3];
        assert_eq!(
            compute_grid_dimensions(&squares),
            GridDimensions {
                columns: 2,
                rows: 2
            }
        );
        let wide = PlacementDescriptor::new(3, 1, SizeTag::Wide).unwrap();
        let dims = compute_grid_dimensions(&[wide, PlacementDescriptor::TALL]);
        assert_eq!(dims.columns, 3);
        assert_eq!(dims.rows, 2);
    }

    #[test]
    fn test_overflow_trailing_entries_equal_last() {
        for spec in CATALOG.iter() {
            let largest = spec.defined_counts().last().unwrap();
            let table = resolve_layout(spec.key, largest);
            let last = *table.last().unwrap();
            let overflow = resolve_layout(spec.key, largest + 4);
            assert_eq!(&overflow[..largest], table.as_slice());
            assert!(overflow[largest..].iter().all(|p| *p == last));
        }
    }

    #[test]
    fn test_small_counts_use_largest_table() {
        assert_eq!(resolve_layout("layout3", 2), resolve_layout("layout3", 6)[..2]);
        assert_eq!(resolve_layout("layout2", 1), vec![PlacementDescriptor::SQUARE]);
        assert!(resolve_layout("layout3", 0).is_empty());

        let resolved = resolve(&LayoutSelection::Named("layout3".into()), 1);
        assert_eq!(resolved.placements, vec![PlacementDescriptor::SQUARE]);
        assert_eq!(resolved.dimensions, GridDimensions { columns: 2, rows: 2 });
    }

    #[test]
    fn test_default_selection_is_layout1() {
        assert_eq!(
            LayoutSelection::default(),
            LayoutSelection::Named("layout1".to_string())
        );
    }
}
