use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::PlacementError;

/// Size class of a bento cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTag {
    Hero,
    Wide,
    Tall,
    Square,
}

impl SizeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Wide => "wide",
            Self::Tall => "tall",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for SizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of one grid cell: how many columns and rows it spans.
///
/// Spans are never zero: every descriptor, built-in or not, goes through
/// [`PlacementDescriptor::new`], which rejects zero spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlacementDescriptor {
    col_span: u8,
    row_span: u8,
    size: SizeTag,
}

impl PlacementDescriptor {
    /// 2x2 lead cell.
    pub const HERO: Self = Self::fixed(2, 2, SizeTag::Hero);
    /// 2x1 landscape cell.
    pub const WIDE: Self = Self::fixed(2, 1, SizeTag::Wide);
    /// 1x2 portrait cell.
    pub const TALL: Self = Self::fixed(1, 2, SizeTag::Tall);
    /// 1x1 cell.
    pub const SQUARE: Self = Self::fixed(1, 1, SizeTag::Square);

    pub const fn new(col_span: u8, row_span: u8, size: SizeTag) -> Result<Self, PlacementError> {
        if col_span == 0 {
            return Err(PlacementError::ZeroColumnSpan);
        }
        if row_span == 0 {
            return Err(PlacementError::ZeroRowSpan);
        }
        Ok(Self {
            col_span,
            row_span,
            size,
        })
    }

    /// Built-in cells; a zero span fails the build.
    const fn fixed(col_span: u8, row_span: u8, size: SizeTag) -> Self {
        match Self::new(col_span, row_span, size) {
            Ok(placement) => placement,
            Err(_) => panic!("built-in placement with a zero span"),
        }
    }

    pub fn col_span(&self) -> u8 {
        self.col_span
    }

    pub fn row_span(&self) -> u8 {
        self.row_span
    }

    pub fn size(&self) -> SizeTag {
        self.size
    }

    /// Utility-class form used by the web templates, e.g. `col-span-2 row-span-1`.
    pub fn span_class(&self) -> String {
        format!("col-span-{} row-span-{}", self.col_span, self.row_span)
    }
}

impl fmt::Display for PlacementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}x{})", self.size, self.col_span, self.row_span)
    }
}

/// A named bento template.
///
/// `tables` maps an item count to its placement table and is sorted by count
/// ascending. Every template carries at least one table, and the table for count
/// `n` holds exactly `n` descriptors.
#[derive(Debug)]
pub struct LayoutSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub min_items: usize,
    pub max_items: usize,
    tables: &'static [(usize, &'static [PlacementDescriptor])],
}

impl LayoutSpec {
    /// Placement list for `item_count` items. Always exactly `item_count` long.
    ///
    /// Counts above the largest table repeat that table's last descriptor.
    /// Counts below the smallest table take a prefix of the largest table.
    pub fn placements(&self, item_count: usize) -> Vec<PlacementDescriptor> {
        if item_count == 0 {
            return Vec::new();
        }

        let table = self.table_for(item_count);
        let mut placements: Vec<PlacementDescriptor> =
            table.iter().copied().take(item_count).collect();
        if let Some(last) = placements.last().copied() {
            placements.resize(item_count, last);
        }
        placements
    }

    /// Item counts that have a hand-written table.
    pub fn defined_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.tables.iter().map(|(count, _)| *count)
    }

    fn table_for(&self, item_count: usize) -> &'static [PlacementDescriptor] {
        self.tables
            .iter()
            .rev()
            .find(|(count, _)| *count <= item_count)
            .or_else(|| self.tables.last())
            .map(|(_, table)| *table)
            .unwrap_or(&[])
    }
}

const HERO: PlacementDescriptor = PlacementDescriptor::HERO;
const WIDE: PlacementDescriptor = PlacementDescriptor::WIDE;
const TALL: PlacementDescriptor = PlacementDescriptor::TALL;
const SQUARE: PlacementDescriptor = PlacementDescriptor::SQUARE;

/// Built-in templates, in seed order.
pub static CATALOG: [LayoutSpec; 3] = [
    LayoutSpec {
        key: "layout1",
        name: "Hero Focus",
        description: "First item takes hero position, others in grid",
        min_items: 2,
        max_items: 8,
        tables: &[
            (2, &[HERO, WIDE]),
            (3, &[HERO, SQUARE, SQUARE]),
            (4, &[HERO, SQUARE, SQUARE, WIDE]),
            (5, &[HERO, SQUARE, SQUARE, TALL, SQUARE]),
            (6, &[HERO, SQUARE, SQUARE, SQUARE, SQUARE, WIDE]),
        ],
    },
    LayoutSpec {
        key: "layout2",
        name: "Balanced Grid",
        description: "Evenly distributed items with varied sizes",
        min_items: 2,
        max_items: 9,
        tables: &[
            (2, &[TALL, TALL]),
            (3, &[WIDE, TALL, SQUARE]),
            (4, &[SQUARE, TALL, SQUARE, SQUARE]),
            (5, &[WIDE, SQUARE, TALL, SQUARE, SQUARE]),
            (6, &[SQUARE, SQUARE, TALL, SQUARE, WIDE, SQUARE]),
        ],
    },
    LayoutSpec {
        key: "layout3",
        name: "Mosaic",
        description: "Organic, varied sizing pattern",
        min_items: 3,
        max_items: 8,
        tables: &[
            (3, &[TALL, WIDE, SQUARE]),
            (4, &[WIDE, TALL, SQUARE, SQUARE]),
            (5, &[SQUARE, WIDE, TALL, SQUARE, SQUARE]),
            (6, &[SQUARE, TALL, SQUARE, WIDE, SQUARE, SQUARE]),
        ],
    },
];

static BY_KEY: Lazy<HashMap<&'static str, &'static LayoutSpec>> =
    Lazy::new(|| CATALOG.iter().map(|spec| (spec.key, spec)).collect());

/// Looks up a template by key.
pub fn lookup(key: &str) -> Option<&'static LayoutSpec> {
    BY_KEY.get(key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_spans_rejected() {
        assert_eq!(
            PlacementDescriptor::new(0, 1, SizeTag::Square),
            Err(PlacementError::ZeroColumnSpan)
        );
        assert_eq!(
            PlacementDescriptor::new(1, 0, SizeTag::Square),
            Err(PlacementError::ZeroRowSpan)
        );
        assert_eq!(
            PlacementDescriptor::new(2, 2, SizeTag::Hero),
            Ok(PlacementDescriptor::HERO)
        );
    }

    #[test]
    fn test_span_class() {
        assert_eq!(PlacementDescriptor::WIDE.span_class(), "col-span-2 row-span-1");
        assert_eq!(PlacementDescriptor::TALL.to_string(), "tall(1x2)");
    }

    #[test]
    fn test_tables_are_well_formed() {
        for spec in CATALOG.iter() {
            assert!(!spec.tables.is_empty(), "{} has no tables", spec.key);
            let mut previous = 0;
            for (count, table) in spec.tables {
                assert!(*count > previous, "{} tables not sorted", spec.key);
                assert_eq!(table.len(), *count, "{} table {} length", spec.key, count);
                previous = *count;
            }
            assert!(spec.min_items <= spec.max_items);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("layout2").map(|s| s.name), Some("Balanced Grid"));
        assert!(lookup("layout9").is_none());
    }

    #[test]
    fn test_overflow_repeats_last() {
        let spec = lookup("layout1").unwrap();
        let placements = spec.placements(9);
        assert_eq!(placements.len(), 9);
        assert_eq!(&placements[..6], &[HERO, SQUARE, SQUARE, SQUARE, SQUARE, WIDE]);
        assert!(placements[6..].iter().all(|p| *p == WIDE));
    }

    #[test]
    fn test_below_smallest_table_takes_prefix_of_largest() {
        let mosaic = lookup("layout3").unwrap();
        assert_eq!(mosaic.placements(2), vec![SQUARE, TALL]);
        assert_eq!(mosaic.placements(2), mosaic.placements(6)[..2]);
        assert!(mosaic.placements(0).is_empty());

        let balanced = lookup("layout2").unwrap();
        assert_eq!(balanced.placements(1), vec![SQUARE]);
        assert_eq!(lookup("layout1").unwrap().placements(1), vec![HERO]);
    }

    #[test]
    fn test_every_template_tops_out_at_six() {
        for spec in CATALOG.iter() {
            assert_eq!(spec.defined_counts().last(), Some(6));
        }
    }
}
