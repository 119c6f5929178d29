use tracing::debug;

use super::catalog::PlacementDescriptor;
use super::resolver::{self, LayoutSelection, ResolvedLayout};
use crate::models::ContentItem;

/// Viewport-height units per grid row.
const ROW_HEIGHT_VH: u32 = 40;

/// One item paired with its placement.
#[derive(Debug, Clone, Copy)]
pub struct GridCell<'a> {
    pub item: &'a ContentItem,
    pub placement: PlacementDescriptor,
}

/// Absolute grid position of a cell after auto-placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub column: u32,
    pub row: u32,
    pub col_span: u32,
    pub row_span: u32,
}

/// Everything needed to render one bento section.
#[derive(Debug, Clone)]
pub struct GridPlan<'a> {
    pub layout: ResolvedLayout,
    pub cells: Vec<GridCell<'a>>,
}

impl<'a> GridPlan<'a> {
    /// Pairs `items` with their placements. Nothing is rendered for an empty
    /// list, so that case yields `None`.
    pub fn build(items: &'a [ContentItem], selection: &LayoutSelection) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let layout = resolver::resolve(selection, items.len());
        let cells = items
            .iter()
            .zip(layout.placements.iter().copied())
            .map(|(item, placement)| GridCell { item, placement })
            .collect();

        debug!(
            layout = layout.key,
            items = items.len(),
            columns = layout.dimensions.columns,
            rows = layout.dimensions.rows,
            "Built grid plan"
        );
        Some(Self { layout, cells })
    }

    pub fn columns(&self) -> u32 {
        self.layout.dimensions.columns
    }

    pub fn rows(&self) -> u32 {
        self.layout.dimensions.rows
    }

    /// One-line description: `Layout: layout1 | Items: 4 | Grid: 2x2`.
    pub fn summary(&self) -> String {
        format!(
            "Layout: {} | Items: {} | Grid: {}x{}",
            self.layout.key,
            self.cells.len(),
            self.columns(),
            self.rows()
        )
    }

    /// Section height in viewport-height units.
    pub fn container_height_vh(&self) -> u32 {
        self.rows() * ROW_HEIGHT_VH
    }

    /// Places cells in order on a `columns()`-wide grid.
    ///
    /// Row-major sparse auto-placement: each cell goes to the first free slot
    /// at or after the previous cell's start, wrapping to the next row when it
    /// does not fit. Spans wider than the grid are clamped to its width.
    pub fn positions(&self) -> Vec<CellPosition> {
        let columns = self.columns().max(1) as usize;
        let mut occupied: Vec<Vec<bool>> = Vec::new();
        let mut cursor = (0usize, 0usize);
        let mut out = Vec::with_capacity(self.cells.len());

        for cell in &self.cells {
            let col_span = (cell.placement.col_span() as usize).min(columns);
            let row_span = cell.placement.row_span() as usize;
            let (mut row, mut col) = cursor;

            loop {
                if col + col_span > columns {
                    row += 1;
                    col = 0;
                    continue;
                }
                if area_free(&occupied, row, col, row_span, col_span) {
                    break;
                }
                col += 1;
            }

            for r in row..row + row_span {
                if occupied.len() <= r {
                    occupied.resize_with(r + 1, || vec![false; columns]);
                }
                for slot in &mut occupied[r][col..col + col_span] {
                    *slot = true;
                }
            }

            out.push(CellPosition {
                column: col as u32,
                row: row as u32,
                col_span: col_span as u32,
                row_span: row_span as u32,
            });
            cursor = (row, col + col_span);
        }

        out
    }
}

fn area_free(occupied: &[Vec<bool>], row: usize, col: usize, rows: usize, cols: usize) -> bool {
    (row..row + rows).all(|r| {
        occupied
            .get(r)
            .map(|line| line[col..col + cols].iter().all(|taken| !taken))
            .unwrap_or(true)
    })
}
