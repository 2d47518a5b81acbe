//! Grid placement for dropped elements.

use crate::element::GridRect;
use kurbo::Point;

/// Authoritative column count of the placement grid.
///
/// Renderers must lay the grid out with the same count.
pub const GRID_COLS: u32 = 12;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT_PX: f64 = 50.0;

/// Default outer margin and inter-row gap in pixels.
pub const DEFAULT_MARGIN_PX: f64 = 8.0;

/// Default canvas width assumed until the renderer reports one.
pub const DEFAULT_CANVAS_WIDTH_PX: f64 = 1200.0;

/// Size of a newly dropped element, in cells, regardless of kind.
pub const DEFAULT_FIELD_SIZE: (u32, u32) = (6, 2);

/// Pixel geometry of the placement grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub cols: u32,
    pub row_height_px: f64,
    pub margin_px: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            cols: GRID_COLS,
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
            margin_px: DEFAULT_MARGIN_PX,
        }
    }
}

impl GridSpec {
    /// Convert a drop position into a collision-free rectangle of `size`
    /// cells.
    ///
    /// The drop pixel is mapped to its cell, clamped into the grid, and the
    /// first free rectangle wins, probing in order: the clamped cell itself,
    /// cells to its right within the row, cells to its left, a left-to-right
    /// scan of the next row, and finally the first row below every existing
    /// rectangle. The last step ignores density, so placement always
    /// succeeds.
    pub fn place(
        &self,
        drop: Point,
        canvas_px_width: f64,
        size: (u32, u32),
        existing: &[GridRect],
    ) -> GridRect {
        let cols = self.cols.max(1);
        let w = size.0.clamp(1, cols);
        let h = size.1.max(1);
        let max_col = cols - w;

        let col_width = (canvas_px_width - 2.0 * self.margin_px) / cols as f64;
        let raw_col = if col_width > 0.0 {
            ((drop.x - self.margin_px) / col_width).floor() as i64
        } else {
            0
        };
        let raw_row = ((drop.y - self.margin_px) / (self.row_height_px + self.margin_px)).floor() as i64;

        let x = raw_col.clamp(0, max_col as i64) as u32;
        let y = raw_row.max(0) as u32;

        // The clamped cell itself
        let candidate = GridRect::new(x, y, w, h);
        if is_free(&candidate, existing) {
            return candidate;
        }

        // Shift right within the row
        for col in (x + 1)..=max_col {
            let candidate = GridRect::new(col, y, w, h);
            if is_free(&candidate, existing) {
                return candidate;
            }
        }

        // Shift left within the row
        for col in (0..x).rev() {
            let candidate = GridRect::new(col, y, w, h);
            if is_free(&candidate, existing) {
                return candidate;
            }
        }

        // Scan the next row left to right
        for col in 0..=max_col {
            let candidate = GridRect::new(col, y + 1, w, h);
            if is_free(&candidate, existing) {
                return candidate;
            }
        }

        // Append below everything
        let bottom = existing.iter().map(GridRect::bottom).max().unwrap_or(0);
        GridRect::new(0, bottom, w, h)
    }
}

fn is_free(candidate: &GridRect, existing: &[GridRect]) -> bool {
    existing.iter().all(|rect| !candidate.overlaps(rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpec {
        GridSpec::default()
    }

    fn place_default(drop: Point, existing: &[GridRect]) -> GridRect {
        grid().place(drop, DEFAULT_CANVAS_WIDTH_PX, DEFAULT_FIELD_SIZE, existing)
    }

    #[test]
    fn test_first_drop_lands_at_origin() {
        let rect = place_default(Point::new(0.0, 0.0), &[]);
        assert_eq!(rect, GridRect::new(0, 0, 6, 2));
    }

    #[test]
    fn test_second_drop_shifts_right() {
        let first = place_default(Point::new(0.0, 0.0), &[]);
        let second = place_default(Point::new(0.0, 0.0), &[first]);
        assert_eq!(second, GridRect::new(6, 0, 6, 2));
    }

    #[test]
    fn test_third_drop_wraps_to_next_row() {
        let existing = vec![GridRect::new(0, 0, 6, 2), GridRect::new(6, 0, 6, 2)];
        let third = place_default(Point::new(0.0, 0.0), &existing);
        assert_eq!(third, GridRect::new(0, 2, 6, 2));
    }

    #[test]
    fn test_drop_maps_pixel_to_cell() {
        // Column width is (1200 - 16) / 12 ≈ 98.7px; a drop in the fourth
        // column, second row band lands there when free.
        let drop = Point::new(8.0 + 3.0 * 98.7 + 1.0, 8.0 + 58.0 + 1.0);
        let rect = place_default(drop, &[]);
        assert_eq!(rect, GridRect::new(3, 1, 6, 2));
    }

    #[test]
    fn test_drop_right_of_canvas_clamps_into_grid() {
        let rect = place_default(Point::new(5000.0, 0.0), &[]);
        assert_eq!(rect, GridRect::new(6, 0, 6, 2));
    }

    #[test]
    fn test_drop_above_canvas_clamps_to_row_zero() {
        let rect = place_default(Point::new(0.0, -300.0), &[]);
        assert_eq!(rect.y, 0);
    }

    #[test]
    fn test_shift_left_when_right_side_occupied() {
        // Occupy the right half of row 0 plus the drop cell; the probe walks
        // left to column 0.
        let existing = vec![GridRect::new(4, 0, 8, 2)];
        let drop = Point::new(8.0 + 4.0 * 98.7 + 1.0, 0.0);
        let rect = grid().place(drop, DEFAULT_CANVAS_WIDTH_PX, (4, 2), &existing);
        assert_eq!(rect, GridRect::new(0, 0, 4, 2));
    }

    #[test]
    fn test_next_row_scan_finds_gap() {
        // The drop row (1) is blocked by the full-width element above; the
        // scan of row 2 finds the gap between the two flanking elements.
        let existing = vec![
            GridRect::new(0, 0, 12, 2),
            GridRect::new(0, 2, 3, 2),
            GridRect::new(9, 2, 3, 2),
        ];
        let drop_in_row_one = Point::new(0.0, 8.0 + 58.0 + 1.0);
        let rect = grid().place(drop_in_row_one, DEFAULT_CANVAS_WIDTH_PX, (6, 2), &existing);
        assert_eq!(rect, GridRect::new(3, 2, 6, 2));
    }

    #[test]
    fn test_append_below_full_rows() {
        // Fill N=2 element rows completely; the next placement must land at
        // y = N * h, x = 0.
        let existing = vec![GridRect::new(0, 0, 12, 2), GridRect::new(0, 2, 12, 2)];
        let rect = place_default(Point::new(0.0, 0.0), &existing);
        assert_eq!(rect, GridRect::new(0, 4, 6, 2));
    }

    #[test]
    fn test_append_ignores_density() {
        // Deep drop row with everything above occupied still terminates.
        let mut existing = Vec::new();
        for row in 0..20u32 {
            existing.push(GridRect::new(0, row * 2, 12, 2));
        }
        let rect = place_default(Point::new(600.0, 300.0), &existing);
        assert_eq!(rect, GridRect::new(0, 40, 6, 2));
    }

    #[test]
    fn test_full_width_element_clamps_to_column_zero() {
        let rect = grid().place(
            Point::new(900.0, 0.0),
            DEFAULT_CANVAS_WIDTH_PX,
            (12, 2),
            &[],
        );
        assert_eq!(rect, GridRect::new(0, 0, 12, 2));
    }

    #[test]
    fn test_sequential_drops_never_overlap() {
        let grid = grid();
        let mut placed: Vec<GridRect> = Vec::new();
        let drops = [
            (0.0, 0.0),
            (0.0, 0.0),
            (640.0, 10.0),
            (1190.0, 70.0),
            (300.0, 70.0),
            (300.0, 70.0),
            (0.0, 200.0),
            (900.0, 200.0),
            (450.0, 500.0),
            (450.0, 500.0),
        ];
        for &(x, y) in &drops {
            let rect = grid.place(
                Point::new(x, y),
                DEFAULT_CANVAS_WIDTH_PX,
                DEFAULT_FIELD_SIZE,
                &placed,
            );
            for other in &placed {
                assert!(
                    !rect.overlaps(other),
                    "placement {rect:?} overlaps {other:?}"
                );
            }
            placed.push(rect);
        }
    }
}
