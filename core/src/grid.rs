//! Grid snapping shared by the placement paths.
//!
//! Click placement and row generation use different spacings: clicks snap to
//! [`CLICK_GRID_STEP`] while generated rows are laid out on [`ROW_SPACING`].
//! Both are kept distinct so layouts created by either path stay stable.

use crate::{CanvasPoint, GridPoint, RowLabel};

/// Spacing that pointer clicks snap to.
pub const CLICK_GRID_STEP: u32 = 30;

/// Spacing between seats and rows produced by row generation.
pub const ROW_SPACING: u32 = 40;

/// Number of seats appended by a single row generation.
pub const SEATS_PER_GENERATED_ROW: u32 = 10;

/// Rounds `coordinate` to the nearest multiple of `step`, halves rounding up.
///
/// Coordinates left of or above the canvas origin clamp to zero. A zero step
/// leaves nothing to snap to and also yields zero.
#[must_use]
pub fn snap(coordinate: f32, step: u32) -> u32 {
    if step == 0 || !coordinate.is_finite() || coordinate <= 0.0 {
        return 0;
    }

    let step = f64::from(step);
    let cells = (f64::from(coordinate) / step + 0.5).floor();
    let snapped = cells * step;
    if snapped >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        snapped as u32
    }
}

/// Snaps a raw pointer location onto the click grid.
#[must_use]
pub fn snap_click(point: CanvasPoint) -> GridPoint {
    GridPoint::new(
        snap(point.x, CLICK_GRID_STEP),
        snap(point.y, CLICK_GRID_STEP),
    )
}

/// Derives the row label of a click-placed seat from its snapped `y`.
#[must_use]
pub const fn row_label_for(y: u32) -> RowLabel {
    RowLabel::new(y / CLICK_GRID_STEP + 1)
}

/// Position of the `seat`-th seat (one-based) of a generated row.
#[must_use]
pub const fn generated_seat_position(row: u32, seat: u32) -> GridPoint {
    GridPoint::new(
        seat.saturating_mul(ROW_SPACING),
        row.saturating_mul(ROW_SPACING),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_nearest_multiple() {
        assert_eq!(snap(44.0, CLICK_GRID_STEP), 30);
        assert_eq!(snap(46.0, CLICK_GRID_STEP), 60);
        assert_eq!(snap(14.9, CLICK_GRID_STEP), 0);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(snap(15.0, CLICK_GRID_STEP), 30);
        assert_eq!(snap(45.0, CLICK_GRID_STEP), 60);
        assert_eq!(snap(20.0, ROW_SPACING), 40);
    }

    #[test]
    fn negative_and_degenerate_inputs_clamp_to_zero() {
        assert_eq!(snap(-40.0, CLICK_GRID_STEP), 0);
        assert_eq!(snap(f32::NAN, CLICK_GRID_STEP), 0);
        assert_eq!(snap(100.0, 0), 0);
    }

    #[test]
    fn click_and_row_grids_stay_distinct() {
        let clicked = snap_click(CanvasPoint::new(44.0, 44.0));
        assert_eq!(clicked, GridPoint::new(30, 30));
        assert_eq!(generated_seat_position(1, 1), GridPoint::new(40, 40));
        assert_ne!(CLICK_GRID_STEP, ROW_SPACING);
    }

    #[test]
    fn row_label_counts_click_grid_rows_from_one() {
        assert_eq!(row_label_for(0).to_string(), "R1");
        assert_eq!(row_label_for(30).to_string(), "R2");
        assert_eq!(row_label_for(59).to_string(), "R2");
        assert_eq!(row_label_for(60).to_string(), "R3");
    }
}
