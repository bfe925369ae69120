//! Whole-rectangle curve construction.
use num::{PrimInt, Unsigned};
use std::cmp::min;

use crate::block::{assign_directions, build_block_list, Parity};
use crate::divide::{log2_floor, DivisionSchedule};
use crate::scan::{
    assign_scan_types_either_odd, assign_scan_types_even_even, first_block_scan_type, scan_block,
};

/// The error returned when a curve cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    /// The requested width or height was zero.
    #[error("width and height must be positive")]
    InvalidDimension,
}

/// The subdivision depth for a `width × height` rectangle.
///
/// One less than the floor-log2 of the smaller side, so that both axes
/// survive `order` rounds of [`crate::divide::divide`] with every
/// intermediate length at least 2. Rectangles whose smaller side is below 4
/// get order 0 and are scanned as a single block.
fn curve_order<T: PrimInt + Unsigned>(width: T, height: T) -> u32 {
    let min_side = min(width, height);
    if min_side <= T::one() {
        0
    } else {
        log2_floor(min_side) - 1
    }
}

/// A pseudo-Hilbert scan of a `width × height` rectangle, precomputed in
/// both directions.
///
/// The scan visits every cell of the rectangle exactly once, starting at the
/// lower-left cell, with every pair of consecutive cells one grid step
/// apart. `T` is the type used to represent the output coordinates.
///
/// ```
/// use pseudo_hilbert::PseudoHilbertCurve32;
///
/// let curve = PseudoHilbertCurve32::new(23, 17).unwrap();
/// assert_eq!(curve.index_to_coordinate().len(), 23 * 17);
/// assert_eq!(curve.index_to_coordinate()[0], [0, 0]);
/// assert_eq!(curve.coordinate_to_index(0, 0), 0);
/// ```
#[derive(Debug, Clone)]
pub struct PseudoHilbertCurve<T> {
    width: T,
    height: T,
    order: u32,
    index_to_coordinate: Vec<[T; 2]>,
    coordinate_to_index: Vec<usize>,
}

impl<T> PseudoHilbertCurve<T>
where
    T: PrimInt + Unsigned + std::fmt::Debug,
{
    /// Construct the scan of a `width × height` rectangle.
    ///
    /// Both sides must be at least 1.
    pub fn new(width: T, height: T) -> Result<Self, CurveError> {
        if width < T::one() || height < T::one() {
            return Err(CurveError::InvalidDimension);
        }

        let order = curve_order(width, height);
        let x_schedule = DivisionSchedule::new(width, order);
        let y_schedule = DivisionSchedule::new(height, order);

        let mut blocks = build_block_list::<T>(order);
        for block in blocks.iter_mut() {
            block.set_geometry(&x_schedule, &y_schedule);
        }
        assign_directions(&mut blocks);

        // All division remainders past the first row and column are even, so
        // the first block's shape is the whole rectangle's shape.
        if blocks.len() == 1 {
            blocks[0].scan_type = first_block_scan_type(blocks[0].shape);
        } else if blocks[0].shape == (Parity::Even, Parity::Even) {
            assign_scan_types_even_even(&mut blocks);
        } else {
            assign_scan_types_either_odd(&mut blocks);
        }

        let width_us = width.to_usize().unwrap();
        let height_us = height.to_usize().unwrap();
        let cells = width_us * height_us;

        let mut index_to_coordinate = Vec::with_capacity(cells);
        for block in blocks.iter() {
            scan_block(block, &mut index_to_coordinate);
        }
        debug_assert_eq!(index_to_coordinate.len(), cells);

        let mut coordinate_to_index = vec![0usize; cells];
        for (i, coordinate) in index_to_coordinate.iter().enumerate() {
            let x = coordinate[0].to_usize().unwrap();
            let y = coordinate[1].to_usize().unwrap();
            coordinate_to_index[x * height_us + y] = i;
        }

        Ok(Self {
            width,
            height,
            order,
            index_to_coordinate,
            coordinate_to_index,
        })
    }

    pub fn width(&self) -> T {
        self.width
    }

    pub fn height(&self) -> T {
        self.height
    }

    /// The recursion depth of the block subdivision.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// The scan as an ordered list of cell coordinates.
    ///
    /// Element `i` is the coordinate of the `i`-th visited cell; the list is
    /// a permutation of the whole grid and is directly usable as a polyline
    /// through the cells.
    pub fn index_to_coordinate(&self) -> &[[T; 2]] {
        &self.index_to_coordinate
    }

    /// The scan index at which the cell `(x, y)` is visited.
    ///
    /// Panics when `x` or `y` lies outside the rectangle.
    pub fn coordinate_to_index(&self, x: T, y: T) -> usize {
        assert!(x < self.width && y < self.height, "coordinate out of range");
        let height = self.height.to_usize().unwrap();
        self.coordinate_to_index[x.to_usize().unwrap() * height + y.to_usize().unwrap()]
    }

    /// Iterate over the scan's coordinates in visit order.
    pub fn iter(&self) -> impl Iterator<Item = [T; 2]> + '_ {
        self.index_to_coordinate.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_sanity() {
        assert_eq!(curve_order(1u32, 100), 0);
        assert_eq!(curve_order(2u32, 100), 0);
        assert_eq!(curve_order(3u32, 100), 0);
        assert_eq!(curve_order(4u32, 100), 1);
        assert_eq!(curve_order(23u32, 17), 3);
        assert_eq!(curve_order(191u32, 192), 6);
    }

    #[test]
    fn rejects_zero_sizes() {
        assert_eq!(
            PseudoHilbertCurve::<u32>::new(0, 4).unwrap_err(),
            CurveError::InvalidDimension
        );
        assert_eq!(
            PseudoHilbertCurve::<u32>::new(4, 0).unwrap_err(),
            CurveError::InvalidDimension
        );
    }

    #[test]
    fn two_by_two() {
        let curve = PseudoHilbertCurve::<u32>::new(2, 2).unwrap();
        assert_eq!(
            curve.index_to_coordinate(),
            [[0, 0], [0, 1], [1, 1], [1, 0]]
        );
    }

    #[test]
    fn single_row_and_column() {
        let row = PseudoHilbertCurve::<u32>::new(5, 1).unwrap();
        assert_eq!(
            row.index_to_coordinate(),
            [[0, 0], [1, 0], [2, 0], [3, 0], [4, 0]]
        );

        let column = PseudoHilbertCurve::<u32>::new(1, 5).unwrap();
        assert_eq!(
            column.index_to_coordinate(),
            [[0, 0], [0, 1], [0, 2], [0, 3], [0, 4]]
        );
    }

    #[test]
    fn inverse_map_round_trips() {
        let curve = PseudoHilbertCurve::<u32>::new(23, 17).unwrap();
        for (i, &[x, y]) in curve.index_to_coordinate().iter().enumerate() {
            assert_eq!(curve.coordinate_to_index(x, y), i);
        }
    }

    #[test]
    #[should_panic(expected = "coordinate out of range")]
    fn inverse_map_rejects_out_of_range() {
        let curve = PseudoHilbertCurve::<u32>::new(4, 4).unwrap();
        let _ = curve.coordinate_to_index(4, 0);
    }
}
