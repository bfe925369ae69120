//! Block subdivision: the quaternary rotation templates and the travel
//! directions between curve-consecutive blocks.
use num::{PrimInt, Unsigned};

use crate::divide::DivisionSchedule;

/// A travel direction between two adjacent blocks, on the `+x`-right,
/// `+y`-up coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The oddness or evenness of a side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of<T: PrimInt>(x: T) -> Self {
        if x & T::one() == T::zero() {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// A rectangular region of cells, positioned by one address bit per axis and
/// per subdivision level.
///
/// The addresses are kept directly in integer form (most significant bit
/// first, so a child's index is `parent's index << 1 | child bit`) and index
/// the division schedules.
#[derive(Debug)]
pub(crate) struct Block<T> {
    /// The rotation shape of this block's sub-curve, `1..=4`.
    pub hilbert_type: u8,
    pub x_index: usize,
    pub y_index: usize,
    pub x_size: T,
    pub y_size: T,
    pub x_pos: T,
    pub y_pos: T,
    /// Parity of `(x_size, y_size)`.
    pub shape: (Parity, Parity),
    /// How the block's cells are raster-scanned, `1..=8`. Zero until
    /// assigned.
    pub scan_type: u8,
    /// `None` at the first block of the curve.
    pub enter: Option<Direction>,
    /// `None` at the last block of the curve.
    pub leave: Option<Direction>,
}

/// One child of a rotation template: the child's curve type and its address
/// bit on each axis.
#[derive(Debug, Clone, Copy)]
struct ChildTemplate {
    hilbert_type: u8,
    x_bit: usize,
    y_bit: usize,
}

const fn child(hilbert_type: u8, x_bit: usize, y_bit: usize) -> ChildTemplate {
    ChildTemplate {
        hilbert_type,
        x_bit,
        y_bit,
    }
}

/// The rotation templates, indexed by `hilbert_type - 1`.
///
/// Replacing a block with its four children per its type's template is the
/// classical quaternary Hilbert substitution. The four types are the four
/// rotations of the basic shape, with the children listed in curve order:
///
/// ```text
///   *------*    <------*    ^      |    *------<
///   |      |           |    |      |    |
///   |      |           |    |      |    |
///   ^      v    >------*    *------*    *------>
///
///   Type 1      Type 2      Type 3      Type 4
/// ```
///
/// Each entry holds the child's own type and its address bit per axis; for
/// example type 1 starts in the lower-left quadrant `(0, 0)` with a type-2
/// sub-curve and ends in the lower-right quadrant `(1, 0)` with a type-4
/// sub-curve.
const TEMPLATE_TABLE: [[ChildTemplate; 4]; 4] = [
    // Type 1
    [
        child(2, 0, 0),
        child(1, 0, 1),
        child(1, 1, 1),
        child(4, 1, 0),
    ],
    // Type 2
    [
        child(1, 0, 0),
        child(2, 1, 0),
        child(2, 1, 1),
        child(3, 0, 1),
    ],
    // Type 3
    [
        child(4, 1, 1),
        child(3, 1, 0),
        child(3, 0, 0),
        child(2, 0, 1),
    ],
    // Type 4
    [
        child(3, 1, 1),
        child(4, 0, 1),
        child(4, 0, 0),
        child(1, 1, 0),
    ],
];

/// The travel direction between two curve-consecutive blocks, indexed by
/// `[from type - 1][to type - 1]`. Exact for blocks of even×even shape.
const EVEN_EVEN_DIRECTIONS: [[Direction; 4]; 4] = {
    use self::Direction::*;
    [
        [Right, Right, Down, Down],
        [Up, Up, Left, Left],
        [Up, Up, Left, Left],
        [Right, Right, Down, Down],
    ]
};

impl<T: PrimInt + Unsigned> Block<T> {
    fn with_address(hilbert_type: u8, x_index: usize, y_index: usize) -> Self {
        Self {
            hilbert_type,
            x_index,
            y_index,
            x_size: T::zero(),
            y_size: T::zero(),
            x_pos: T::zero(),
            y_pos: T::zero(),
            shape: (Parity::Even, Parity::Even),
            scan_type: 0,
            enter: None,
            leave: None,
        }
    }

    /// Attach the geometry looked up from the division schedules.
    pub fn set_geometry(&mut self, x: &DivisionSchedule<T>, y: &DivisionSchedule<T>) {
        self.x_size = x.size(self.x_index);
        self.y_size = y.size(self.y_index);
        self.x_pos = x.origin(self.x_index);
        self.y_pos = y.origin(self.y_index);
        self.shape = (Parity::of(self.x_size), Parity::of(self.y_size));
    }
}

/// Build the list of all `4^order` leaf blocks in curve-traversal order.
///
/// Starts from a single type-1 root block and substitutes every block with
/// its four template children once per round, appending one address bit per
/// axis each time.
pub(crate) fn build_block_list<T: PrimInt + Unsigned>(order: u32) -> Vec<Block<T>> {
    let mut blocks = vec![Block::with_address(1, 0, 0)];
    for _ in 0..order {
        let mut next = Vec::with_capacity(blocks.len() * 4);
        for block in blocks.iter() {
            let template = &TEMPLATE_TABLE[(block.hilbert_type - 1) as usize];
            for child in template.iter() {
                next.push(Block::with_address(
                    child.hilbert_type,
                    block.x_index << 1 | child.x_bit,
                    block.y_index << 1 | child.y_bit,
                ));
            }
        }
        blocks = next;
    }
    blocks
}

/// Set the enter/leave direction of every block from the types of each
/// curve-consecutive pair.
pub(crate) fn assign_directions<T>(blocks: &mut [Block<T>]) {
    for i in 1..blocks.len() {
        let from = blocks[i - 1].hilbert_type;
        let to = blocks[i].hilbert_type;
        let direction = EVEN_EVEN_DIRECTIONS[(from - 1) as usize][(to - 1) as usize];
        blocks[i - 1].leave = Some(direction);
        blocks[i].enter = Some(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divide::DivisionSchedule;

    #[test]
    fn block_list_size_and_addresses() {
        for order in 0..5u32 {
            let blocks = build_block_list::<u32>(order);
            assert_eq!(blocks.len(), 1 << (2 * order));
            for block in blocks.iter() {
                assert!(block.x_index < 1 << order);
                assert!(block.y_index < 1 << order);
                assert!(block.hilbert_type >= 1 && block.hilbert_type <= 4);
            }
        }
    }

    #[test]
    fn block_list_starts_at_the_origin() {
        for order in 0..5u32 {
            let blocks = build_block_list::<u32>(order);
            assert_eq!(blocks[0].x_index, 0);
            assert_eq!(blocks[0].y_index, 0);
        }
    }

    #[test]
    fn consecutive_blocks_are_adjacent() {
        // The template substitution must keep the block path connected: each
        // pair of curve-consecutive blocks differs by one step on one axis.
        for order in 1..5u32 {
            let blocks = build_block_list::<u32>(order);
            for pair in blocks.windows(2) {
                let dx = (pair[0].x_index as i64 - pair[1].x_index as i64).abs();
                let dy = (pair[0].y_index as i64 - pair[1].y_index as i64).abs();
                assert_eq!(dx + dy, 1, "{:?} -> {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn blocks_tile_the_rectangle() {
        let order = 3;
        let (width, height) = (23u32, 17u32);
        let x = DivisionSchedule::new(width, order);
        let y = DivisionSchedule::new(height, order);
        let mut blocks = build_block_list::<u32>(order);

        let mut area = 0;
        for block in blocks.iter_mut() {
            block.set_geometry(&x, &y);
            area += block.x_size * block.y_size;
        }
        assert_eq!(area, width * height);
    }

    #[test]
    fn directions_match_the_block_step() {
        // The direction table must agree with the geometric step between
        // consecutive block addresses.
        let mut blocks = build_block_list::<u32>(3);
        assign_directions(&mut blocks);
        for pair in blocks.windows(2) {
            let expected = match (
                pair[1].x_index as i64 - pair[0].x_index as i64,
                pair[1].y_index as i64 - pair[0].y_index as i64,
            ) {
                (1, 0) => Direction::Right,
                (-1, 0) => Direction::Left,
                (0, 1) => Direction::Up,
                (0, -1) => Direction::Down,
                step => panic!("non-adjacent blocks: {:?}", step),
            };
            assert_eq!(pair[0].leave, Some(expected));
            assert_eq!(pair[1].enter, Some(expected));
        }
    }
}
