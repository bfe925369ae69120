//! Scan-type assignment and the in-block raster scan.
use num::{PrimInt, Unsigned};

use crate::block::{Block, Direction, Parity};

/// A raster-scan descriptor: the corner the sweep starts from and which axis
/// is swept first.
#[derive(Debug, Clone, Copy)]
struct ScanInstruction {
    start_right: bool,
    start_top: bool,
    /// Sweep the x axis first instead of the y axis.
    x_first: bool,
}

const fn instruction(start_right: bool, start_top: bool, x_first: bool) -> ScanInstruction {
    ScanInstruction {
        start_right,
        start_top,
        x_first,
    }
}

/// The eight scanning manners, indexed by `scan_type - 1`. `o` marks the
/// starting corner, the arrow the leaving corner of an even-sized block.
///
/// ```text
///   ,--,  ,--,    <-----,    ^  ,--,  o    ,-----o
///   |  |  |  |    ,-----'    |  |  |  |    '-----,
///   |  |  |  |    '-----,    |  |  |  |    ,-----'
///   o  '--'  v    o-----'    '--'  '--'    '----->
///
///     Type 1       Type 2      Type 3       Type 4
///
///   ,--,  ,--,    o-----,    o  ,--,  ^    ,----->
///   |  |  |  |    ,-----'    |  |  |  |    '-----,
///   |  |  |  |    '-----,    |  |  |  |    ,-----'
///   v  '--'  o    <-----'    '--'  '--'    '-----o
///
///     Type 5       Type 6      Type 7       Type 8
/// ```
///
/// Types 1–4 enter and leave at the same corners as the four rotation
/// shapes, so they stand in for them in even×even rectangles; types 5–8 are
/// their mirror images, reached only through direction lookup or quadrant
/// refinement.
const SCAN_INSTRUCTIONS: [ScanInstruction; 8] = [
    // Type 1: bottom-left, y first
    instruction(false, false, false),
    // Type 2: bottom-left, x first
    instruction(false, false, true),
    // Type 3: top-right, y first
    instruction(true, true, false),
    // Type 4: top-right, x first
    instruction(true, true, true),
    // Type 5: bottom-right, y first
    instruction(true, false, false),
    // Type 6: top-left, x first
    instruction(false, true, true),
    // Type 7: top-left, y first
    instruction(false, true, false),
    // Type 8: bottom-right, x first
    instruction(true, false, true),
];

/// The quadrant refinement schedule, indexed by `scan_type - 1`.
///
/// A block whose sides are both divisible by four is scanned as four
/// half-size quadrants instead of one long raster, so that the scan still
/// leaves the block at the corner its scan type promises. Each entry lists
/// the quadrants in visit order as `(scan type, x offset, y offset)` with
/// offsets in half-block units.
const QUADRANT_SCHEDULE: [[(u8, usize, usize); 4]; 8] = [
    [(2, 0, 0), (1, 0, 1), (1, 1, 1), (4, 1, 0)],
    [(1, 0, 0), (2, 1, 0), (2, 1, 1), (3, 0, 1)],
    [(4, 1, 1), (3, 1, 0), (3, 0, 0), (2, 0, 1)],
    [(3, 1, 1), (4, 0, 1), (4, 0, 0), (1, 1, 0)],
    [(8, 1, 0), (5, 1, 1), (5, 0, 1), (6, 0, 0)],
    [(7, 0, 1), (6, 1, 1), (6, 1, 0), (5, 0, 0)],
    [(6, 0, 1), (7, 0, 0), (7, 1, 0), (8, 1, 1)],
    [(5, 1, 0), (8, 0, 0), (8, 0, 1), (7, 1, 1)],
];

/// The scanning manner implied by how a block is entered and left, exact for
/// even×even blocks.
fn scan_type_for_travel(enter: Option<Direction>, leave: Option<Direction>) -> u8 {
    use self::Direction::*;
    match (enter, leave) {
        (Some(Left), Some(Left)) => 5,
        (Some(Left), Some(Up)) => 8,
        (Some(Left), Some(Down)) => 5,
        (Some(Right), Some(Right)) => 7,
        (Some(Right), Some(Up)) => 7,
        (Some(Right), Some(Down)) => 6,
        (Some(Up), Some(Left)) => 5,
        (Some(Up), Some(Right)) => 8,
        (Some(Up), Some(Up)) => 8,
        (Some(Down), Some(Left)) => 6,
        (Some(Down), Some(Right)) => 7,
        (Some(Down), Some(Down)) => 6,
        // The last block; the curve always ends travelling right or down
        (Some(Right), None) | (Some(Down), None) => 7,
        _ => unreachable!("impossible travel: {:?} -> {:?}", enter, leave),
    }
}

/// The scanning manner of the curve's first block, fixed by the rectangle's
/// parity shape.
pub(crate) fn first_block_scan_type(shape: (Parity, Parity)) -> u8 {
    use self::Parity::*;
    match shape {
        (Even, Even) | (Odd, Even) | (Odd, Odd) => 1,
        (Even, Odd) => 2,
    }
}

/// Assign scan types when the whole rectangle is even×even: the four
/// rotation shapes correspond one-to-one to the first four scanning manners.
pub(crate) fn assign_scan_types_even_even<T>(blocks: &mut [Block<T>]) {
    for block in blocks.iter_mut() {
        block.scan_type = block.hilbert_type;
    }
}

/// Assign scan types when at least one side of the rectangle is odd.
///
/// Every block gets the manner implied by its travel directions, corrected
/// for the odd-sized blocks sitting on the rectangle's first row or column;
/// the first block's manner is fixed by its shape alone.
pub(crate) fn assign_scan_types_either_odd<T>(blocks: &mut [Block<T>]) {
    let (first, rest) = blocks.split_first_mut().unwrap();
    for block in rest.iter_mut() {
        block.scan_type = scan_type_for_travel(block.enter, block.leave);
        match block.shape {
            (Parity::Odd, Parity::Even) => block.scan_type = 8,
            (Parity::Even, Parity::Odd) => block.scan_type = 7,
            _ => {}
        }
    }
    first.scan_type = first_block_scan_type(first.shape);
}

fn step<T: PrimInt>(position: &mut T, negative: bool) {
    if negative {
        *position = *position - T::one();
    } else {
        *position = *position + T::one();
    }
}

/// Bidirectional (boustrophedon) raster scan of one rectangular region,
/// appended to `out`.
///
/// The sweep starts at the corner designated by the scan type, walks the
/// full primary axis, then advances one step along the secondary axis and
/// walks the primary axis back, and so on. Produces exactly
/// `x_size · y_size` coordinates with every consecutive pair one step apart.
fn raster_scan<T: PrimInt + Unsigned>(
    x_pos: T,
    y_pos: T,
    x_size: T,
    y_size: T,
    scan_type: u8,
    out: &mut Vec<[T; 2]>,
) {
    let ins = &SCAN_INSTRUCTIONS[(scan_type - 1) as usize];

    let mut position = [
        if ins.start_right {
            x_pos + x_size - T::one()
        } else {
            x_pos
        },
        if ins.start_top {
            y_pos + y_size - T::one()
        } else {
            y_pos
        },
    ];

    let (pri_axis, pri_size, sec_size) = if ins.x_first {
        (0, x_size, y_size)
    } else {
        (1, y_size, x_size)
    };
    let sec_axis = pri_axis ^ 1;

    // A sweep away from the starting corner is a positive step on either
    // axis; the primary sign alternates, the secondary one never does.
    let start_negative = [ins.start_right, ins.start_top];
    let mut pri_negative = start_negative[pri_axis];
    let sec_negative = start_negative[sec_axis];

    let pri_count = pri_size.to_usize().unwrap();
    let sec_count = sec_size.to_usize().unwrap();

    for sec in 0..sec_count {
        if sec > 0 {
            step(&mut position[sec_axis], sec_negative);
        }
        out.push(position);
        for _ in 1..pri_count {
            step(&mut position[pri_axis], pri_negative);
            out.push(position);
        }
        // Zigzag
        pri_negative = !pri_negative;
    }
}

/// Scan one leaf block's cells, appended to `out`.
///
/// A block whose sides are both divisible by four is refined into four
/// quadrants per [`QUADRANT_SCHEDULE`]; the refinement is applied once, the
/// quadrants themselves are always raster-scanned directly.
pub(crate) fn scan_block<T: PrimInt + Unsigned>(block: &Block<T>, out: &mut Vec<[T; 2]>) {
    let three = T::from(3).unwrap();
    if (block.x_size | block.y_size) & three == T::zero() {
        let half_x = block.x_size >> 1;
        let half_y = block.y_size >> 1;
        for &(scan_type, qx, qy) in QUADRANT_SCHEDULE[(block.scan_type - 1) as usize].iter() {
            let x_pos = if qx != 0 {
                block.x_pos + half_x
            } else {
                block.x_pos
            };
            let y_pos = if qy != 0 {
                block.y_pos + half_y
            } else {
                block.y_pos
            };
            raster_scan(x_pos, y_pos, half_x, half_y, scan_type, out);
        }
    } else {
        raster_scan(
            block.x_pos,
            block.y_pos,
            block.x_size,
            block.y_size,
            block.scan_type,
            out,
        );
    }
}
