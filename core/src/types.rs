/// Signed coordinate axis accepted from callers, so that off-grid input such as `-1` stays representable.
pub type Coord = i32;

/// Caller-facing `(row, col)` position.
pub type Coord2 = (Coord, Coord);

/// Validated `(row, col)` position, usable directly as an `ndarray` index.
pub type Ix2 = (usize, usize);

/// Count type used for mine counts and total-cell counts.
pub type CellCount = usize;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Ix2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0, self.1]
    }
}

/// Converts caller coordinates into a grid position, `None` when outside `bounds`.
pub fn checked_index((row, col): Coord2, (rows, cols): Ix2) -> Option<Ix2> {
    let row = usize::try_from(row).ok()?;
    let col = usize::try_from(col).ok()?;
    (row < rows && col < cols).then_some((row, col))
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Ix2, delta: (isize, isize), bounds: Ix2) -> Option<Ix2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Up to 8 edge-clipped neighbours of a cell, in row-major order.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Ix2,
    bounds: Ix2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Ix2, bounds: Ix2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Ix2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Ix2) -> NeighborIter;
}

impl<T> NeighborIterExt for ndarray::Array2<T> {
    fn iter_neighbors(&self, index: Ix2) -> NeighborIter {
        NeighborIter::new(index, self.dim())
    }
}
