//! Mixed-radix tensor shape and the line codec
//!
//! Cells are stored with dimension 0 varying fastest: dimension `d` has a
//! stride equal to the product of the lengths of every dimension before it.
//!
//! A *line* is the set of cells obtained by fixing every coordinate except
//! one. Lines are enumerated dimension-major; inside a dimension the
//! remaining coordinates count in mixed radix with the lowest non-swept
//! dimension varying fastest. That global enumeration index is also the slot
//! of the line in the marginals buffer.
//!
//! Nothing here allocates: lengths, strides and block offsets live in
//! fixed-capacity arrays sized by [`MAX_DIMENSIONS`].

use crate::error::PurifyError;

/// Maximum tensor rank accepted anywhere in the crate.
pub const MAX_DIMENSIONS: usize = 30;

/// Validated tensor shape with precomputed strides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    rank: usize,
    lengths: [usize; MAX_DIMENSIONS],
    strides: [usize; MAX_DIMENSIONS],
    offsets: [usize; MAX_DIMENSIONS],
    cell_count: usize,
    line_count: usize,
}

impl Shape {
    /// Build a shape from per-dimension lengths.
    ///
    /// Every length must be positive, the rank must be in
    /// `1..=MAX_DIMENSIONS`, and both the cell count and the line count must
    /// fit in `usize`.
    pub fn new(lengths: &[usize]) -> Result<Self, PurifyError> {
        if lengths.is_empty() {
            return Err(PurifyError::EmptyShape);
        }
        if lengths.len() > MAX_DIMENSIONS {
            return Err(PurifyError::TooManyDimensions {
                count: i64::try_from(lengths.len()).unwrap_or(i64::MAX),
                max: MAX_DIMENSIONS,
            });
        }

        let mut shape = Self {
            rank: lengths.len(),
            lengths: [0; MAX_DIMENSIONS],
            strides: [0; MAX_DIMENSIONS],
            offsets: [0; MAX_DIMENSIONS],
            cell_count: 1,
            line_count: 0,
        };

        for (dimension, &length) in lengths.iter().enumerate() {
            if length == 0 {
                return Err(PurifyError::ZeroDimensionLength { dimension });
            }
            shape.lengths[dimension] = length;
            shape.strides[dimension] = shape.cell_count;
            shape.cell_count = shape
                .cell_count
                .checked_mul(length)
                .ok_or(PurifyError::CellCountOverflow { dimension })?;
        }

        // Marginal blocks: one slot per line, dimension 0's block first.
        for dimension in 0..shape.rank {
            shape.offsets[dimension] = shape.line_count;
            shape.line_count = shape
                .line_count
                .checked_add(shape.cell_count / shape.lengths[dimension])
                .ok_or(PurifyError::CellCountOverflow { dimension })?;
        }

        Ok(shape)
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Per-dimension lengths.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths[..self.rank]
    }

    /// Per-dimension strides in the flat cell buffer.
    pub fn strides(&self) -> &[usize] {
        &self.strides[..self.rank]
    }

    /// Total number of cells (product of the lengths).
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Total number of axis-aligned lines across every dimension.
    ///
    /// This is the required size of the marginals buffer.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of lines running along `dimension`.
    pub fn lines_in_dimension(&self, dimension: usize) -> usize {
        if dimension >= self.rank {
            return 0;
        }
        self.cell_count / self.lengths[dimension]
    }

    /// First marginal slot belonging to `dimension`.
    pub fn dimension_offset(&self, dimension: usize) -> usize {
        if dimension >= self.rank {
            return self.line_count;
        }
        self.offsets[dimension]
    }

    /// Flat cell index of a coordinate tuple.
    pub fn encode(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.rank {
            return None;
        }
        let mut cell = 0;
        for (dimension, &coord) in coords.iter().enumerate() {
            if coord >= self.lengths[dimension] {
                return None;
            }
            cell += coord * self.strides[dimension];
        }
        Some(cell)
    }

    /// Coordinates of a flat cell index, written into `coords`.
    ///
    /// Returns the filled prefix, or `None` when the cell is out of range or
    /// `coords` is shorter than the rank.
    pub fn decode<'c>(&self, cell: usize, coords: &'c mut [usize]) -> Option<&'c [usize]> {
        if cell >= self.cell_count || coords.len() < self.rank {
            return None;
        }
        let mut remaining = cell;
        for (coord, &length) in coords.iter_mut().zip(self.lengths()) {
            *coord = remaining % length;
            remaining /= length;
        }
        Some(&coords[..self.rank])
    }

    /// Decode a global line index into the line it addresses.
    pub fn line(&self, line_index: usize) -> Option<Line> {
        if line_index >= self.line_count {
            return None;
        }
        let mut dimension = 0;
        let mut surface = line_index;
        loop {
            let lines = self.lines_in_dimension(dimension);
            if surface < lines {
                break;
            }
            surface -= lines;
            dimension += 1;
        }
        self.line_in_dimension(dimension, surface)
    }

    /// Decode the `surface`-th line running along `dimension`.
    pub fn line_in_dimension(&self, dimension: usize, surface: usize) -> Option<Line> {
        if surface >= self.lines_in_dimension(dimension) {
            return None;
        }
        let mut remaining = surface;
        let mut start = 0;
        for other in 0..self.rank {
            if other == dimension {
                continue;
            }
            let length = self.lengths[other];
            start += (remaining % length) * self.strides[other];
            remaining /= length;
        }
        Some(Line {
            dimension,
            start,
            stride: self.strides[dimension],
            len: self.lengths[dimension],
        })
    }

    /// Global line index (marginal slot) of the line through `coords`
    /// running along `dimension`.
    pub fn surface_index(&self, dimension: usize, coords: &[usize]) -> Option<usize> {
        if dimension >= self.rank || coords.len() != self.rank {
            return None;
        }
        let mut surface = 0;
        let mut radix = 1;
        for other in 0..self.rank {
            if coords[other] >= self.lengths[other] {
                return None;
            }
            if other == dimension {
                continue;
            }
            surface += coords[other] * radix;
            radix *= self.lengths[other];
        }
        Some(self.offsets[dimension] + surface)
    }

    /// Every line in enumeration order, paired with its marginal slot.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            shape: self,
            dimension: 0,
            surface: 0,
            slot: 0,
        }
    }
}

/// One axis-aligned line of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    /// Dimension the line runs along
    pub dimension: usize,
    /// Flat index of the first cell
    pub start: usize,
    /// Distance between consecutive cells
    pub stride: usize,
    /// Number of cells
    pub len: usize,
}

impl Line {
    /// Flat indices of the cells on this line.
    pub fn cells(&self) -> impl Iterator<Item = usize> {
        let Line { start, stride, .. } = *self;
        (0..self.len).map(move |i| start + i * stride)
    }
}

/// Iterator over `(slot, line)` in enumeration order.
pub struct Lines<'a> {
    shape: &'a Shape,
    dimension: usize,
    surface: usize,
    slot: usize,
}

impl Iterator for Lines<'_> {
    type Item = (usize, Line);

    fn next(&mut self) -> Option<Self::Item> {
        while self.dimension < self.shape.rank {
            if let Some(line) = self.shape.line_in_dimension(self.dimension, self.surface) {
                let slot = self.slot;
                self.surface += 1;
                self.slot += 1;
                return Some((slot, line));
            }
            self.dimension += 1;
            self.surface = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.line_count - self.slot;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Lines<'_> {}
