// ---------------------------------------------------------------------------
// TimeSurface – one 1D or 2D array of activation values
// ---------------------------------------------------------------------------

/// A single time surface: a row-major `rows × cols` array of values,
/// normally in `[0, 1]`.
///
/// A surface with a single row or a single column is treated as
/// one-dimensional and rendered as a line plot instead of a 3D surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSurface {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl TimeSurface {
    /// Build a surface from a flat row-major value buffer.
    ///
    /// Returns `None` when the buffer length does not match `rows * cols`
    /// or the shape is degenerate.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Option<Self> {
        if rows == 0 || cols == 0 || values.len() != rows * cols {
            return None;
        }
        Some(TimeSurface { rows, cols, values })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of values (`rows * cols`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `(row, col)`. Panics when out of bounds, like slice indexing.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Whether the surface is one-dimensional (single row or single column).
    pub fn is_1d(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// The values as a flat slice, row-major. For 1D surfaces this is the
    /// plot line in order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// TsDataset – an ordered sequence of surfaces, optionally timestamped
// ---------------------------------------------------------------------------

/// A loaded sequence of time surfaces. All surfaces share one shape; when
/// timestamps are present there is exactly one per surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsDataset {
    pub surfaces: Vec<TimeSurface>,
    pub times: Option<Vec<f64>>,
}

impl TsDataset {
    pub fn new(surfaces: Vec<TimeSurface>, times: Option<Vec<f64>>) -> Self {
        debug_assert!(times.as_ref().map_or(true, |t| t.len() == surfaces.len()));
        TsDataset { surfaces, times }
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Whether the surfaces are one-dimensional. Empty datasets count as 1D
    /// so an empty viewer falls back to the cheap line-plot path.
    pub fn is_1d(&self) -> bool {
        self.surfaces.first().map(|s| s.is_1d()).unwrap_or(true)
    }

    /// Subplot title for a surface: its timestamp when times were loaded,
    /// otherwise the 1-based index.
    pub fn label(&self, idx: usize) -> String {
        match &self.times {
            Some(times) => format!("{}", times[idx]),
            None => format!("{}", idx + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(rows: usize, cols: usize) -> TimeSurface {
        TimeSurface::new(rows, cols, vec![0.0; rows * cols]).unwrap()
    }

    #[test]
    fn is_1d_shapes() {
        assert!(surface(1, 4).is_1d());
        assert!(surface(4, 1).is_1d());
        assert!(surface(1, 1).is_1d());
        assert!(!surface(2, 2).is_1d());
        assert!(!surface(3, 5).is_1d());
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(TimeSurface::new(2, 3, vec![0.0; 5]).is_none());
        assert!(TimeSurface::new(0, 3, vec![]).is_none());
    }

    #[test]
    fn value_is_row_major() {
        let ts = TimeSurface::new(2, 3, vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2]).unwrap();
        assert_eq!(ts.value(0, 2), 0.2);
        assert_eq!(ts.value(1, 0), 1.0);
    }

    #[test]
    fn labels_use_times_when_present() {
        let ds = TsDataset::new(vec![surface(1, 3), surface(1, 3)], Some(vec![0.5, 1.25]));
        assert_eq!(ds.label(0), "0.5");
        assert_eq!(ds.label(1), "1.25");

        let ds = TsDataset::new(vec![surface(1, 3)], None);
        assert_eq!(ds.label(0), "1");
    }
}
