// ---------------------------------------------------------------------------
// Subplot grid arrangement
// ---------------------------------------------------------------------------

/// Pick a `(rows, cols)` subplot arrangement for `n_plots` surfaces.
///
/// One or two surfaces go on a single row. Otherwise candidate column counts
/// 5, 4 and 3 are tried and the one leaving the fewest empty subplot slots
/// wins; on a tie the wider grid is kept.
pub fn auto_arrange(n_plots: usize) -> (usize, usize) {
    if n_plots == 0 {
        return (1, 1);
    }
    if n_plots < 3 {
        return (1, n_plots);
    }

    let mut cols = 0;
    let mut empty = usize::MAX;
    for tcols in [5usize, 4, 3] {
        let trows = n_plots.div_ceil(tcols);
        let tempty = tcols * trows - n_plots;
        if tempty < empty {
            cols = tcols;
            empty = tempty;
        }
    }
    (n_plots.div_ceil(cols), cols)
}

#[cfg(test)]
mod tests {
    use super::auto_arrange;

    #[test]
    fn small_counts_get_one_row() {
        assert_eq!(auto_arrange(1), (1, 1));
        assert_eq!(auto_arrange(2), (1, 2));
    }

    #[test]
    fn zero_plots_degrades_to_a_single_slot() {
        assert_eq!(auto_arrange(0), (1, 1));
    }

    #[test]
    fn minimizes_empty_slots() {
        // Exact fits.
        assert_eq!(auto_arrange(3), (1, 3));
        assert_eq!(auto_arrange(4), (1, 4));
        assert_eq!(auto_arrange(5), (1, 5));
        assert_eq!(auto_arrange(9), (3, 3));
        assert_eq!(auto_arrange(10), (2, 5));
        assert_eq!(auto_arrange(12), (3, 4));
        assert_eq!(auto_arrange(15), (3, 5));
        assert_eq!(auto_arrange(16), (4, 4));

        // No exact fit: ties keep the wider grid.
        assert_eq!(auto_arrange(7), (2, 4));
        assert_eq!(auto_arrange(11), (3, 4));
        assert_eq!(auto_arrange(13), (3, 5));
        // 17 leaves one empty slot in a 6x3 grid, beating 4x5's three.
        assert_eq!(auto_arrange(17), (6, 3));
    }

    #[test]
    fn never_underallocates() {
        for n in 1..200 {
            let (rows, cols) = auto_arrange(n);
            assert!(rows * cols >= n, "{n} plots in {rows}x{cols}");
            assert!(rows * cols - n < cols.max(1));
        }
    }
}
