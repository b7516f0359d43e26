//! Sparse descriptions of pixel regions as runs per row.
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// A region of pixels, as a sorted set of rows each holding sorted runs of columns.
///
/// Rows are keyed by signed coordinates and may lie outside of any image; painting a contour clips
/// it. Rows are always enumerated in ascending order, a property that region overlay relies on to
/// stop early.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contour {
    rows: BTreeMap<i32, ContourRow>,
}

/// The runs of one row of a [`Contour`].
///
/// Runs are inclusive `[start, end]` pairs, ascending and with at least one column between
/// successive runs. Overlapping or adjacent runs are coalesced when added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContourRow {
    runs: Vec<[i32; 2]>,
}

impl Contour {
    pub fn new() -> Self {
        Contour::default()
    }

    /// Add the columns `lo..=hi` of row `y`.
    pub fn union(&mut self, y: i32, lo: i32, hi: i32) {
        self.rows.entry(y).or_default().union(lo, hi);
    }

    /// Add all pixels of another contour.
    pub fn union_contour(&mut self, other: &Contour) {
        for (y, row) in other.rows() {
            for (lo, hi) in row.runs() {
                self.union(y, lo, hi);
            }
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rows.get(&y).is_some_and(|row| row.contains(x))
    }

    pub fn row(&self, y: i32) -> Option<&ContourRow> {
        self.rows.get(&y)
    }

    /// All non-empty rows, by ascending `y`.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = (i32, &'_ ContourRow)> + '_ {
        self.rows
            .iter()
            .filter(|(_, row)| !row.is_empty())
            .map(|(&y, row)| (y, row))
    }

    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }

    /// The number of contained pixels.
    pub fn area(&self) -> u64 {
        self.rows().map(|(_, row)| row.len()).sum()
    }

    /// The smallest rectangle containing the region, as `(left, top, right, bottom)` inclusive.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let (top, _) = self.rows().next()?;
        let (bottom, _) = self.rows().next_back()?;

        let (left, right) = self
            .rows()
            .filter_map(|(_, row)| Some((row.runs.first()?[0], row.runs.last()?[1])))
            .fold((i32::MAX, i32::MIN), |(l, r), (lo, hi)| (l.min(lo), r.max(hi)));

        Some((left, top, right, bottom))
    }

    /// The same region moved by an offset.
    ///
    /// Pixels moved outside of the `i32` coordinate range are dropped.
    pub fn translated(&self, dx: i32, dy: i32) -> Contour {
        let shift = |v: i32, d: i32| i64::from(v) + i64::from(d);
        let clip = |v: i64| v.clamp(i32::MIN.into(), i32::MAX.into()) as i32;

        let rows = self
            .rows()
            .filter_map(|(y, row)| {
                let y = y.checked_add(dy)?;
                let runs: Vec<_> = row
                    .runs
                    .iter()
                    .map(|&[lo, hi]| (shift(lo, dx), shift(hi, dx)))
                    .filter(|&(lo, hi)| hi >= i32::MIN.into() && lo <= i32::MAX.into())
                    .map(|(lo, hi)| [clip(lo), clip(hi)])
                    .collect();
                (!runs.is_empty()).then_some((y, ContourRow { runs }))
            })
            .collect();

        Contour { rows }
    }
}

impl ContourRow {
    /// Add the columns `lo..=hi`, merging with any run they overlap or touch.
    pub fn union(&mut self, lo: i32, hi: i32) {
        let (mut lo, mut hi) = (lo.min(hi), lo.max(hi));

        // First run that ends at or after the column before `lo`.
        let start = self
            .runs
            .partition_point(|&[_, end]| i64::from(end) + 1 < i64::from(lo));
        // First run that starts after the column past `hi`.
        let end = self
            .runs
            .partition_point(|&[begin, _]| i64::from(begin) <= i64::from(hi) + 1);

        if start < end {
            lo = lo.min(self.runs[start][0]);
            hi = hi.max(self.runs[end - 1][1]);
        }

        self.runs.splice(start..end, [[lo, hi]]);
    }

    pub fn contains(&self, x: i32) -> bool {
        self.covers(x, x)
    }

    /// Check if all columns `lo..=hi` are within a single run.
    pub fn covers(&self, lo: i32, hi: i32) -> bool {
        let idx = self.runs.partition_point(|&[_, end]| end < lo);
        self.runs
            .get(idx)
            .is_some_and(|&[begin, end]| begin <= lo && hi <= end)
    }

    /// The inclusive runs, ascending.
    pub fn runs(&self) -> impl DoubleEndedIterator<Item = (i32, i32)> + ExactSizeIterator + '_ {
        self.runs.iter().map(|&[lo, hi]| (lo, hi))
    }

    /// The number of contained columns.
    pub fn len(&self) -> u64 {
        self.runs
            .iter()
            .map(|&[lo, hi]| (i64::from(hi) - i64::from(lo) + 1) as u64)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Contour, ContourRow};
    use alloc::vec::Vec;

    fn runs(row: &ContourRow) -> Vec<(i32, i32)> {
        row.runs().collect()
    }

    #[test]
    fn union_coalesces() {
        let mut row = ContourRow::default();
        row.union(10, 12);
        row.union(0, 2);
        row.union(5, 6);
        assert_eq!(runs(&row), [(0, 2), (5, 6), (10, 12)]);

        // Adjacent on the left, overlapping on the right.
        row.union(3, 5);
        assert_eq!(runs(&row), [(0, 6), (10, 12)]);

        // Bridges the gap entirely.
        row.union(7, 9);
        assert_eq!(runs(&row), [(0, 12)]);

        // Contained already.
        row.union(4, 8);
        assert_eq!(runs(&row), [(0, 12)]);
        assert_eq!(row.len(), 13);
    }

    #[test]
    fn union_swallows_several() {
        let mut row = ContourRow::default();
        for x in (0..20).step_by(4) {
            row.union(x, x + 1);
        }
        row.union(-5, 9);
        assert_eq!(runs(&row), [(-5, 9), (12, 13), (16, 17)]);
        row.union(i32::MAX - 1, i32::MAX);
        row.union(i32::MIN, i32::MIN);
        assert_eq!(runs(&row).len(), 5);
    }

    #[test]
    fn containment() {
        let mut contour = Contour::new();
        contour.union(-3, 2, 4);
        contour.union(-3, 8, 8);
        contour.union(7, 0, 0);

        assert!(contour.contains(3, -3));
        assert!(contour.contains(8, -3));
        assert!(!contour.contains(6, -3));
        assert!(!contour.contains(3, 0));
        assert!(contour.contains(0, 7));

        let row = contour.row(-3).unwrap();
        assert!(row.covers(2, 4));
        assert!(!row.covers(2, 8));
        assert_eq!(contour.area(), 5);
        assert_eq!(contour.bounds(), Some((0, -3, 8, 7)));
    }

    #[test]
    fn rows_ascending() {
        let mut contour = Contour::new();
        for y in [5, -1, 3, 0] {
            contour.union(y, y, y);
        }

        let keys: Vec<i32> = contour.rows().map(|(y, _)| y).collect();
        assert_eq!(keys, [-1, 0, 3, 5]);

        let moved = contour.translated(1, -1);
        assert!(moved.contains(6, 4));
        assert!(moved.contains(0, -2));
        assert_eq!(moved.area(), contour.area());
    }

    #[test]
    fn translated_drops_out_of_range() {
        let mut contour = Contour::new();
        contour.union(0, i32::MAX - 1, i32::MAX);
        contour.union(0, i32::MIN, i32::MIN + 2);
        contour.union(i32::MAX, 0, 0);

        let moved = contour.translated(1, 0);
        assert_eq!(runs(moved.row(0).unwrap()), [(i32::MIN + 1, i32::MIN + 3), (i32::MAX, i32::MAX)]);
        assert!(moved.contains(1, i32::MAX));

        let moved = contour.translated(-2, 1);
        assert_eq!(runs(moved.row(1).unwrap()), [(i32::MIN, i32::MIN), (i32::MAX - 3, i32::MAX - 2)]);
        assert!(moved.row(i32::MAX).is_none());
        assert_eq!(moved.area(), 3);
    }

    #[test]
    fn merging_contours() {
        let mut a = Contour::new();
        a.union(0, 0, 3);
        let mut b = Contour::new();
        b.union(0, 4, 6);
        b.union(1, 0, 0);

        a.union_contour(&b);
        assert_eq!(runs(a.row(0).unwrap()), [(0, 6)]);
        assert!(a.contains(0, 1));
        assert!(Contour::new().is_empty());
        assert_eq!(Contour::new().bounds(), None);
    }
}
