use std::collections::BTreeSet;
use std::fmt;

use super::model::{GenreDataset, GenreRecord};

// ---------------------------------------------------------------------------
// YearRange – inclusive year window
// ---------------------------------------------------------------------------

/// Inclusive `[low, high]` year window.  `low > high` is an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.low <= year && year <= self.high
    }

    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    /// Intersect with `bounds`.  The result may be empty.
    pub fn clamp_to(&self, bounds: YearRange) -> YearRange {
        YearRange {
            low: self.low.max(bounds.low),
            high: self.high.min(bounds.high),
        }
    }
}

impl From<(i32, i32)> for YearRange {
    fn from((low, high): (i32, i32)) -> Self {
        Self { low, high }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// GenreFilter – the two widget selections
// ---------------------------------------------------------------------------

/// Selected genres plus the year window.  An empty genre set selects nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreFilter {
    pub genres: BTreeSet<String>,
    pub years: YearRange,
}

impl GenreFilter {
    pub fn new<I, S>(genres: I, years: YearRange) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
            years,
        }
    }

    /// A record passes when its genre is selected AND its year is in range.
    pub fn matches(&self, record: &GenreRecord) -> bool {
        self.years.contains(record.year) && self.genres.contains(&record.genre)
    }
}

/// Return the records that pass `filter`, in file order.
pub fn filter_records<'a>(dataset: &'a GenreDataset, filter: &GenreFilter) -> Vec<&'a GenreRecord> {
    if filter.genres.is_empty() || filter.years.is_empty() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .filter(|rec| filter.matches(rec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> GenreDataset {
        let rows = [
            ("Drama", 2010, 100.0),
            ("Drama", 2011, 50.0),
            ("Comedy", 2010, 30.0),
            ("Horror", 2012, 7.0),
        ];
        GenreDataset::from_records(
            rows.iter()
                .map(|&(g, y, v)| GenreRecord {
                    genre: g.to_string(),
                    year: y,
                    gross: v,
                })
                .collect(),
        )
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let r = YearRange::new(2010, 2011);
        assert!(r.contains(2010));
        assert!(r.contains(2011));
        assert!(!r.contains(2009));
        assert!(!r.contains(2012));
        assert!(YearRange::new(2012, 2010).is_empty());
        assert!(!YearRange::new(2010, 2010).is_empty());
    }

    #[test]
    fn clamp_intersects() {
        let bounds = YearRange::new(2010, 2012);
        assert_eq!(
            YearRange::new(2005, 2011).clamp_to(bounds),
            YearRange::new(2010, 2011)
        );
        assert!(YearRange::new(2014, 2016).clamp_to(bounds).is_empty());
    }

    #[test]
    fn both_predicates_apply() {
        let ds = dataset();
        let filter = GenreFilter::new(["Drama", "Horror"], YearRange::new(2010, 2011));
        let kept: Vec<_> = filter_records(&ds, &filter)
            .iter()
            .map(|r| (r.genre.as_str(), r.year))
            .collect();
        assert_eq!(kept, [("Drama", 2010), ("Drama", 2011)]);
    }

    #[test]
    fn empty_selections_keep_nothing() {
        let ds = dataset();
        let no_genres = GenreFilter::new(Vec::<String>::new(), YearRange::new(2000, 2100));
        assert!(filter_records(&ds, &no_genres).is_empty());

        let no_years = GenreFilter::new(["Drama"], YearRange::new(2011, 2010));
        assert!(filter_records(&ds, &no_years).is_empty());
    }

    #[test]
    fn unknown_genres_and_years_are_harmless() {
        let ds = dataset();
        let filter = GenreFilter::new(["Western"], YearRange::new(1900, 1950));
        assert!(filter_records(&ds, &filter).is_empty());
    }
}
