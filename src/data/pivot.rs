use std::collections::{BTreeMap, BTreeSet};

use super::filter::{filter_records, GenreFilter};
use super::model::GenreDataset;

// ---------------------------------------------------------------------------
// PivotTable – wide form: rows = years, columns = genres
// ---------------------------------------------------------------------------

/// Year x genre matrix of summed gross.
///
/// Columns are sorted by genre name, rows by year descending.  Every
/// (year, genre) combination of the table has a value; combinations with
/// no source rows hold `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    genres: Vec<String>,
    years: Vec<i32>,
    /// `cells[row][col]`, indexed like `years` x `genres`.
    cells: Vec<Vec<f64>>,
}

/// One cell of a pivot table in long form.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub year: i32,
    pub genre: String,
    pub gross: f64,
}

impl PivotTable {
    /// Pivot `(year, genre, gross)` triples, summing duplicates and
    /// zero-filling missing combinations.
    pub fn from_long<I, S>(triples: I) -> Self
    where
        I: IntoIterator<Item = (i32, S, f64)>,
        S: AsRef<str>,
    {
        let mut sums: BTreeMap<i32, BTreeMap<String, f64>> = BTreeMap::new();
        let mut genre_set: BTreeSet<String> = BTreeSet::new();

        for (year, genre, gross) in triples {
            let genre = genre.as_ref();
            if !genre_set.contains(genre) {
                genre_set.insert(genre.to_string());
            }
            *sums
                .entry(year)
                .or_default()
                .entry(genre.to_string())
                .or_insert(0.0) += gross;
        }

        let genres: Vec<String> = genre_set.into_iter().collect();
        let mut years = Vec::with_capacity(sums.len());
        let mut cells = Vec::with_capacity(sums.len());

        for (year, by_genre) in sums.into_iter().rev() {
            years.push(year);
            cells.push(
                genres
                    .iter()
                    .map(|g| by_genre.get(g).copied().unwrap_or(0.0))
                    .collect(),
            );
        }

        PivotTable {
            genres,
            years,
            cells,
        }
    }

    /// Column labels.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Row labels, descending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Iterate rows as `(year, values)` with values ordered like [`genres`](Self::genres).
    pub fn rows(&self) -> impl Iterator<Item = (i32, &[f64])> + '_ {
        self.years
            .iter()
            .copied()
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Sum of every cell.
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }
}

#[cfg(test)]
impl PivotTable {
    /// Cell value.  `None` when the year or genre is not part of the table.
    pub fn get(&self, year: i32, genre: &str) -> Option<f64> {
        let row = self.years.iter().position(|&y| y == year)?;
        let col = self.genres.iter().position(|g| g == genre)?;
        Some(self.cells[row][col])
    }
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Filter the dataset and pivot what remains.
pub fn aggregate(dataset: &GenreDataset, filter: &GenreFilter) -> PivotTable {
    PivotTable::from_long(
        filter_records(dataset, filter)
            .into_iter()
            .map(|rec| (rec.year, rec.genre.as_str(), rec.gross)),
    )
}

/// Unpivot to one row per cell: all years of the first genre, then the next.
pub fn melt(table: &PivotTable) -> Vec<LongRow> {
    let mut out = Vec::with_capacity(table.genres.len() * table.years.len());
    for (col, genre) in table.genres.iter().enumerate() {
        for (row, &year) in table.years.iter().enumerate() {
            out.push(LongRow {
                year,
                genre: genre.clone(),
                gross: table.cells[row][col],
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::filter::YearRange;
    use super::super::model::GenreRecord;
    use super::*;

    fn dataset(rows: &[(&str, i32, f64)]) -> GenreDataset {
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

    fn sample() -> GenreDataset {
        dataset(&[
            ("Drama", 2010, 100.0),
            ("Drama", 2011, 50.0),
            ("Comedy", 2010, 30.0),
            ("Action", 2012, 80.0),
            ("Drama", 2010, 5.0),
            ("Horror", 2009, 11.0),
            ("Action", 2010, 40.0),
        ])
    }

    #[test]
    fn reference_example() {
        let ds = dataset(&[
            ("Drama", 2010, 100.0),
            ("Drama", 2011, 50.0),
            ("Comedy", 2010, 30.0),
        ]);
        let filter = GenreFilter::new(["Drama", "Comedy"], YearRange::new(2010, 2011));
        let table = aggregate(&ds, &filter);

        assert_eq!(table.years(), [2011, 2010]);
        assert_eq!(table.genres(), ["Comedy", "Drama"]);
        assert_eq!(table.get(2010, "Drama"), Some(100.0));
        assert_eq!(table.get(2010, "Comedy"), Some(30.0));
        assert_eq!(table.get(2011, "Drama"), Some(50.0));
        assert_eq!(table.get(2011, "Comedy"), Some(0.0));
        assert_eq!(table.get(2012, "Drama"), None);

        let rows: Vec<_> = table.rows().map(|(y, v)| (y, v.to_vec())).collect();
        assert_eq!(rows, [(2011, vec![0.0, 50.0]), (2010, vec![30.0, 100.0])]);
    }

    #[test]
    fn empty_genre_set_gives_no_columns() {
        let filter = GenreFilter::new(Vec::<String>::new(), YearRange::new(1900, 2100));
        let table = aggregate(&sample(), &filter);
        assert!(table.genres().is_empty());
        assert!(table.is_empty());
        assert_eq!(table, PivotTable::default());
    }

    #[test]
    fn empty_year_range_gives_empty_table() {
        let filter = GenreFilter::new(["Drama"], YearRange::new(2011, 2010));
        assert!(aggregate(&sample(), &filter).is_empty());
    }

    #[test]
    fn duplicates_are_summed() {
        let filter = GenreFilter::new(["Drama"], YearRange::new(2010, 2010));
        let table = aggregate(&sample(), &filter);
        assert_eq!(table.get(2010, "Drama"), Some(105.0));
        assert_eq!(table.total(), 105.0);
    }

    #[test]
    fn cells_equal_filtered_sums() {
        let ds = sample();
        let filter = GenreFilter::new(["Drama", "Action", "Comedy"], YearRange::new(2010, 2012));
        let table = aggregate(&ds, &filter);

        for &year in table.years() {
            for genre in table.genres() {
                let expected: f64 = ds
                    .records()
                    .iter()
                    .filter(|r| r.year == year && &r.genre == genre && filter.matches(r))
                    .map(|r| r.gross)
                    .sum();
                assert_eq!(table.get(year, genre), Some(expected), "{year}/{genre}");
            }
        }
    }

    #[test]
    fn aggregate_is_deterministic() {
        let ds = sample();
        let filter = GenreFilter::new(["Drama", "Action"], YearRange::new(2009, 2012));
        assert_eq!(aggregate(&ds, &filter), aggregate(&ds, &filter));
    }

    #[test]
    fn widening_never_removes_non_zero_cells() {
        let ds = sample();
        let narrow = GenreFilter::new(["Drama"], YearRange::new(2010, 2010));
        let wider = [
            GenreFilter::new(["Drama", "Comedy"], YearRange::new(2010, 2010)),
            GenreFilter::new(["Drama"], YearRange::new(2009, 2012)),
            GenreFilter::new(["Drama", "Comedy", "Action", "Horror"], YearRange::new(2000, 2020)),
        ];

        let base = aggregate(&ds, &narrow);
        for filter in &wider {
            let widened = aggregate(&ds, filter);
            for (year, values) in base.rows() {
                for (genre, &v) in base.genres().iter().zip(values) {
                    if v != 0.0 {
                        assert_eq!(widened.get(year, genre), Some(v));
                    }
                }
            }
            assert!(widened.total() >= base.total());
        }
    }

    #[test]
    fn melt_is_genre_major() {
        let ds = dataset(&[
            ("Drama", 2010, 100.0),
            ("Drama", 2011, 50.0),
            ("Comedy", 2010, 30.0),
        ]);
        let filter = GenreFilter::new(["Drama", "Comedy"], YearRange::new(2010, 2011));
        let long = melt(&aggregate(&ds, &filter));

        let triples: Vec<_> = long
            .iter()
            .map(|r| (r.genre.as_str(), r.year, r.gross))
            .collect();
        assert_eq!(
            triples,
            [
                ("Comedy", 2011, 0.0),
                ("Comedy", 2010, 30.0),
                ("Drama", 2011, 50.0),
                ("Drama", 2010, 100.0),
            ]
        );
    }

    #[test]
    fn melt_then_pivot_reproduces_table() {
        let ds = sample();
        let filter = GenreFilter::new(["Drama", "Action", "Horror"], YearRange::new(2009, 2012));
        let table = aggregate(&ds, &filter);
        let long = melt(&table);

        let rebuilt = PivotTable::from_long(long.iter().map(|r| (r.year, &r.genre, r.gross)));
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn melt_of_empty_table_is_empty() {
        assert!(melt(&PivotTable::default()).is_empty());
    }
}
