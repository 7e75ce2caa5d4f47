//! Data layer: core types, loading, filtering and reshaping.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → GenreDataset   (memoized by `cache`)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  selected genres ∧ year range → matching records
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  pivot    │  year × genre sums → PivotTable ──► export (CSV)
//!   └──────────┘
//!        │
//!        ▼
//!      melt       long-form (year, genre, gross) rows for the chart
//! ```

pub mod cache;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pivot;
