use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Genre, typical yearly gross in 1990 (USD), yearly growth.
const GENRES: [(&str, f64, f64); 20] = [
    ("Action", 2.4e9, 0.055),
    ("Adventure", 2.1e9, 0.060),
    ("Animation", 6.0e8, 0.070),
    ("Comedy", 2.6e9, 0.020),
    ("Crime", 9.0e8, 0.015),
    ("Documentary", 2.0e7, 0.030),
    ("Drama", 2.9e9, 0.018),
    ("Family", 8.0e8, 0.045),
    ("Fantasy", 7.0e8, 0.065),
    ("Foreign", 5.0e6, 0.010),
    ("History", 1.5e8, 0.020),
    ("Horror", 4.0e8, 0.040),
    ("Music", 1.2e8, 0.010),
    ("Mystery", 3.5e8, 0.020),
    ("Romance", 9.5e8, 0.012),
    ("Science Fiction", 8.0e8, 0.070),
    ("TV Movie", 1.0e6, 0.000),
    ("Thriller", 1.6e9, 0.030),
    ("War", 1.8e8, 0.015),
    ("Western", 9.0e7, -0.010),
];

const FIRST_YEAR: i32 = 1990;
const LAST_YEAR: i32 = 2016;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Yearly gross with log-normal noise and the occasional blockbuster year.
fn yearly_gross(base: f64, growth: f64, year: i32, rng: &mut SimpleRng) -> f64 {
    let trend = base * (1.0 + growth).powi(year - FIRST_YEAR);
    let noise = rng.gauss(0.0, 0.18).exp();
    let hit = if rng.next_f64() < 0.08 { 1.6 } else { 1.0 };
    (trend * noise * hit).round().max(0.0)
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/movies_genres_summary.csv"));

    let mut rng = SimpleRng::new(42);

    let mut genres: Vec<&str> = Vec::new();
    let mut years: Vec<i32> = Vec::new();
    let mut grosses: Vec<f64> = Vec::new();

    for year in FIRST_YEAR..=LAST_YEAR {
        for &(genre, base, growth) in &GENRES {
            genres.push(genre);
            years.push(year);
            grosses.push(yearly_gross(base, growth, year, &mut rng));
        }
    }

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).expect("Failed to create output directory");
    }

    let is_parquet = output_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));

    if is_parquet {
        let schema = Arc::new(Schema::new(vec![
            Field::new("genre", DataType::Utf8, false),
            Field::new("year", DataType::Int32, false),
            Field::new("gross", DataType::Float64, false),
        ]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(genres.clone())),
                Arc::new(Int32Array::from(years.clone())),
                Arc::new(Float64Array::from(grosses.clone())),
            ],
        )
        .expect("Failed to create RecordBatch");

        let file = std::fs::File::create(&output_path).expect("Failed to create output file");
        let mut writer =
            ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
        writer.write(&batch).expect("Failed to write batch");
        writer.close().expect("Failed to close writer");
    } else {
        let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");
        writer
            .write_record(["genre", "year", "gross"])
            .expect("Failed to write header");
        for ((genre, year), gross) in genres.iter().zip(&years).zip(&grosses) {
            writer
                .write_record([genre.to_string(), year.to_string(), gross.to_string()])
                .expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush output");
    }

    println!(
        "Wrote {} rows ({} genres × {} years) to {}",
        genres.len(),
        GENRES.len(),
        LAST_YEAR - FIRST_YEAR + 1,
        output_path.display()
    );
}
