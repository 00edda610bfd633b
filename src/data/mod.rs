/// Data layer: table parsing, sampling, and Gaussian fitting.
///
/// Architecture:
/// ```text
///  raw .tsv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse tab-delimited text → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sampler  │  clean column, seeded draw w/o replacement → Sample
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   fit     │  mean + population σ + density curve → FitResult
///   └──────────┘
/// ```

pub mod fit;
pub mod loader;
pub mod sampler;
pub mod table;
