/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .tsd / .txt / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TsDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ TsDataset │  Vec<TimeSurface>, optional timestamps
///   └───────────┘
/// ```
pub mod loader;
pub mod model;
