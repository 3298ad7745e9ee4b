/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///        .agr
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  @-directives → legends, then &-blocks → points
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Document  │  title, Vec<Series>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  restrict_to names → selected series
///   └──────────┘
/// ```
///
/// The selection is decided before the data phase so the parser knows which
/// blocks to read and which to skip.

pub mod filter;
pub mod loader;
pub mod model;
