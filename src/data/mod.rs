/// Data layer: typed catalog, loading, filtering and chart projections.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  nine independent projections of the view
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  tag projections with chart kind/labels → RenderPayload
///   └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod stats;

#[cfg(test)]
mod testutil;
