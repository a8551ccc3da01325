//! Place search over OpenStreetMap data: query construction, feature
//! extraction, filtering and ranking, and CSV export.

pub mod assemble;
pub mod error;
pub mod export;
pub mod extract;
pub mod overpass;
pub mod pipeline;
pub mod provider;
pub mod query;
pub mod rank;
pub(crate) mod retry;
pub mod summary;
pub mod types;

pub use assemble::{assemble, DisplayRow, DisplayTable, COLUMNS};
pub use error::{ExportError, PlacesError, SearchError};
pub use export::to_csv_bytes;
pub use extract::{extract_place, structured_address};
pub use overpass::OverpassClient;
pub use pipeline::{resolve_home, run_search, SearchContext};
pub use provider::{FeatureProvider, FeatureSource};
pub use query::{build_query, QuerySpec, DEFAULT_OVERFETCH_MULTIPLIER};
pub use rank::{filter_and_rank, rank, Admission, PlaceFilter, Rejection, ResultTable};
pub use summary::ResultSummary;
pub use types::{AreaKind, AreaRecord, PointRecord, RawFeature};
