//! Cross-trajectory statistics and histograms for mcsl ensembles.
//!
//! The [`StatisticsReducer`] reads a variable's history from any
//! [`HistorySource`](mcsl_core::HistorySource) into a dense
//! step × trajectory [`HistoryTable`] and reduces it along an [`Axis`]:
//! across trajectories (one value per step), across steps (one value
//! per trajectory), or over the whole table. Histograms share one
//! global range across every step so their bins line up.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod histogram;
pub mod reduce;
pub mod reducer;
pub mod table;

pub use error::StatsError;
pub use histogram::Histogram;
pub use reduce::{Axis, Reduced, Statistic};
pub use reducer::StatisticsReducer;
pub use table::HistoryTable;
