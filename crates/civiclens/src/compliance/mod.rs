//! Regulatory-compliance pipeline for building portfolios.
//!
//! Raw agency records flow strictly forward: normalize, group against the
//! building directory, window by timeframe, then aggregate and rank. Every
//! stage is a pure function of its inputs; queries recompute from scratch,
//! which keeps concurrent callers free of shared state.

pub mod agency;
pub mod directory;
pub mod ingest;
pub mod normalize;
pub mod record;
pub mod rollup;
pub mod router;
pub mod service;
pub mod sources;
pub mod window;

#[cfg(test)]
mod tests;

pub use agency::Agency;
pub use directory::{index, BuildingDirectory, BuildingInfo};
pub use ingest::{AgencyCsvError, AgencyCsvImporter};
pub use normalize::{normalize, normalize_all};
pub use record::{BuildingId, NormalizedRecord, RawViolationRecord};
pub use rollup::{
    aggregate, compliance_score, portfolio_rollup, rank, BuildingReportView, BuildingRollup,
    Counts, PortfolioReportView, PortfolioRollup, ScoreWeights,
};
pub use router::{
    portfolio_router, PortfolioReportRequest, PortfolioReportResponse, ReportDataSource,
};
pub use service::{PortfolioQuery, PortfolioService, PortfolioServiceError};
pub use sources::{
    DirectoryError, DirectoryProvider, RecordSource, SourceError, StaticDirectoryProvider,
    StaticRecordSource,
};
pub use window::{windowed, WindowSpec};
