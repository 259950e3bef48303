mod aggregate;
mod rank;
mod score;
pub mod views;

pub use aggregate::{aggregate, BuildingRollup, Counts};
pub use rank::rank;
pub use score::{compliance_score, portfolio_rollup, slice_score, PortfolioRollup, ScoreWeights};
pub use views::{AgencyCountsEntry, BuildingReportView, PortfolioReportView};
