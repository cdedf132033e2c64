//! Report result types
//!
//! Reports are built once per query from a filtered measurement list and never
//! updated afterwards. Fields are private; callers read them through accessors
//! and the shared [`Report`] contract.

mod gateway;
mod network;
mod sensor;

pub use gateway::GatewayReport;
pub use network::NetworkReport;
pub use sensor::SensorReport;

use crate::analysis::filters::ReportRequest;
use crate::analysis::histogram::Histogram;
use crate::analysis::range::RangeBound;
use serde::Serialize;

/// Requested code and window, echoed verbatim in every report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportHeader {
    pub code: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<&ReportRequest> for ReportHeader {
    fn from(request: &ReportRequest) -> Self {
        Self {
            code: request.code.clone(),
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
        }
    }
}

/// Read-only contract shared by network, gateway and sensor reports
pub trait Report {
    /// Histogram domain (calendar time, elapsed time or measured value)
    type Bound: RangeBound;

    fn header(&self) -> &ReportHeader;

    fn number_of_measurements(&self) -> u64;

    fn histogram(&self) -> &Histogram<Self::Bound>;

    fn code(&self) -> &str {
        &self.header().code
    }

    fn start_date(&self) -> Option<&str> {
        self.header().start_date.as_deref()
    }

    fn end_date(&self) -> Option<&str> {
        self.header().end_date.as_deref()
    }
}
