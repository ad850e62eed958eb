use serde::Serialize;

/// Column names of the output table, in output order.
pub const COLUMNS: [&str; 4] = ["I[mA]", "Nb[/cm^3]", "u[cm^2/Vs]", "NS[/cm^2]"];

/// One row of the output table, taken from one measurement report.
///
/// Every field is the token exactly as it appeared in the report. Nothing is
/// parsed as a number, so `1.234E+18` stays `1.234E+18`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    /// Current, mA
    #[serde(rename = "I[mA]")]
    pub current: String,
    /// Bulk carrier concentration, /cm^3
    #[serde(rename = "Nb[/cm^3]")]
    pub bulk_concentration: String,
    /// Mobility, cm^2/Vs
    #[serde(rename = "u[cm^2/Vs]")]
    pub mobility: String,
    /// Sheet carrier concentration, /cm^2
    #[serde(rename = "NS[/cm^2]")]
    pub sheet_concentration: String,
}

impl ExtractedRecord {
    pub fn new<S: Into<String>>(current: S, bulk: S, mobility: S, sheet: S) -> Self {
        Self {
            current: current.into(),
            bulk_concentration: bulk.into(),
            mobility: mobility.into(),
            sheet_concentration: sheet.into(),
        }
    }

    pub fn fields(&self) -> [&str; 4] {
        [
            self.current.as_str(),
            self.bulk_concentration.as_str(),
            self.mobility.as_str(),
            self.sheet_concentration.as_str(),
        ]
    }
}
