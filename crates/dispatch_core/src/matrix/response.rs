use serde::Deserialize;

/// Wire shape of a distance-matrix reply. Every field the validator does
/// not require is defaulted so shape problems surface as contract
/// violations with a reason, not as opaque decode errors.
#[derive(Debug, Deserialize)]
pub(super) struct MatrixResponse {
    #[serde(default)]
    pub(super) status: String,
    #[serde(default)]
    pub(super) origin_addresses: Vec<String>,
    #[serde(default)]
    pub(super) destination_addresses: Vec<String>,
    #[serde(default)]
    pub(super) rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MatrixRow {
    #[serde(default)]
    pub(super) elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MatrixElement {
    #[serde(default)]
    pub(super) status: String,
    pub(super) duration: Option<ElementDuration>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ElementDuration {
    /// Leg duration in seconds.
    pub(super) value: i64,
}
