use tracing::debug;

use super::error::OracleError;
use super::response::MatrixResponse;
use super::DurationMatrix;

/// The matrix service's success marker, at both nesting levels.
const STATUS_OK: &str = "OK";

/// Validate a decoded reply against the shape of the request that
/// produced it. All-or-nothing: the first violation rejects the entire
/// reply, so a partially-usable matrix never escapes.
pub(super) fn parse_matrix_response(
    resp: MatrixResponse,
    origins: usize,
    destinations: usize,
) -> Result<DurationMatrix, OracleError> {
    if resp.status != STATUS_OK {
        return Err(OracleError::Malformed(format!(
            "top-level status {:?}",
            resp.status
        )));
    }
    if resp.rows.len() != origins {
        return Err(OracleError::Malformed(format!(
            "expected {} rows, got {}",
            origins,
            resp.rows.len()
        )));
    }

    let mut durations = Vec::with_capacity(resp.rows.len());
    for (row_idx, row) in resp.rows.iter().enumerate() {
        if row.elements.len() != destinations {
            return Err(OracleError::Malformed(format!(
                "row {}: expected {} elements, got {}",
                row_idx,
                destinations,
                row.elements.len()
            )));
        }
        let mut row_durations = Vec::with_capacity(row.elements.len());
        for (col_idx, element) in row.elements.iter().enumerate() {
            if element.status != STATUS_OK {
                return Err(OracleError::Malformed(format!(
                    "element {row_idx},{col_idx}: status {:?}",
                    element.status
                )));
            }
            let duration = element.duration.as_ref().ok_or_else(|| {
                OracleError::Malformed(format!(
                    "element {row_idx},{col_idx}: missing duration"
                ))
            })?;
            row_durations.push(duration.value);
        }
        durations.push(row_durations);
    }

    debug!(rows = origins, cols = destinations, "validated duration matrix");
    Ok(DurationMatrix {
        durations,
        origin_addresses: resp.origin_addresses,
        destination_addresses: resp.destination_addresses,
    })
}
