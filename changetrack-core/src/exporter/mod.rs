//! Report exporters for comparison results.

pub mod json;
pub mod markdown;

use crate::model::Location;
use crate::results::ComparisonResult;

/// Location a result points at, preferring the new declaration.
pub(crate) fn result_location<'a>(result: &ComparisonResult<'a>) -> Option<&'a Location> {
    result
        .new_item
        .or(result.old_item)
        .map(|declaration| declaration.location())
        .filter(|location| !location.file_path.is_empty())
}
