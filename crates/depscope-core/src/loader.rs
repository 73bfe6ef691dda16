//! Decode a stream of consecutive package records into analyzed entities.

use crate::error::DepscopeError;
use crate::package::{IgnoreRules, Package, PackageRecord};
use std::io::Read;

/// Decode zero or more consecutive self-describing JSON records from `reader`
/// into packages, in encounter order. Duplicate ids are kept as separate
/// entries. Clean end of stream terminates the sequence; any malformed record
/// aborts with a decode error and no partial result is returned.
pub fn load_packages<R: Read>(
    reader: R,
    rules: &IgnoreRules,
) -> Result<Vec<Package>, DepscopeError> {
    let mut packages = Vec::new();
    for record in serde_json::Deserializer::from_reader(reader).into_iter::<PackageRecord>() {
        packages.push(Package::from_record(record?, rules));
    }
    tracing::debug!(count = packages.len(), "decoded package records");
    Ok(packages)
}
