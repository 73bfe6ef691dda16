//! Package record model and the static ignore ruleset.

use serde::Deserialize;
use std::collections::BTreeSet;

/// One record as emitted by the package lister (`go list -json` shape).
/// Unknown fields are skipped; absent fields default so sparse records decode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PackageRecord {
    /// Unique import path of the package.
    pub import_path: String,
    /// Whether the package belongs to the standard library.
    pub standard: bool,
    /// Direct dependency import paths, in listed order. May reference
    /// ignored or never-loaded packages; duplicates are preserved.
    pub deps: Vec<String>,
    /// Owning module, when the lister resolved one.
    pub module: Option<ModuleRef>,
}

/// Module reference attached to a record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ModuleRef {
    pub path: String,
}

/// Static classification rules deciding which packages are excluded from
/// counting. A package is ignored when it is standard-library, its id is in
/// the exact set, or its id carries the reserved-namespace prefix.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    pub exact: BTreeSet<String>,
    /// Reserved-namespace prefix; empty disables the prefix rule.
    pub prefix: String,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            exact: BTreeSet::from(["runtime/cgo".to_string()]),
            prefix: "k8s.io/".to_string(),
        }
    }
}

impl IgnoreRules {
    /// Pure classification of a record against the ruleset.
    pub fn is_ignored(&self, record: &PackageRecord) -> bool {
        if record.standard {
            return true;
        }
        if self.exact.contains(&record.import_path) {
            return true;
        }
        !self.prefix.is_empty() && record.import_path.starts_with(&self.prefix)
    }
}

/// An analyzed package entity. Created once at load time, mutated exactly
/// once by the graph pass to attach counts, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Package {
    pub id: String,
    /// Owning module path; `None` when the lister supplied none (or an empty one).
    pub module: Option<String>,
    pub deps: Vec<String>,
    /// Classified at construction, before any counting.
    pub ignored: bool,
    /// Distinct non-ignored packages that list this one as a direct dependency.
    pub incoming: usize,
    /// Literal length of the dependency list (duplicates counted as given).
    pub outgoing: usize,
}

impl Package {
    /// Build the entity from a decoded record, applying the ignore ruleset.
    pub fn from_record(record: PackageRecord, rules: &IgnoreRules) -> Self {
        let ignored = rules.is_ignored(&record);
        let module = record
            .module
            .map(|m| m.path)
            .filter(|path| !path.is_empty());
        Self {
            id: record.import_path,
            module,
            deps: record.deps,
            ignored,
            incoming: 0,
            outgoing: 0,
        }
    }
}
