//! The single counting pass: adjacency maps and count attachment.
//!
//! Incoming and outgoing counts are defined purely from the edge lists present
//! in the input. There is no closure and no existence check against the loaded
//! set: a dependency id that never appears as its own record still receives
//! incoming contributors in the map, and still counts toward the sender's
//! outgoing total.

use crate::package::Package;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Adjacency state built in one pass over the loaded packages.
///
/// Outgoing edge lists are kept verbatim (duplicates included), so the
/// outgoing count is the literal dependency-list length. Incoming edges are
/// contributor *sets*: repeated edges from the same source count once, and
/// edges into ignored packages are dropped, never counted.
#[derive(Debug, Default)]
pub struct DepGraph {
    incoming: HashMap<String, BTreeSet<String>>,
    outgoing: HashMap<String, usize>,
    ignored: HashSet<String>,
}

impl DepGraph {
    /// Run the counting pass and attach `incoming`/`outgoing` to every
    /// package. Ignored packages contribute nothing and keep zero counts.
    pub fn build(packages: &mut [Package]) -> Self {
        let mut graph = Self::default();

        for pkg in packages.iter().filter(|p| p.ignored) {
            graph.ignored.insert(pkg.id.clone());
        }

        for pkg in packages.iter().filter(|p| !p.ignored) {
            graph.outgoing.insert(pkg.id.clone(), pkg.deps.len());
            for dep in &pkg.deps {
                if graph.ignored.contains(dep) {
                    continue;
                }
                graph
                    .incoming
                    .entry(dep.clone())
                    .or_default()
                    .insert(pkg.id.clone());
            }
        }

        for pkg in &mut *packages {
            pkg.incoming = graph.incoming.get(&pkg.id).map_or(0, BTreeSet::len);
            pkg.outgoing = graph.outgoing.get(&pkg.id).copied().unwrap_or(0);
        }

        graph
    }

    /// Distinct non-ignored packages whose dependency list includes `id`.
    /// Defined for any id seen as an edge target, loaded or not.
    pub fn incoming_count(&self, id: &str) -> usize {
        self.incoming.get(id).map_or(0, BTreeSet::len)
    }

    /// Contributor set for `id`, if any non-ignored package depends on it.
    pub fn contributors(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.incoming.get(id)
    }

    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignored.contains(id)
    }

    /// Number of ids classified as ignored.
    pub fn ignored_count(&self) -> usize {
        self.ignored.len()
    }

    /// Number of distinct ids with at least one incoming contributor.
    pub fn tracked_targets(&self) -> usize {
        self.incoming.len()
    }
}

/// Aggregated counts for one grouping key (a module path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStats {
    pub module: String,
    pub incoming: usize,
    pub outgoing: usize,
}

/// Roll package-level edges up to module granularity.
///
/// Only non-ignored packages with a non-empty module path participate. Edges
/// between packages of the same module are excluded in both directions;
/// dependency ids that never resolve to a loaded package count as external.
pub fn module_rollup(packages: &[Package], graph: &DepGraph) -> Vec<ModuleStats> {
    rollup_by(packages, graph, |pkg| pkg.module.as_deref())
        .into_iter()
        .map(|(module, (incoming, outgoing))| ModuleStats {
            module,
            incoming,
            outgoing,
        })
        .collect()
}

/// Generic grouping-key aggregation: the counting rule is identical at any
/// granularity, so it is written once against a key extractor. Packages for
/// which the extractor yields `None` do not form a group of their own but
/// still count as external contributors/targets for other groups.
fn rollup_by<'a, F>(
    packages: &'a [Package],
    graph: &DepGraph,
    key_of: F,
) -> BTreeMap<String, (usize, usize)>
where
    F: Fn(&'a Package) -> Option<&'a str>,
{
    // Which group owns each loaded, counted package id.
    let owner: HashMap<&str, &str> = packages
        .iter()
        .filter(|p| !p.ignored)
        .filter_map(|p| key_of(p).map(|key| (p.id.as_str(), key)))
        .collect();

    let mut incoming: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut outgoing: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for pkg in packages.iter().filter(|p| !p.ignored) {
        let Some(key) = key_of(pkg) else {
            continue;
        };
        let incoming_set = incoming.entry(key).or_default();
        if let Some(contribs) = graph.contributors(&pkg.id) {
            for contrib in contribs {
                if owner.get(contrib.as_str()).copied() != Some(key) {
                    incoming_set.insert(contrib.as_str());
                }
            }
        }
        let outgoing_set = outgoing.entry(key).or_default();
        for dep in &pkg.deps {
            if owner.get(dep.as_str()).copied() != Some(key) {
                outgoing_set.insert(dep.as_str());
            }
        }
    }

    incoming
        .into_iter()
        .map(|(key, contribs)| {
            let reached = outgoing.get(key).map_or(0, BTreeSet::len);
            (key.to_string(), (contribs.len(), reached))
        })
        .collect()
}
