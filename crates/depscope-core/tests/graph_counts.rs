//! Counting-pass behavior: ignore handling, dedup rules, module rollup.

use depscope_core::graph::{self, DepGraph};
use depscope_core::package::Package;

fn pkg(id: &str, deps: &[&str]) -> Package {
    Package {
        id: id.to_string(),
        module: None,
        deps: deps.iter().map(|d| (*d).to_string()).collect(),
        ignored: false,
        incoming: 0,
        outgoing: 0,
    }
}

fn ignored(id: &str) -> Package {
    Package {
        ignored: true,
        ..pkg(id, &[])
    }
}

fn in_module(id: &str, module: &str, deps: &[&str]) -> Package {
    Package {
        module: Some(module.to_string()),
        ..pkg(id, deps)
    }
}

#[test]
fn test_outgoing_is_literal_list_length() {
    let mut packages = vec![pkg("x", &["a", "a", "b"]), pkg("a", &[]), pkg("b", &[])];
    DepGraph::build(&mut packages);

    assert_eq!(packages[0].outgoing, 3, "duplicates count as given");
}

#[test]
fn test_incoming_deduplicates_per_source() {
    let mut packages = vec![pkg("x", &["a", "a"]), pkg("a", &[])];
    DepGraph::build(&mut packages);

    // One incoming increment at the receiver, two outgoing at the sender.
    assert_eq!(packages[1].incoming, 1);
    assert_eq!(packages[0].outgoing, 2);
}

#[test]
fn test_incoming_counts_distinct_sources() {
    let mut packages = vec![
        pkg("a", &["shared"]),
        pkg("b", &["shared"]),
        pkg("c", &["shared"]),
        pkg("shared", &[]),
    ];
    DepGraph::build(&mut packages);

    assert_eq!(packages[3].incoming, 3);
}

#[test]
fn test_ignored_package_never_gains_contributors() {
    let mut packages = vec![
        pkg("a", &["runtime/cgo"]),
        pkg("b", &["runtime/cgo"]),
        ignored("runtime/cgo"),
    ];
    let dep_graph = DepGraph::build(&mut packages);

    assert_eq!(dep_graph.incoming_count("runtime/cgo"), 0);
    assert!(dep_graph.contributors("runtime/cgo").is_none());
    assert_eq!(packages[2].incoming, 0);
    // The dropped edge still counts on the outgoing side.
    assert_eq!(packages[0].outgoing, 1);
}

#[test]
fn test_ignored_package_contributes_no_edges() {
    let mut packages = vec![
        Package {
            ignored: true,
            ..pkg("ignored-src", &["a"])
        },
        pkg("a", &[]),
    ];
    let dep_graph = DepGraph::build(&mut packages);

    assert_eq!(packages[1].incoming, 0);
    assert_eq!(packages[0].outgoing, 0, "ignored packages keep zero counts");
    assert!(dep_graph.contributors("a").is_none());
}

#[test]
fn test_unloaded_dependency_still_tracked() {
    // "std/io" is loaded and ignored; "y" never appears as its own record.
    let mut packages = vec![pkg("x", &["std/io", "y"]), ignored("std/io")];
    let dep_graph = DepGraph::build(&mut packages);

    assert_eq!(packages[0].outgoing, 2);
    assert_eq!(dep_graph.incoming_count("y"), 1);
    let contribs = dep_graph.contributors("y").unwrap();
    assert!(contribs.contains("x"));
}

#[test]
fn test_counts_attached_exactly_once_for_all_packages() {
    let mut packages = vec![pkg("a", &["b"]), pkg("b", &["a"]), ignored("std")];
    DepGraph::build(&mut packages);

    assert_eq!(packages[0].incoming, 1);
    assert_eq!(packages[0].outgoing, 1);
    assert_eq!(packages[1].incoming, 1);
    assert_eq!(packages[1].outgoing, 1);
    assert_eq!(packages[2].incoming, 0);
    assert_eq!(packages[2].outgoing, 0);
}

#[test]
fn test_graph_introspection_counts() {
    let mut packages = vec![pkg("a", &["b", "c"]), pkg("b", &[]), ignored("std")];
    let dep_graph = DepGraph::build(&mut packages);

    assert_eq!(dep_graph.ignored_count(), 1);
    assert!(dep_graph.is_ignored("std"));
    assert!(!dep_graph.is_ignored("a"));
    // "b" and "c" each have a contributor set.
    assert_eq!(dep_graph.tracked_targets(), 2);
}

#[test]
fn test_module_rollup_excludes_intra_module_edges() {
    let mut packages = vec![
        in_module("m1/a", "m1", &["m1/b", "m2/c", "x"]),
        in_module("m1/b", "m1", &["m2/c"]),
        in_module("m2/c", "m2", &["m1/a"]),
    ];
    let dep_graph = DepGraph::build(&mut packages);
    let rollup = graph::module_rollup(&packages, &dep_graph);

    let m1 = rollup.iter().find(|m| m.module == "m1").unwrap();
    let m2 = rollup.iter().find(|m| m.module == "m2").unwrap();

    // m1 <- only m2/c (m1/a contributing to m1/b is intra-module).
    assert_eq!(m1.incoming, 1);
    // m1 -> {m2/c, x}; the never-loaded "x" counts as external.
    assert_eq!(m1.outgoing, 2);
    assert_eq!(m2.incoming, 2);
    assert_eq!(m2.outgoing, 1);
}

#[test]
fn test_module_rollup_skips_packages_without_module() {
    let mut packages = vec![
        in_module("m1/a", "m1", &[]),
        // No module path: forms no group, but still contributes externally.
        pkg("loose", &["m1/a"]),
    ];
    let dep_graph = DepGraph::build(&mut packages);
    let rollup = graph::module_rollup(&packages, &dep_graph);

    assert_eq!(rollup.len(), 1);
    assert_eq!(rollup[0].module, "m1");
    assert_eq!(rollup[0].incoming, 1);
}

#[test]
fn test_module_rollup_ignores_ignored_packages() {
    let mut packages = vec![
        Package {
            ignored: true,
            ..in_module("k8s.io/x", "k8s.io/mod", &["m1/a"])
        },
        in_module("m1/a", "m1", &[]),
    ];
    let dep_graph = DepGraph::build(&mut packages);
    let rollup = graph::module_rollup(&packages, &dep_graph);

    assert_eq!(rollup.len(), 1, "ignored packages form no module group");
    assert_eq!(rollup[0].incoming, 0, "ignored packages contribute no edges");
}

#[test]
fn test_empty_input_builds_empty_graph() {
    let mut packages: Vec<Package> = Vec::new();
    let dep_graph = DepGraph::build(&mut packages);

    assert_eq!(dep_graph.ignored_count(), 0);
    assert_eq!(dep_graph.tracked_targets(), 0);
    assert!(graph::module_rollup(&packages, &dep_graph).is_empty());
}
