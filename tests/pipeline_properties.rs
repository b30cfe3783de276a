//! Property-based tests for normalization, graph building and selection

mod common;

use common::builders::{StageBuilder, StructureBuilder};
use p4lens::explorer::detail::TablesView;
use p4lens::pipeline::{normalize, CrossReferenceResolver, PipelineGraphBuilder};
use p4lens::{ProgramStructure, Session, StageId, ViewMode};
use proptest::prelude::*;

/// (kind selector, table reference count, action count)
type StageSpec = (usize, usize, usize);

const KINDS: [Option<&str>; 5] = [
    Some("parser"),
    Some("control"),
    Some("deparser"),
    Some("extern"),
    None,
];

fn expected_rank(kind: usize) -> u32 {
    match kind {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => 99,
    }
}

fn stage_specs() -> impl Strategy<Value = Vec<StageSpec>> {
    prop::collection::vec((0usize..KINDS.len(), 0usize..4, 0usize..4), 0..20)
}

/// Stage `s{i}` references tables `t{i}_{j}`; only even `j` are registered.
fn build_structure(specs: &[StageSpec], headers: usize, externs: usize) -> ProgramStructure {
    let mut builder = StructureBuilder::new();
    for (i, &(kind, tables, actions)) in specs.iter().enumerate() {
        let name = format!("s{}", i);
        let table_names: Vec<String> = (0..tables).map(|j| format!("t{}_{}", i, j)).collect();
        let action_names: Vec<String> = (0..actions).map(|j| format!("a{}_{}", i, j)).collect();

        let stage = match KINDS[kind] {
            Some(label) => StageBuilder::new(&name, label),
            None => StageBuilder::untyped(&name),
        };
        let table_refs: Vec<&str> = table_names.iter().map(String::as_str).collect();
        let action_refs: Vec<&str> = action_names.iter().map(String::as_str).collect();
        builder = builder.stage(stage.tables(&table_refs).actions(&action_refs));

        for (j, table) in table_names.iter().enumerate() {
            if j % 2 == 0 {
                builder = builder.table(table, &["hdr.key"], &["NoAction"], Some(j as u64));
            }
        }
    }
    for h in 0..headers {
        builder = builder.header(&format!("h{}_t", h), &[("f", 8)]);
    }
    for e in 0..externs {
        builder = builder.extern_instance("counter", &format!("c{}", e));
    }
    builder.build()
}

fn input_index(name: &str) -> usize {
    name.trim_start_matches('s').parse().unwrap()
}

proptest! {
    #[test]
    fn test_normalize_is_idempotent(specs in stage_specs()) {
        let structure = build_structure(&specs, 0, 0);
        prop_assert_eq!(normalize(&structure), normalize(&structure));
    }

    #[test]
    fn test_rank_order_with_stable_ties(specs in stage_specs()) {
        let structure = build_structure(&specs, 0, 0);
        let stages = normalize(&structure);
        prop_assert_eq!(stages.len(), specs.len());

        for (i, stage) in stages.iter().enumerate() {
            prop_assert_eq!(stage.order_index, i);
        }
        for pair in stages.windows(2) {
            let (a, b) = (input_index(&pair[0].name), input_index(&pair[1].name));
            let (rank_a, rank_b) = (expected_rank(specs[a].0), expected_rank(specs[b].0));
            prop_assert!(rank_a <= rank_b, "{} before {}", pair[0].name, pair[1].name);
            if rank_a == rank_b {
                prop_assert!(a < b, "tie between {} and {} not stable", pair[0].name, pair[1].name);
            }
        }
    }

    #[test]
    fn test_edges_chain_adjacent_stages(specs in stage_specs()) {
        let structure = build_structure(&specs, 0, 0);
        let stages = normalize(&structure);
        let graph = PipelineGraphBuilder::new(&structure.registries).build(&stages);

        prop_assert_eq!(graph.nodes.len(), stages.len());
        prop_assert_eq!(graph.edges.len(), stages.len().saturating_sub(1));
        for (i, edge) in graph.edges.iter().enumerate() {
            prop_assert_eq!(&edge.source, &stages[i].id);
            prop_assert_eq!(&edge.target, &stages[i + 1].id);
        }
    }

    #[test]
    fn test_badges_use_global_registry_counts(
        specs in stage_specs(),
        headers in 0usize..6,
        externs in 0usize..6,
    ) {
        let structure = build_structure(&specs, headers, externs);
        let stages = normalize(&structure);
        let graph = PipelineGraphBuilder::new(&structure.registries).build(&stages);

        for (node, stage) in graph.nodes.iter().zip(&stages) {
            prop_assert_eq!(node.badges.headers, headers);
            prop_assert_eq!(node.badges.externs, externs);
            prop_assert_eq!(node.badges.tables, stage.stats.table_count);
            prop_assert_eq!(node.badges.actions, stage.stats.action_count);
        }
    }

    #[test]
    fn test_selection_round_trips(specs in stage_specs(), pick in any::<prop::sample::Index>()) {
        let structure = build_structure(&specs, 0, 0);
        let mut session = Session::new();
        session.load_structure(structure);
        prop_assume!(!session.stages().is_empty());

        let id = session.stages()[pick.index(session.stages().len())].id.clone();
        prop_assert!(session.select_stage(id.clone()));
        prop_assert_eq!(session.explorer().selected_stage.as_ref(), Some(&id));
        session.clear_selection();
        prop_assert_eq!(session.explorer().selected_stage.as_ref(), None);

        session.select_stage(id);
        session.set_view_mode(ViewMode::Overview);
        prop_assert_eq!(session.explorer().selected_stage.as_ref(), None);
    }

    #[test]
    fn test_unknown_selection_is_ignored(specs in stage_specs()) {
        let structure = build_structure(&specs, 0, 0);
        let mut session = Session::new();
        session.load_structure(structure);
        let before = session.explorer().clone();

        prop_assert!(!session.select_stage(StageId::from("not-a-stage")));
        prop_assert_eq!(session.explorer(), &before);
    }

    #[test]
    fn test_unresolved_tables_never_render(specs in stage_specs()) {
        let structure = build_structure(&specs, 0, 0);
        let resolver = CrossReferenceResolver::new(&structure.registries);

        for stage in &structure.stages {
            let view = TablesView::render(stage, &resolver);
            let expected: Vec<&String> = stage
                .tables
                .iter()
                .filter(|t| structure.registries.tables.contains_key(*t))
                .collect();
            prop_assert_eq!(view.tables.len(), expected.len());
            for (card, name) in view.tables.iter().zip(expected) {
                prop_assert_eq!(&card.name, name);
            }
        }
    }
}
