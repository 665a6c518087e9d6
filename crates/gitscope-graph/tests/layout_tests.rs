use chrono::{TimeZone, Utc};
use gitscope_graph::{
    layout, BranchRef, Commit, CurveKind, GraphError, GraphLayout, LaneEnd, LayoutState,
    UnresolvedReason,
};

/// Helper: build a feed commit with fixed metadata.
fn commit(hash: &str, parents: &[&str]) -> Commit {
    Commit {
        hash: hash.to_string(),
        parent_hashes: parents.iter().map(|p| p.to_string()).collect(),
        author_name: "Test Author".to_string(),
        author_email: "test@example.com".to_string(),
        date: Utc.with_ymd_and_hms(2026, 1, 20, 10, 0, 0).unwrap(),
        message: format!("commit {hash}"),
    }
}

fn branch(name: &str, target: &str) -> BranchRef {
    BranchRef {
        name: name.to_string(),
        target: target.to_string(),
    }
}

/// A history with two merges, a side branch and a single root:
///
/// ```text
/// h -> g -> {e, f} ; e -> d ; f -> d ; d -> {c, b} ; c -> a ; b -> a
/// ```
fn two_merge_feed() -> Vec<Commit> {
    vec![
        commit("h", &["g"]),
        commit("g", &["e", "f"]),
        commit("f", &["d"]),
        commit("e", &["d"]),
        commit("d", &["c", "b"]),
        commit("c", &["a"]),
        commit("b", &["a"]),
        commit("a", &[]),
    ]
}

/// Assert no two lanes hold the same column over overlapping row ranges.
fn assert_no_column_overlap(graph: &GraphLayout) {
    let last_row = graph.nodes.len().saturating_sub(1);
    for (i, a) in graph.lanes.iter().enumerate() {
        for b in graph.lanes.iter().skip(i + 1) {
            if a.column != b.column {
                continue;
            }
            let a_end = match a.end {
                LaneEnd::Open => last_row,
                LaneEnd::Closed(row) => row,
            };
            let b_end = match b.end {
                LaneEnd::Open => last_row,
                LaneEnd::Closed(row) => row,
            };
            assert!(
                a_end < b.start_y || b_end < a.start_y,
                "lanes share column {} over overlapping rows: [{}, {}] vs [{}, {}]",
                a.column,
                a.start_y,
                a_end,
                b.start_y,
                b_end
            );
        }
    }
}

// ============================================================
// Spec scenarios
// ============================================================

#[test]
fn test_linear_chain_single_lane() {
    let feed = vec![commit("c", &["b"]), commit("b", &["a"]), commit("a", &[])];
    let graph = layout(&feed, &[], None).unwrap();

    assert_eq!(graph.nodes.len(), 3);
    for (i, node) in graph.nodes.iter().enumerate() {
        assert_eq!(node.y, i);
        assert_eq!(node.x, 0);
    }
    assert_eq!(graph.lanes.len(), 1);
    assert_eq!(graph.lanes[0].column, 0);
    assert_eq!(graph.lanes[0].start_y, 0);
    assert_eq!(graph.lanes[0].end, LaneEnd::Closed(2));
    assert!(graph.curves.is_empty());
    assert_eq!(graph.column_count(), 1);
}

#[test]
fn test_simple_fork_two_columns() {
    // Both "c" and "b" have parent "a"; the leftmost lane continues through
    // "a" and the other terminates there with a merge-in curve.
    let feed = vec![commit("c", &["a"]), commit("b", &["a"]), commit("a", &[])];
    let graph = layout(&feed, &[], None).unwrap();

    assert_eq!(graph.nodes[0].x, 0); // c
    assert_eq!(graph.nodes[1].x, 1); // b
    assert_eq!(graph.nodes[2].x, 0); // a continues the leftmost lane

    assert_eq!(graph.lanes.len(), 2);
    assert_eq!(graph.lanes[1].end, LaneEnd::Closed(2));

    assert_eq!(graph.curves.len(), 1);
    let curve = &graph.curves[0];
    assert_eq!(curve.kind, CurveKind::MergeIn);
    assert_eq!(curve.from_column, 1);
    assert_eq!(curve.from_y, 1);
    assert_eq!(curve.to_column, 0);
    assert_eq!(curve.to_y, 2);
}

#[test]
fn test_merge_commit_opens_second_lane() {
    // m merges b into the mainline: m -> {a, b}, both reach root r.
    let feed = vec![
        commit("m", &["a", "b"]),
        commit("b", &["r"]),
        commit("a", &["r"]),
        commit("r", &[]),
    ];
    let graph = layout(&feed, &[], None).unwrap();

    assert_eq!(graph.nodes[0].x, 0); // m
    assert_eq!(graph.nodes[1].x, 1); // b rides the branched-out lane
    assert_eq!(graph.nodes[2].x, 0); // a
    assert_eq!(graph.nodes[3].x, 0); // r converges on the mainline
    assert_eq!(graph.column_count(), 2);

    let branch_outs: Vec<_> = graph
        .curves
        .iter()
        .filter(|c| c.kind == CurveKind::BranchOut)
        .collect();
    assert_eq!(branch_outs.len(), 1);
    assert_eq!(branch_outs[0].from_column, 0);
    assert_eq!(branch_outs[0].from_y, 0);
    assert_eq!(branch_outs[0].to_column, 1);

    let merge_ins: Vec<_> = graph
        .curves
        .iter()
        .filter(|c| c.kind == CurveKind::MergeIn)
        .collect();
    assert_eq!(merge_ins.len(), 1);
    assert_eq!(merge_ins[0].from_column, 1);
    assert_eq!(merge_ins[0].to_column, 0);
    assert_eq!(merge_ins[0].to_y, 3);
}

#[test]
fn test_pagination_matches_full_recompute() {
    // First page ends on a dangling parent: b awaits a, lane stays open.
    let page1 = vec![commit("c", &["b"]), commit("b", &["a"])];
    let page2 = vec![commit("a", &["r"]), commit("r", &[])];

    let mut state = LayoutState::new(Vec::new(), None);
    state.extend(&page1).unwrap();

    let boundary = state.layout();
    assert_eq!(boundary.lanes.len(), 1);
    assert_eq!(boundary.lanes[0].end, LaneEnd::Open);

    state.extend(&page2).unwrap();

    let full_feed: Vec<Commit> = page1.into_iter().chain(page2).collect();
    let full = layout(&full_feed, &[], None).unwrap();
    assert_eq!(state.layout(), full);
    assert_eq!(full.lanes[0].end, LaneEnd::Closed(3));
}

// ============================================================
// Layout properties
// ============================================================

#[test]
fn test_rows_are_a_bijection_onto_feed_indices() {
    let graph = layout(&two_merge_feed(), &[], None).unwrap();

    assert_eq!(graph.nodes.len(), 8);
    for (i, node) in graph.nodes.iter().enumerate() {
        assert_eq!(node.y, i);
    }
}

#[test]
fn test_no_two_lanes_share_a_column() {
    let graph = layout(&two_merge_feed(), &[], None).unwrap();
    assert_no_column_overlap(&graph);
}

#[test]
fn test_layout_is_deterministic() {
    let feed = two_merge_feed();
    let refs = vec![branch("main", "h"), branch("feature", "f")];

    let first = layout(&feed, &refs, Some("main")).unwrap();
    let second = layout(&feed, &refs, Some("main")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_split_point_matches_full_recompute() {
    let feed = two_merge_feed();
    let refs = vec![branch("main", "h"), branch("feature", "f")];
    let full = layout(&feed, &refs, Some("main")).unwrap();

    for split in 0..=feed.len() {
        let mut state = LayoutState::new(refs.clone(), Some("main".to_string()));
        state.extend(&feed[..split]).unwrap();
        state.extend(&feed[split..]).unwrap();
        assert_eq!(state.layout(), full, "diverged at split {split}");
    }
}

#[test]
fn test_three_page_extension_matches_full_recompute() {
    let feed = two_merge_feed();
    let full = layout(&feed, &[], None).unwrap();

    let mut state = LayoutState::new(Vec::new(), None);
    state.extend(&feed[..3]).unwrap();
    state.extend(&feed[3..6]).unwrap();
    state.extend(&feed[6..]).unwrap();
    assert_eq!(state.layout(), full);
}

#[test]
fn test_merge_with_k_parents_produces_k_minus_one_branch_outs() {
    // An octopus merge below the top of history: m has three parents and
    // consumes exactly the one lane "t" left awaiting it.
    let feed = vec![
        commit("t", &["m"]),
        commit("m", &["p1", "p2", "p3"]),
        commit("p1", &[]),
        commit("p2", &[]),
        commit("p3", &[]),
    ];
    let graph = layout(&feed, &[], None).unwrap();

    let branch_outs = graph
        .curves
        .iter()
        .filter(|c| c.kind == CurveKind::BranchOut)
        .count();
    assert_eq!(branch_outs, 2);

    // The merge continues its child's lane rather than opening a new one.
    assert_eq!(graph.nodes[1].x, graph.nodes[0].x);
    assert_eq!(graph.lanes.len(), 3);
    assert_no_column_overlap(&graph);
}

#[test]
fn test_node_color_matches_claiming_lane() {
    let graph = layout(&two_merge_feed(), &[], None).unwrap();

    for node in &graph.nodes {
        let lane = graph
            .lanes
            .iter()
            .find(|lane| lane.column == node.x && lane.is_active_at(node.y))
            .expect("every node sits on an active lane");
        assert_eq!(node.color, lane.color);
    }
}

#[test]
fn test_colors_cycle_in_lane_opening_order() {
    let graph = layout(&two_merge_feed(), &[], None).unwrap();

    assert_eq!(graph.lanes.len(), 3);
    assert_eq!(graph.lanes[0].color, "#007acc");
    assert_eq!(graph.lanes[1].color, "#ff6b35");
    assert_eq!(graph.lanes[2].color, "#4caf50");
}

#[test]
fn test_column_freed_at_close_is_recycled_on_later_rows() {
    // One fork resolves at "a"; the head "n" opened afterwards reuses the
    // lowest freed column instead of widening the graph.
    let feed = vec![
        commit("c", &["a"]),
        commit("b", &["a"]),
        commit("a", &[]),
        commit("n", &[]),
    ];
    let graph = layout(&feed, &[], None).unwrap();

    assert_eq!(graph.nodes[3].x, 0);
    assert_eq!(graph.lanes[2].column, 0);
    assert_eq!(graph.lanes[2].start_y, 3);
    assert_eq!(graph.column_count(), 2);
    assert_no_column_overlap(&graph);
}

#[test]
fn test_column_terminated_at_merge_row_is_not_reused_same_row() {
    // At row 4 the fork lane terminates into "d" while d's second parent
    // opens a fresh lane; the fresh lane must skip the column still being
    // vacated on that row.
    let graph = layout(&two_merge_feed(), &[], None).unwrap();

    let d = graph.nodes.iter().find(|n| n.hash == "d").unwrap();
    let b = graph.nodes.iter().find(|n| n.hash == "b").unwrap();
    assert_eq!(d.x, 0);
    assert_eq!(b.x, 2);
    assert_eq!(graph.column_count(), 3);
}

#[test]
fn test_duplicate_hash_is_rejected() {
    let feed = vec![commit("c", &["a"]), commit("c", &[])];
    let result = layout(&feed, &[], None);
    assert!(matches!(result, Err(GraphError::DuplicateHash(h)) if h == "c"));
}

#[test]
fn test_empty_feed_yields_empty_layout() {
    let graph = layout(&[], &[], None).unwrap();
    assert!(graph.nodes.is_empty());
    assert!(graph.lanes.is_empty());
    assert!(graph.curves.is_empty());
    assert_eq!(graph.column_count(), 0);
}

#[test]
fn test_children_are_restricted_to_loaded_window() {
    let graph = layout(&two_merge_feed(), &[], None).unwrap();

    let d = graph.nodes.iter().find(|n| n.hash == "d").unwrap();
    assert_eq!(d.child_hashes, vec!["f".to_string(), "e".to_string()]);

    let h = graph.nodes.iter().find(|n| n.hash == "h").unwrap();
    assert!(h.child_hashes.is_empty());
}

// ============================================================
// Branch refs
// ============================================================

#[test]
fn test_refs_attach_to_their_head_commits() {
    let feed = two_merge_feed();
    let refs = vec![branch("main", "h"), branch("feature", "f")];
    let graph = layout(&feed, &refs, Some("main")).unwrap();

    assert_eq!(graph.nodes[0].refs, vec!["main".to_string()]);
    assert_eq!(graph.nodes[2].refs, vec!["feature".to_string()]);
    assert!(graph.unresolved_refs.is_empty());
}

#[test]
fn test_abbreviated_ref_target_resolves_by_prefix() {
    let feed = vec![
        commit("abc1234", &["def5678"]),
        commit("def5678", &[]),
    ];
    let refs = vec![branch("main", "abc1")];
    let graph = layout(&feed, &refs, None).unwrap();

    assert_eq!(graph.nodes[0].refs, vec!["main".to_string()]);
}

#[test]
fn test_ambiguous_ref_target_is_surfaced_not_guessed() {
    let feed = vec![commit("abc1234", &["abc9999"]), commit("abc9999", &[])];
    let refs = vec![branch("dev", "abc")];
    let graph = layout(&feed, &refs, None).unwrap();

    assert!(graph.nodes.iter().all(|n| n.refs.is_empty()));
    assert_eq!(graph.unresolved_refs.len(), 1);
    assert_eq!(graph.unresolved_refs[0].name, "dev");
    assert!(matches!(
        graph.unresolved_refs[0].reason,
        UnresolvedReason::Ambiguous { ref candidates } if candidates.len() == 2
    ));
}

#[test]
fn test_ref_outside_window_is_plotted_once_paged_in() {
    let refs = vec![branch("old-release", "r")];
    let mut state = LayoutState::new(refs.clone(), None);

    state.extend(&[commit("c", &["b"]), commit("b", &["r"])]).unwrap();
    let before = state.layout();
    assert_eq!(before.unresolved_refs.len(), 1);
    assert_eq!(before.unresolved_refs[0].reason, UnresolvedReason::NotLoaded);

    state.extend(&[commit("r", &[])]).unwrap();
    let after = state.layout();
    assert!(after.unresolved_refs.is_empty());
    assert_eq!(after.nodes[2].refs, vec!["old-release".to_string()]);
}

#[test]
fn test_page_introducing_prefix_ambiguity_falls_back_to_recompute() {
    // "dev" resolves uniquely in the first window; the second page loads a
    // commit sharing the abbreviated prefix, so the ref must become
    // ambiguous exactly as a full recompute would make it.
    let refs = vec![branch("dev", "ab")];
    let page1 = vec![commit("abc1", &["zzz1"])];
    let page2 = vec![commit("zzz1", &["abf9"]), commit("abf9", &[])];

    let mut state = LayoutState::new(refs.clone(), None);
    state.extend(&page1).unwrap();
    assert_eq!(state.layout().nodes[0].refs, vec!["dev".to_string()]);

    state.extend(&page2).unwrap();

    let full_feed: Vec<Commit> = page1.into_iter().chain(page2).collect();
    let full = layout(&full_feed, &refs, None).unwrap();
    assert_eq!(state.layout(), full);

    let after = state.layout();
    assert!(after.nodes[0].refs.is_empty());
    assert_eq!(after.unresolved_refs.len(), 1);
    assert!(matches!(
        after.unresolved_refs[0].reason,
        UnresolvedReason::Ambiguous { .. }
    ));
}

#[test]
fn test_checked_out_branch_keeps_its_lane_through_a_fork() {
    // Two heads fork from "a". With no branch context the leftmost lane
    // continues through the fork point; with "main" checked out, main's
    // lane does, even though it sits in a higher column.
    let feed = vec![commit("c", &["a"]), commit("b", &["a"]), commit("a", &[])];
    let refs = vec![branch("feature", "c"), branch("main", "b")];

    let neutral = layout(&feed, &refs, None).unwrap();
    assert_eq!(neutral.nodes[2].x, 0);

    let on_main = layout(&feed, &refs, Some("main")).unwrap();
    assert_eq!(on_main.nodes[2].x, 1);
    assert_eq!(on_main.nodes[2].color, on_main.nodes[1].color);
    assert_no_column_overlap(&on_main);
}
