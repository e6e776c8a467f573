use serde_json::Value;

use super::path::Path;
use super::{compare_values, Comparator};

/// Pairs every expected element with a distinct equivalent actual element,
/// ignoring element order.
///
/// Returns the actual index assigned to each expected index. A greedy
/// first-fit is not enough here: an actual element that satisfies two
/// expected slots can get consumed by the wrong one, reporting a difference
/// where none exists. Kuhn's augmenting-path search finds a maximum bipartite
/// matching instead, so a pairing is missed only when none exists.
///
/// On failure returns the lowest expected index with no available partner,
/// which keeps the reported witness deterministic.
pub(crate) fn find_assignment(
    expected: &[Value],
    actual: &[Value],
    comparator: Comparator,
) -> Result<Vec<usize>, usize> {
    let compatible: Vec<Vec<usize>> = expected
        .iter()
        .map(|expected_element| {
            actual
                .iter()
                .enumerate()
                .filter(|(_, actual_element)| {
                    compare_values(expected_element, actual_element, Path::Root, comparator)
                        .is_ok()
                })
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();

    // assigned_to[j] holds the expected index currently paired with actual j.
    let mut assigned_to: Vec<Option<usize>> = vec![None; actual.len()];
    for idx in 0..expected.len() {
        let mut visited = vec![false; actual.len()];
        if !augment(idx, &compatible, &mut assigned_to, &mut visited) {
            return Err(idx);
        }
    }

    let mut assignment = vec![0; expected.len()];
    for (actual_idx, slot) in assigned_to.iter().enumerate() {
        if let Some(expected_idx) = slot {
            assignment[*expected_idx] = actual_idx;
        }
    }
    Ok(assignment)
}

fn augment(
    expected_idx: usize,
    compatible: &[Vec<usize>],
    assigned_to: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &actual_idx in &compatible[expected_idx] {
        if visited[actual_idx] {
            continue;
        }
        visited[actual_idx] = true;

        let free = match assigned_to[actual_idx] {
            None => true,
            Some(owner) => augment(owner, compatible, assigned_to, visited),
        };
        if free {
            assigned_to[actual_idx] = Some(expected_idx);
            return true;
        }
    }
    false
}
