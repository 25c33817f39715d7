//! Construction-time checks over the authored skill list.
//!
//! Validation runs in a fixed order and stops at the first failure:
//! identities (ids, duplicates, max levels), prerequisite references, then
//! cycle detection.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::definition::SkillDefinition;
use crate::error::ConfigError;

/// Authored skills after every structural check has passed.
#[derive(Debug)]
pub(crate) struct ValidatedGraph {
    pub(crate) definitions: Vec<Arc<SkillDefinition>>,
    pub(crate) index: HashMap<String, usize>,
    /// `prerequisites[i]` lists the node indices skill `i` depends on.
    pub(crate) prerequisites: Vec<Vec<usize>>,
}

pub(crate) fn validate(definitions: Vec<SkillDefinition>) -> Result<ValidatedGraph, ConfigError> {
    let index = index_identities(&definitions)?;
    let prerequisites = resolve_prerequisites(&definitions, &index)?;

    if let Some(cycle) = find_cycle(&prerequisites) {
        let path = cycle
            .into_iter()
            .map(|node| definitions[node].id.clone())
            .collect();
        return Err(ConfigError::PrerequisiteCycle { path });
    }

    Ok(ValidatedGraph {
        definitions: definitions.into_iter().map(Arc::new).collect(),
        index,
        prerequisites,
    })
}

fn index_identities(definitions: &[SkillDefinition]) -> Result<HashMap<String, usize>, ConfigError> {
    let mut index = HashMap::with_capacity(definitions.len());

    for (position, definition) in definitions.iter().enumerate() {
        if definition.id.trim().is_empty() {
            return Err(ConfigError::EmptySkillId { index: position });
        }

        match index.entry(definition.id.clone()) {
            Entry::Occupied(_) => {
                return Err(ConfigError::DuplicateSkillId(definition.id.clone()));
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }

        if definition.max_level < 1 {
            return Err(ConfigError::InvalidMaxLevel {
                skill_id: definition.id.clone(),
                max_level: definition.max_level,
            });
        }
    }

    Ok(index)
}

fn resolve_prerequisites(
    definitions: &[SkillDefinition],
    index: &HashMap<String, usize>,
) -> Result<Vec<Vec<usize>>, ConfigError> {
    definitions
        .iter()
        .map(|definition| {
            definition
                .prerequisite_ids
                .iter()
                .map(|prerequisite_id| {
                    index.get(prerequisite_id).copied().ok_or_else(|| {
                        ConfigError::UnknownPrerequisite {
                            skill_id: definition.id.clone(),
                            prerequisite_id: prerequisite_id.clone(),
                        }
                    })
                })
                .collect()
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Three-colour depth-first search over `edges`, driven by an explicit stack.
///
/// Returns the first cycle found as node indices, closed by repeating the node
/// the back-edge points at (`[a, b, a]`).
pub(crate) fn find_cycle(edges: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut state = vec![VisitState::Unvisited; edges.len()];
    // (node, index of the next outgoing edge to explore)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..edges.len() {
        if state[root] != VisitState::Unvisited {
            continue;
        }
        state[root] = VisitState::InProgress;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(&next) = edges[node].get(frame.1) else {
                state[node] = VisitState::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match state[next] {
                VisitState::Unvisited => {
                    state[next] = VisitState::InProgress;
                    stack.push((next, 0));
                }
                VisitState::InProgress => {
                    // The stack is exactly the current path; the cycle starts
                    // where `next` was entered.
                    let start = stack
                        .iter()
                        .position(|(on_path, _)| *on_path == next)
                        .unwrap_or(0);
                    let mut cycle: Vec<usize> =
                        stack[start..].iter().map(|(on_path, _)| *on_path).collect();
                    cycle.push(next);
                    return Some(cycle);
                }
                VisitState::Done => {}
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str, prerequisites: &[&str]) -> SkillDefinition {
        SkillDefinition::new(id, 1).with_prerequisites(prerequisites.iter().copied())
    }

    fn cycle_path(definitions: Vec<SkillDefinition>) -> Vec<String> {
        match validate(definitions) {
            Err(ConfigError::PrerequisiteCycle { path }) => path,
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let edges = vec![vec![], vec![0], vec![0, 1], vec![2]];
        assert_eq!(find_cycle(&edges), None);
    }

    #[test]
    fn shared_prerequisite_is_not_a_cycle() {
        // Diamond: 3 -> {1, 2} -> 0
        let edges = vec![vec![], vec![0], vec![0], vec![1, 2]];
        assert_eq!(find_cycle(&edges), None);
    }

    #[test]
    fn two_node_cycle_reports_both_nodes() {
        let path = cycle_path(vec![skill("a", &["b"]), skill("b", &["a"])]);
        assert_eq!(path, vec!["a", "b", "a"]);
    }

    #[test]
    fn long_cycle_reports_every_node_but_not_the_tail() {
        let path = cycle_path(vec![
            skill("entry", &["c1"]),
            skill("c1", &["c2"]),
            skill("c2", &["c3"]),
            skill("c3", &["c1"]),
        ]);
        assert_eq!(path, vec!["c1", "c2", "c3", "c1"]);
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let path = cycle_path(vec![skill("loop", &["loop"])]);
        assert_eq!(path, vec!["loop", "loop"]);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let count = 50_000;
        let edges: Vec<Vec<usize>> = (0..count)
            .map(|i| if i == 0 { vec![] } else { vec![i - 1] })
            .collect();
        assert_eq!(find_cycle(&edges), None);
    }

    #[test]
    fn identity_checks_run_in_input_order() {
        let err = validate(vec![skill("a", &[]), skill("", &[])]).unwrap_err();
        assert_eq!(err, ConfigError::EmptySkillId { index: 1 });

        let err = validate(vec![skill("a", &[]), skill("a", &[])]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateSkillId("a".into()));

        let err = validate(vec![SkillDefinition::new("zero", 0)]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidMaxLevel {
                skill_id: "zero".into(),
                max_level: 0
            }
        );
    }

    #[test]
    fn unknown_prerequisite_is_reported_before_cycles() {
        let err = validate(vec![skill("a", &["b"]), skill("b", &["a", "ghost"])]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownPrerequisite {
                skill_id: "b".into(),
                prerequisite_id: "ghost".into()
            }
        );
    }
}
