//! Job dependency graph derived from `needs`.

use crate::core::workflow::schema::Job;
use indexmap::{IndexMap, IndexSet};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// Prerequisites and dependents per job id, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    prerequisites: IndexMap<String, IndexSet<String>>,
    dependents: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    pub fn from_jobs(jobs: &IndexMap<String, Job>) -> Self {
        let mut prerequisites = IndexMap::new();
        let mut dependents: IndexMap<String, IndexSet<String>> = jobs
            .keys()
            .map(|id| (id.clone(), IndexSet::new()))
            .collect();

        for (id, job) in jobs {
            prerequisites.insert(id.clone(), job.needs.clone());
            for prerequisite in &job.needs {
                dependents
                    .entry(prerequisite.clone())
                    .or_default()
                    .insert(id.clone());
            }
        }

        Self {
            prerequisites,
            dependents,
        }
    }

    pub fn prerequisites(&self, job_id: &str) -> impl Iterator<Item = &str> {
        self.prerequisites
            .get(job_id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn dependents(&self, job_id: &str) -> impl Iterator<Item = &str> {
        self.dependents
            .get(job_id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// `(job, prerequisite)` pairs whose prerequisite is not a declared job.
    pub fn unknown_prerequisites(&self) -> Vec<(&str, &str)> {
        self.prerequisites
            .iter()
            .flat_map(|(job, needs)| needs.iter().map(move |need| (job.as_str(), need.as_str())))
            .filter(|(_, need)| !self.prerequisites.contains_key(*need))
            .collect()
    }

    /// Groups of jobs that depend on each other through `needs`.
    ///
    /// Each group lists job ids in declaration order; groups are ordered by
    /// their first member.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let nodes: IndexMap<&str, NodeIndex> = self
            .prerequisites
            .keys()
            .map(|id| (id.as_str(), graph.add_node(id.as_str())))
            .collect();

        for (job, needs) in &self.prerequisites {
            let to = nodes[job.as_str()];
            for need in needs {
                if let Some(&from) = nodes.get(need.as_str()) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || graph.find_edge(component[0], component[0]).is_some()
            })
            .map(|component| {
                let mut members: Vec<NodeIndex> = component;
                members.sort();
                members
                    .into_iter()
                    .map(|idx| graph[idx].to_string())
                    .collect()
            })
            .collect();
        cycles.sort_by_key(|members| nodes.get_index_of(members[0].as_str()));
        cycles
    }
}

/// Order jobs for rendering: fewest declared prerequisites first.
///
/// Ties keep declaration order. This is a layering heuristic for drawing,
/// not a topological sort: a job may still precede one of its prerequisites
/// when both declare the same number of `needs`. Do not use it to schedule.
pub fn rendering_order(jobs: &IndexMap<String, Job>) -> Vec<&Job> {
    let mut ordered: Vec<&Job> = jobs.values().collect();
    ordered.sort_by_key(|job| job.prerequisite_count());
    ordered
}
