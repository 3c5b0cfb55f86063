//! Tag co-occurrence graph construction.
//!
//! [`TagGraph`] turns a flat sequence of tasks into an undirected graph
//! for force-directed rendering: one node per task, one edge per unordered
//! pair of tasks sharing a tag. Edge multiplicity is meaningful: two
//! tasks sharing two different tags get two parallel edges, never
//! deduplicated, so downstream rendering can express tie strength.
//!
//! Construction is deterministic: nodes appear in task-iteration order,
//! edges grouped by tag in first-encounter order and within a tag in pair
//! order. Serializing the same input twice yields byte-identical output.
//!
//! The builder splits the raw tags string on `,` without trimming or
//! charset checks. Validation lives in [`crate::tags`] and runs before
//! storage; whatever string made it into the store participates here as
//! literal tokens. This keeps graph construction total; it cannot fail.

use indexmap::IndexMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::task::Task;

/// Constant `group` discriminator carried on every wire node. The
/// renderer contract has the field; nothing assigns other values.
pub const NODE_GROUP: i64 = 1;

/// Node payload: task identity plus its display label.
///
/// Identity is the task id; the title is only a label. Two tasks with the
/// same title therefore stay distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    pub id: TaskId,
    pub label: String,
}

/// Wire form of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: TaskId,
    pub label: String,
    pub group: i64,
}

/// Wire form of an edge. Undirected, no weight; duplicates are
/// intentional (one per shared tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: TaskId,
    pub target: TaskId,
}

/// Serialized `{nodes, links}` payload consumed by the force renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Tag co-occurrence graph over one user's tasks.
///
/// Backed by a petgraph [`UnGraph`] whose parallel edges carry the shared
/// tag token as weight. Rebuilt from scratch on every call; never cached.
#[derive(Debug, Clone, Default)]
pub struct TagGraph {
    graph: UnGraph<TaskNode, String>,
}

impl TagGraph {
    /// Build the graph for a task sequence. Never fails: malformed tag
    /// strings contribute their literal tokens, empty tags contribute a
    /// node and no edges.
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph = UnGraph::new_undirected();

        // Tag token -> nodes carrying it, in task-iteration order. The
        // index is ephemeral; edge generation order depends on its
        // insertion order.
        let mut tag_index: IndexMap<String, Vec<NodeIndex>> = IndexMap::new();

        for task in tasks {
            let node = graph.add_node(TaskNode {
                id: task.id,
                label: task.title.clone(),
            });
            if task.tags.is_empty() {
                continue;
            }
            // Raw split, no trim: the graph path tolerates anything.
            for token in task.tags.split(',') {
                tag_index.entry(token.to_owned()).or_default().push(node);
            }
        }

        for (tag, members) in &tag_index {
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    graph.add_edge(members[i], members[j], tag.clone());
                }
            }
        }

        TagGraph { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in task-iteration order.
    pub fn nodes(&self) -> impl Iterator<Item = &TaskNode> {
        self.graph.node_weights()
    }

    /// Edges in generation order, with the shared tag that produced each.
    pub fn edges(&self) -> impl Iterator<Item = (&TaskNode, &TaskNode, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight().as_str(),
            )
        })
    }

    /// Project to the wire payload.
    pub fn to_view(&self) -> GraphView {
        GraphView {
            nodes: self
                .graph
                .node_weights()
                .map(|node| GraphNode {
                    id: node.id,
                    label: node.label.clone(),
                    group: NODE_GROUP,
                })
                .collect(),
            links: self
                .graph
                .edge_references()
                .map(|edge| GraphLink {
                    source: self.graph[edge.source()].id,
                    target: self.graph[edge.target()].id,
                })
                .collect(),
        }
    }
}
