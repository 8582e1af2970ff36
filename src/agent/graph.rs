//! Conversation-flow graph over panel messages.

use std::fmt::Write;

use serde::Serialize;

use super::message::{AgentMessage, node_id};
use super::role::AgentRole;

/// One message in the graph, keyed by `(agent, round)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// `{agent}_r{round}`.
    pub id: String,
    /// `{agent} (R{round})`.
    pub label: String,
    /// Author role.
    pub agent: AgentRole,
    /// Round of the message.
    pub round: u32,
    /// Confidence of the message.
    pub confidence: f64,
}

/// Directed link between consecutive messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Node id of the earlier message.
    pub source: String,
    /// Node id of the later message.
    pub target: String,
    /// `Round {source round}`.
    pub label: String,
}

/// Nodes in emission order plus edges along the global message sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageGraph {
    /// Registered nodes.
    pub nodes: Vec<GraphNode>,
    /// Edges; empty until [`MessageGraph::connect`] runs.
    pub edges: Vec<GraphEdge>,
}

impl MessageGraph {
    /// Registers the node for `message`.
    pub fn add_node(&mut self, message: &AgentMessage) {
        self.nodes.push(GraphNode {
            id: message.node_id(),
            label: format!("{} (R{})", message.agent, message.round),
            agent: message.agent,
            round: message.round,
            confidence: message.confidence,
        });
    }

    /// Links each message to the next one in `history`, across rounds and
    /// agents. Replaces any existing edges.
    pub fn connect(&mut self, history: &[AgentMessage]) {
        self.edges = history
            .windows(2)
            .map(|pair| GraphEdge {
                source: node_id(pair[0].agent, pair[0].round),
                target: node_id(pair[1].agent, pair[1].round),
                label: format!("Round {}", pair[0].round),
            })
            .collect();
    }

    /// Builds the complete graph of a finished history.
    #[must_use]
    pub fn from_history(history: &[AgentMessage]) -> Self {
        let mut graph = Self::default();
        for message in history {
            graph.add_node(message);
        }
        graph.connect(history);
        graph
    }

    /// Plain-text listing: a count line, then one line per node.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = format!("Nodes: {} | Edges: {}\n", self.nodes.len(), self.edges.len());
        for node in &self.nodes {
            let _ = writeln!(
                out,
                "- {} (confidence {:.2})",
                node.label, node.confidence
            );
        }
        out
    }
}
