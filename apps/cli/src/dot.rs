use std::collections::BTreeMap;
use std::fmt::Write;

use envisionment_engine::state_valid;
use qualitative_model::Envisionment;

/// Render an envisionment as Graphviz DOT. Nodes are numbered in canonical
/// key order and labeled with landmark names; states failing the standalone
/// validity check are drawn dashed.
pub fn render(graph: &Envisionment) -> String {
    let indices: BTreeMap<_, _> = graph
        .nodes()
        .keys()
        .enumerate()
        .map(|(index, key)| (key.clone(), index))
        .collect();

    let mut out = String::from("digraph envisionment {\n");
    out.push_str("    node [shape=box];\n");
    for (key, state) in graph.nodes() {
        let mut attrs = format!("label=\"{}\"", escape(&state.describe()));
        if !state_valid(state) {
            attrs.push_str(", style=dashed");
        }
        writeln!(out, "    n{} [{attrs}];", indices[key]).expect("writing to a string");
    }
    for (from, to) in graph.edges() {
        writeln!(out, "    n{} -> n{};", indices[from], indices[to]).expect("writing to a string");
    }
    out.push_str("}\n");
    out
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use envisionment_engine::build;

    use super::{escape, render};
    use crate::scenario::builtin;

    #[test]
    fn render_emits_one_node_statement_per_state() {
        let scenario = builtin("container").unwrap();
        let graph = build(&scenario.seed);
        let dot = render(&graph);

        assert!(dot.starts_with("digraph envisionment {"));
        assert_eq!(
            dot.matches("label=").count(),
            graph.node_count(),
            "every node carries a label"
        );
        assert_eq!(dot.matches(" -> ").count(), graph.edge_count());
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape("a \"b\""), "a \\\"b\\\"");
    }
}
