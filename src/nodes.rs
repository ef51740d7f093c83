//! Node-network waypoint sequences, as typed into the route editor.
//!
//! Walkers write a sequence like `12 - 13 - 18` or `12, 13, 18` (or one node
//! per line). Separators may be mixed and repeated.

use crate::RouteNode;

fn is_separator(c: char) -> bool {
    matches!(c, '-' | ',' | '\n' | '\r')
}

/// Split editor input into nodes, dropping empty pieces.
pub fn parse_nodes(input: &str) -> Vec<RouteNode> {
    input
        .split(is_separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(RouteNode::new)
        .collect()
}

/// Render nodes back into editor form.
pub fn format_nodes(nodes: &[RouteNode]) -> String {
    nodes
        .iter()
        .map(|n| n.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(nodes: &[RouteNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_parse_mixed_separators() {
        let nodes = parse_nodes("12 - 13, 18\n22 -- 45,,82");
        assert_eq!(ids(&nodes), vec!["12", "13", "18", "22", "45", "82"]);
        assert!(nodes.iter().all(|n| n.description.is_none()));
    }

    #[test]
    fn test_parse_windows_newlines_and_blank() {
        assert_eq!(ids(&parse_nodes("1\r\n2\r\n")), vec!["1", "2"]);
        assert!(parse_nodes("  ,  - \n").is_empty());
        assert!(parse_nodes("").is_empty());
    }

    #[test]
    fn test_format_nodes() {
        let nodes = parse_nodes("12-13-18");
        assert_eq!(format_nodes(&nodes), "12, 13, 18");
        assert_eq!(format_nodes(&[]), "");
    }
}
