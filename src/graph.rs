use crate::schema::{Column, ParsedSchema};
use std::str::FromStr;
use thiserror::Error;

/// How much of each table to show in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Table names only.
    Tables,
    /// Primary and foreign key columns only.
    Keys,
    /// Every column.
    #[default]
    All,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown detail level: {0} (expected tables, keys or all)")]
pub struct DetailError(String);

impl FromStr for Detail {
    type Err = DetailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tables" => Ok(Self::Tables),
            "keys" => Ok(Self::Keys),
            "all" => Ok(Self::All),
            other => Err(DetailError(other.to_string())),
        }
    }
}

/// The renderable subset of a parsed schema: one node per table, one edge
/// per relation whose endpoints are both present.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub from_column: String,
    pub to: String,
    pub to_column: String,
}

impl Diagram {
    pub fn from_schema(schema: &ParsedSchema, detail: Detail) -> Self {
        let nodes: Vec<Node> = schema
            .tables
            .iter()
            .map(|table| {
                let columns = table
                    .columns
                    .iter()
                    .filter(|c| match detail {
                        Detail::Tables => false,
                        Detail::Keys => c.is_pk || c.is_fk,
                        Detail::All => true,
                    })
                    .cloned()
                    .collect();
                Node {
                    name: table.name.clone(),
                    columns,
                }
            })
            .collect();

        let node_names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();

        // A relation may point at a table the input never defined; such
        // edges have nowhere to land and are not drawn.
        let edges: Vec<Edge> = schema
            .relations
            .iter()
            .filter(|r| {
                node_names.contains(&r.from_table.as_str())
                    && node_names.contains(&r.to_table.as_str())
            })
            .map(|r| Edge {
                from: r.from_table.clone(),
                from_column: r.from_column.clone(),
                to: r.to_table.clone(),
                to_column: r.to_column.clone(),
            })
            .collect();

        Diagram { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::parse_schema;

    const SQL: &str = "CREATE TABLE users (\n  id INT PRIMARY KEY,\n  name TEXT,\n  email TEXT\n);\nCREATE TABLE posts (\n  id INT PRIMARY KEY,\n  user_id INT REFERENCES users(id)\n);";

    #[test]
    fn test_all_detail() {
        let schema = parse_schema(SQL);
        let diagram = Diagram::from_schema(&schema, Detail::All);

        assert_eq!(diagram.nodes.len(), 2);
        assert_eq!(diagram.nodes[0].columns.len(), 3);
        assert_eq!(diagram.edges.len(), 1);
        assert_eq!(diagram.edges[0].from, "posts");
        assert_eq!(diagram.edges[0].to, "users");
    }

    #[test]
    fn test_keys_detail() {
        let schema = parse_schema(SQL);
        let diagram = Diagram::from_schema(&schema, Detail::Keys);

        assert_eq!(diagram.nodes[0].columns.len(), 1);
        assert_eq!(diagram.nodes[0].columns[0].name, "id");
        assert_eq!(diagram.nodes[1].columns.len(), 2);
    }

    #[test]
    fn test_tables_detail() {
        let schema = parse_schema(SQL);
        let diagram = Diagram::from_schema(&schema, Detail::Tables);

        assert!(diagram.nodes.iter().all(|n| n.columns.is_empty()));
        // Edges survive even when columns are hidden.
        assert_eq!(diagram.edges.len(), 1);
    }

    #[test]
    fn test_edge_to_undefined_table_dropped() {
        let sql = "CREATE TABLE posts (\n  user_id INT REFERENCES users(id)\n);";
        let schema = parse_schema(sql);
        assert_eq!(schema.relations.len(), 1);

        let diagram = Diagram::from_schema(&schema, Detail::All);
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn test_detail_from_str() {
        assert_eq!("keys".parse::<Detail>(), Ok(Detail::Keys));
        assert_eq!("all".parse::<Detail>(), Ok(Detail::All));
        assert!("pk_fk".parse::<Detail>().is_err());
    }
}
