use crate::graph::{Diagram, Edge, Node};
use crate::layout::{Layout, LayoutEdge, LayoutNode};
use crate::measure::TextMetrics;
use std::collections::HashMap;
use std::fmt::Write;

pub struct SvgRenderer {
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl SvgRenderer {
    pub fn render(&self, diagram: &Diagram, layout: &Layout) -> String {
        let mut svg = String::new();

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            layout.width, layout.height, layout.width, layout.height
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .table-bg {{ fill: #fff; }}
  .table-header {{ fill: #e0e0e0; }}
  .table-border {{ fill: none; stroke: #333; stroke-width: 1.5; }}
  .table-name {{ font-family: monospace; font-size: 14px; font-weight: bold; }}
  .column-text {{ font-family: monospace; font-size: 12px; }}
  .pk {{ font-weight: bold; }}
  .fk {{ font-style: italic; }}
  .relation {{ stroke: #4a5568; stroke-width: 2; fill: none; }}
</style>"#
        )
        .unwrap();

        // When a name appears twice the later table wins, matching the
        // layout's edge lookup.
        let node_map: HashMap<&str, &Node> =
            diagram.nodes.iter().map(|n| (n.name.as_str(), n)).collect();

        // Relations first so the boxes sit on top of the curves.
        for edge in &layout.edges {
            self.render_edge(&mut svg, edge, diagram.edges.get(edge.edge_index));
        }

        for node in &layout.nodes {
            if let Some(diagram_node) = node_map.get(node.name.as_str()) {
                self.render_node(&mut svg, node, diagram_node);
            }
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_node(&self, svg: &mut String, layout: &LayoutNode, node: &Node) {
        let x = layout.x;
        let y = layout.y;
        let w = layout.width;
        let header_h = self.metrics.header_height();

        // 1. Background
        writeln!(
            svg,
            r#"<rect class="table-bg" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            x, y, w, layout.height
        )
        .unwrap();

        // 2. Header background
        if node.columns.is_empty() {
            // No rows: header fills the whole box
            writeln!(
                svg,
                r#"<rect class="table-header" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
                x, y, w, layout.height
            )
            .unwrap();
        } else {
            writeln!(
                svg,
                r#"<rect class="table-header" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
                x, y, w, header_h
            )
            .unwrap();
            writeln!(
                svg,
                r#"<rect class="table-header" x="{}" y="{}" width="{}" height="{}" />"#,
                x,
                y + header_h - 4.0,
                w,
                4.0
            )
            .unwrap();
        }

        // 3. Table name
        let text_y = y + header_h / 2.0 + 5.0;
        writeln!(
            svg,
            r#"<text class="table-name" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            x + w / 2.0,
            text_y,
            escape_xml(&node.name)
        )
        .unwrap();

        // 4. Separator line and column rows
        if !node.columns.is_empty() {
            writeln!(
                svg,
                r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#333" stroke-width="1" />"##,
                x,
                y + header_h,
                x + w,
                y + header_h
            )
            .unwrap();

            let mut row_y = y + header_h + self.metrics.padding_y + self.metrics.line_height * 0.7;
            for column in &node.columns {
                let mut class = "column-text".to_string();
                if column.is_pk {
                    class.push_str(" pk");
                }
                if column.is_fk {
                    class.push_str(" fk");
                }

                writeln!(
                    svg,
                    r#"<text class="{}" x="{}" y="{}">{}</text>"#,
                    class,
                    x + self.metrics.padding_x,
                    row_y,
                    escape_xml(&self.metrics.column_row(column))
                )
                .unwrap();

                row_y += self.metrics.line_height;
            }
        }

        // 5. Border on top
        writeln!(
            svg,
            r#"<rect class="table-border" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            x, y, w, layout.height
        )
        .unwrap();
    }

    fn render_edge(&self, svg: &mut String, layout: &LayoutEdge, edge: Option<&Edge>) {
        let (x1, y1) = layout.from_point;
        let (x2, y2) = layout.to_point;

        // Cubic curve between box centers, pulled horizontal at both ends.
        write!(
            svg,
            r#"<path class="relation" d="M {} {} C {} {}, {} {}, {} {}""#,
            x1,
            y1,
            x1 + 50.0,
            y1,
            x2 - 50.0,
            y2,
            x2,
            y2
        )
        .unwrap();

        match edge {
            Some(edge) => {
                writeln!(
                    svg,
                    "><title>{}</title></path>",
                    escape_xml(&format!(
                        "{}.{} → {}.{}",
                        edge.from, edge.from_column, edge.to, edge.to_column
                    ))
                )
                .unwrap();
            }
            None => writeln!(svg, " />").unwrap(),
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
