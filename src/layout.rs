use crate::graph::Diagram;
use crate::measure::TextMetrics;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutNode {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub from_point: (f64, f64),
    pub to_point: (f64, f64),
    /// Index into Diagram.edges
    pub edge_index: usize,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: f64,
    pub height: f64,
}

/// Row-major grid placement. Tables keep their declaration order, filling
/// rows left to right; cell sizes follow the measured boxes.
pub struct GridLayout {
    metrics: TextMetrics,
    columns: usize,
    gap_x: f64,
    gap_y: f64,
    margin: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
            columns: 3,
            gap_x: 60.0,
            gap_y: 50.0,
            margin: 50.0,
        }
    }
}

impl GridLayout {
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn layout(&self, diagram: &Diagram) -> Layout {
        let sizes: Vec<(f64, f64)> = diagram
            .nodes
            .iter()
            .map(|n| self.metrics.box_size(&n.name, &n.columns))
            .collect();

        let cols = self.columns;
        let col_widths = axis_maxima(&sizes, |i| i % cols, cols, |s| s.0);
        let rows = sizes.len().div_ceil(cols);
        let row_heights = axis_maxima(&sizes, |i| i / cols, rows, |s| s.1);

        let col_offsets = offsets(&col_widths, self.margin, self.gap_x);
        let row_offsets = offsets(&row_heights, self.margin, self.gap_y);

        let nodes: Vec<LayoutNode> = diagram
            .nodes
            .iter()
            .zip(&sizes)
            .enumerate()
            .map(|(i, (node, &(width, height)))| LayoutNode {
                name: node.name.clone(),
                x: col_offsets[i % cols],
                y: row_offsets[i / cols],
                width,
                height,
            })
            .collect();

        // Connector endpoints are box centers, found by table name. When a
        // name appears twice the later box wins.
        let by_name: HashMap<&str, &LayoutNode> =
            nodes.iter().map(|n| (n.name.as_str(), n)).collect();

        let edges: Vec<LayoutEdge> = diagram
            .edges
            .iter()
            .enumerate()
            .filter_map(|(edge_index, edge)| {
                let from = by_name.get(edge.from.as_str())?;
                let to = by_name.get(edge.to.as_str())?;
                Some(LayoutEdge {
                    from_point: from.center(),
                    to_point: to.center(),
                    edge_index,
                })
            })
            .collect();

        let width = nodes
            .iter()
            .map(|n| n.x + n.width)
            .fold(0.0, f64::max)
            + self.margin;
        let height = nodes
            .iter()
            .map(|n| n.y + n.height)
            .fold(0.0, f64::max)
            + self.margin;

        Layout {
            nodes,
            edges,
            width: width.max(self.margin * 2.0),
            height: height.max(self.margin * 2.0),
        }
    }
}

/// Maximum size along one grid axis: `bucket` maps a node index to its
/// column (or row), `pick` selects width or height.
fn axis_maxima(
    sizes: &[(f64, f64)],
    bucket: impl Fn(usize) -> usize,
    count: usize,
    pick: impl Fn(&(f64, f64)) -> f64,
) -> Vec<f64> {
    let mut maxima = vec![0.0_f64; count];
    for (i, size) in sizes.iter().enumerate() {
        let b = bucket(i);
        maxima[b] = maxima[b].max(pick(size));
    }
    maxima
}

fn offsets(extents: &[f64], margin: f64, gap: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(extents.len());
    let mut cursor = margin;
    for extent in extents {
        out.push(cursor);
        cursor += extent + gap;
    }
    out
}
