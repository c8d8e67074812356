pub mod extract;
pub mod graph;
pub mod layout;
pub mod measure;
pub mod schema;
pub mod svg;

use wasm_bindgen::prelude::*;

use graph::{Detail, Diagram};
use layout::GridLayout;
use svg::SvgRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render the CREATE TABLE statements in `source` as an ER diagram SVG.
/// Unparseable DDL degrades to a partial (or empty) diagram rather than an
/// error; the only failure is an unknown detail level.
#[wasm_bindgen(js_name = "ddlToSvg")]
pub fn render_ddl(
    source: &str,
    detail: Option<String>,
    columns: Option<u32>,
) -> Result<String, String> {
    let detail = match detail.as_deref() {
        Some(s) => s.parse::<Detail>().map_err(|e| e.to_string())?,
        None => Detail::All,
    };

    let schema = extract::parse_schema(source);
    let diagram = Diagram::from_schema(&schema, detail);

    let mut grid = GridLayout::default();
    if let Some(columns) = columns {
        grid = grid.with_columns(columns as usize);
    }
    let layout = grid.layout(&diagram);

    Ok(SvgRenderer::default().render(&diagram, &layout))
}
