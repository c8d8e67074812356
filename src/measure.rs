use crate::schema::Column;
use unicode_width::UnicodeWidthStr;

pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_padding: f64,
    pub min_box_width: f64,
    pub min_box_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            padding_x: 12.0,
            padding_y: 8.0,
            header_padding: 4.0,
            min_box_width: 120.0,
            min_box_height: 60.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        UnicodeWidthStr::width(text) as f64 * self.char_width
    }

    /// The text of one column row, marker prefix included.
    pub fn column_row(&self, column: &Column) -> String {
        let marker = if column.is_pk {
            "◆ "
        } else if column.is_fk {
            "→ "
        } else {
            "  "
        };
        if column.typ.is_empty() {
            format!("{}{}", marker, column.name)
        } else {
            format!("{}{}: {}", marker, column.name, column.typ)
        }
    }

    pub fn header_height(&self) -> f64 {
        self.line_height + self.header_padding * 2.0
    }

    /// Box size for a table with the given name and visible columns.
    pub fn box_size(&self, name: &str, columns: &[Column]) -> (f64, f64) {
        let header_width = self.text_width(name);

        let max_row_width = columns
            .iter()
            .map(|c| self.text_width(&self.column_row(c)))
            .fold(0.0, f64::max);

        let content_width = header_width.max(max_row_width) + self.padding_x * 2.0;
        let width = content_width.max(self.min_box_width);

        let body_height = if columns.is_empty() {
            0.0
        } else {
            columns.len() as f64 * self.line_height + self.padding_y * 2.0
        };
        let height = (self.header_height() + body_height).max(self.min_box_height);

        (width, height)
    }
}
