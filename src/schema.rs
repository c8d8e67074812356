/// A parsed schema: every table found in the input plus the foreign-key
/// edges between them. Rebuilt wholesale on each parse call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSchema {
    pub tables: Vec<Table>,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Position of the table in the input, 0-based. Stable only within a
    /// single parse call.
    pub id: usize,
    /// Table name exactly as written, quotes included.
    pub name: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Raw type token as written. Empty when the defining line had no
    /// second token.
    pub typ: String,
    pub is_pk: bool,
    pub is_fk: bool,
}

/// A directed foreign-key edge, taken from a `REFERENCES table(column)`
/// clause on a column line.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}
