//! Best-effort extraction of tables and relations from CREATE TABLE text.

use super::scanner::Scanner;
use crate::schema::{Column, ParsedSchema, Relation, Table};

/// Extract every recognizable `CREATE TABLE name ( body );` statement from
/// `input`. Total over all inputs: text that does not fit the statement
/// shape contributes nothing, malformed column lines degrade instead of
/// failing, and the empty input yields an empty schema.
pub fn parse_schema(input: &str) -> ParsedSchema {
    let mut schema = ParsedSchema::default();
    let mut scanner = Scanner::new(input);

    while scanner.seek_keyword("CREATE TABLE") {
        let resume = scanner.pos();
        match scan_statement(&mut scanner) {
            Some((name, body)) => {
                let columns = parse_columns(name, body, &mut schema.relations);
                schema.tables.push(Table {
                    id: schema.tables.len(),
                    name: name.to_string(),
                    columns,
                });
            }
            // Not a complete statement; keep looking for the next
            // CREATE TABLE after this one.
            None => scanner.seek(resume),
        }
    }

    schema
}

/// Scan the remainder of one statement, cursor positioned just after the
/// CREATE TABLE keyword. Returns the verbatim table name and the body
/// between the parentheses, and leaves the cursor after the terminating
/// `;`. The body runs to the first `;` of the input, which must directly
/// follow a `)`.
fn scan_statement<'a>(scanner: &mut Scanner<'a>) -> Option<(&'a str, &'a str)> {
    if !scanner.skip_whitespace() {
        return None;
    }
    let name = scanner.read_word();
    if name.is_empty() {
        return None;
    }
    if !scanner.skip_whitespace() {
        return None;
    }
    if !scanner.eat('(') {
        return None;
    }

    let body_start = scanner.pos();
    let semi = scanner.find(';')?;
    if semi < body_start + 2 || scanner.byte_at(semi - 1) != Some(b')') {
        return None;
    }

    let body = scanner.slice(body_start, semi - 1);
    scanner.seek(semi + 1);
    Some((name, body))
}

/// Parse the column lines of one table body, appending a relation for each
/// foreign-key line whose target clause is parseable.
fn parse_columns(table: &str, body: &str, relations: &mut Vec<Relation>) -> Vec<Column> {
    let mut columns = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        let line = line.strip_suffix(',').unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        let name = match words.next() {
            Some(word) => word.to_string(),
            None => continue,
        };
        let typ = words.next().unwrap_or_default().to_string();

        // Flag detection scans the whole line, so the markers are found in
        // any position, including inside comments or defaults.
        let upper = line.to_uppercase();
        let is_pk = upper.contains("PRIMARY KEY");
        let is_fk = upper.contains("REFERENCES");

        if is_fk {
            // A flagged line without a parseable target keeps its flag but
            // contributes no edge.
            if let Some((to_table, to_column)) = reference_target(line) {
                relations.push(Relation {
                    from_table: table.to_string(),
                    from_column: name.clone(),
                    to_table,
                    to_column,
                });
            }
        }

        columns.push(Column {
            name,
            typ,
            is_pk,
            is_fk,
        });
    }

    columns
}

/// Find the first `REFERENCES table(column)` clause in a column line.
fn reference_target(line: &str) -> Option<(String, String)> {
    let mut scanner = Scanner::new(line);
    while scanner.seek_keyword("REFERENCES") {
        let resume = scanner.pos();
        if let Some(target) = try_reference(&mut scanner) {
            return Some(target);
        }
        scanner.seek(resume);
    }
    None
}

fn try_reference(scanner: &mut Scanner) -> Option<(String, String)> {
    if !scanner.skip_whitespace() {
        return None;
    }
    let table = scanner.read_ident();
    if table.is_empty() || !scanner.eat('(') {
        return None;
    }
    let column = scanner.read_ident();
    if column.is_empty() || !scanner.eat(')') {
        return None;
    }
    Some((table.to_string(), column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let schema = parse_schema("");
        assert_eq!(schema, ParsedSchema::default());
    }

    #[test]
    fn test_no_statements() {
        let schema = parse_schema("SELECT * FROM users;");
        assert!(schema.tables.is_empty());
        assert!(schema.relations.is_empty());
    }

    #[test]
    fn test_single_table_columns() {
        let sql = "CREATE TABLE users (\n  id INTEGER PRIMARY KEY,\n  name TEXT\n);";
        let schema = parse_schema(sql);

        assert_eq!(schema.tables.len(), 1);
        let users = &schema.tables[0];
        assert_eq!(users.id, 0);
        assert_eq!(users.name, "users");
        assert_eq!(
            users.columns,
            vec![
                Column {
                    name: "id".to_string(),
                    typ: "INTEGER".to_string(),
                    is_pk: true,
                    is_fk: false,
                },
                Column {
                    name: "name".to_string(),
                    typ: "TEXT".to_string(),
                    is_pk: false,
                    is_fk: false,
                },
            ]
        );
        assert!(schema.relations.is_empty());
    }

    #[test]
    fn test_sequential_ids() {
        let sql = "CREATE TABLE a (x INT);\nCREATE TABLE b (y INT);\nCREATE TABLE c (z INT);";
        let schema = parse_schema(sql);

        assert_eq!(schema.tables.len(), 3);
        for (i, table) in schema.tables.iter().enumerate() {
            assert_eq!(table.id, i);
        }
        assert_eq!(schema.tables[0].name, "a");
        assert_eq!(schema.tables[2].name, "c");
    }

    #[test]
    fn test_foreign_key_relation() {
        let sql = "CREATE TABLE posts (\n  id INTEGER PRIMARY KEY,\n  user_id INTEGER REFERENCES users(id)\n);";
        let schema = parse_schema(sql);

        let user_id = &schema.tables[0].columns[1];
        assert!(user_id.is_fk);
        assert!(!user_id.is_pk);
        assert_eq!(
            schema.relations,
            vec![Relation {
                from_table: "posts".to_string(),
                from_column: "user_id".to_string(),
                to_table: "users".to_string(),
                to_column: "id".to_string(),
            }]
        );
    }

    #[test]
    fn test_relation_order_follows_columns() {
        let sql = r#"
            CREATE TABLE orders (
              id INT PRIMARY KEY,
              user_id INT REFERENCES users(id),
              product_id INT REFERENCES products(id)
            );
            CREATE TABLE reviews (
              id INT PRIMARY KEY,
              order_id INT REFERENCES orders(id)
            );
        "#;
        let schema = parse_schema(sql);

        let targets: Vec<&str> = schema
            .relations
            .iter()
            .map(|r| r.to_table.as_str())
            .collect();
        assert_eq!(targets, vec!["users", "products", "orders"]);
        assert_eq!(schema.relations[2].from_table, "reviews");
    }

    #[test]
    fn test_unterminated_block_dropped() {
        let sql = "CREATE TABLE ok (\n  id INT\n);\nCREATE TABLE broken (\n  id INT";
        let schema = parse_schema(sql);

        // The second block never closes; it contributes nothing.
        assert_eq!(schema.tables.len(), 1);
        assert_eq!(schema.tables[0].name, "ok");
        assert!(schema.relations.is_empty());
    }

    #[test]
    fn test_lowercase_keywords() {
        let schema = parse_schema("create table Foo ( id int primary key );");

        assert_eq!(schema.tables.len(), 1);
        assert_eq!(schema.tables[0].name, "Foo");
        let id = &schema.tables[0].columns[0];
        assert_eq!(id.typ, "int");
        assert!(id.is_pk);
    }

    #[test]
    fn test_pure_function() {
        let sql = "CREATE TABLE t (\n  id INT PRIMARY KEY,\n  other_id INT REFERENCES other(id)\n);";
        assert_eq!(parse_schema(sql), parse_schema(sql));
    }

    #[test]
    fn test_short_line_yields_untyped_column() {
        let sql = "CREATE TABLE t (\n  id INT,\n  orphan\n);";
        let schema = parse_schema(sql);

        let orphan = &schema.tables[0].columns[1];
        assert_eq!(orphan.name, "orphan");
        assert_eq!(orphan.typ, "");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let sql = "CREATE TABLE t (\n  id INT,\n\n   \n  name TEXT\n);";
        let schema = parse_schema(sql);

        let names: Vec<&str> = schema.tables[0]
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn test_malformed_reference_keeps_flag() {
        let sql = "CREATE TABLE t (\n  user_id INT REFERENCES users\n);";
        let schema = parse_schema(sql);

        assert!(schema.tables[0].columns[0].is_fk);
        assert!(schema.relations.is_empty());
    }

    #[test]
    fn test_quoted_name_kept_verbatim() {
        let sql = "CREATE TABLE \"users\" (\n  id INT\n);";
        let schema = parse_schema(sql);

        assert_eq!(schema.tables[0].name, "\"users\"");
    }

    #[test]
    fn test_type_with_parens_and_trailing_comma() {
        let sql = "CREATE TABLE t (\n  name VARCHAR(255),\n  age INT\n);";
        let schema = parse_schema(sql);

        let cols = &schema.tables[0].columns;
        assert_eq!(cols[0].typ, "VARCHAR(255)");
        assert_eq!(cols[1].name, "age");
    }

    #[test]
    fn test_duplicate_table_names_preserved() {
        let sql = "CREATE TABLE t (a INT);\nCREATE TABLE t (b INT);";
        let schema = parse_schema(sql);

        assert_eq!(schema.tables.len(), 2);
        assert_eq!(schema.tables[0].id, 0);
        assert_eq!(schema.tables[1].id, 1);
        assert_eq!(schema.tables[1].columns[0].name, "b");
    }

    #[test]
    fn test_missing_whitespace_before_paren_rejected() {
        // The statement shape requires whitespace on both sides of the
        // table name.
        let schema = parse_schema("CREATE TABLE users(id INT);");
        assert!(schema.tables.is_empty());
    }

    #[test]
    fn test_flag_detected_anywhere_in_line() {
        // Whole-line substring scan: a marker inside a trailing comment
        // still sets the flag.
        let sql = "CREATE TABLE t (\n  id INT -- like REFERENCES elsewhere\n);";
        let schema = parse_schema(sql);

        assert!(schema.tables[0].columns[0].is_fk);
        assert!(schema.relations.is_empty());
    }
}
