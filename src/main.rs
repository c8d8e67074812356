use ddlgraph::extract::parse_schema;
use ddlgraph::graph::{Detail, Diagram};
use ddlgraph::layout::GridLayout;
use ddlgraph::svg::SvgRenderer;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema.sql> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>   Output file (default: stdout)");
        eprintln!("  -d, --detail <level>  Detail level: tables, keys, all (default: all)");
        eprintln!("  -c, --columns <n>     Tables per grid row (default: 3)");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut detail = Detail::All;
    let mut columns: Option<usize> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-d" | "--detail" => {
                i += 1;
                if i < args.len() {
                    detail = args[i].parse().unwrap_or_else(|e| {
                        eprintln!("{}", e);
                        process::exit(1);
                    });
                }
            }
            "-c" | "--columns" => {
                i += 1;
                if i < args.len() {
                    columns = match args[i].parse::<usize>() {
                        Ok(n) if n >= 1 => Some(n),
                        _ => {
                            eprintln!("Invalid column count: {}", args[i]);
                            process::exit(1);
                        }
                    };
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let schema = parse_schema(&input);
    if schema.tables.is_empty() {
        eprintln!("Warning: no CREATE TABLE statements recognized in {}", input_path);
    }

    let diagram = Diagram::from_schema(&schema, detail);
    let mut grid = GridLayout::default();
    if let Some(n) = columns {
        grid = grid.with_columns(n);
    }
    let layout = grid.layout(&diagram);
    let svg = SvgRenderer::default().render(&diagram, &layout);

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &svg) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", svg),
    }
}
