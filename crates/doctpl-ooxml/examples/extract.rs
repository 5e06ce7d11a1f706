//! Example: Print the body structure of a DOCX file
//!
//! Usage: cargo run --example extract -- path/to/document.docx

use std::env;
use std::path::Path;

use doctpl_ooxml::{DocItem, Template};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path/to/document.docx>", args[0]);
        eprintln!();
        eprintln!("Prints one line per top-level body item:");
        eprintln!("  - item kind");
        eprintln!("  - plain text (tables: one line per row)");
        std::process::exit(1);
    }

    let docx_path = Path::new(&args[1]);

    if !docx_path.exists() {
        eprintln!("Error: File not found: {}", docx_path.display());
        std::process::exit(1);
    }

    let document = match Template::load(docx_path).and_then(|t| t.document()) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== {} ===", docx_path.display());
    for (prefix, uri) in &document.scheme {
        println!("xmlns:{} = {}", prefix, uri);
    }
    println!();

    for (index, item) in document.body.items.iter().enumerate() {
        match item {
            DocItem::Table(table) => {
                println!("[{}] table ({} rows)", index, table.rows.len());
                for row in &table.rows {
                    let cells: Vec<String> = row.cells.iter().map(|c| c.plain_text()).collect();
                    println!("    | {} |", cells.join(" | "));
                }
            }
            other => println!("[{}] {:?}: {}", index, other.kind(), other.plain_text()),
        }
    }
}
