use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;

use tagex_editor::{
    expand, resolve_normal, EditorHost, ExpandOutcome, Position, ScratchBuffer, Selection,
};
use tagex_locator::locate;

#[derive(Parser)]
#[command(name = "tagex")]
#[command(about = "tagex — expand markup tag pairs onto their own lines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand the tag pair at a cursor position or inside a line selection
    Expand {
        /// Input file
        path: String,

        /// Cursor line (1-based)
        #[arg(long, default_value_t = 1)]
        line: usize,

        /// Cursor column (1-based)
        #[arg(long, default_value_t = 1)]
        column: usize,

        /// First selected line (1-based); together with --to this simulates
        /// a linewise selection instead of a cursor
        #[arg(long, requires = "to")]
        from: Option<usize>,

        /// Last selected line (1-based)
        #[arg(long, requires = "from")]
        to: Option<usize>,

        /// Rewrite the file instead of printing the result to stdout
        #[arg(long)]
        in_place: bool,
    },

    /// Report the tag pair the cursor is aiming at, without editing
    Locate {
        /// Input file
        path: String,

        /// Cursor line (1-based)
        #[arg(long, default_value_t = 1)]
        line: usize,

        /// Cursor column (1-based)
        #[arg(long, default_value_t = 1)]
        column: usize,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Expand {
            path,
            line,
            column,
            from,
            to,
            in_place,
        } => cmd_expand(&path, line, column, from.zip(to), in_place),
        Command::Locate {
            path,
            line,
            column,
            json,
        } => cmd_locate(&path, line, column, json),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// 1-based editor coordinate to 0-based, bounds-checked against the buffer.
fn to_index(what: &str, value: usize, len: usize) -> usize {
    if value == 0 || value > len {
        eprintln!("Error: {what} {value} is out of range (1..={len})");
        std::process::exit(1);
    }
    value - 1
}

fn cmd_expand(
    path: &str,
    line: usize,
    column: usize,
    selection: Option<(usize, usize)>,
    in_place: bool,
) {
    let source = read_source(path);
    let mut buf = ScratchBuffer::new(&source);

    match selection {
        Some((from, to)) => {
            let first = to_index("line", from, buf.line_count());
            let last = to_index("line", to, buf.line_count());
            if first > last {
                eprintln!("Error: selection {from}..{to} is inverted");
                std::process::exit(1);
            }
            buf.select(Selection::Linewise { first, last });
        }
        None => {
            let line = to_index("line", line, buf.line_count());
            buf.set_cursor(line, column.saturating_sub(1));
        }
    }

    match expand(&mut buf) {
        Ok(ExpandOutcome::Expanded {
            first_line,
            replaced,
            inserted,
        }) => {
            eprintln!(
                "Expanded: {replaced} line(s) at line {} became {inserted}",
                first_line + 1
            );
        }
        Ok(ExpandOutcome::NotFound) => {
            eprintln!("No tag pair found; buffer unchanged");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    if in_place {
        if let Err(e) = std::fs::write(path, buf.text()) {
            eprintln!("Error writing {path}: {e}");
            std::process::exit(1);
        }
    } else {
        print!("{}", buf.text());
    }
}

#[derive(Serialize)]
struct LocateReport {
    name: String,
    attributes: String,
    /// 1-based line of the opening tag.
    first_line: usize,
    /// 1-based line of the closing tag.
    last_line: usize,
}

fn cmd_locate(path: &str, line: usize, column: usize, json: bool) {
    let source = read_source(path);
    let buf = ScratchBuffer::new(&source);

    let line = to_index("line", line, buf.line_count());

    let region = match resolve_normal(&buf, Position::new(line, column.saturating_sub(1))) {
        Ok(region) => region,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let Some(tag) = locate(&region.text, region.search.clone(), &region.strategy) else {
        eprintln!("No tag pair found");
        std::process::exit(1);
    };

    let report = LocateReport {
        name: tag.name.clone(),
        attributes: tag.attributes.trim().to_string(),
        first_line: region.first_line + line_of(&region.text, tag.open.start) + 1,
        last_line: region.first_line + line_of(&region.text, tag.close.end.saturating_sub(1)) + 1,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        println!(
            "<{}> lines {}..{}",
            report.name, report.first_line, report.last_line
        );
        if !report.attributes.is_empty() {
            println!("attributes: {}", report.attributes);
        }
    }
}

/// Region-relative line index of a char offset.
fn line_of(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|&c| c == '\n').count()
}
