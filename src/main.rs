use std::env;
use std::fs;
use std::path::Path;
use std::process;

use chordsheet::{parse, transpose, SongFormat};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut steps: i32 = 0;
    let mut format_tag: Option<String> = None;
    let mut emit_json = false;
    let mut emit_source = false;
    let mut paths: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--transpose" => {
                i += 1;
                let value = match args.get(i) {
                    Some(value) => value,
                    None => usage("--transpose requires a semitone count"),
                };
                steps = match value.parse() {
                    Ok(steps) => steps,
                    Err(_) => usage("--transpose requires an integer semitone count"),
                };
            }
            "--format" => {
                i += 1;
                match args.get(i) {
                    Some(value) => format_tag = Some(value.clone()),
                    None => usage("--format requires 'chordpro' or 'plaintext'"),
                }
            }
            "--json" => emit_json = true,
            "--source" => emit_source = true,
            flag if flag.starts_with("--") => {
                usage(&format!("Unknown flag '{}'", flag));
            }
            _ => paths.push(args[i].clone()),
        }
        i += 1;
    }

    if paths.is_empty() || paths.len() > 2 {
        usage("Expected <input> and optional [output]");
    }
    let input_path = &paths[0];
    let output_path = paths.get(1);

    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let format = match &format_tag {
        Some(tag) => match SongFormat::from_str(tag) {
            Some(format) => format,
            None => {
                eprintln!("Unknown song format '{}' (expected 'chordpro' or 'plaintext')", tag);
                process::exit(1);
            }
        },
        None => match infer_format(input_path) {
            Some(format) => format,
            None => {
                eprintln!(
                    "Cannot infer format of '{}'; pass --format chordpro|plaintext",
                    input_path
                );
                process::exit(1);
            }
        },
    };

    let moved = transpose(&source, format, steps);

    let output = if emit_source {
        moved
    } else {
        let mut sheet = parse(&moved, format);
        if sheet.metadata.title.is_empty() {
            sheet.metadata.title = title_from_path(input_path);
        }
        if emit_json {
            match serde_json::to_string_pretty(&sheet) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error serializing sheet: {}", e);
                    process::exit(1);
                }
            }
        } else {
            chordsheet::html::render(&sheet)
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote {}", path);
        }
        None => {
            println!("{}", output);
        }
    }
}

fn usage(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Usage: chordsheet [--transpose N] [--format chordpro|plaintext] [--json | --source] <input> [output]");
    process::exit(1);
}

/// Infer the dialect from the file extension, the way the song library lays
/// out its directories: .chordpro/.cho files are chordpro, .txt is plaintext.
fn infer_format(path: &str) -> Option<SongFormat> {
    let extension = Path::new(path).extension()?.to_str()?;
    match extension {
        "chordpro" | "cho" => Some(SongFormat::ChordPro),
        "txt" => Some(SongFormat::Plaintext),
        _ => None,
    }
}

/// Fallback title from the file stem, underscores read as spaces.
fn title_from_path(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.replace('_', " "))
        .unwrap_or_default()
}
