use clap::Parser;
use log::error;

use codesift::{Parameters, Searcher, TokenKind};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Source file to search in
    #[arg(short, long)]
    file: std::path::PathBuf,

    /// JSON file with search parameters (missing fields keep defaults)
    #[arg(short, long)]
    options: Option<std::path::PathBuf>,

    /// Dump the processed token stream instead of searching
    #[arg(long)]
    tokens: bool,

    /// Snippet to search for
    #[arg(default_value = "")]
    needle: String,
}

fn main() {
    simple_logger::init_with_level(log::Level::Warn).unwrap();
    let args = Cli::parse();

    let parameters = match &args.options {
        Some(path) => match std::fs::read_to_string(path).map_err(|e| e.to_string()) {
            Ok(text) => match serde_json::from_str::<Parameters>(&text) {
                Ok(parameters) => parameters,
                Err(e) => {
                    error!("Could not parse options file '{}': {e}", path.to_string_lossy());
                    std::process::exit(-1);
                }
            },
            Err(e) => {
                error!("Could not read options file '{}': {e}", path.to_string_lossy());
                std::process::exit(-1);
            }
        },
        None => Parameters::default(),
    };

    let content = match std::fs::read_to_string(&args.file) {
        Ok(content) => content,
        Err(e) => {
            error!("Could not read file '{}': {e}", args.file.to_string_lossy());
            std::process::exit(-1);
        }
    };

    let mut searcher = Searcher::with_parameters(parameters);
    searcher.load(content.lines());

    if args.tokens {
        for token in searcher.tokens() {
            let kind = match token.kind {
                TokenKind::Code => "code",
                TokenKind::String => "string",
                TokenKind::Comment => "comment",
                TokenKind::Identifier => "identifier",
                TokenKind::Numeric => "numeric",
            };
            println!(
                "{}:{} {kind} {:?}",
                token.location.row, token.location.column, token.value
            );
        }
        return;
    }

    let lines: Vec<&str> = content.lines().collect();
    let count = searcher.find(&args.needle, |_, _, begin, end| {
        print!("{}:{}-{}:{}", begin.row, begin.column, end.row, end.column);
        if let Some(line) = lines.get(begin.row as usize) {
            println!("  {}", line.trim_end());
        } else {
            println!();
        }
        true
    });

    println!("{count} match(es)");
}
