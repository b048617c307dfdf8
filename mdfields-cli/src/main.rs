// Command-line interface for mdfields
//
// This binary exposes the derived fields of a Markdown document on the
// command line: rendered HTML, excerpts, the document tree as JSON,
// headings and word-count statistics.
//
// Usage:
//  mdfields <input>                       - Render to HTML (default)
//  mdfields render <input>                - Same as above (explicit)
//  mdfields excerpt <input> [flags]       - Print the excerpt
//  mdfields inspect <input>               - Print the document tree as JSON
//  mdfields stats <input>                 - Print word counts and reading time
//  mdfields headings <input>              - Print the headings as JSON
//
// Excerpt settings come from mdfields.toml (or --config PATH), with the
// excerpt flags overriding the configured values.

use clap::{Arg, ArgAction, Command, ValueHint};
use mdfields::{ExcerptFormat, ExcerptParams, MarkdownDocument, ParseOptions};
use mdfields_config::{Loader, MdfieldsConfig};
use std::fs;

const SUBCOMMANDS: &[&str] = &["render", "excerpt", "inspect", "stats", "headings", "help"];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Path to the Markdown file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("mdfields")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Derived fields for Markdown documents")
        .long_about(
            "mdfields turns a Markdown document into its derived fields.\n\n\
            Commands:\n  \
            - render:   Render the document to an HTML fragment (default)\n  \
            - excerpt:  Extract the leading excerpt\n  \
            - inspect:  Print the document tree as JSON\n  \
            - stats:    Print word counts and the reading-time estimate\n  \
            - headings: Print the document's headings as JSON\n\n\
            Examples:\n  \
            mdfields post.md                          # Render HTML to stdout\n  \
            mdfields excerpt post.md --prune-length 50\n  \
            mdfields excerpt post.md --format html --separator '<!-- end -->'\n  \
            mdfields inspect post.md                  # Document tree as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mdfields.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a Markdown file to an HTML fragment (default command)")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("excerpt")
                .about("Extract the excerpt of a Markdown file")
                .long_about(
                    "Extract the leading excerpt of a Markdown file.\n\n\
                    The excerpt is everything before the separator comment when one\n\
                    is configured and present, otherwise the document pruned down to\n\
                    the excerpt length at a word boundary.\n\n\
                    Examples:\n  \
                    mdfields excerpt post.md                         # 140 chars, plain text\n  \
                    mdfields excerpt post.md --prune-length 50\n  \
                    mdfields excerpt post.md --truncate              # Cut exactly at the limit\n  \
                    mdfields excerpt post.md --format markdown\n  \
                    mdfields excerpt post.md --ast                   # Pruned tree as JSON",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("prune-length")
                        .long("prune-length")
                        .value_name("CHARS")
                        .help("Excerpt length in characters")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("truncate")
                        .long("truncate")
                        .help("Cut exactly at the limit instead of at a word boundary")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format: plain, html or markdown")
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "plain", "html", "markdown",
                        ])),
                )
                .arg(
                    Arg::new("separator")
                        .long("separator")
                        .value_name("MARKER")
                        .help("Separator marking the end of the excerpt in the source")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("ast")
                        .long("ast")
                        .help("Print the pruned excerpt tree as JSON instead of text")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("format"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the document tree as JSON")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("stats")
                .about("Print word counts and the reading-time estimate")
                .arg(input_arg())
                .arg(
                    Arg::new("words-per-minute")
                        .long("words-per-minute")
                        .value_name("WPM")
                        .help("Reading speed used for the time estimate")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("headings")
                .about("Print the document's headings as JSON")
                .arg(input_arg())
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_name("DEPTH")
                        .help("Only report headings at or above this depth")
                        .value_parser(clap::value_parser!(u8)),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "render"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A bare path as the first argument means an implicit "render"
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "render".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_render_command(input, &config);
        }
        Some(("excerpt", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_excerpt_command(input, sub_matches, &config);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_inspect_command(input, &config);
        }
        Some(("stats", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let wpm = sub_matches
                .get_one::<u32>("words-per-minute")
                .copied()
                .unwrap_or(config.reading.words_per_minute);
            handle_stats_command(input, wpm, &config);
        }
        Some(("headings", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let max_depth = sub_matches.get_one::<u8>("max-depth").copied();
            handle_headings_command(input, max_depth, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn parse_input(input: &str, config: &MdfieldsConfig) -> MarkdownDocument {
    parse_input_with(input, ParseOptions::from(config))
}

fn parse_input_with(input: &str, options: ParseOptions) -> MarkdownDocument {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });
    MarkdownDocument::parse_with(&source, &options)
}

fn handle_render_command(input: &str, config: &MdfieldsConfig) {
    let doc = parse_input(input, config);
    let html = doc.html().unwrap_or_else(|e| {
        eprintln!("Render error: {e}");
        std::process::exit(1);
    });
    println!("{html}");
}

fn handle_excerpt_command(input: &str, sub_matches: &clap::ArgMatches, config: &MdfieldsConfig) {
    // Configured values first, flags override.
    let mut options = ParseOptions::from(config);
    if let Some(separator) = sub_matches.get_one::<String>("separator") {
        options.excerpt_separator = Some(separator.clone());
    }

    let mut params = ExcerptParams::from(&config.excerpt);
    if let Some(length) = sub_matches.get_one::<usize>("prune-length") {
        params.prune_length = *length;
    }
    if sub_matches.get_flag("truncate") {
        params.truncate = true;
    }
    if let Some(format) = sub_matches.get_one::<String>("format") {
        params.format = format.parse::<ExcerptFormat>().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
    }

    let doc = parse_input_with(input, options);

    if sub_matches.get_flag("ast") {
        let ast = doc.excerpt_ast(params.prune_length, params.truncate);
        print_json(&ast);
        return;
    }

    let excerpt = doc.excerpt(&params).unwrap_or_else(|e| {
        eprintln!("Excerpt error: {e}");
        std::process::exit(1);
    });
    println!("{excerpt}");
}

fn handle_inspect_command(input: &str, config: &MdfieldsConfig) {
    let doc = parse_input(input, config);
    print_json(doc.html_ast());
}

fn handle_stats_command(input: &str, words_per_minute: u32, config: &MdfieldsConfig) {
    let doc = parse_input(input, config);
    let count = doc.word_count();
    let stats = serde_json::json!({
        "words": count.words,
        "sentences": count.sentences,
        "paragraphs": count.paragraphs,
        "time_to_read": doc.time_to_read(words_per_minute),
    });
    print_json(&stats);
}

fn handle_headings_command(input: &str, max_depth: Option<u8>, config: &MdfieldsConfig) {
    let doc = parse_input(input, config);
    print_json(&doc.headings(max_depth));
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

fn load_cli_config(explicit_path: Option<&str>) -> MdfieldsConfig {
    let loader = Loader::new().with_optional_file("mdfields.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn excerpt_flags_are_recognized() {
        let matches = build_cli()
            .try_get_matches_from([
                "mdfields",
                "excerpt",
                "post.md",
                "--prune-length",
                "50",
                "--truncate",
                "--format",
                "markdown",
            ])
            .expect("arguments to parse");
        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "excerpt");
        assert_eq!(sub.get_one::<usize>("prune-length"), Some(&50));
        assert!(sub.get_flag("truncate"));
        assert_eq!(sub.get_one::<String>("format").map(String::as_str), Some("markdown"));
    }

    #[test]
    fn ast_flag_conflicts_with_format() {
        let result = build_cli().try_get_matches_from([
            "mdfields",
            "excerpt",
            "post.md",
            "--ast",
            "--format",
            "html",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_excerpt_format_is_rejected_by_clap() {
        let result =
            build_cli().try_get_matches_from(["mdfields", "excerpt", "post.md", "--format", "yaml"]);
        assert!(result.is_err());
    }
}
