use std::env;
use toolkit_lexer::config::runtime::{LogLevel, RuntimeConfig};
use toolkit_lexer::file_processor::{self, FileProcessingResult};
use toolkit_lexer::lexical::{LexerError, LexicalAnalyzer};
use toolkit_lexer::tokens::{group_by_line, TokenStream};
use toolkit_lexer::utils::{Position, SourceMap, Span};
use toolkit_lexer::{logging, ClassifiedToken};

#[derive(Debug, Default)]
struct CliOptions {
    lines: bool,
    raw: bool,
    json: bool,
    lenient: bool,
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[2..]);
    let config = runtime_config(&options);

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    let processor = file_processor::create_processor_from_preferences(&config.file_processor);
    let file_result = match processor.process_file(&args[1]) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            std::process::exit(1);
        }
    };

    let mut analyzer = LexicalAnalyzer::with_preferences(config.scanner.clone());

    if options.raw {
        return print_raw(&mut analyzer, &file_result, &options);
    }

    match analyzer.tokenize_file_result(&file_result) {
        Ok(stream) => {
            print_stream(&stream, &options)?;
            report_escape_diagnostics(&stream);
        }
        Err(error) => {
            report_lexer_error(&file_result, &error);
            std::process::exit(1);
        }
    }

    if options.verbose {
        let metrics = analyzer.metrics();
        eprintln!();
        eprintln!("Lexical Summary:");
        eprintln!("  Raw tokens: {}", metrics.raw_tokens);
        eprintln!("  Classified tokens: {}", metrics.total_tokens);
        eprintln!(
            "  Comment regions: {} ({} tokens discarded)",
            metrics.comment_regions, metrics.discarded_comment_tokens
        );
        eprintln!("  Escape diagnostics: {}", metrics.escape_diagnostics);
        eprintln!("  Longest token: {} chars", metrics.max_token_length);
        eprintln!(
            "  Processing time: {:.2}ms",
            file_result.processing_duration.as_secs_f64() * 1000.0
        );
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Toolkit Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes a Toolkit source file");
    println!();
    println!("USAGE:");
    println!("    {} <file> [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help        Show this help message");
    println!("    --lines       Group tokens by source line");
    println!("    --raw         Print scanner output before categorization");
    println!("    --json        Emit tokens as JSON");
    println!("    --lenient     Accept unterminated strings and comments");
    println!("    --verbose     Log debug events and print a lexical summary");
    println!();
    println!("CONFIGURATION:");
    println!("    {}", toolkit_lexer::config::build_info::source_info());
    println!(
        "    Max file size: {} bytes",
        file_processor::get_max_file_size()
    );
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--lines" => options.lines = true,
            "--raw" => options.raw = true,
            "--json" => options.json = true,
            "--lenient" => options.lenient = true,
            "--verbose" => options.verbose = true,
            _ => {
                eprintln!("Warning: Unknown option '{}'", arg);
            }
        }
    }

    options
}

/// Environment defaults, overridden by command-line flags
fn runtime_config(options: &CliOptions) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();

    if options.lenient {
        config.scanner.allow_unterminated = true;
    }
    if options.verbose {
        config.scanner.collect_detailed_metrics = true;
        config.logging.enable_console_logging = true;
        config.logging.min_log_level = LogLevel::Debug;
    }

    config
}

fn print_raw(
    analyzer: &mut LexicalAnalyzer,
    file_result: &FileProcessingResult,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_tokens = match analyzer.scan_raw(&file_result.source) {
        Ok(tokens) => tokens,
        Err(error) => {
            report_lexer_error(file_result, &error);
            std::process::exit(1);
        }
    };

    if options.json {
        if options.lines {
            let groups = group_by_line(raw_tokens.iter());
            println!("{}", serde_json::to_string_pretty(&groups)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&raw_tokens)?);
        }
        return Ok(());
    }

    if options.lines {
        for group in group_by_line(raw_tokens.iter()) {
            println!("line {}:", group.line);
            for token in group.tokens {
                println!("  {}", token);
            }
        }
    } else {
        for token in &raw_tokens {
            println!("{}", token);
        }
    }

    Ok(())
}

fn print_stream(
    stream: &TokenStream,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if options.json {
        if options.lines {
            println!("{}", serde_json::to_string_pretty(&stream.lines())?);
        } else {
            println!("{}", serde_json::to_string_pretty(stream.tokens())?);
        }
        return Ok(());
    }

    if options.lines {
        for group in stream.lines() {
            println!("line {}:", group.line);
            for token in group.tokens {
                println!("  {}", describe(token));
            }
        }
    } else {
        for token in stream {
            println!("{}", describe(token));
        }
    }

    Ok(())
}

fn describe(token: &ClassifiedToken) -> String {
    match &token.value {
        Some(value) => format!("{} => {:?}", token, value),
        None => token.to_string(),
    }
}

/// Escape problems do not stop tokenization; they are printed after the tokens
fn report_escape_diagnostics(stream: &TokenStream) {
    for warning in stream.format_diagnostics() {
        eprintln!("{}", warning.trim_end());
    }
}

fn report_lexer_error(file_result: &FileProcessingResult, error: &LexerError) {
    match error.position() {
        Some((line, column)) => {
            let source_map = SourceMap::new(file_result.source.clone());
            let span = Span::point(Position::new(0, line, column));
            eprint!("{}", source_map.format_error(&span, &error.to_string()));
        }
        None => eprintln!("error: {}", error),
    }
    eprintln!(
        "  = code {} in {}",
        error.error_code(),
        file_result.metadata.path.display()
    );
}
