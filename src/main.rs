use std::{fs, path::PathBuf, process::exit, time::Instant};

use clap::Parser as ClapParser;
use log::{error, info, LevelFilter};
use minic::{
    display_diagnostic, display_error, lexer::lexer::tokenize, parser::parser::parse,
    scope::analyzer::analyze, tac::generator::generate, type_checker::type_checker::type_check,
};

/// Checks a minic program and lowers it to three-address code.
#[derive(ClapParser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The input source file
    #[arg()]
    input_file: PathBuf,

    /// Write the TAC to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the token stream and stop
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed AST and stop
    #[arg(long)]
    dump_ast: bool,

    /// Stop after scope analysis
    #[arg(long)]
    scope_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if !run(&cli) {
        exit(1);
    }
}

fn run(cli: &Cli) -> bool {
    let file_name = cli
        .input_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input_file.display().to_string());

    let source = match fs::read_to_string(&cli.input_file) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", cli.input_file.display(), err);
            return false;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(err) => {
            display_error(&err, &source, &file_name);
            return false;
        }
    };
    info!("Tokenized in {:?}", start.elapsed());

    if cli.dump_tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
        return true;
    }

    let parse_start = Instant::now();
    let program = match parse(tokens) {
        Ok(program) => program,
        Err(err) => {
            display_error(&err, &source, &file_name);
            return false;
        }
    };
    info!("Parsed in {:?}", parse_start.elapsed());

    if cli.dump_ast {
        println!("{:#?}", program);
        return true;
    }

    let scope_start = Instant::now();
    let (scopes, scope_errors) = analyze(&program);
    info!(
        "Scope analysis finished in {:?} ({} frames)",
        scope_start.elapsed(),
        scopes.len()
    );

    if !scope_errors.is_empty() {
        for err in &scope_errors {
            let message = format!("{} '{}'", err.kind, err.name);
            display_diagnostic("Scope", &message, err.position, &source, &file_name);
        }
        return false;
    }

    if cli.scope_only {
        return true;
    }

    let type_check_start = Instant::now();
    let type_errors = type_check(&program);
    info!("Type checked in {:?}", type_check_start.elapsed());

    if !type_errors.is_empty() {
        for err in &type_errors {
            let message = format!("{}: {}", err.kind, err.message);
            display_diagnostic("Type", &message, err.position, &source, &file_name);
        }
        return false;
    }

    let generate_start = Instant::now();
    let tac = generate(&program);
    info!("Generated {} instructions in {:?}", tac.len(), generate_start.elapsed());

    match &cli.output {
        Some(path) => {
            if let Err(err) = fs::write(path, tac.to_string()) {
                error!("failed to write {}: {}", path.display(), err);
                return false;
            }
        }
        None => print!("{}", tac),
    }

    info!("Total time: {:?}", start.elapsed());
    true
}
