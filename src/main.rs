use exprc::CompileError;
use exprc::codegen;
use exprc::lexer::{self, tokenize};
use exprc::parser::Parser;

use anyhow::Context;
use ariadne::Source;
use clap::Parser as ClapParser;
use yansi::Paint;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(
    name = "exprc",
    about = "Compiles the expression language to C++",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Where to write the C++ program (defaults to INPUT with a .cpp extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the C++ program instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Print the syntax tree after parsing
    #[arg(long)]
    dump_ast: bool,

    /// Print what had been generated when semantic analysis fails
    #[arg(long)]
    dump_partial: bool,

    /// Only print diagnostics
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let file = cli.input.display().to_string();
    let bytes = fs::read(&cli.input).with_context(|| format!("could not read `{}`", file))?;

    let compiled = lexer::decode(&bytes)
        .map_err(CompileError::from)
        .and_then(|source| compile(cli, source));
    let program = match compiled {
        Ok(program) => program,
        Err(error) => {
            report(cli, &file, &lexer::printable(&bytes), &error)?;
            return Ok(ExitCode::from(error.exit_code()));
        }
    };

    if cli.stdout {
        print!("{}", program);
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| cli.input.with_extension("cpp"));
        fs::write(&output, program)
            .with_context(|| format!("could not write `{}`", output.display()))?;
        progress(cli, &format!("wrote {}", output.display()));
    }

    Ok(ExitCode::SUCCESS)
}

fn compile(cli: &Cli, source: &str) -> Result<String, CompileError> {
    let tokens = tokenize(source)?;
    progress(cli, &format!("lexical analysis ok ({} tokens)", tokens.len()));

    let ast = Parser::new(&tokens).parse_program()?;
    let functions = ast
        .root()
        .map(|root| ast.children(root).len())
        .unwrap_or_default();
    progress(cli, &format!("syntax analysis ok ({} functions)", functions));

    if cli.dump_ast {
        eprint!("{}", ast.render());
    }

    let program = codegen::compile(&ast)?;
    progress(cli, "compiled successfully");

    Ok(program)
}

fn progress(cli: &Cli, message: &str) {
    if !cli.quiet {
        eprintln!("{}", message.green());
    }
}

fn report(cli: &Cli, file: &str, source: &str, error: &CompileError) -> anyhow::Result<()> {
    if !cli.quiet {
        eprintln!("{}", format!("{} failed", error.stage()).red().bold());
    }

    let source = Source::from(source.to_string());
    for report in error.reports(file) {
        report
            .eprint((file.to_string(), source.clone()))
            .context("could not print diagnostics")?;
    }

    if cli.dump_partial {
        if let CompileError::Semantic(failure) = error {
            eprintln!("{}", "partial output:".yellow().bold());
            eprint!("{}", failure.partial);
        }
    }

    Ok(())
}
