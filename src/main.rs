// llstep: step-through LL(1) syntax analyzer

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use llstep::demos::{DEMOS, demo};
use llstep::parser::lexer::{Lexer, LexerOptions};
use llstep::parser::parser::{Parser, ParserOptions};
use llstep::ui::App;

#[derive(ClapParser, Debug)]
#[command(name = "llstep", version, about = "Table-driven LL(1) syntax analyzer")]
struct Cli {
    /// Program to analyze
    file: Option<PathBuf>,

    /// Load canned example N (1-based) instead of a file
    #[arg(short, long, value_name = "N", conflicts_with = "file")]
    example: Option<usize>,

    /// Print the trace and verdict instead of starting the viewer
    #[arg(long)]
    plain: bool,

    /// Print the token stream and exit
    #[arg(long, conflicts_with = "plain")]
    tokens: bool,

    /// Reject identifiers written directly against an operator
    #[arg(long)]
    strict_spacing: bool,

    /// Lex a bare '/' as division instead of a line comment
    #[arg(long)]
    division: bool,

    /// List the canned examples and exit
    #[arg(long)]
    list_examples: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_examples {
        for (i, d) in DEMOS.iter().enumerate() {
            println!("{}. {}", i + 1, d.title);
        }
        return Ok(());
    }

    let options = ParserOptions {
        lexer: LexerOptions {
            division_operator: cli.division,
        },
        strict_spacing: cli.strict_spacing,
    };

    let (source, title, demo_index) = match (&cli.file, cli.example) {
        (Some(path), _) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (source, path.display().to_string(), None)
        }
        (None, Some(n)) => {
            let Some(d) = demo(n) else {
                bail!("no example {} (there are {})", n, DEMOS.len());
            };
            (d.source.to_string(), d.title.to_string(), Some(n - 1))
        }
        (None, None) if cli.plain || cli.tokens => {
            bail!("nothing to analyze: pass a FILE or --example N")
        }
        (None, None) => (DEMOS[0].source.to_string(), DEMOS[0].title.to_string(), Some(0)),
    };

    if cli.tokens {
        for token in Lexer::new(&source).with_options(options.lexer).tokenize() {
            println!("{}:{} {}", token.line, token.column, token);
        }
        return Ok(());
    }

    if cli.plain {
        let outcome = Parser::with_options(options).parse(&source);
        for (i, line) in outcome.trace_lines().iter().enumerate() {
            println!("{:4}  {}", i + 1, line);
        }
        match outcome.error_message() {
            None => println!("Accepted"),
            Some(message) => {
                println!("Rejected: {}", message);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let mut app = match demo_index {
        Some(index) => App::with_demo(index, options),
        None => App::new(source, title, options),
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer terminated with an I/O error")
}
