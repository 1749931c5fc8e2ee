// SPL: Structured Pizza Language interpreter

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use crossterm::style::{Color, Stylize};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spl::interpreter::engine;
use spl::parser::{Grammar, GrammarVersion, InterpError};
use spl::printer::theme::{Theme, DEFAULT_THEME};
use spl::printer::{rule, LineKind, Settings, WELCOME};
use spl::session::ProgramState;

/// Character used for the rule printed after each output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RuleStyle {
    Dash,
    Slash,
    Tilde,
}

impl RuleStyle {
    fn char(self) -> char {
        match self {
            RuleStyle::Dash => '-',
            RuleStyle::Slash => '/',
            RuleStyle::Tilde => '~',
        }
    }
}

/// Grammar version to parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Version {
    #[value(name = "1")]
    Spl1,
    #[value(name = "1.1")]
    Spl1Dot1,
    #[value(name = "2")]
    Spl2,
}

impl From<Version> for GrammarVersion {
    fn from(version: Version) -> Self {
        match version {
            Version::Spl1 => GrammarVersion::Spl1,
            Version::Spl1Dot1 => GrammarVersion::Spl1Dot1,
            Version::Spl2 => GrammarVersion::Spl2,
        }
    }
}

/// Run SPL scripts, then read statements interactively.
#[derive(Parser, Debug)]
#[command(name = "spl", version, about = "Structured Pizza Language interpreter")]
struct Cli {
    /// Scripts to run in order before the prompt
    scripts: Vec<PathBuf>,

    /// Always list crust, sauce and cheese, even at their defaults
    #[arg(long)]
    detail: bool,

    #[arg(long, value_enum, default_value_t = RuleStyle::Dash)]
    rule: RuleStyle,

    #[arg(long, value_enum, default_value_t = Version::Spl2)]
    grammar: Version,

    /// Use `>> ` as the prompt
    #[arg(long)]
    double_arrow: bool,

    /// Exit after running the scripts
    #[arg(long)]
    no_repl: bool,

    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings {
            detail: self.detail,
            rule_char: self.rule.char(),
            ..Settings::default()
        };
        if self.double_arrow {
            settings.prompt = ">> ".to_string();
        }
        settings
    }
}

struct Shell {
    state: ProgramState,
    grammar: Grammar,
    theme: Theme,
    color: bool,
}

impl Shell {
    fn new(settings: Settings, version: GrammarVersion, color: bool) -> Self {
        info!(%version, "selected grammar");
        Self {
            state: ProgramState::new(settings),
            grammar: version.grammar(),
            theme: DEFAULT_THEME,
            color,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn say(&self, text: &str, color: Color) -> io::Result<()> {
        writeln!(io::stdout(), "{}", self.paint(text, color))
    }

    fn run_file(&mut self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return self.say(
                &format!("File \"{}\" does not exist.", path.display()),
                self.theme.notice,
            );
        }

        info!(path = %path.display(), "running script");
        let source = fs::read_to_string(path)?;
        self.run_source(&source)
    }

    fn run_source(&mut self, source: &str) -> io::Result<()> {
        match engine::run_source(source, &self.grammar, &mut self.state) {
            Ok(status) => debug!(status, "execution finished"),
            Err(err) => self.report(&err)?,
        }
        self.flush()
    }

    fn report(&self, err: &InterpError) -> io::Result<()> {
        if err.is_internal() {
            self.say(
                &format!("Interpreter bug, please report it: {err}"),
                self.theme.internal_error,
            )
        } else {
            self.say(&err.to_string(), self.theme.interp_error)
        }
    }

    /// Write captured console lines to stdout.
    fn flush(&mut self) -> io::Result<()> {
        let divider = rule(self.state.settings.rule_char);
        let lines = self.state.console.drain();
        let mut out = io::stdout().lock();
        for line in lines {
            let color = if line.kind == LineKind::Output && line.text == divider {
                self.theme.rule
            } else {
                self.theme.line_color(line.kind)
            };
            writeln!(out, "{}", self.paint(&line.text, color))?;
        }
        out.flush()
    }

    fn prompt(&self) -> io::Result<()> {
        let settings = &self.state.settings;
        let mut out = io::stdout().lock();
        writeln!(out, "{}", self.paint(&rule(settings.repl_rule_char), self.theme.rule))?;
        write!(out, "{}", self.paint(&settings.prompt, self.theme.prompt))?;
        out.flush()
    }

    fn repl(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        while self.state.running {
            self.prompt()?;
            let Some(source) = read_statement(&mut lines)? else {
                break;
            };
            if source.trim().is_empty() {
                continue;
            }
            self.run_source(&source)?;
        }
        Ok(())
    }
}

/// Collect lines until one ends a statement or is blank. `None` at EOF.
fn read_statement<I>(lines: &mut I) -> io::Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut source = String::new();
    for line in lines {
        let line = line?;
        let done = line.trim().is_empty() || line.trim_end().ends_with(';');
        source.push_str(&line);
        source.push('\n');
        if done {
            return Ok(Some(source));
        }
    }
    Ok((!source.is_empty()).then_some(source))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spl=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut shell = Shell::new(cli.settings(), cli.grammar.into(), !cli.no_color);

    shell.say(WELCOME, shell.theme.banner)?;

    for path in &cli.scripts {
        if !shell.state.running {
            break;
        }
        shell.run_file(path)?;
    }

    if !cli.no_repl && shell.state.running {
        shell.repl()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(text: &str) -> Vec<io::Result<String>> {
        text.lines().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn test_read_statement_joins_lines() {
        let mut lines = feed("ADD PIZZA\n[{HAM}];\nQUIT;").into_iter();
        assert_eq!(
            read_statement(&mut lines).unwrap().as_deref(),
            Some("ADD PIZZA\n[{HAM}];\n")
        );
        assert_eq!(
            read_statement(&mut lines).unwrap().as_deref(),
            Some("QUIT;\n")
        );
        assert_eq!(read_statement(&mut lines).unwrap(), None);
    }

    #[test]
    fn test_read_statement_stops_at_blank_line() {
        let mut lines = feed("VIEW PIZZA\n\nQUIT;").into_iter();
        assert_eq!(
            read_statement(&mut lines).unwrap().as_deref(),
            Some("VIEW PIZZA\n\n")
        );
    }

    #[test]
    fn test_settings_from_flags() {
        let cli = Cli::parse_from(["spl", "--rule", "tilde", "--double-arrow", "--detail"]);
        let settings = cli.settings();
        assert_eq!(settings.rule_char, '~');
        assert_eq!(settings.prompt, ">> ");
        assert!(settings.detail);
        assert_eq!(GrammarVersion::from(cli.grammar), GrammarVersion::Spl2);
    }

    #[test]
    fn test_grammar_flag() {
        let cli = Cli::parse_from(["spl", "--grammar", "1.1"]);
        assert_eq!(GrammarVersion::from(cli.grammar), GrammarVersion::Spl1Dot1);
        assert!(Cli::try_parse_from(["spl", "--grammar", "3"]).is_err());
    }
}
