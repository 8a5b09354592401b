//! jumpmark - label jump targets in a file and pick one
//!
//! Shows the file with every word start labelled, dims the rest, and
//! prints the position of the label typed.

use std::env;
use std::path::PathBuf;
use std::process;

use crossterm::event::KeyCode;

use jumpmark::display::OverlayId;
use jumpmark::targets::{self, TargetFinder, WORD_START};
use jumpmark::terminal::Terminal;
use jumpmark::{
    logging, Buffer, Error, OverlayManager, PlaceholderTarget, Result, StyleConfig,
    TerminalViewport,
};

/// Parsed command line
struct Options {
    file: PathBuf,
    config: Option<PathBuf>,
    pattern: String,
}

fn main() {
    match run() {
        Ok(Some(target)) => println!("{}:{}", target.line + 1, target.character + 1),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<Option<PlaceholderTarget>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(None);
    };

    let log_file = logging::init()?;
    tracing::info!(log_file = %log_file.display(), file = %options.file.display(), "starting");

    let config = match &options.config {
        Some(path) => StyleConfig::load_from(path)?,
        None => StyleConfig::load()?,
    };
    let buffer = Buffer::from_file(&options.file)?;
    let finder = TargetFinder::new(&options.pattern)
        .ok_or_else(|| Error::Message(format!("invalid pattern: {}", options.pattern)))?;
    let targets = finder.find(&buffer, &config.placeholder.characters);
    tracing::debug!(targets = targets.len(), "found jump targets");

    let mut viewport = TerminalViewport::new(buffer);
    let mut manager: OverlayManager<OverlayId> = OverlayManager::new();
    manager.refresh_config(config);

    let mut terminal = Terminal::new()?;
    let chosen = pick_target(&mut terminal, &mut viewport, &mut manager, &targets);

    manager.remove_decorations(&mut viewport);
    manager.remove_highlights(&mut viewport);
    manager.undim_editor(&mut viewport);
    drop(terminal);

    chosen
}

/// Show the labels and wait for one to be typed
fn pick_target(
    terminal: &mut Terminal,
    viewport: &mut TerminalViewport,
    manager: &mut OverlayManager<OverlayId>,
    targets: &[PlaceholderTarget],
) -> Result<Option<PlaceholderTarget>> {
    manager.dim_editor(viewport, None);
    manager.add_decorations(viewport, targets)?;
    viewport.set_message(format!(
        "{} targets - type a label, Esc to cancel",
        targets.len()
    ));
    viewport.render(terminal)?;

    let target = loop {
        let key = terminal.read_key()?;
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Char(ch) => {
                let found = manager
                    .config()
                    .and_then(|config| targets::target_for_key(targets, ch, config));
                if let Some(target) = found {
                    break target;
                }
            }
            _ => {}
        }
    };

    manager.remove_decorations(viewport);
    manager.add_highlights(viewport, &[target], 1)?;
    viewport.set_message(format!(
        "jump to {}:{} - press any key",
        target.line + 1,
        target.character + 1
    ));
    viewport.render(terminal)?;
    terminal.read_key()?;

    Ok(Some(target))
}

/// Parse arguments; `None` means help or version was printed
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut file = None;
    let mut config = None;
    let mut pattern = WORD_START.to_string();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| Error::Message("--config needs a path".to_string()))?;
                config = Some(PathBuf::from(path));
            }
            "--pattern" | "-p" => {
                pattern = iter
                    .next()
                    .ok_or_else(|| Error::Message("--pattern needs a regex".to_string()))?
                    .clone();
            }
            other if other.starts_with('-') => {
                return Err(Error::Message(format!("unknown option: {}", other)));
            }
            other => file = Some(PathBuf::from(other)),
        }
    }

    let file = file.ok_or_else(|| Error::Message("no file given (try --help)".to_string()))?;
    Ok(Some(Options {
        file,
        config,
        pattern,
    }))
}

fn print_usage() {
    println!("jumpmark {} - label jump targets in a file", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: jumpmark [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -c, --config PATH    Style config (default ~/.jumpmark.toml)");
    println!("  -p, --pattern REGEX  Target pattern (default: word starts)");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Type a label to print its line:column, Esc to cancel.");
    println!("Logs: JUMPMARK_LOG=debug, written to JUMPMARK_LOG_FILE or the temp dir.");
}

fn print_version() {
    println!("jumpmark {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_file_and_options() {
        let options = parse_args(&args(&["-c", "style.toml", "--pattern", "[A-Z]", "main.rs"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.file, PathBuf::from("main.rs"));
        assert_eq!(options.config, Some(PathBuf::from("style.toml")));
        assert_eq!(options.pattern, "[A-Z]");
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(&args(&["notes.txt"])).unwrap().unwrap();
        assert_eq!(options.pattern, WORD_START);
        assert!(options.config.is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["--bogus", "f"])).is_err());
    }
}
