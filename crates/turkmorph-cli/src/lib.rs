// turkmorph-cli: shared utilities for CLI tools.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use log::{LevelFilter, info};
use turkmorph_tr::{MorphologyOptions, RootLexicon, TurkishMorphology};

/// Lexicon file name looked up in each search directory.
const LEXICON_FILE: &str = "lexicon.txt";

/// Search for a lexicon file and create a TurkishMorphology.
///
/// Search order:
/// 1. `lexicon_path` argument (if provided)
/// 2. `TURKMORPH_LEXICON` environment variable
/// 3. `~/.turkmorph/lexicon.txt`
/// 4. `/usr/share/turkmorph/lexicon.txt`
/// 5. `./lexicon.txt`
///
/// Falls back to the built-in lexicon when none of them exists. An explicit
/// path that does not exist is an error.
pub fn load_morphology(lexicon_path: Option<&str>, options: MorphologyOptions) -> Result<TurkishMorphology, String> {
    if let Some(p) = lexicon_path {
        if !PathBuf::from(p).is_file() {
            return Err(format!("lexicon file not found: {p}"));
        }
    }

    let builder = TurkishMorphology::builder().options(options);
    let builder = match build_search_paths(lexicon_path).into_iter().find(|p| p.is_file()) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
            let lexicon =
                RootLexicon::parse(&text).map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
            info!("Loaded {} lexicon items from {}", lexicon.len(), path.display());
            builder.lexicon(lexicon)
        }
        None => {
            info!("No lexicon file found, using the built-in lexicon");
            builder
        }
    };

    builder
        .build()
        .map_err(|e| format!("failed to create TurkishMorphology: {e}"))
}

/// Build the list of lexicon files to try, in order.
fn build_search_paths(lexicon_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = lexicon_path {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var("TURKMORPH_LEXICON") {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".turkmorph").join(LEXICON_FILE));
    }

    paths.push(PathBuf::from("/usr/share/turkmorph").join(LEXICON_FILE));

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(LEXICON_FILE));
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Remove `--NAME=VALUE`, `--NAME VALUE` or `-S VALUE` from `args`.
///
/// Returns `(value, remaining_args)`. The last occurrence wins.
pub fn parse_option(args: &[String], long: &str, short: &str) -> Result<(Option<String>, Vec<String>), String> {
    let long_flag = format!("--{long}");
    let long_prefix = format!("--{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&long_prefix) {
            value = Some(val.to_string());
        } else if *arg == long_flag || *arg == short {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Parse a `--lexicon=PATH`, `--lexicon PATH` or `-l PATH` argument.
pub fn parse_lexicon_path(args: &[String]) -> (Option<String>, Vec<String>) {
    parse_option(args, "lexicon", "-l").unwrap_or_else(|e| fatal(&e))
}

/// Remove a boolean flag from `args`. Returns whether it was present.
pub fn take_flag(args: &mut Vec<String>, names: &[&str]) -> bool {
    let before = args.len();
    args.retain(|a| !names.contains(&a.as_str()));
    args.len() != before
}

/// Count `-v`/`-vv`/`--verbose` and `-q`/`--quiet` flags and remove them.
///
/// Returns `None` when no flag was given.
pub fn parse_verbosity(args: &mut Vec<String>) -> Option<LevelFilter> {
    let mut level: Option<i32> = None;
    args.retain(|a| {
        let delta = match a.as_str() {
            "-v" | "--verbose" => 1,
            "-vv" => 2,
            "-vvv" => 3,
            "-q" | "--quiet" => -1,
            _ => return true,
        };
        level = Some(level.unwrap_or(0) + delta);
        false
    });
    level.map(|l| match l {
        i32::MIN..=-1 => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    })
}

/// Install the `[LEVEL] message` logger. Without an explicit level, `RUST_LOG`
/// decides and the default is `warn`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::new();
    match level {
        Some(level) => {
            builder.filter_level(level);
        }
        None => {
            builder.filter_level(LevelFilter::Warn).parse_default_env();
        }
    }
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
