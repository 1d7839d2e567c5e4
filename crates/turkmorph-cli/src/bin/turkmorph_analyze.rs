// turkmorph-analyze: Morphological analysis of Turkish words.
//
// Reads words from stdin (one per line) and prints every analysis of each
// word on its own `word: analysis` line, or `word: (none)`.
//
// Usage:
//   turkmorph-analyze [-l LEXICON] [--format NAME] [--json] [--ascii] [--no-guess] [-v|-q] [WORD...]
//
// Options:
//   -l, --lexicon PATH     Lexicon file
//   -f, --format NAME      Output format (default: default)
//   --json                 One JSON object per word
//   --ascii                Match ignoring Turkish diacritics
//   --no-guess             No proper noun or numeral guesses
//   -v, -q                 More or less logging
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use turkmorph_fst::{AnalysisFormat, SingleAnalysis, WordAnalysis};
use turkmorph_tr::{MorphologyOptions, TurkishMorphology};

fn print_help() {
    println!("turkmorph-analyze: Morphological analysis of Turkish words.");
    println!();
    println!("Usage: turkmorph-analyze [-l LEXICON] [--format NAME] [--json] [--ascii] [--no-guess] [-v|-q] [WORD...]");
    println!();
    println!("If WORD arguments are given, analyzes each word.");
    println!("Otherwise reads words from stdin (one per line).");
    println!();
    println!("Options:");
    println!("  -l, --lexicon PATH   Lexicon file (default: search, then built-in)");
    println!("  -f, --format NAME    Output format:");
    for format in AnalysisFormat::ALL {
        println!("                         {}", format.name());
    }
    println!("  --json               Print one JSON object per word");
    println!("  --ascii              Match ignoring Turkish diacritics");
    println!("  --no-guess           Do not guess proper nouns (Ahmet'e) or numerals (3'te)");
    println!("  -v, -q               Raise or lower log verbosity");
    println!("  -h, --help           Print this help");
}

fn write_text(out: &mut impl Write, result: &WordAnalysis, format: AnalysisFormat) -> io::Result<()> {
    if result.is_empty() {
        return writeln!(out, "{}: (none)", result.input);
    }
    for analysis in result.iter() {
        writeln!(out, "{}: {}", result.input, analysis.format(format))?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, result: &WordAnalysis) -> io::Result<()> {
    let value = serde_json::json!({
        "input": result.input,
        "normalized": result.normalized,
        "analyses": result.iter().map(SingleAnalysis::view).collect::<Vec<_>>(),
    });
    writeln!(out, "{value}")
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if turkmorph_cli::wants_help(&args) {
        print_help();
        return;
    }

    let (lexicon_path, args) = turkmorph_cli::parse_lexicon_path(&args);
    let (format_name, mut args) =
        turkmorph_cli::parse_option(&args, "format", "-f").unwrap_or_else(|e| turkmorph_cli::fatal(&e));
    let json = turkmorph_cli::take_flag(&mut args, &["--json"]);
    let ascii = turkmorph_cli::take_flag(&mut args, &["--ascii"]);
    let no_guess = turkmorph_cli::take_flag(&mut args, &["--no-guess"]);
    turkmorph_cli::init_logger(turkmorph_cli::parse_verbosity(&mut args));

    let format = match format_name.as_deref() {
        None => AnalysisFormat::Default,
        Some(name) => AnalysisFormat::from_name(name)
            .unwrap_or_else(|| turkmorph_cli::fatal(&format!("unknown format: {name}"))),
    };

    if let Some(unknown) = args.iter().find(|a| a.starts_with('-')) {
        turkmorph_cli::fatal(&format!("unknown option: {unknown}"));
    }

    let options = MorphologyOptions {
        ascii_tolerant: ascii,
        guess_unidentified: !no_guess,
        ..MorphologyOptions::default()
    };
    let morphology = turkmorph_cli::load_morphology(lexicon_path.as_deref(), options)
        .unwrap_or_else(|e| turkmorph_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let analyze_word = |word: &str, morphology: &TurkishMorphology, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        let result = morphology.analyze(word);
        let written = if json {
            write_json(out, &result)
        } else {
            write_text(out, &result, format)
        };
        if let Err(e) = written {
            turkmorph_cli::fatal(&format!("failed to write output: {e}"));
        }
    };

    if args.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            analyze_word(word, &morphology, &mut out);
        }
    } else {
        for word in &args {
            analyze_word(word, &morphology, &mut out);
        }
    }

    if let Err(e) = out.flush() {
        turkmorph_cli::fatal(&format!("failed to write output: {e}"));
    }
}
