use std::env;
use std::fs;
use std::time::Instant;

use quicked::{align, Algorithm, AlignmentConfig};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("align_benchmark: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let pairs = match read_pairs(&options.input) {
        Ok(pairs) => pairs,
        Err(err) => {
            eprintln!("align_benchmark: {err}");
            std::process::exit(1);
        }
    };

    eprintln!(
        "algorithm={} sweep={} pairs={}",
        options.config.algorithm(),
        if options.config.force_scalar() { "scalar" } else { "lanes" },
        pairs.len()
    );

    let mut sys = System::new();
    let before = rss_kib(&mut sys);
    let start = Instant::now();
    let mut failures = 0usize;

    for (idx, (pattern, text)) in pairs.iter().enumerate() {
        match align(pattern, text, &options.config) {
            Ok(result) => {
                println!("Score: {}", result.score());
                if options.print_cigar {
                    if let Some(cigar) = result.cigar_string() {
                        println!("CIGAR: {cigar}");
                    }
                }
            }
            Err(err) => {
                failures += 1;
                println!("Error in pair {}: {err}", idx + 1);
            }
        }
    }

    let elapsed = start.elapsed();
    let after = rss_kib(&mut sys);
    println!("Execution time: {:.2} seconds", elapsed.as_secs_f64());
    eprintln!(
        "rss_delta_kib={} failures={}",
        after.saturating_sub(before),
        failures
    );
}

struct Options {
    input: String,
    config: AlignmentConfig,
    print_cigar: bool,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut input = None;
        let mut config = AlignmentConfig::default();
        let mut print_cigar = false;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String, String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {name}")),
                }
            };

            match flag.as_str() {
                "--help" | "-h" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--algorithm" => {
                    let algorithm: Algorithm =
                        value("--algorithm")?.parse().map_err(|e| format!("{e}"))?;
                    config.set_algorithm(algorithm).map_err(|e| e.to_string())?;
                }
                "--bandwidth" => {
                    let bw = parse_count(&value("--bandwidth")?, "bandwidth")?;
                    config.set_bandwidth(bw).map_err(|e| e.to_string())?;
                }
                "--window-size" => {
                    let ws = parse_count(&value("--window-size")?, "window size")?;
                    config.set_window_size(ws).map_err(|e| e.to_string())?;
                }
                "--overlap-size" => {
                    let os = parse_count(&value("--overlap-size")?, "overlap size")?;
                    config.set_overlap_size(os).map_err(|e| e.to_string())?;
                }
                "--only-score" => {
                    config.set_only_score(true).map_err(|e| e.to_string())?;
                }
                "--force-scalar" => {
                    config.set_force_scalar(true).map_err(|e| e.to_string())?;
                }
                "--cigar" => print_cigar = true,
                other if other.starts_with('-') => {
                    return Err(format!("unrecognized argument '{other}'"));
                }
                _ if input.is_none() => input = Some(arg),
                _ => return Err(format!("unexpected extra input '{arg}'")),
            }
        }

        config.validate().map_err(|e| e.to_string())?;
        let input = input.ok_or_else(|| "missing <input_file>".to_string())?;
        Ok(Self {
            input,
            config,
            print_cigar,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --release --bin align_benchmark -- [options] <input_file>

The input holds sequence pairs on consecutive lines; the first character of
each line (e.g. '>' or '<') is dropped.

Options:
  --algorithm <quicked|windowed|banded|hirschberg>   Strategy (default: quicked)
  --bandwidth <N>        Band half-width (default: 15)
  --window-size <N>      Window size for windowed (default: 128)
  --overlap-size <N>     Window overlap for windowed (default: 32)
  --only-score           Skip traceback
  --force-scalar         Disable the vector-lane sweep
  --cigar                Print the CIGAR of every pair
  -h, --help             Print this help message
"
        );
    }
}

fn parse_count(value: &str, what: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a positive integer"))
}

fn read_pairs(path: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() % 2 != 0 {
        return Err("input file must contain an even number of lines".to_string());
    }
    Ok(lines
        .chunks_exact(2)
        .map(|pair| (strip_marker(pair[0]), strip_marker(pair[1])))
        .collect())
}

fn strip_marker(line: &str) -> Vec<u8> {
    let mut chars = line.chars();
    chars.next();
    chars.as_str().trim().as_bytes().to_vec()
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}
