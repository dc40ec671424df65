use anyhow::{Context, Result};
use notemark_engine::{generate, normalize, parse};
use std::{env, fs, process};

const USAGE: &str = "\
Usage: notemark <command> [args]

Commands:
  check <file>     parse a note file and report the outcome
  canon <file>     print the canonical rendering of a note file
  same <a> <b>     compare two note files for semantic equality

Exit status: 0 on success (or equal), 1 on parse failure (or different),
2 on usage or I/O errors.";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            2
        }
    };
    process::exit(code);
}

fn run(args: &[String]) -> Result<i32> {
    match args {
        [cmd, path] if cmd == "check" => check(path),
        [cmd, path] if cmd == "canon" => canon(path),
        [cmd, a, b] if cmd == "same" => same(a, b),
        _ => {
            eprintln!("{USAGE}");
            Ok(2)
        }
    }
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {path}"))
}

fn check(path: &str) -> Result<i32> {
    match parse(&read(path)?) {
        Ok(doc) => {
            println!("{path}: ok ({} blocks)", doc.blocks.len());
            Ok(0)
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            Ok(1)
        }
    }
}

fn canon(path: &str) -> Result<i32> {
    match parse(&read(path)?) {
        Ok(doc) => {
            println!("{}", generate(&doc));
            Ok(0)
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            Ok(1)
        }
    }
}

fn same(a: &str, b: &str) -> Result<i32> {
    if normalize(&read(a)?) == normalize(&read(b)?) {
        println!("same");
        Ok(0)
    } else {
        println!("different");
        Ok(1)
    }
}
