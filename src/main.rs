#[macro_use]
extern crate lazy_static;
extern crate unicode_segmentation;

mod error;
mod scanner;
mod token;


use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::process;

use argparse::{ArgumentParser, Print, Store};

use crate::error::*;
use crate::scanner::*;

fn main() {
    let mut script_filename = "".to_string();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Lox lexical analyzer");
        ap.add_option(
            &["--version"],
            Print(env!("CARGO_PKG_VERSION").to_string()),
            "Show version",
        );
        ap.refer(&mut script_filename)
            .add_argument("script_filename", Store,
                          "Lox file to tokenize.  Omit to run an interactive REPL.");
        ap.parse_args_or_exit();
    }

    let mut reporter = ConsoleErrorReporter::new();
    if ! script_filename.is_empty() {
        run_file(&script_filename, &mut reporter);

        if reporter.had_error() {
            process::exit(65);
        }
    }
    else {
        run_repl(&mut reporter);
    }
}

fn run_repl(reporter: &mut ConsoleErrorReporter) {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().expect("run_repl: unable to flush stdout");

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break, // End of input.
            Ok(_) => {
                run(&input, reporter);
                reporter.reset();
            }
            Err(error) => {
                println!("Error reading stdin: {:?}", error);
                break;
            }
        }
    }
}

fn run_file(file_path: &str, reporter: &mut ConsoleErrorReporter) {
    let mut file = File::open(file_path).unwrap_or_else(|_| panic!("source file not found: {}", file_path));
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap_or_else(|_| panic!("unable to read file: {}", file_path));

    run(&contents, reporter);
}

fn run(source: &str, reporter: &mut dyn ErrorReporter) {
    for token in Scanner::new(source, reporter) {
        println!("{}", token);
    }
}
