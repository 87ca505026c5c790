//! `vbs`: run and inspect classic ASP pages from the command line.

use vbsc::commands::{lex_file, parse_file, parse_run_options, run_file};

fn main() {
    vbsc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => match parse_run_options(&args[2..]) {
            Ok(options) if options.file.is_some() => run_file(&options),
            Ok(_) => {
                eprintln!("Usage: vbs run <file> [options]");
                std::process::exit(1);
            }
            Err(message) => {
                eprintln!("error: {message}");
                std::process::exit(1);
            }
        },
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: vbs parse <file>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: vbs lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("vbs {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("vbs - classic ASP page runner");
    println!();
    println!("Usage: vbs <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>        Render a page and print its output");
    println!("  parse <file>      Parse and print the statement tree");
    println!("  lex <file>        Tokenize and print tokens");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!();
    println!("Run options:");
    println!("  --root <dir>        Document root for virtual includes (default: page directory)");
    println!("  --query key=value   Add a Request.QueryString parameter (repeatable)");
    println!("  --explicit          Start the page with Option Explicit on");
    println!("  --headers           Print headers added with Response.AddHeader");
    println!();
    println!("Environment:");
    println!("  RUST_LOG            Log filter, e.g. vbs_eval=debug");
    println!("  VBS_LOG_TREE        Print logs as an indented tree");
    println!();
    println!("Examples:");
    println!("  vbs run site/index.asp --query id=7");
    println!("  vbs parse lib/util.vbs");
}
