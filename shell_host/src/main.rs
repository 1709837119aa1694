//! # PandaGen Shell
//!
//! Main entry point for the shell host.

use cli_console::ShellSettings;
use env_logger::Env;
use log::info;
use shell_host::{HostRuntime, HostRuntimeConfig};
use std::env;
use std::fs;
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pandash");

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    let mut config = HostRuntimeConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                let script_text = fs::read_to_string(&args[i])
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                config.script = Some(script_text);
            }
            "--settings" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --settings".to_string());
                }
                config.settings = ShellSettings::load(&args[i]).map_err(|e| e.to_string())?;
                info!("loaded settings from {}", args[i]);
            }
            "--quiet" | "-q" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage(args.first().map(String::as_str).unwrap_or("pandash"));
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --script <FILE>      Run commands from a script instead of stdin");
    eprintln!("  --settings <FILE>        Load shell settings from a JSON file");
    eprintln!("  -q, --quiet              Do not print the welcome banner");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG                 Log filter (default: warn)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/tour.pgsh", program);
    eprintln!("  {} --settings shell.json --quiet", program);
}
