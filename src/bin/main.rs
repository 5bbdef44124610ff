//! jheadgen CLI - generate JNI native-method headers from Java sources

use clap::{Parser, Subcommand};
use jheadgen::signature::MethodDescriptor;
use jheadgen::{mangle, Builder, Flavor};
use std::path::PathBuf;
use std::process;

/// Generate JNI native-method headers and Rust stubs from Java sources
#[derive(Parser, Debug)]
#[command(name = "jheadgen")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate headers from .java source files
    Java {
        /// Path(s) to .java source file(s)
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Write concatenated output to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write one file per class into DIR
        #[arg(short = 'd', long, value_name = "DIR", conflicts_with = "output")]
        output_dir: Option<PathBuf>,

        /// Emit Rust stub skeletons instead of a C header
        #[arg(long)]
        rust: bool,
    },

    /// Print the export symbol for a single native method
    Symbol {
        /// Class binary name, e.g. com.example.GetEnv
        #[arg(value_name = "CLASS")]
        class: String,

        /// Method name, e.g. nativeCall
        #[arg(value_name = "METHOD")]
        method: String,

        /// JNI method descriptor, e.g. ()V (required with --overloaded)
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: Option<String>,

        /// Emit the long form that disambiguates overloads
        #[arg(long)]
        overloaded: bool,
    },
}

fn main() {
    pretty_env_logger::formatted_timed_builder()
        .filter_module("jheadgen", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    match args.command {
        Command::Java {
            inputs,
            output,
            output_dir,
            rust,
        } => {
            handle_java(inputs, output, output_dir, rust);
        }
        Command::Symbol {
            class,
            method,
            descriptor,
            overloaded,
        } => {
            handle_symbol(class, method, descriptor, overloaded);
        }
    }
}

fn handle_java(
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    rust: bool,
) {
    for input in &inputs {
        if !input.exists() {
            eprintln!("Error: input file not found: {}", input.display());
            process::exit(1);
        }
        if input.extension().and_then(|s| s.to_str()) != Some("java") {
            eprintln!("Error: input must be a .java file: {}", input.display());
            process::exit(1);
        }
    }

    let flavor = if rust {
        Flavor::RustStubs
    } else {
        Flavor::CHeader
    };

    let mut builder = Builder::new().flavor(flavor);
    for input in inputs {
        builder = builder.input_java(input);
    }

    let headers = match builder.generate() {
        Ok(headers) => headers,
        Err(e) => {
            eprintln!("Error generating headers: {e}");
            process::exit(1);
        }
    };

    if headers.is_empty() {
        eprintln!("Warning: no native methods found");
        return;
    }

    if let Some(ref dir) = output_dir {
        if let Err(e) = headers.write_to_files(dir) {
            eprintln!("Error writing to {}: {e}", dir.display());
            process::exit(1);
        }
        eprintln!("Generated {} file(s) in: {}", headers.len(), dir.display());
    } else if let Some(ref path) = output {
        if let Err(e) = headers.write_to_file(path) {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        }
        eprintln!("Output written to {}", path.display());
    } else {
        print!("{headers}");
    }
}

fn handle_symbol(class: String, method: String, descriptor: Option<String>, overloaded: bool) {
    let descriptor = match descriptor.as_deref().map(str::parse::<MethodDescriptor>) {
        None => None,
        Some(Ok(descriptor)) => Some(descriptor),
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if overloaded {
        let Some(descriptor) = descriptor else {
            eprintln!("Error: --overloaded requires a DESCRIPTOR argument");
            process::exit(1);
        };
        println!("{}", mangle::long_symbol(&class, &method, &descriptor));
    } else {
        println!("{}", mangle::short_symbol(&class, &method));
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn output_flags_are_mutually_exclusive() {
        let parsed = Args::try_parse_from([
            "jheadgen",
            "java",
            "GetEnv.java",
            "-o",
            "out.h",
            "-d",
            "include",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn single_output_flag_parses() {
        assert!(Args::try_parse_from(["jheadgen", "java", "GetEnv.java", "-d", "include"]).is_ok());
        assert!(Args::try_parse_from(["jheadgen", "java", "GetEnv.java", "-o", "out.h"]).is_ok());
    }
}
