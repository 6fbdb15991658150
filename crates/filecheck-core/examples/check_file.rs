// Copyright (c) 2025 Filecheck Developers
// Distributed under the MIT software license

// Check files on disk against the upload policy.
//
//   cargo run -p filecheck-core --example check_file -- [--allow ext,ext] [--deny ext,ext] FILE...

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use filecheck_core::DEFAULT_HEADER_WINDOW;
use filecheck_core::prelude::*;
use filecheck_infer::InferClassifier;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "check_file", about = "Check files against the upload policy")]
struct Args {
    /// Extensions to grant on top of the defaults
    #[arg(long, value_delimiter = ',')]
    allow: Vec<String>,

    /// Extensions to revoke after the grants
    #[arg(long, value_delimiter = ',')]
    deny: Vec<String>,

    /// Leading bytes read from each file
    #[arg(long, default_value_t = DEFAULT_HEADER_WINDOW)]
    header_window: usize,

    /// Files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = FileCheckerConfig {
        header_window: args.header_window,
        authorize: args.allow,
        deauthorize: args.deny,
    };

    let checker = match FileChecker::with_config(InferClassifier::new(), config) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    tracing::info!(
        "Authorized extensions: {:?}",
        checker.policy().authorized_extensions()
    );

    let mut all_authorized = true;
    for path in &args.files {
        let source = PathSource::new(path.clone());
        match checker.check_source(&source) {
            Ok(detection) => println!("{}: authorized ({})", path.display(), detection.extension),
            Err(denial) => {
                all_authorized = false;
                println!("{}: denied ({denial})", path.display());
            }
        }
    }

    if all_authorized {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
