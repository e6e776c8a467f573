// Copyright 2025 The SameJSON Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use same_json::Comparator;

#[doc(hidden)]
macro_rules! handle_error {
    ($code:expr, $msg:expr, $($arg:tt)*) => {
        println!($msg, $($arg)*);
        std::process::exit($code);
    };

    ($code:expr, $msg:expr) => {
        println!($msg);
        std::process::exit($code);
    };
}

#[doc(hidden)]
struct Code;

impl Code {
    const SUCCESS: i32 = 0;
    const INVALID_ARGUMENT: i32 = 2;
    const DOC_PARSING_ERROR: i32 = 3;
    const DIFFERENT_DOCUMENTS: i32 = 4;
}

#[doc(hidden)]
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File with the expected JSON document
    expected: PathBuf,

    /// File with the actual JSON document to check
    actual: PathBuf,

    /// Treat arrays as equivalent regardless of element order
    #[clap(long)]
    any_array_order: bool,

    /// Tolerate fields in the actual document that the expected one lacks
    #[clap(long)]
    allow_extra_fields: bool,
}

#[doc(hidden)]
fn main() {
    let cli = Cli::parse();

    let expected = load_document(&cli.expected);
    let actual = load_document(&cli.actual);

    let mut comparator = Comparator::new();
    if cli.any_array_order {
        comparator = comparator.with_any_array_order();
    }
    if cli.allow_extra_fields {
        comparator = comparator.with_extra_fields_allowed();
    }

    match comparator.compare(&expected, &actual).describe() {
        None => {
            println!("documents are equivalent");
            std::process::exit(Code::SUCCESS);
        }
        Some(description) => {
            handle_error!(Code::DIFFERENT_DOCUMENTS, "{}", description);
        }
    }
}

fn load_document(path: &std::path::Path) -> Value {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            handle_error!(
                Code::INVALID_ARGUMENT,
                "error reading {}: {}",
                path.display(),
                err
            );
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            handle_error!(
                Code::DOC_PARSING_ERROR,
                "error parsing {}: {}",
                path.display(),
                err
            );
        }
    }
}
