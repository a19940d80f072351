// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generates the update functions for the fake services into `OUT_DIR`.

#![allow(missing_docs, clippy::print_stdout)]

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use kvtags_gen::{generate, GenerateOptions, DEFAULT_OUTPUT};

#[path = "src/table.rs"]
mod table;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/table.rs");

    let registry = table::registry()?;
    let services: Vec<&str> = registry.service_ids().collect();
    let options = GenerateOptions::default().service_root(table::SERVICE_ROOT)?;
    let code = generate(&registry, &services, &options)?;

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join(DEFAULT_OUTPUT), code)?;
    Ok(())
}
