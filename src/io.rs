//!
//! Text adapters: tabular input parsing, loaders and output formatting
//!
pub mod format;
pub mod input;
pub mod table;

use crate::error::Result;
use std::fs::File;
use std::io::prelude::*;

///
/// read the whole text of a file. `-` reads from stdin.
///
pub fn read_string(filename: &str) -> Result<String> {
    let mut text = String::new();
    if filename == "-" {
        std::io::stdin().read_to_string(&mut text)?;
    } else {
        File::open(filename)?.read_to_string(&mut text)?;
    }
    Ok(text)
}

///
/// write string into a file
///
pub fn write_string(filename: &str, string: &str) -> Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(string.as_bytes())?;
    Ok(())
}
