//! # twophase
//! `twophase`: crate for manipulating and solving the 3x3 Rubik's cube with [Kociemba's two phase algorithm](http://kociemba.org/cube.htm).

#[macro_use]
extern crate lazy_static;

/// Error define.
pub mod error;

/// Module containing 3x3 cube constants.
pub mod constants;

/// Module for represent a cube on the coordinate level.
pub mod coord;

/// Module for represent a cube on the cubie level.
pub mod cubie;

/// Module for represent a cube on the facelet level.
pub mod facelet;

/// Module for represent move and create/load move tables.
pub mod moves;

/// Module for create/load pruning tables. The pruning tables cut the search tree during the search.
pub mod pruning;

/// Module containing functions for scrambling the cube.
pub mod scramble;

/// Module for Solver.
pub mod solver;

use std::fs;
use std::path::{Path, PathBuf};

use bincode::{
    config::{self, Configuration},
    decode_from_slice, encode_to_vec,
    error::DecodeError,
    Decode, Encode,
};

use crate::error::Error;

const CONFIG: Configuration = config::standard();

/// Table cache format version. Bump whenever a coordinate encoding changes so
/// stale blobs from older builds are left behind instead of being misread.
const TABLE_VERSION: &str = "v1";

fn table_path(name: &str) -> PathBuf {
    Path::new("tables").join(TABLE_VERSION).join(name)
}

fn write_table<P, T: Encode>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    if let Some(dir) = path.as_ref().parent() {
        fs::create_dir_all(dir)?;
    }
    let encoded = encode_to_vec(table, CONFIG)?;
    fs::write(path, encoded)?;
    Ok(())
}

fn decode_table<T: Decode>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    let additional = bytes.len() - written;

    if additional != 0 {
        return Err(DecodeError::UnexpectedEnd { additional })?;
    }
    Ok(decoded)
}

/// Load the table `name` from the on-disk cache, or run `generate` and persist
/// its result. A missing, truncated or otherwise undecodable blob counts as a
/// cache miss and the table is regenerated in place.
fn load_or_generate<T, F>(name: &str, generate: F) -> Result<T, Error>
where
    T: Encode + Decode,
    F: FnOnce() -> T,
{
    let path = table_path(name);
    if let Ok(bytes) = fs::read(&path) {
        if let Ok(table) = decode_table(&bytes) {
            return Ok(table);
        }
    }
    println!("Creating {} table...", path.display());
    let table = generate();
    write_table(&path, &table)?;
    Ok(table)
}
