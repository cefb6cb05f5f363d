//! Synthetic input generation.
//!
//! Produces headerless five-field CSV files
//! (`identifier, first name, primary email, secondary email, profession`)
//! of an exact record count. Output is deterministic for a given seed.

use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::BenchInput;

const FIRST_NAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy", "mallory",
    "niaj", "olivia", "peggy", "rupert", "sybil", "trent", "victor", "walter", "yasmin",
];

const DOMAINS: &[&str] = &["example.com", "mail.test", "corp.example", "inbox.test"];

const PROFESSIONS: &[&str] = &[
    "engineer",
    "doctor",
    "librarian",
    "chef",
    "pilot",
    "accountant",
    "designer",
    "nurse",
    "lawyer",
    "data scientist",
];

/// Writes `count` synthetic records to `path`.
pub fn generate_input_file(path: &Path, count: usize, seed: u64) -> Result<BenchInput> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create input file: {}", path.display()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    for id in 1..=count {
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("anon");
        let domain = DOMAINS.choose(&mut rng).copied().unwrap_or("example.com");
        let profession = PROFESSIONS.choose(&mut rng).copied().unwrap_or("engineer");
        let tag: u32 = rng.random_range(0..10_000);

        writer.write_record([
            id.to_string(),
            first.to_string(),
            format!("{first}{tag}@{domain}"),
            format!("{first}.{tag}@backup.{domain}"),
            profession.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(BenchInput::new(path, count))
}

/// Writes `file1.csv`, `file2.csv`, ... into `dir`, one per entry of `sizes`.
///
/// Each file gets its own seed derived from `seed` and its position.
pub fn generate_inputs(dir: &Path, sizes: &[usize], seed: u64) -> Result<Vec<BenchInput>> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let path = dir.join(format!("file{}.csv", i + 1));
            let input = generate_input_file(&path, count, seed.wrapping_add(i as u64))?;
            info!("Generated {} with {} records", path.display(), count);
            Ok(input)
        })
        .collect()
}
