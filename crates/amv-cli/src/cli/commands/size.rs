//! `amv size <manifest>` – report the total size of a manifest's files.

use amv_core::report::human_size;
use amv_core::size::{self, SizeEvent};
use anyhow::Result;
use std::path::Path;

/// Sum the declared size of every manifest entry and print the total.
pub fn run_size(manifest_path: &Path) -> Result<()> {
    let stats = size::sum_sizes_at(manifest_path, |event| match event {
        SizeEvent::Skipped { name } => println!("Skipping uncheckable file {name}"),
        SizeEvent::Checked { name, bytes } => {
            println!("Checking {name}...{}", human_size(bytes));
        }
        SizeEvent::Failed {
            name: Some(name),
            error,
        } => println!("Checking {name}...{error}"),
        SizeEvent::Failed { name: None, error } => println!("{error}"),
    })?;

    print!("{}", stats.render());
    Ok(())
}
