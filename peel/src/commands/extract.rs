use std::path::Path;

use crate::cli::ExtractArgs;
use crate::error::{Error, Result};
use crate::util::{format_size, load, safe_path, Item};

pub fn run(args: ExtractArgs) -> Result<()> {
    let items = load(&args.archive, args.format)?;

    let output_path = match args.output {
        Some(path) => path,
        None => std::env::current_dir().map_err(|source| Error::CreateDirectory {
            path: ".".into(),
            source,
        })?,
    };

    std::fs::create_dir_all(&output_path).map_err(|source| Error::CreateDirectory {
        path: output_path.clone(),
        source,
    })?;

    let mut total_size = 0u64;
    for item in &items {
        extract_item(item, &output_path)?;
        total_size += item.data.len() as u64;
        if !args.quiet {
            println!("{}", item.name);
        }
    }

    if !args.quiet {
        println!(
            "Extracted {} entries ({})",
            items.len(),
            format_size(total_size)
        );
    }

    Ok(())
}

fn extract_item(item: &Item, output_path: &Path) -> Result<()> {
    let path = output_path.join(safe_path(&item.name)?);

    if item.is_directory() {
        return std::fs::create_dir_all(&path)
            .map_err(|source| Error::CreateDirectory { path, source });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    tracing::debug!(path = %path.display(), bytes = item.data.len(), "writing entry");
    std::fs::write(&path, &item.data).map_err(|source| Error::WriteFile { path, source })
}
