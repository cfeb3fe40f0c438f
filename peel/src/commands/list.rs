use serde::Serialize;

use crate::cli::ListArgs;
use crate::error::{Error, Result};
use crate::util::{format_size, load, Item};

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    entry_type: &'static str,
    size: u64,
}

pub fn run(args: ListArgs) -> Result<()> {
    let items = load(&args.archive, args.format)?;

    if args.json {
        list_json(&items)
    } else {
        list_compact(&items);
        Ok(())
    }
}

fn list_compact(items: &[Item]) {
    println!("{:>12}  Name", "Size");
    println!("{}", "-".repeat(60));

    let mut total_size = 0u64;
    for item in items {
        if item.is_directory() {
            println!("{:>12}  {}", "-", item.name);
        } else {
            let size = item.data.len() as u64;
            println!("{:>12}  {}", format_size(size), item.name);
            total_size += size;
        }
    }

    println!("{}", "-".repeat(60));
    println!(
        "{:>12}  Total ({} entries)",
        format_size(total_size),
        items.len()
    );
}

fn list_json(items: &[Item]) -> Result<()> {
    let entries: Vec<JsonEntry> = items.iter().map(json_entry).collect();
    let json =
        serde_json::to_string_pretty(&entries).map_err(|source| Error::Json { source })?;
    println!("{}", json);
    Ok(())
}

fn json_entry(item: &Item) -> JsonEntry<'_> {
    JsonEntry {
        name: &item.name,
        entry_type: if item.is_directory() {
            "directory"
        } else {
            "file"
        },
        size: item.data.len() as u64,
    }
}
