//! Codes command - manage the product-code directory.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use fundconf_core::{BookCode, ProductCodes};

use super::load_config;

/// Arguments for the codes command.
#[derive(Args)]
pub struct CodesArgs {
    /// Use the conversion code file instead of the main one
    #[arg(long, global = true)]
    conversion: bool,

    #[command(subcommand)]
    command: CodesCommand,
}

#[derive(Subcommand)]
enum CodesCommand {
    /// List all mappings, numeric codes first
    List,

    /// Add or replace a mapping
    Set {
        /// Product name as printed on the slips
        name: String,
        /// Book code (integer or text)
        code: String,
    },

    /// Remove a mapping
    Remove {
        /// Product name
        name: String,
    },

    /// Merge every mapping of another JSON file
    Import {
        /// JSON object of product name -> code
        file: PathBuf,
    },

    /// Show the code file path
    Path,
}

pub fn run(args: CodesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let path = if args.conversion {
        config.paths.conversion_codes_path()
    } else {
        config.paths.product_codes_path()
    };

    match args.command {
        CodesCommand::List => list(&path),
        CodesCommand::Set { name, code } => set(&path, name, &code),
        CodesCommand::Remove { name } => remove(&path, &name),
        CodesCommand::Import { file } => import(&path, &file),
        CodesCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn list(path: &Path) -> anyhow::Result<()> {
    let codes = ProductCodes::load(path)?;
    for (name, code) in codes.sorted() {
        println!("{}\t{}", code, name);
    }
    println!("{} {} products", style("ℹ").blue(), codes.len());
    Ok(())
}

fn set(path: &Path, name: String, code: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Product name must not be empty");
    }
    let mut codes = ProductCodes::load_or_default(path)?;
    let code = BookCode::parse(code);
    let previous = codes.set(name.clone(), code.clone());
    codes.save(path)?;

    match previous {
        Some(old) if old != code => println!(
            "{} {}: {} → {}",
            style("✓").green(),
            name,
            old,
            code
        ),
        _ => println!("{} {} = {}", style("✓").green(), name, code),
    }
    Ok(())
}

fn remove(path: &Path, name: &str) -> anyhow::Result<()> {
    let mut codes = ProductCodes::load(path)?;
    if codes.remove(name).is_none() {
        anyhow::bail!("Product not found: {}", name);
    }
    codes.save(path)?;
    println!("{} Removed {}", style("✓").green(), name);
    Ok(())
}

fn import(path: &Path, file: &Path) -> anyhow::Result<()> {
    let incoming = ProductCodes::load(file)?;
    let mut codes = ProductCodes::load_or_default(path)?;
    let changed = codes.merge(incoming);
    codes.save(path)?;
    println!(
        "{} Imported {} changed mappings into {}",
        style("✓").green(),
        changed,
        path.display()
    );
    Ok(())
}
