//! config command - Show effective configuration

use anyhow::Result;

use crate::cli::Context;
use crate::core::config::Config;

/// Print every effective setting and the files they came from.
pub fn list(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    println!("# Sources");
    match config.user_config_loaded_from() {
        Some(path) => println!("user = {}", path.display()),
        None => match Config::user_config_path() {
            Ok(path) => println!("user = (none; create {})", path.display()),
            Err(_) => println!("user = (none)"),
        },
    }
    match config.local_config_loaded_from() {
        Some(path) => println!("local = {}", path.display()),
        None => println!("local = (none)"),
    }

    println!();
    println!("# Effective Configuration");
    println!("default_title = {:?}", config.default_title());
    println!("default_rows = {:?}", config.default_rows());
    let palette: Vec<String> = config
        .palette()
        .colors()
        .iter()
        .map(|color| color.to_string())
        .collect();
    println!("palette = {palette:?}");
    match config.backup_dir() {
        Some(dir) => println!("backup_dir = {:?}", dir.display().to_string()),
        None => println!("backup_dir = (next to file)"),
    }
    println!("interactive = {}", config.interactive());
    println!("pretty = {}", config.pretty());
    println!("fetch.timeout_secs = {}", config.fetch_timeout().as_secs());
    println!("fetch.user_agent = {:?}", config.user_agent());

    Ok(())
}
