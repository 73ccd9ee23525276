use std::path::PathBuf;

use clap::Args;
use crudgen_schema::{CONFIG_FILE_NAME, DEFAULT_CONFIG};
use dialoguer::{Confirm, theme::ColorfulTheme};
use eyre::{Context, Result};

#[derive(Args)]
pub struct InitCommand {
    /// Directory to write crudgen.toml into
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing crudgen.toml without asking
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE_NAME);

        if path.exists() && !self.force && !Self::confirm_overwrite(&path)? {
            println!("Left {} unchanged", path.display());
            return Ok(());
        }

        std::fs::create_dir_all(&self.dir)
            .wrap_err_with(|| format!("Failed to create {}", self.dir.display()))?;
        std::fs::write(&path, DEFAULT_CONFIG)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        println!("  point [schema] source at a schema dump");
        println!("  crudgen tables");
        println!("  crudgen generate all");

        Ok(())
    }

    fn confirm_overwrite(path: &std::path::Path) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()
            .wrap_err("Failed to get confirmation")
    }
}
