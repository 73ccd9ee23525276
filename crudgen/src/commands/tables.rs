use std::path::PathBuf;

use clap::Args;
use crudgen_schema::{CONFIG_FILE_NAME, Config, SchemaDump};
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TablesCommand {
    /// Path to crudgen.toml (defaults to ./crudgen.toml)
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Schema dump to read, overriding [schema] source
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

impl TablesCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::open_or_default(&self.config).unwrap_or_exit();
        let schema_path = self.schema.as_ref().unwrap_or(&config.schema.source);
        let dump = SchemaDump::open(schema_path).unwrap_or_exit();

        let report = ops::tables(&dump)?;

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .wrap_err("Failed to serialize table listing")?;
            println!("{json}");
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
