use std::path::PathBuf;

use clap::Args;
use crudgen_codegen::{GenerationSettings, RunOptions, TableSelection};
use crudgen_schema::{CONFIG_FILE_NAME, Config, SchemaDump};
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Table to generate, or `all` for every table in the schema source
    /// (use --exact for a table literally named `all`)
    pub table: String,

    /// Treat TABLE as a table name even when it is `all`
    #[arg(long)]
    pub exact: bool,

    /// Path to crudgen.toml (defaults to ./crudgen.toml)
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Schema dump to read, overriding [schema] source
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Output directory, overriding [output] dir
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip utility/response.js and utility/prepare.js
    #[arg(long)]
    pub no_middleware: bool,

    /// Keep generating remaining tables after one fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::open_or_default(&self.config).unwrap_or_exit();
        let schema_path = self.schema.as_ref().unwrap_or(&config.schema.source);
        let output_dir = self.output.as_ref().unwrap_or(&config.output.dir);
        let dump = SchemaDump::open(schema_path).unwrap_or_exit();

        let run = RunOptions {
            selection: self.selection(),
            generate_middleware: config.generate.middleware && !self.no_middleware,
            continue_on_error: config.generate.continue_on_error || self.continue_on_error,
            settings: GenerationSettings {
                validation_status: config.generate.validation_status,
            },
        };

        let report = ops::generate(
            &dump,
            ops::generate::GenerateOptions {
                output_dir,
                dry_run: self.dry_run,
                run,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn selection(&self) -> TableSelection {
        if self.exact {
            TableSelection::One(self.table.clone())
        } else {
            TableSelection::parse(&self.table)
        }
    }
}
