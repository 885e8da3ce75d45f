//! Implementation of the `kiln list` command.

use kiln_core::application::ModuleInfo;

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let generator = kiln_adapters::local_generator()?;
    let modules = generator.list_modules();

    match args.format {
        ListFormat::Table => {
            output.header("Available Modules:")?;
            let width = modules.iter().map(|m| m.slug.len()).max().unwrap_or(0);
            for module in &modules {
                output.module_row(&module.slug, &module.description, width)?;
            }
        }

        // Machine formats bypass OutputManager so they stay parseable even
        // with --quiet or in non-TTY pipes.
        ListFormat::Json => {
            let json =
                serde_json::to_string_pretty(&modules).map_err(|e| CliError::Serialization {
                    what: "module list",
                    source: Box::new(e),
                })?;
            println!("{json}");
        }

        ListFormat::List => {
            for module in &modules {
                println!("{}", module.slug);
            }
        }

        ListFormat::Csv => print!("{}", to_csv(&modules)),
    }

    Ok(())
}

fn to_csv(modules: &[ModuleInfo]) -> String {
    let mut csv = String::from("slug,description\n");
    for module in modules {
        csv.push_str(&format!(
            "{},{}\n",
            csv_field(&module.slug),
            csv_field(&module.description)
        ));
    }
    csv
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
