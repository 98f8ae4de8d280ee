use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use protofwd_codegen::Options;
use protofwd_core::Overwrite;
use protofwd_descriptor::GoImportPath;

use super::DescriptorArgs;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub input: DescriptorArgs,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Omit the `// versions:` comment and the version assertions
    #[arg(long)]
    pub no_version_markers: bool,

    /// Suffix inserted before the file extension (defaults to "generated")
    #[arg(long)]
    pub suffix: Option<String>,

    /// Import path of the protoimpl runtime package
    #[arg(long)]
    pub runtime_import_path: Option<String>,

    /// Leave files whose content is unchanged untouched
    #[arg(long)]
    pub if_changed: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let set = self.input.load();

        let report = ops::generate(
            set,
            self.options(),
            GenerateOptions {
                descriptors: &self.input.descriptors,
                output_dir: &self.out,
                dry_run: self.dry_run,
                overwrite: if self.if_changed {
                    Overwrite::IfChanged
                } else {
                    Overwrite::Always
                },
            },
        )?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        Ok(())
    }

    fn options(&self) -> Options {
        let mut options = Options {
            generate_version_markers: !self.no_version_markers,
            ..Options::default()
        };
        if let Some(suffix) = &self.suffix {
            options.filename_suffix = suffix.clone();
        }
        if let Some(path) = &self.runtime_import_path {
            options.runtime.protoimpl = GoImportPath::new(path.as_str());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        generate: GenerateCommand,
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = TestCli::parse_from([
            "protofwd",
            "--no-version-markers",
            "--suffix",
            "pb",
            "--runtime-import-path",
            "example.com/vendored/protoimpl",
        ]);
        let options = cli.generate.options();

        assert!(!options.generate_version_markers);
        assert_eq!(options.filename_suffix, "pb");
        assert_eq!(
            options.runtime.protoimpl,
            GoImportPath::new("example.com/vendored/protoimpl")
        );
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["protofwd"]);

        assert_eq!(cli.generate.input.descriptors, PathBuf::from("descriptors.toml"));
        assert_eq!(cli.generate.out, PathBuf::from("."));
        assert_eq!(cli.generate.options(), Options::default());
    }
}
