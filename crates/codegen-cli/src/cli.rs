//! Command-line surface: one positional schema path, plus the output
//! directory and example-file flags named in spec §6.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "codegen-cli",
    version,
    about = "Generates a self-contained Rust binary codec from a schema XML file"
)]
pub struct Args {
    /// Path to the schema XML file.
    pub schema: PathBuf,

    /// Directory the generated codec and example files are written to.
    /// Recreated on every run; prior contents are discarded.
    #[arg(long, default_value = "./generated")]
    pub out_dir: PathBuf,

    /// Write one `<schema>_<messageName>.xb` example file per message format.
    #[arg(long, default_value_t = true)]
    pub emit_examples: bool,
}
