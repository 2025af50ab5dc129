use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::Parser;

use crate::preset::IdGrammar;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧪 probelint version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   checks REF/ALT sequence libraries before probe design";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser, Debug)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    styles = STYLES
)]
pub struct Cli {
    /// the input .fa/.fasta files, which together form one library
    #[arg(required = true)]
    pub files: Vec<String>,

    /// the maximum allowed sequence length. sequences must be longer than
    /// `max-length - length-window` and at most `max-length`
    #[arg(short, long, verbatim_doc_comment)]
    pub max_length: Option<usize>,

    /// the width of the accepted length range below --max-length
    #[arg(long, default_value_t = 100)]
    pub length_window: usize,

    /// the identifier grammar the library must follow
    #[arg(long, value_enum, default_value = "ref-alt")]
    pub mode: IdGrammar,

    /// write the per-sequence table to this .tsv file
    #[arg(short, long)]
    pub output: Option<String>,

    /// append the run summary to this log file, creating its directory if needed
    #[arg(short, long)]
    pub log: Option<String>,

    /// do not print the summary to standard output
    #[arg(short, long, action)]
    pub quiet: bool,

    /// print the summary to standard output as JSON
    #[arg(long, action)]
    pub json: bool,
}
