use clap::Parser;

/// This is a display program for assignment poll results.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the poll description in JSON format.
    /// For more information about the file format, read the manual.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference file containing the expected display summary in JSON format. If provided, polltab
    /// will check that the formatted output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the display summary will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
