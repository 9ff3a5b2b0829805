//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// labcat - catalog of materials, samples, and their measurements
#[derive(Parser, Debug)]
#[command(name = "labcat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: labcat.yml in the current directory, if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Database file, or :memory:
    #[arg(short, long, global = true, env = "LABCAT_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a labcat.yml and create an empty catalog
    Init(InitArgs),

    /// Load a record into the catalog
    #[command(subcommand)]
    Add(AddCommands),

    /// Print one table, optionally with its metadata pivoted on
    Show(ShowArgs),

    /// Join an entity with one or more parent entities
    Join(JoinArgs),

    /// Correlate two entities through a junction table
    Relation(RelationArgs),

    /// Resolve a row id from column values
    Find(FindArgs),

    /// Delete rows and their metadata by id
    Delete(DeleteArgs),

    /// List catalog tables with row counts
    Tables,

    /// Run an ad hoc SQL query
    Query(QueryArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Catalog name
    #[arg(short, long)]
    pub name: String,

    /// Directory to initialize
    #[arg(long, default_value = ".")]
    pub dir: String,

    /// Database file, relative to the directory
    #[arg(long, default_value = "catalog.duckdb")]
    pub database_path: String,
}

/// Output formats for tabular commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON array of row objects
    Json,
}

/// Metadata shared by every `add` subcommand
#[derive(Args, Debug, Clone)]
pub struct MetaArgs {
    /// Extra metadata as KEY=VALUE or KEY:TYPE=VALUE (repeatable)
    #[arg(short, long = "meta", value_name = "KEY[:TYPE]=VALUE")]
    pub meta: Vec<String>,
}

/// Records that can be added
#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// A material
    Material(AddMaterialArgs),
    /// A fabrication method
    Fabrication(AddNamedArgs),
    /// A measurement type
    Measurementtype(AddNamedArgs),
    /// A panel made of a material by a fabrication method
    Panel(AddPanelArgs),
    /// A sample cut from a panel
    Sample(AddSampleArgs),
    /// An ultrasonic measurement
    Ut(AddUtArgs),
    /// An X-ray CT measurement
    Xct(AddXctArgs),
    /// A dataset grouping measurements
    Dataset(AddDatasetArgs),
    /// A registration of one measurement onto another
    Registration(AddRegistrationArgs),
}

#[derive(Args, Debug)]
pub struct AddNamedArgs {
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub meta: MetaArgs,
}

#[derive(Args, Debug)]
pub struct AddMaterialArgs {
    #[arg(long)]
    pub name: String,

    /// Ply thickness in millimetres
    #[arg(long)]
    pub layer_thickness: f64,

    #[command(flatten)]
    pub meta: MetaArgs,
}

/// Outer dimensions in millimetres
#[derive(Args, Debug, Clone, Copy)]
pub struct DimensionArgs {
    #[arg(long)]
    pub height: f64,

    #[arg(long)]
    pub width: f64,

    #[arg(long)]
    pub thickness: f64,
}

#[derive(Args, Debug)]
pub struct AddPanelArgs {
    #[arg(long)]
    pub name: String,

    /// Material name
    #[arg(long)]
    pub material: String,

    /// Fabrication method name
    #[arg(long)]
    pub fabrication: String,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    /// Edges were trimmed after curing
    #[arg(long)]
    pub edges_cutted: bool,

    /// Ply orientations, comma-separated (e.g. 0,90,0)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub layer_layout: Option<Vec<i64>>,

    #[arg(long)]
    pub description: Option<String>,

    #[command(flatten)]
    pub meta: MetaArgs,
}

#[derive(Args, Debug)]
pub struct AddSampleArgs {
    #[arg(long)]
    pub name: String,

    /// Panel name
    #[arg(long)]
    pub panel: String,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    #[arg(long)]
    pub keyhole: bool,

    #[arg(long)]
    pub parallel_faces: bool,

    #[arg(long)]
    pub description: Option<String>,

    #[command(flatten)]
    pub meta: MetaArgs,
}

/// Fields shared by UT and XCT measurements
#[derive(Args, Debug)]
pub struct MeasurementArgs {
    /// Path of the measurement file or slice folder
    #[arg(long)]
    pub file_path: String,

    /// Measurement type name
    #[arg(long)]
    pub measurementtype: String,

    /// Names of the samples covered, comma-separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub samples: Vec<String>,

    /// Volume height in voxels
    #[arg(long)]
    pub height: i64,

    /// Volume width in voxels
    #[arg(long)]
    pub width: i64,

    /// Volume depth in voxels
    #[arg(long)]
    pub depth: i64,

    /// Element type (e.g. uint16)
    #[arg(long)]
    pub dtype: String,

    /// File path of the measurement this one derives from
    #[arg(long, requires = "transformations")]
    pub parent: Option<String>,

    /// How the parent was transformed
    #[arg(long)]
    pub transformations: Option<String>,

    #[command(flatten)]
    pub meta: MetaArgs,
}

/// Ultrasonic signal representation
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalArg {
    #[value(name = "RF")]
    Rf,
    #[value(name = "Amplitude")]
    Amplitude,
}

#[derive(Args, Debug)]
pub struct AddUtArgs {
    #[command(flatten)]
    pub measurement: MeasurementArgs,

    #[arg(long, value_enum)]
    pub signal_type: SignalArg,

    /// Axis order of the volume, comma-separated (e.g. z,x,y)
    #[arg(long, value_delimiter = ',', default_value = "z,x,y")]
    pub axes_order: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AddXctArgs {
    #[command(flatten)]
    pub measurement: MeasurementArgs,

    /// Volume is front-wall aligned
    #[arg(long)]
    pub aligned: bool,

    #[arg(long)]
    pub equalized: bool,
}

#[derive(Args, Debug)]
pub struct AddDatasetArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Member measurement file paths, comma-separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub measurements: Vec<String>,

    /// Learning targets, comma-separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub targets: Vec<String>,

    #[command(flatten)]
    pub meta: MetaArgs,
}

#[derive(Args, Debug)]
pub struct AddRegistrationArgs {
    /// File path of the reference measurement
    #[arg(long)]
    pub reference: String,

    /// File path of the registered measurement
    #[arg(long)]
    pub registered: String,

    /// 3x3 transform, rows separated by ';' (e.g. "1,0,0;0,1,0;0,0,1")
    #[arg(long, allow_hyphen_values = true)]
    pub transform: String,

    #[arg(long)]
    pub method: String,

    #[command(flatten)]
    pub meta: MetaArgs,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Table to print
    pub table: String,

    /// Pivot metadata rows onto each entity row
    #[arg(short, long)]
    pub metadata: bool,

    /// Put metadata values and types in separate columns
    #[arg(long, requires = "metadata")]
    pub split: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the join command
#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Child entity table
    pub entity: String,

    /// Parent tables, as TABLE or TABLE:FK_COLUMN
    #[arg(required = true)]
    pub parents: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the relation command
#[derive(Args, Debug)]
pub struct RelationArgs {
    pub a: String,
    pub b: String,
    pub junction: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the find command
#[derive(Args, Debug)]
pub struct FindArgs {
    pub table: String,

    /// Suffixed column and value pairs (e.g. name_material=CFRP-01)
    #[arg(required = true, value_name = "COLUMN=VALUE")]
    pub criteria: Vec<String>,
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub table: String,

    #[arg(required = true)]
    pub ids: Vec<i64>,
}

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// SQL to execute
    pub sql: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
