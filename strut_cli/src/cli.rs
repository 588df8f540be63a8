use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strut_core::calculations::buckling::SupportCondition;
use strut_core::calculations::section::ProfileFamily;
use strut_core::file_io::load_config;
use strut_core::materials::SteelGrade;
use strut_core::project::ColumnConfig;
use strut_core::units::{ForceUnit, LengthUnit};

use crate::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "strut",
    version,
    about = "Strut - steel column buckling load prediction (EN 1993-1-1 mechanics + load model)"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the maximum axial load of a member
    Predict(PredictArgs),
    /// Section properties and buckling quantities, without a load model
    Mechanics(ReportArgs),
    /// Section properties only
    Section(ReportArgs),
    /// Print a chart series (reduction factor, load-slenderness, deflected shape) as JSON
    Curve(CurveArgs),
    /// Write a configuration file with default values
    InitConfig(InitConfigArgs),
    /// Show which load model artifact would be used
    LocateModel(LocateModelArgs),
}

/// Member description: a saved configuration plus per-field overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct MemberArgs {
    /// Load member and settings from a saved configuration
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile family (IPE, HEB, HEA, HEM, UPN, "Tubular cuadrado", "Tubular circular", L, T)
    #[arg(short, long, value_name = "FAMILY")]
    pub family: Option<ProfileFamily>,

    /// Steel grade (S235, S275, S355)
    #[arg(short, long, value_name = "GRADE")]
    pub grade: Option<SteelGrade>,

    /// Member length in mm
    #[arg(short = 'L', long = "length", value_name = "MM")]
    pub length_mm: Option<f64>,

    /// End supports (Empotrado-Empotrado, Empotrado-Articulado, Articulado-Articulado, Empotrado-Libre)
    #[arg(short, long, value_name = "CONDITION")]
    pub support: Option<SupportCondition>,

    /// Section height h (mm)
    #[arg(long = "height", value_name = "MM")]
    pub section_height_mm: Option<f64>,

    /// Flange width b (mm)
    #[arg(long = "flange-width", value_name = "MM")]
    pub flange_width_mm: Option<f64>,

    /// Web thickness tw (mm)
    #[arg(long = "web", value_name = "MM")]
    pub web_thickness_mm: Option<f64>,

    /// Flange thickness tf (mm)
    #[arg(long = "flange", value_name = "MM")]
    pub flange_thickness_mm: Option<f64>,

    /// Outer side or diameter of a hollow section (mm)
    #[arg(long = "outer", value_name = "MM")]
    pub outer_dimension_mm: Option<f64>,

    /// Wall thickness of a hollow section (mm)
    #[arg(long = "wall", value_name = "MM")]
    pub wall_thickness_mm: Option<f64>,
}

impl MemberArgs {
    /// Saved configuration (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<ColumnConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ColumnConfig::default(),
        };

        let mut params = config.parameters.clone();
        if let Some(family) = &self.family {
            params.profile_family = family.clone();
        }
        if let Some(grade) = self.grade {
            params.steel_grade = grade;
        }
        if let Some(length) = self.length_mm {
            params.length_mm = length;
        }
        if let Some(support) = &self.support {
            params.support_condition = support.clone();
        }

        let dims = &mut params.dimensions;
        for (field, value) in [
            (&mut dims.section_height_mm, self.section_height_mm),
            (&mut dims.flange_width_mm, self.flange_width_mm),
            (&mut dims.web_thickness_mm, self.web_thickness_mm),
            (&mut dims.flange_thickness_mm, self.flange_thickness_mm),
            (&mut dims.outer_dimension_mm, self.outer_dimension_mm),
            (&mut dims.wall_thickness_mm, self.wall_thickness_mm),
        ] {
            if value.is_some() {
                *field = value;
            }
        }

        if params != config.parameters {
            config.set_parameters(params);
        }
        Ok(config)
    }
}

/// Output overrides shared by reporting commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Force unit for the summary (kN, kg, ton)
    #[arg(long, value_name = "UNIT")]
    pub force_unit: Option<ForceUnit>,

    /// Length unit for the summary (mm, cm, m)
    #[arg(long, value_name = "UNIT")]
    pub length_unit: Option<LengthUnit>,

    /// Decimal places in the summary
    #[arg(long, value_name = "N")]
    pub decimals: Option<usize>,
}

impl OutputArgs {
    pub fn apply(&self, config: &mut ColumnConfig) {
        if let Some(unit) = self.force_unit {
            config.settings.force_unit = unit;
        }
        if let Some(unit) = self.length_unit {
            config.settings.length_unit = unit;
        }
        if let Some(decimals) = self.decimals {
            config.settings.decimals = decimals;
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub member: MemberArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Multiplier applied to the closed-form reference model
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
    pub scale: f64,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub member: MemberArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// χ against relative slenderness
    Reduction,
    /// χ·N_pl against relative slenderness, with the prediction marked
    Load,
    /// Deflected member axis
    Shape,
}

#[derive(Args, Debug, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub member: MemberArgs,

    /// Which series to print
    #[arg(short, long, value_enum, default_value_t = CurveKind::Reduction)]
    pub kind: CurveKind,

    /// Number of samples
    #[arg(short = 'n', long, default_value_t = strut_core::calculations::curves::DEFAULT_CURVE_POINTS)]
    pub points: usize,

    /// Upper end of the slenderness axis (reduction curve only)
    #[arg(long, value_name = "LAMBDA", default_value_t = strut_core::calculations::curves::DEFAULT_MAX_SLENDERNESS)]
    pub max_slenderness: f64,
}

#[derive(Args, Debug, Clone)]
pub struct InitConfigArgs {
    /// Output path (defaults to ./default.strut.json)
    pub path: Option<PathBuf>,

    /// Label stored in the file header
    #[arg(long, default_value = "")]
    pub label: String,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,

    /// User recorded in the lock file while writing
    #[arg(long, value_name = "ID", default_value = "strut")]
    pub user: String,
}

#[derive(Args, Debug, Clone)]
pub struct LocateModelArgs {
    /// Read search directories and naming from a saved configuration
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Additional directory to search (repeatable, searched after the configured ones)
    #[arg(short = 'd', long = "model-dir", value_name = "DIR")]
    pub model_dirs: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strut_core::file_io::save_config;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn predict_with_overrides() {
        let cli = parse(&[
            "strut", "predict", "--family", "HEB", "--grade", "s355", "-L", "4500", "--support",
            "fixed-pinned", "--height", "220", "--json",
        ]);
        let Commands::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert!(args.output.json);
        assert_eq!(args.scale, 1.0);

        let config = args.member.resolve().unwrap();
        let params = &config.parameters;
        assert_eq!(params.profile_family, ProfileFamily::Heb);
        assert_eq!(params.steel_grade, SteelGrade::S355);
        assert_eq!(params.length_mm, 4500.0);
        assert_eq!(params.support_condition, SupportCondition::FixedPinned);
        assert_eq!(params.dimensions.section_height_mm, Some(220.0));
        // Untouched fields keep the defaults
        assert_eq!(params.dimensions.flange_width_mm, Some(100.0));
    }

    #[test]
    fn unrecognized_family_keeps_its_label() {
        let cli = parse(&["strut", "section", "--family", "Omega 80", "--support", "Apoyo elástico"]);
        let Commands::Section(args) = cli.command else {
            panic!("expected section");
        };
        let config = args.member.resolve().unwrap();
        assert_eq!(config.parameters.profile_family.label(), "Omega 80");
        assert_eq!(config.parameters.support_condition.label(), "Apoyo elástico");
    }

    #[test]
    fn invalid_grade_rejected_by_parser() {
        assert!(Cli::try_parse_from(["strut", "predict", "--grade", "S460"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["strut", "-q", "-v", "section"]).is_err());
        let cli = parse(&["strut", "-vv", "section"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn overrides_apply_on_top_of_saved_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.strut.json");
        let mut saved = ColumnConfig::new("P-7");
        saved.parameters.length_mm = 6000.0;
        save_config(&saved, &path).unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let cli = parse(&["strut", "mechanics", "--config", &path_arg, "--support", "Empotrado-Libre"]);
        let Commands::Mechanics(args) = cli.command else {
            panic!("expected mechanics");
        };
        let config = args.member.resolve().unwrap();
        assert_eq!(config.meta.label, "P-7");
        assert_eq!(config.parameters.length_mm, 6000.0);
        assert_eq!(config.parameters.support_condition, SupportCondition::FixedFree);
    }

    #[test]
    fn curve_defaults() {
        let cli = parse(&["strut", "curve", "--kind", "shape"]);
        let Commands::Curve(args) = cli.command else {
            panic!("expected curve");
        };
        assert_eq!(args.kind, CurveKind::Shape);
        assert_eq!(args.points, 100);
        assert_eq!(args.max_slenderness, 2.5);
    }

    #[test]
    fn output_overrides() {
        let cli = parse(&["strut", "predict", "--force-unit", "ton", "--length-unit", "m", "--decimals", "3"]);
        let Commands::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        let mut config = ColumnConfig::default();
        args.output.apply(&mut config);
        assert_eq!(config.settings.force_unit, ForceUnit::Ton);
        assert_eq!(config.settings.length_unit, LengthUnit::Meter);
        assert_eq!(config.settings.decimals, 3);
    }
}
