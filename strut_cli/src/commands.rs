use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use strut_core::calculations::curves::{deflected_shape, load_slenderness_curve, reduction_factor_curve};
use strut_core::calculations::section::resolve_section;
use strut_core::calculations::{BucklingPredictor, MechanicsReport, PredictionResult};
use strut_core::file_io::{default_config_path, load_config_or_default, save_config, FileLock};
use strut_core::model::ReferencePredictor;
use strut_core::project::ColumnConfig;
use strut_core::units::ForceUnit;
use tracing::{debug, info};

use crate::cli::{CurveArgs, CurveKind, InitConfigArgs, LocateModelArgs, PredictArgs, ReportArgs};
use crate::error::{CliError, Result};

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn predict(args: PredictArgs, out: &mut impl Write) -> Result<()> {
    let mut config = args.member.resolve()?;
    args.output.apply(&mut config);

    let model = ReferencePredictor::with_scale(args.scale);
    info!(model = "reference", scale = args.scale, "Using closed-form load model");
    let session = BucklingPredictor::with_model(Arc::new(model));
    let result = session.predict(&config.parameters)?;

    if args.output.json {
        print_json(out, &result)
    } else {
        write_prediction(out, &config, &result)
    }
}

pub fn mechanics(args: ReportArgs, out: &mut impl Write) -> Result<()> {
    let mut config = args.member.resolve()?;
    args.output.apply(&mut config);

    let report = BucklingPredictor::new().analyze(&config.parameters)?;
    if args.output.json {
        print_json(out, &report)
    } else {
        write_mechanics(out, &config, &report)
    }
}

pub fn section(args: ReportArgs, out: &mut impl Write) -> Result<()> {
    let mut config = args.member.resolve()?;
    args.output.apply(&mut config);

    let params = &config.parameters;
    params.dimensions.validate()?;
    let resolved = resolve_section(&params.profile_family, &params.dimensions)?;
    if args.output.json {
        print_json(out, &resolved)
    } else {
        write_section_lines(out, &config, &resolved.properties)
    }
}

pub fn curve(args: CurveArgs, out: &mut impl Write) -> Result<()> {
    let config = args.member.resolve()?;
    debug!(kind = ?args.kind, points = args.points, "Sampling curve");

    match args.kind {
        CurveKind::Reduction => {
            let report = BucklingPredictor::new().analyze(&config.parameters)?;
            let points = reduction_factor_curve(
                report.buckling.imperfection_coefficient,
                args.max_slenderness,
                args.points,
            )?;
            print_json(out, &points)
        }
        CurveKind::Load | CurveKind::Shape => {
            let session = BucklingPredictor::with_model(Arc::new(ReferencePredictor::new()));
            let result = session.predict(&config.parameters)?;
            if args.kind == CurveKind::Load {
                print_json(out, &load_slenderness_curve(&result, args.points)?)
            } else {
                print_json(out, &deflected_shape(&result, args.points)?)
            }
        }
    }
}

pub fn init_config(args: InitConfigArgs, out: &mut impl Write) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => default_config_path(&std::env::current_dir()?),
    };
    if path.exists() && !args.force {
        return Err(CliError::Argument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = ColumnConfig::new(args.label);
    let lock = FileLock::acquire(&path, args.user)?;
    save_config(&config, &path)?;
    drop(lock);

    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

pub fn locate_model(args: LocateModelArgs, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config_or_default(path)?,
        None => ColumnConfig::default(),
    };
    let locator = args
        .model_dirs
        .iter()
        .fold(config.settings.locator(), |locator, dir| locator.with_dir(dir));

    match locator.locate() {
        Some(path) => {
            writeln!(out, "{}", path.display())?;
            Ok(())
        }
        None => Err(strut_core::CalcError::model_unavailable(format!(
            "no {}*{} file in {:?}",
            locator.prefix, locator.suffix, locator.search_dirs
        ))
        .into()),
    }
}

fn write_section_lines(
    out: &mut impl Write,
    config: &ColumnConfig,
    section: &strut_core::calculations::SectionProperties,
) -> Result<()> {
    let d = config.settings.decimals;
    let p = &config.parameters;
    writeln!(out, "Profile:  {} ({})", p.profile_family.display_name(), p.profile_family)?;
    writeln!(out, "Section:  A = {:.*} mm²", d, section.area_mm2)?;
    writeln!(out, "          I = {:.*e} mm⁴", d, section.moment_of_inertia_mm4)?;
    writeln!(out, "          i = {}", config.format_length(section.radius_of_gyration_mm))?;
    Ok(())
}

fn write_mechanics(out: &mut impl Write, config: &ColumnConfig, report: &MechanicsReport) -> Result<()> {
    let d = config.settings.decimals;
    let p = &config.parameters;
    let q = &report.buckling;
    let force = config.settings.force_unit;
    let kn = |value: f64| force.format(ForceUnit::Kilonewton.convert(value, force), d);

    write_section_lines(out, config, &report.section)?;
    writeln!(
        out,
        "Member:   {}, L = {}, {}",
        p.steel_grade,
        config.format_length(p.length_mm),
        p.support_condition
    )?;
    writeln!(
        out,
        "Buckling: k = {:.2}, L_cr = {}, λ = {:.*}, λ̄ = {:.*}",
        q.effective_length_factor,
        config.format_length(q.buckling_length_mm),
        d,
        q.mechanical_slenderness,
        d,
        q.relative_slenderness
    )?;
    writeln!(
        out,
        "          curve {} (α = {:.2}), χ = {:.*}",
        q.buckling_curve, q.imperfection_coefficient, d, q.reduction_factor
    )?;
    writeln!(out, "Loads:    N_cr = {}", kn(q.euler_critical_load_kn))?;
    writeln!(out, "          N_pl = {}", kn(q.plastic_resistance_kn))?;
    writeln!(out, "          χ·N_pl = {}", kn(q.buckling_resistance_kn()))?;
    Ok(())
}

fn write_prediction(out: &mut impl Write, config: &ColumnConfig, result: &PredictionResult) -> Result<()> {
    let report = MechanicsReport {
        material: result.material,
        section: result.section,
        dimensions: result.dimensions,
        buckling: result.buckling,
    };
    write_mechanics(out, config, &report)?;

    let d = config.settings.decimals;
    writeln!(out)?;
    writeln!(
        out,
        "Maximum load: {} ({} / {} / {})",
        config.format_max_load(result),
        ForceUnit::Kilonewton.format(result.max_load_kn, d),
        ForceUnit::Kilogram.format(result.max_load_kg, d),
        ForceUnit::Ton.format(result.max_load_ton, d)
    )?;
    let capped = if result.displacement.displacement_capped {
        " (amplification capped near N_cr)"
    } else {
        ""
    };
    writeln!(
        out,
        "Lateral displacement: {}{}",
        config.format_length(result.displacement.lateral_displacement_mm),
        capped
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{MemberArgs, OutputArgs};
    use strut_core::calculations::buckling::SupportCondition;
    use strut_core::file_io::load_config;

    fn run_to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn predict_summary_mentions_max_load() {
        let args = PredictArgs {
            member: MemberArgs::default(),
            output: OutputArgs::default(),
            scale: 1.0,
        };
        let text = run_to_string(|out| predict(args, out));
        assert!(text.contains("Maximum load:"));
        assert!(text.contains(" kN"));
        assert!(text.contains("curve b"));
    }

    #[test]
    fn predict_json_is_a_prediction_result() {
        let args = PredictArgs {
            member: MemberArgs::default(),
            output: OutputArgs {
                json: true,
                ..OutputArgs::default()
            },
            scale: 0.9,
        };
        let text = run_to_string(|out| predict(args, out));
        let result: PredictionResult = serde_json::from_str(&text).unwrap();
        assert!((result.model_to_design_ratio() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn predict_missing_dimension_fails() {
        let mut member = MemberArgs::default();
        member.section_height_mm = Some(0.0);
        let args = PredictArgs {
            member,
            output: OutputArgs::default(),
            scale: 1.0,
        };
        let err = predict(args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_json()["type"], "MissingDimension");
    }

    #[test]
    fn mechanics_without_model() {
        let member = MemberArgs {
            support: Some(SupportCondition::FixedFixed),
            ..MemberArgs::default()
        };
        let args = ReportArgs {
            member,
            output: OutputArgs::default(),
        };
        let text = run_to_string(|out| mechanics(args, out));
        assert!(text.contains("k = 0.50"));
    }

    #[test]
    fn curve_reduction_json() {
        let args = CurveArgs {
            member: MemberArgs::default(),
            kind: CurveKind::Reduction,
            points: 11,
            max_slenderness: 2.0,
        };
        let text = run_to_string(|out| curve(args, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(11));
        assert_eq!(value[0]["value"], 1.0);
    }

    #[test]
    fn init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.strut.json");
        let args = |force| InitConfigArgs {
            path: Some(path.clone()),
            label: "P-1".to_string(),
            force,
            user: "test".to_string(),
        };

        run_to_string(|out| init_config(args(false), out));
        assert_eq!(load_config(&path).unwrap().meta.label, "P-1");

        let err = init_config(args(false), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
        assert!(init_config(args(true), &mut Vec::new()).is_ok());
    }

    #[test]
    fn locate_model_reports_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let args = LocateModelArgs {
            config: None,
            model_dirs: vec![dir.path().to_path_buf()],
        };
        let err = locate_model(args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_json()["type"], "ModelUnavailable");

        std::fs::write(dir.path().join("modelo_pandeo_acero_rf.joblib"), b"").unwrap();
        let args = LocateModelArgs {
            config: None,
            model_dirs: vec![dir.path().to_path_buf()],
        };
        let text = run_to_string(|out| locate_model(args, out));
        assert!(text.trim().ends_with("modelo_pandeo_acero_rf.joblib"));
    }
}
