use anyhow::{Context, Result, bail};
use discreta::arff;
use discreta::discretize::KMeansDiscretizer;
use discreta::tasks::CrossValidation;
use std::str::FromStr;
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, EnumString)]
#[strum(serialize_all = "lowercase")]
enum ReportFormat {
    Text,
    Json,
}

const USAGE: &str =
    "usage: discreta <dataset.arff> [--folds N] [--seed N] [--centers N] [--format text|json] [--out FILE]";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let mut path: Option<String> = None;
    let mut folds = 10usize;
    let mut seed = 1u64;
    let mut centers: Option<usize> = None;
    let mut format = ReportFormat::Text;
    let mut out: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--folds" => {
                folds = next_value(&mut args, "--folds")?
                    .parse()
                    .context("--folds expects an integer")?;
            }
            "--seed" => {
                seed = next_value(&mut args, "--seed")?
                    .parse()
                    .context("--seed expects an integer")?;
            }
            "--centers" => {
                centers = Some(
                    next_value(&mut args, "--centers")?
                        .parse()
                        .context("--centers expects an integer")?,
                );
            }
            "--format" => {
                let value = next_value(&mut args, "--format")?;
                format = ReportFormat::from_str(&value)
                    .context("--format expects 'text' or 'json'")?;
            }
            "--out" => {
                out = Some(next_value(&mut args, "--out")?);
            }
            _ if arg.starts_with("--") => bail!("unknown option '{arg}'\n{USAGE}"),
            _ => path = Some(arg),
        }
    }

    let Some(path) = path else {
        bail!("{USAGE}");
    };

    let dataset = arff::load(&path, None).with_context(|| format!("failed to load '{path}'"))?;

    let mut discretizer = KMeansDiscretizer::new();
    if let Some(centers) = centers {
        discretizer = discretizer.with_number_of_centers(centers);
    }
    let discretized = discretizer
        .discretize_all_numeric(&dataset)
        .context("discretization failed")?;

    let report = CrossValidation::new(folds, seed)?
        .evaluate(&discretized)
        .context("cross-validation failed")?;

    if let Some(out_path) = out {
        report
            .export_json(&out_path)
            .with_context(|| format!("failed to write '{out_path}'"))?;
        println!("report written to {out_path}");
        return Ok(());
    }
    match format {
        ReportFormat::Text => print!("{report}"),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} expects a value"))
}
