use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::aggregate::ConfidenceInterval;
use crate::consts::PLOT_COLORS;
use crate::errors::ProfileResult;
use crate::models::{NamedProfile, ProfilePlot};

const MAIN_SINGLE: &str = "Average Profile around the Center of Sites";
const MAIN_MULTIPLE: &str = "Average Profiles around the Center of Sites";
const XLAB: &str = "Relative Distance from the Center (bp)";
const YLAB: &str = "Average Profile";

///
/// Something that turns the computed profiles into a report.
///
pub trait ProfileRenderer {
    ///
    /// Render the plot request and return the files written.
    ///
    fn render(&self, plot: &ProfilePlot) -> ProfileResult<Vec<PathBuf>>;
}

///
/// Writes `<name>.R`, an R script drawing `<name>.pdf`, and optionally runs it
/// with `R --vanilla`.
///
#[derive(Debug, Clone)]
pub struct RScriptRenderer {
    pub output_dir: PathBuf,
    pub run_r: bool,
}

impl RScriptRenderer {
    pub fn new<P: AsRef<Path>>(output_dir: P, run_r: bool) -> Self {
        RScriptRenderer {
            output_dir: output_dir.as_ref().to_path_buf(),
            run_r,
        }
    }

    pub fn script_path(&self, plot: &ProfilePlot) -> PathBuf {
        self.output_dir.join(format!("{}.R", plot.name))
    }

    pub fn pdf_path(&self, plot: &ProfilePlot) -> PathBuf {
        self.output_dir.join(pdf_file_name(plot))
    }

    ///
    /// Build the R script for a plot request. R runs inside `output_dir`, so
    /// the script names the PDF relative to it.
    ///
    pub fn rscript(&self, plot: &ProfilePlot) -> String {
        let mut script = String::new();

        script.push_str("library(gplots)\n");
        let _ = writeln!(
            script,
            "pdf(\"{}\",height=6,width=8.5)",
            r_escape(&pdf_file_name(plot))
        );

        match plot.profiles.as_slice() {
            [] => {}
            [single] => script.push_str(&draw_single(&plot.breaks, single)),
            many => script.push_str(&draw_multiple(&plot.breaks, many)),
        }

        script.push_str("abline(v=0,lty=2,col=c(\"black\"))\n");
        script.push_str("dev.off()\n");

        script
    }

    fn run_script(&self, script_path: &Path) {
        let stdin = match File::open(script_path) {
            Ok(file) => file,
            Err(e) => {
                info!("Could not reopen {}: {}", script_path.display(), e);
                return;
            }
        };

        let status = Command::new("R")
            .arg("--vanilla")
            .current_dir(&self.output_dir)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => debug!("R finished for {}", script_path.display()),
            _ => info!(
                "Could not run R directly. Run {} using R for the graphical result.",
                script_path.display()
            ),
        }
    }
}

impl ProfileRenderer for RScriptRenderer {
    fn render(&self, plot: &ProfilePlot) -> ProfileResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;

        let script_path = self.script_path(plot);
        std::fs::write(&script_path, self.rscript(plot))?;
        info!("Wrote R script to {}", script_path.display());

        let mut written = vec![script_path.clone()];

        if self.run_r {
            self.run_script(&script_path);
            let pdf_path = self.pdf_path(plot);
            if pdf_path.is_file() {
                written.push(pdf_path);
            }
        }

        Ok(written)
    }
}

///
/// Writes the plot request as `<name>.json`.
///
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    pub output_dir: PathBuf,
}

impl JsonRenderer {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        JsonRenderer {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl ProfileRenderer for JsonRenderer {
    fn render(&self, plot: &ProfilePlot) -> ProfileResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(format!("{}.json", plot.name));
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, plot)?;
        writer.flush()?;

        info!("Wrote profile payload to {}", path.display());
        Ok(vec![path])
    }
}

fn pdf_file_name(plot: &ProfilePlot) -> String {
    format!("{}.pdf", plot.name)
}

fn draw_single(breaks: &[i64], profile: &NamedProfile) -> String {
    let x = r_int_vector(breaks);
    let y = r_vector(profile.mean.iter().copied());
    let color = PLOT_COLORS[0];

    match &profile.confidence {
        Some(ci) => {
            let (lower, upper) = r_bounds(ci);
            format!(
                "plotCI(x={x},y={y},ui={upper},li={lower},type=\"l\",col=\"{color}\",barcol=\"{color}\",gap=0,lwd=2,main=\"{MAIN_SINGLE}\",xlab=\"{XLAB}\",ylab=\"{YLAB}\")\n"
            )
        }
        None => format!(
            "plot({x},{y},type=\"l\",col=c(\"{color}\"),main=\"{MAIN_SINGLE}\",xlab=\"{XLAB}\",ylab=\"{YLAB}\",lwd=2)\n"
        ),
    }
}

fn draw_multiple(breaks: &[i64], profiles: &[NamedProfile]) -> String {
    let mut script = String::new();
    let x = r_int_vector(breaks);

    let (ymin, ymax) = profiles
        .iter()
        .flat_map(|p| p.mean.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let ylim = r_vector([ymin, ymax].into_iter());

    let palette = PLOT_COLORS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<String>>()
        .join(",");
    let _ = writeln!(script, "cr <- colorRampPalette(col=c({}), bias=1)", palette);
    let _ = writeln!(script, "linecols <- cr({})", profiles.len() - 1);
    script.push_str("linecols <- c(linecols, \"black\")\n");

    let with_confidence = profiles.iter().all(|p| p.confidence.is_some());

    for (i, profile) in profiles.iter().enumerate() {
        let y = r_vector(profile.mean.iter().copied());
        let n = i + 1;

        let line = match (&profile.confidence, with_confidence) {
            (Some(ci), true) => {
                let (lower, upper) = r_bounds(ci);
                let add = if i == 0 { "" } else { ",add=TRUE" };
                format!(
                    "plotCI(x={x},y={y},ui={upper},li={lower},type=\"l\",col=linecols[{n}],barcol=linecols[{n}],gap=0,lwd=2,main=\"{MAIN_SINGLE}\",xlab=\"{XLAB}\",ylab=\"{YLAB}\",ylim={ylim}{add})\n"
                )
            }
            _ if i == 0 => format!(
                "plot({x},{y},type=\"l\",col=linecols[1],main=\"{MAIN_MULTIPLE}\",xlab=\"{XLAB}\",ylab=\"{YLAB}\",ylim={ylim},lwd=2)\n"
            ),
            _ => format!("lines({x},{y},col=linecols[{n}],lwd=2)\n"),
        };
        script.push_str(&line);
    }

    let legends = profiles
        .iter()
        .map(|p| format!("\"{}\"", r_escape(&p.label)))
        .collect::<Vec<String>>()
        .join(",");
    let _ = writeln!(
        script,
        "legend(x=\"topleft\",legend=c({}),pch=15,col=linecols,bty=\"o\")",
        legends
    );

    script
}

/// `c(lower...)` and `c(upper...)`, `NA` for bins without an interval.
fn r_bounds(ci: &[Option<ConfidenceInterval>]) -> (String, String) {
    let lower = r_vector(ci.iter().map(|c| c.map_or(f64::NAN, |c| c.lower)));
    let upper = r_vector(ci.iter().map(|c| c.map_or(f64::NAN, |c| c.upper)));
    (lower, upper)
}

fn r_vector<I: Iterator<Item = f64>>(values: I) -> String {
    let values = values
        .map(|v| match v.is_finite() {
            true => format!("{:?}", v),
            false => "NA".to_string(),
        })
        .collect::<Vec<String>>()
        .join(",");
    format!("c({})", values)
}

fn r_int_vector(values: &[i64]) -> String {
    let values = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join(",");
    format!("c({})", values)
}

fn r_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
