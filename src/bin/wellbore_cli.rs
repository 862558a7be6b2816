use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use wellbore_engine::{
    BuildMethod, HookloadSweep, PipeSectionParams, PipeString, SurveyInfo, SurveyRecord,
    Trajectory, TorqueDragOptions, TorqueDragSolver, WellBore, WellboreError,
    WellboreSectionParams,
};

#[derive(Parser)]
#[command(name = "wellbore")]
#[command(version = "0.1.0")]
#[command(about = "Wellbore trajectory and torque-and-drag calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a trajectory from a survey file
    Trajectory {
        /// Survey CSV file with md,inc,azi columns
        #[arg(short = 's', long)]
        survey: PathBuf,

        /// Dogleg severity resolution length
        #[arg(long, default_value = "30.0")]
        dls_resolution: f64,

        /// Constant shift added to every azimuth (degrees)
        #[arg(long)]
        azimuth_shift: Option<f64>,

        /// Interpolated points added inside each survey interval
        #[arg(long, default_value = "0")]
        interior_points: usize,

        /// Report the interpolated point at this measured depth
        #[arg(long)]
        at_md: Option<f64>,

        /// Report the interpolated point at this true vertical depth
        #[arg(long)]
        at_tvd: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Run the torque-and-drag model over a survey
    TorqueDrag {
        /// Survey CSV file with md,inc,azi columns
        #[arg(short = 's', long)]
        survey: PathBuf,

        /// Hole inner diameter (m)
        #[arg(long, default_value = "0.22")]
        hole_id: f64,

        /// Sliding friction coefficient pipe/wall
        #[arg(short = 'f', long, default_value = "0.25")]
        friction: f64,

        /// Pipe body outer diameter (m)
        #[arg(long, default_value = "0.127")]
        string_od: f64,

        /// Pipe body inner diameter (m)
        #[arg(long, default_value = "0.108")]
        string_id: f64,

        /// Pipe weight per unit length (N/m)
        #[arg(short = 'w', long, default_value = "300.0")]
        unit_weight: f64,

        /// Pipe material density (SG); defaults to steel
        #[arg(long)]
        string_density: Option<f64>,

        /// Tool-joint outer diameter (m)
        #[arg(long)]
        tooljoint_od: Option<f64>,

        /// Bottom of the pipe string; defaults to the deepest survey depth
        #[arg(long)]
        string_bottom: Option<f64>,

        /// Drilling fluid density (SG)
        #[arg(short = 'd', long, default_value = "1.2")]
        fluid_density: f64,

        /// Axial tripping speed (m/s)
        #[arg(long, default_value = "1.0")]
        trip_speed: f64,

        /// Rotary speed (rpm)
        #[arg(long, default_value = "0.0")]
        rpm: f64,

        /// Weight on bit (N); requires --tob
        #[arg(long)]
        wob: Option<f64>,

        /// Torque on bit (N-m); requires --wob
        #[arg(long)]
        tob: Option<f64>,

        /// Overpull margin (N)
        #[arg(long)]
        overpull: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Sweep surface hookload over run-in depth and friction factor
    Hookload {
        /// Survey CSV file with md,inc,azi columns
        #[arg(short = 's', long)]
        survey: PathBuf,

        /// Hole inner diameter (m)
        #[arg(long, default_value = "0.22")]
        hole_id: f64,

        /// Pipe body outer diameter (m)
        #[arg(long, default_value = "0.127")]
        string_od: f64,

        /// Pipe body inner diameter (m)
        #[arg(long, default_value = "0.108")]
        string_id: f64,

        /// Pipe weight per unit length (N/m)
        #[arg(short = 'w', long, default_value = "300.0")]
        unit_weight: f64,

        /// Bottom of the pipe string; defaults to the deepest survey depth
        #[arg(long)]
        string_bottom: Option<f64>,

        /// Drilling fluid density (SG)
        #[arg(short = 'd', long, default_value = "1.2")]
        fluid_density: f64,

        /// Depth spacing of the sweep (m)
        #[arg(long, default_value = "30.0")]
        depth_step: f64,

        /// First friction factor of the grid
        #[arg(long, default_value = "0.1")]
        ff_start: f64,

        /// Last friction factor of the grid (included)
        #[arg(long, default_value = "0.4")]
        ff_stop: f64,

        /// Friction factor spacing
        #[arg(long, default_value = "0.1")]
        ff_step: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display engine information
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Trajectory {
            survey,
            dls_resolution,
            azimuth_shift,
            interior_points,
            at_md,
            at_tvd,
            output,
        } => {
            let records = load_survey(&survey)?;
            let info = SurveyInfo {
                dls_resolution,
                azimuth_shift,
                interior_points,
                ..SurveyInfo::default()
            };
            let mut trajectory = Trajectory::build(&records, info)?;
            if let Some(md) = at_md {
                let point = trajectory.insert_at_md(md)?;
                println!(
                    "At MD {:.2}: inc {:.2} deg, azi {:.2} deg, TVD {:.2}, N {:.2}, E {:.2}",
                    point.md, point.inc, point.azi, point.tvd, point.north, point.east
                );
            }
            if let Some(tvd) = at_tvd {
                let point = trajectory.insert_at_tvd(tvd)?;
                println!(
                    "At TVD {:.2}: MD {:.2}, inc {:.2} deg, azi {:.2} deg, N {:.2}, E {:.2}",
                    point.tvd, point.md, point.inc, point.azi, point.north, point.east
                );
            }
            display_trajectory(&trajectory, output)?;
        }

        Commands::TorqueDrag {
            survey,
            hole_id,
            friction,
            string_od,
            string_id,
            unit_weight,
            string_density,
            tooljoint_od,
            string_bottom,
            fluid_density,
            trip_speed,
            rpm,
            wob,
            tob,
            overpull,
            output,
        } => {
            let records = load_survey(&survey)?;
            let trajectory = Trajectory::build(&records, SurveyInfo::default())?;
            let bottom = string_bottom.unwrap_or_else(|| trajectory.max_md());

            let wellbore = single_wellbore(trajectory.max_md(), hole_id, friction)?;
            let string = single_string(
                bottom,
                string_od,
                string_id,
                unit_weight,
                string_density,
                tooljoint_od,
            )?;

            let mut solver = TorqueDragSolver::new(&trajectory, &wellbore, &string, fluid_density)?;
            solver.set_options(TorqueDragOptions {
                trip_speed,
                rotary_speed: rpm,
                wob,
                tob,
                overpull,
            });
            let result = solver.solve()?;
            display_torque_drag(&result, output)?;
        }

        Commands::Hookload {
            survey,
            hole_id,
            string_od,
            string_id,
            unit_weight,
            string_bottom,
            fluid_density,
            depth_step,
            ff_start,
            ff_stop,
            ff_step,
            output,
        } => {
            let records = load_survey(&survey)?;
            let trajectory = Trajectory::build(&records, SurveyInfo::default())?;
            let bottom = string_bottom.unwrap_or_else(|| trajectory.max_md());

            let wellbore = single_wellbore(trajectory.max_md(), hole_id, 0.25)?;
            let string = single_string(bottom, string_od, string_id, unit_weight, None, None)?;

            let mut sweep = HookloadSweep::new(&trajectory, &wellbore, &string, fluid_density)?;
            sweep.set_depth_step(depth_step)?;
            sweep.set_friction_range(ff_start, ff_stop, ff_step)?;
            let envelope = sweep.run()?;
            display_hookload(&envelope, output)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║       WELLBORE ENGINE v0.1.0           ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Wellbore trajectory and torque-and-    ║");
            println!("║ drag calculation engine.               ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Minimum-curvature trajectories       ║");
            println!("║ • MD and TVD interpolation             ║");
            println!("║ • Soft-string torque and drag          ║");
            println!("║ • Hookload envelopes                   ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

/// Parse a `md,inc,azi` CSV survey file. A single header line is skipped when
/// its first field is not numeric.
fn load_survey(path: &PathBuf) -> Result<Vec<SurveyRecord>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if number == 0 && fields[0].parse::<f64>().is_err() {
            continue;
        }
        if fields.len() != 3 {
            return Err(Box::new(WellboreError::config(format!(
                "{}:{}: expected md,inc,azi",
                path.display(),
                number + 1
            ))));
        }
        let parse = |field: &str, name: &str| -> Result<f64, Box<dyn Error>> {
            field.parse::<f64>().map_err(|_| {
                Box::new(WellboreError::config(format!(
                    "{}:{}: invalid {} value '{}'",
                    path.display(),
                    number + 1,
                    name,
                    field
                ))) as Box<dyn Error>
            })
        };
        records.push(SurveyRecord::new(
            parse(fields[0], "md")?,
            parse(fields[1], "inc")?,
            parse(fields[2], "azi")?,
        ));
    }
    if records.is_empty() {
        return Err(Box::new(WellboreError::config(format!(
            "{}: no survey records",
            path.display()
        ))));
    }
    Ok(records)
}

fn single_wellbore(bottom: f64, hole_id: f64, friction: f64) -> Result<WellBore, WellboreError> {
    let mut wellbore = WellBore::new("hole", 0.0, bottom, BuildMethod::TopDown)?;
    wellbore.add_section(WellboreSectionParams {
        bottom: Some(bottom),
        inner_diameter: hole_id,
        friction_sliding: friction,
        ..Default::default()
    })?;
    Ok(wellbore)
}

fn single_string(
    bottom: f64,
    od: f64,
    id: f64,
    unit_weight: f64,
    density: Option<f64>,
    tooljoint_od: Option<f64>,
) -> Result<PipeString, WellboreError> {
    let mut string = PipeString::new("string", 0.0, bottom, BuildMethod::BottomUp)?;
    string.add_section(PipeSectionParams {
        od,
        id,
        unit_weight,
        density,
        tooljoint_od,
        ..Default::default()
    })?;
    Ok(string)
}

fn display_trajectory(trajectory: &Trajectory, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let rows = trajectory.rows();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            println!("md,inc,azi,north,east,tvd,dl,dls");
            for r in &rows {
                println!(
                    "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.3},{:.3}",
                    r.md, r.inc, r.azi, r.north, r.east, r.tvd, r.dl, r.dls
                );
            }
        }
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║          TRAJECTORY RESULTS            ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Points:            {:>8}            ║", rows.len());
            println!("║ Max MD:            {:>8.2} m          ║", trajectory.max_md());
            println!("║ Max TVD:           {:>8.2} m          ║", trajectory.max_tvd());
            println!("╚════════════════════════════════════════╝");
            println!();
            println!("┌──────────┬────────┬────────┬──────────┬──────────┬──────────┬────────┐");
            println!("│  MD (m)  │ Inc(°) │ Azi(°) │  TVD (m) │ North(m) │ East (m) │  DLS   │");
            println!("├──────────┼────────┼────────┼──────────┼──────────┼──────────┼────────┤");
            for r in &rows {
                println!(
                    "│ {:>8.2} │ {:>6.2} │ {:>6.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>6.2} │",
                    r.md, r.inc, r.azi, r.tvd, r.north, r.east, r.dls
                );
            }
            println!("└──────────┴────────┴────────┴──────────┴──────────┴──────────┴────────┘");
        }
    }
    Ok(())
}

fn display_torque_drag(
    result: &wellbore_engine::TorqueDragResult,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Csv => {
            let modes: Vec<_> = result.tension.keys().copied().collect();
            let mut header = String::from("md");
            for mode in &modes {
                header.push_str(&format!(",tension_{:?}", mode).to_lowercase());
            }
            for mode in result.torque.keys() {
                header.push_str(&format!(",torque_{:?}", mode).to_lowercase());
            }
            println!("{}", header);
            for (k, md) in result.md.iter().enumerate() {
                let mut line = format!("{:.2}", md);
                for mode in &modes {
                    line.push_str(&format!(",{:.1}", result.tension[mode][k]));
                }
                for values in result.torque.values() {
                    line.push_str(&format!(",{:.1}", values[k]));
                }
                println!("{}", line);
            }
        }
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║        TORQUE AND DRAG RESULTS         ║");
            println!("╠════════════════════════════════════════╣");
            for (mode, values) in &result.tension {
                println!(
                    "║ {:<9} surface: {:>12.1} N     ║",
                    format!("{:?}", mode).to_lowercase(),
                    values[0]
                );
            }
            for (mode, values) in &result.torque {
                println!(
                    "║ {:<9} torque:  {:>12.1} N-m   ║",
                    format!("{:?}", mode).to_lowercase(),
                    values[0]
                );
            }
            println!("╚════════════════════════════════════════╝");
        }
    }
    Ok(())
}

fn display_hookload(
    envelope: &wellbore_engine::HookloadEnvelope,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(envelope)?);
        }
        OutputFormat::Csv => {
            let mut header = String::from("md");
            for series in &envelope.series {
                for mode in series.tension.keys() {
                    header.push_str(
                        &format!(",{:?}_{:.2}", mode, series.friction_factor).to_lowercase(),
                    );
                }
            }
            println!("{}", header);
            for (k, md) in envelope.md.iter().enumerate() {
                let mut line = format!("{:.1}", md);
                for series in &envelope.series {
                    for values in series.tension.values() {
                        line.push_str(&format!(",{:.1}", values[k]));
                    }
                }
                println!("{}", line);
            }
        }
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║          HOOKLOAD ENVELOPE             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Depth points:      {:>8}            ║", envelope.md.len());
            println!("║ Friction factors:  {:>8}            ║", envelope.series.len());
            println!("╚════════════════════════════════════════╝");
            println!();
            println!("Surface loads at total depth {:.1} m:", envelope.md.last().unwrap_or(&0.0));
            let last = envelope.md.len().saturating_sub(1);
            for series in &envelope.series {
                print!("  ff {:.2}:", series.friction_factor);
                for (mode, values) in &series.tension {
                    print!("  {:?} {:.1} N", mode, values[last]);
                }
                println!();
            }
        }
    }
    Ok(())
}
