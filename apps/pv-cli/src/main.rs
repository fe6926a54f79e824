use clap::{Args, Parser, Subcommand, ValueEnum};
use pv_app::format::{format_clock, format_energy, format_money, format_payback, format_power};
use pv_app::{
    AnimationDriver, AppResult, ControlState, ParameterSource, Presentation, PresentationSink,
    Readouts, Scenario, Session, SweepDefinition, SweepParameter, annual_energy,
    best_panel_angle, load_scenario, run_sweep, save_scenario,
};
use pv_core::{to_kwh, to_watts};
use pv_model::{ProfileSample, Snapshot, recompute};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser)]
#[command(name = "pv-cli")]
#[command(about = "PV Sim CLI - Rooftop photovoltaic output simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the readouts for one set of inputs
    Report {
        #[command(flatten)]
        inputs: Inputs,
        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the 29-sample daily power profile
    Profile {
        #[command(flatten)]
        inputs: Inputs,
        /// Write the profile as CSV to this file ("-" for stdout)
        #[arg(long, value_name = "OUT")]
        csv: Option<PathBuf>,
    },
    /// Run the time-of-day animation and print one line per tick
    Animate {
        #[command(flatten)]
        inputs: Inputs,
        /// Number of ticks to run
        #[arg(long, default_value_t = 57)]
        ticks: u32,
        /// Wait for the real tick interval between lines
        #[arg(long)]
        realtime: bool,
    },
    /// Sweep one input across a range and tabulate daily results
    Sweep {
        /// Input to sweep
        #[arg(value_enum)]
        param: SweepParam,
        /// First value (cloud cover in percent)
        #[arg(long)]
        from: f64,
        /// Last value (cloud cover in percent)
        #[arg(long)]
        to: f64,
        /// Number of points
        #[arg(long, default_value_t = 10)]
        points: usize,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Total energy over days 1 to 365
    Annual {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Panel angle with the most daily energy
    BestAngle {
        /// Angle step in degrees
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Create or check scenario files
    #[command(subcommand)]
    Scenario(ScenarioCommands),
}

#[derive(Subcommand)]
enum ScenarioCommands {
    /// Write a scenario file holding the default inputs
    Init {
        /// Output path (.yaml or .json)
        path: PathBuf,
        /// Scenario name
        #[arg(long, default_value = "Default")]
        name: String,
    },
    /// Check a scenario file and print its inputs
    Validate {
        /// Path to the scenario file
        path: PathBuf,
    },
}

/// Inputs shared by every simulation command. Flags override the scenario.
#[derive(Args, Debug, Default)]
struct Inputs {
    /// Scenario file to start from (.yaml or .json)
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Day of year, 1-365
    #[arg(long)]
    day: Option<u16>,
    /// Time of day in hours, 0-24
    #[arg(long)]
    time: Option<f64>,
    /// Cloud cover in percent
    #[arg(long)]
    cloud: Option<f64>,
    /// Ambient temperature in °C
    #[arg(long)]
    temp: Option<f64>,
    /// Panel area in m²
    #[arg(long)]
    area: Option<f64>,
    /// Base panel efficiency in percent
    #[arg(long)]
    efficiency: Option<f64>,
    /// Panel tilt in degrees
    #[arg(long)]
    angle: Option<f64>,
    /// Installed system cost
    #[arg(long)]
    cost: Option<f64>,
    /// Tariff per kWh
    #[arg(long)]
    tariff: Option<f64>,
}

impl Inputs {
    fn controls(&self) -> AppResult<ControlState> {
        let mut controls = match &self.scenario {
            Some(path) => ControlState::from_params(&load_scenario(path)?.params),
            None => ControlState::default(),
        };
        if let Some(v) = self.day {
            controls.day_of_year = v;
        }
        if let Some(v) = self.time {
            controls.time_of_day_h = v;
        }
        if let Some(v) = self.cloud {
            controls.cloud_pct = v;
        }
        if let Some(v) = self.temp {
            controls.temp_c = v;
        }
        if let Some(v) = self.area {
            controls.area_m2 = v;
        }
        if let Some(v) = self.efficiency {
            controls.efficiency_pct = v;
        }
        if let Some(v) = self.angle {
            controls.angle_deg = v;
        }
        if let Some(v) = self.cost {
            controls.system_cost = v;
        }
        if let Some(v) = self.tariff {
            controls.tariff_per_kwh = v;
        }
        Ok(controls)
    }

    fn snapshot(&self) -> AppResult<Snapshot> {
        Ok(recompute(self.controls()?.read()))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SweepParam {
    Day,
    Angle,
    Cloud,
    Area,
}

impl SweepParam {
    fn parameter(self) -> SweepParameter {
        match self {
            SweepParam::Day => SweepParameter::DayOfYear,
            SweepParam::Angle => SweepParameter::PanelAngle,
            SweepParam::Cloud => SweepParameter::CloudCover,
            SweepParam::Area => SweepParameter::PanelArea,
        }
    }

    /// Converts a value typed on the command line into model units.
    fn to_model(self, value: f64) -> f64 {
        match self {
            SweepParam::Cloud => value / 100.0,
            _ => value,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { inputs, json } => cmd_report(&inputs, json),
        Commands::Profile { inputs, csv } => cmd_profile(&inputs, csv.as_deref()),
        Commands::Animate {
            inputs,
            ticks,
            realtime,
        } => cmd_animate(&inputs, ticks, realtime),
        Commands::Sweep {
            param,
            from,
            to,
            points,
            inputs,
        } => cmd_sweep(&inputs, param, from, to, points),
        Commands::Annual { inputs } => cmd_annual(&inputs),
        Commands::BestAngle { step, inputs } => cmd_best_angle(&inputs, step),
        Commands::Scenario(cmd) => match cmd {
            ScenarioCommands::Init { path, name } => cmd_scenario_init(&path, name),
            ScenarioCommands::Validate { path } => cmd_scenario_validate(&path),
        },
    }
}

fn cmd_report(inputs: &Inputs, json: bool) -> AppResult<()> {
    let snapshot = inputs.snapshot()?;
    let readouts = Readouts::from_snapshot(&snapshot);

    if json {
        let value = serde_json::json!({
            "params": snapshot.params,
            "altitude_deg": snapshot.angles.altitude_deg,
            "azimuth_deg": snapshot.angles.azimuth_deg,
            "power_w": snapshot.power.watts(),
            "actual_efficiency": snapshot.power.actual_efficiency,
            "daily_energy_kwh": snapshot.financial.daily_energy_kwh(),
            "monthly_savings": snapshot.financial.monthly_savings,
            "payback_years": snapshot.financial.payback.years(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Inputs:");
    println!("  Day:         {}", readouts.day);
    println!("  Time:        {}", readouts.time);
    println!("  Cloud cover: {}", readouts.cloud);
    println!("  Temperature: {}", readouts.temperature);
    println!("  Panel area:  {}", readouts.area);
    println!("  Efficiency:  {}", readouts.efficiency);
    println!("  Panel angle: {}", readouts.angle);
    println!("\nSun:");
    println!("  Altitude: {:.2}°", snapshot.angles.altitude_deg);
    println!("  Azimuth:  {:.2}°", snapshot.angles.azimuth_deg);
    println!("\nOutput:");
    println!("  Power:             {}", readouts.power);
    println!("  Actual efficiency: {}", readouts.actual_efficiency);
    println!("  Daily energy:      {}", readouts.daily_energy);
    println!("  Peak:              {}", readouts.peak);
    println!("  Monthly savings:   {}", readouts.monthly_savings);
    println!("  Payback:           {}", readouts.payback);
    Ok(())
}

fn cmd_profile(inputs: &Inputs, csv_out: Option<&Path>) -> AppResult<()> {
    let snapshot = inputs.snapshot()?;
    let samples = snapshot.profile.samples();

    let Some(path) = csv_out else {
        println!("{:>6}  {:>9}  {:>9}  {:>10}", "time", "altitude", "azimuth", "power");
        for s in samples {
            println!(
                "{:>6}  {:>8.2}°  {:>8.2}°  {:>10}",
                format_clock(s.hour),
                s.angles.altitude_deg,
                s.angles.azimuth_deg,
                format_power(to_watts(s.power))
            );
        }
        println!(
            "\nDaily energy: {}",
            format_energy(snapshot.financial.daily_energy_kwh())
        );
        return Ok(());
    };

    let csv = profile_csv(samples);

    if path == Path::new("-") {
        print!("{}", csv);
    } else {
        std::fs::write(path, csv)?;
        info!(path = %path.display(), samples = samples.len(), "Exported profile CSV");
        println!("✓ Exported {} samples to {}", samples.len(), path.display());
    }
    Ok(())
}

fn profile_csv(samples: &[ProfileSample]) -> String {
    let mut csv = String::from("hour,altitude_deg,azimuth_deg,power_w\n");
    for s in samples {
        // Writing into a String cannot fail.
        let _ = writeln!(
            csv,
            "{},{},{},{}",
            s.hour,
            s.angles.altitude_deg,
            s.angles.azimuth_deg,
            to_watts(s.power)
        );
    }
    csv
}

/// Prints one line per presentation.
struct TickPrinter {
    lines: u64,
}

impl PresentationSink for TickPrinter {
    fn present(&mut self, presentation: &Presentation) {
        let r = &presentation.readouts;
        println!(
            "[{:>3}] {}  {:>10}  eff {:>6}  sun {:>5.1}% / {:>5.1}%",
            self.lines,
            r.time,
            r.power,
            r.actual_efficiency,
            presentation.scene.sun_x_pct,
            presentation.scene.sun_y_pct
        );
        self.lines += 1;
    }
}

fn cmd_animate(inputs: &Inputs, ticks: u32, realtime: bool) -> AppResult<()> {
    let driver = AnimationDriver::default();
    let interval = driver.interval();
    let mut session = Session::with_parts(inputs.controls()?, driver, TickPrinter { lines: 0 });

    let mut now = Instant::now();
    session.start_animation(now);

    let mut applied = 0;
    while applied < ticks {
        if realtime {
            let wait = session
                .animation()
                .time_until_next_tick(Instant::now())
                .unwrap_or(Duration::ZERO);
            std::thread::sleep(wait);
            now = Instant::now();
        } else {
            now += interval;
        }
        applied += session.poll(now);
    }
    session.stop_animation();
    Ok(())
}

fn cmd_sweep(
    inputs: &Inputs,
    param: SweepParam,
    from: f64,
    to: f64,
    points: usize,
) -> AppResult<()> {
    let base = inputs.controls()?.read();
    let sweep = SweepDefinition::new(
        param.parameter(),
        param.to_model(from),
        param.to_model(to),
        points,
    )?;
    let results = run_sweep(&base, &sweep)?;
    info!(%sweep, "Sweep finished");

    println!("{}", sweep);
    println!(
        "{:>12}  {:>12}  {:>12}  {:>16}  {:>14}",
        "value", "daily", "peak", "monthly savings", "payback"
    );
    for p in &results {
        println!(
            "{:>12.3}  {:>12}  {:>12}  {:>16}  {:>14}",
            p.value,
            format_energy(p.financial.daily_energy_kwh()),
            format_power(p.peak_watts),
            format_money(p.financial.monthly_savings),
            format_payback(p.financial.payback)
        );
    }
    Ok(())
}

fn cmd_annual(inputs: &Inputs) -> AppResult<()> {
    let base = inputs.controls()?.read();
    let total = to_kwh(annual_energy(&base)?);
    println!("Annual energy: {}", format_energy(total));
    println!("Daily average: {}", format_energy(total / 365.0));
    println!(
        "Annual savings: {}",
        format_money(total * base.tariff_per_kwh)
    );
    Ok(())
}

fn cmd_best_angle(inputs: &Inputs, step: f64) -> AppResult<()> {
    let base = inputs.controls()?.read();
    let best = best_panel_angle(&base, step)?;
    println!("Best panel angle: {}°", best.value);
    println!(
        "  Daily energy: {}",
        format_energy(best.financial.daily_energy_kwh())
    );
    println!("  Payback:      {}", format_payback(best.financial.payback));
    Ok(())
}

fn cmd_scenario_init(path: &Path, name: String) -> AppResult<()> {
    let scenario = Scenario {
        name,
        ..Scenario::default()
    };
    save_scenario(path, &scenario)?;
    info!(path = %path.display(), "Initialized scenario");
    println!("✓ Wrote scenario '{}' to {}", scenario.name, path.display());
    Ok(())
}

fn cmd_scenario_validate(path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", path.display());
    let scenario = load_scenario(path)?;
    let p = &scenario.params;
    println!("✓ Scenario '{}' is valid", scenario.name);
    println!("  Day {} at {}", p.day_of_year, format_clock(p.time_of_day_h));
    println!(
        "  {} m² at {}°, {:.0}% cloud, latitude {}°",
        p.panel_area_m2,
        p.panel_angle_deg,
        p.cloud_cover * 100.0,
        p.site_latitude_deg
    );
    Ok(())
}
