use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use physics_visualizer::config::{ProjectileConfig, RefractionConfig};
use physics_visualizer::core::optics::NO_CRITICAL_ANGLE_DEG;
use physics_visualizer::core::plot;
use physics_visualizer::sim::projectile::ProjectileRun;
use physics_visualizer::sim::refraction::RefractionRun;
use physics_visualizer::{Result, SimError};

const DEFAULT_STEP_S: f32 = 1.0 / 60.0;
const MAX_FLIGHT_S: f32 = 60.0;

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Help,
    Projectile {
        inputs: Option<ProjectileConfig>,
        step_s: f32,
        plot: Option<PathBuf>,
    },
    Refraction {
        inputs: RefractionConfig,
        plot: Option<PathBuf>,
    },
}

fn invalid(message: impl Into<String>) -> SimError {
    SimError::InvalidArgument(message.into())
}

fn parse_f32(value: &str, label: &str) -> Result<f32> {
    let parsed = value
        .parse::<f32>()
        .map_err(|_| invalid(format!("Invalid {label}: '{value}'. Expected a number.")))?;
    if !parsed.is_finite() {
        return Err(invalid(format!("{label} must be a finite number.")));
    }
    Ok(parsed)
}

fn read_f32(prompt: &str) -> Result<f32> {
    loop {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Err(invalid("Input ended unexpectedly (EOF)."));
        }

        match line.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn get_projectile_from_user() -> Result<ProjectileConfig> {
    Ok(ProjectileConfig {
        cannon_angle_deg: read_f32("Cannon angle (degrees): ")?,
        launch_speed: read_f32("Launch speed (m/s): ")?,
        target_distance: read_f32("Target distance (m): ")?,
    })
}

/// Positional values plus the `--step` and `--plot` options, in any order.
struct Split<'a> {
    values: Vec<&'a str>,
    step_s: Option<f32>,
    plot: Option<PathBuf>,
}

fn split_options(args: &[String]) -> Result<Split<'_>> {
    let mut split = Split {
        values: Vec::new(),
        step_s: None,
        plot: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--step" => {
                let value = iter
                    .next()
                    .ok_or_else(|| invalid("--step needs a value in seconds."))?;
                let step = parse_f32(value, "step")?;
                if step <= 0.0 {
                    return Err(invalid("Step must be greater than zero."));
                }
                split.step_s = Some(step);
            }
            "--plot" => {
                let value = iter
                    .next()
                    .ok_or_else(|| invalid("--plot needs an output file."))?;
                split.plot = Some(PathBuf::from(value));
            }
            other => split.values.push(other),
        }
    }
    Ok(split)
}

fn parse_command(args: &[String]) -> Result<Command> {
    if args.len() <= 1 || args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Command::Help);
    }

    let split = split_options(&args[2..])?;
    match args[1].as_str() {
        "projectile" => {
            let inputs = match split.values.as_slice() {
                [] => None,
                [angle, speed, distance] => Some(ProjectileConfig {
                    cannon_angle_deg: parse_f32(angle, "angle")?,
                    launch_speed: parse_f32(speed, "speed")?,
                    target_distance: parse_f32(distance, "target distance")?,
                }),
                _ => {
                    return Err(invalid(
                        "Expected 0 or 3 arguments: <angle_deg> <speed> <target_distance>.",
                    ));
                }
            };
            Ok(Command::Projectile {
                inputs,
                step_s: split.step_s.unwrap_or(DEFAULT_STEP_S),
                plot: split.plot,
            })
        }
        "refraction" => {
            if split.step_s.is_some() {
                return Err(invalid("--step only applies to projectile runs."));
            }
            let [angle, n1, n2] = split.values.as_slice() else {
                return Err(invalid(
                    "Expected exactly 3 arguments: <incident_deg> <n1> <n2>.",
                ));
            };
            Ok(Command::Refraction {
                inputs: RefractionConfig {
                    incident_angle_deg: parse_f32(angle, "incident angle")?,
                    n1: parse_f32(n1, "n1")?,
                    n2: parse_f32(n2, "n2")?,
                },
                plot: split.plot,
            })
        }
        other => Err(invalid(format!("Unknown simulation '{other}'."))),
    }
}

/// Fires once and steps until the shell lands or `MAX_FLIGHT_S` has passed.
fn simulate_projectile(inputs: ProjectileConfig, step_s: f32) -> Result<ProjectileRun> {
    let mut run = ProjectileRun::new(inputs);
    run.fire();
    while run.is_running() && run.projectile().time < MAX_FLIGHT_S {
        run.step(step_s)?;
    }
    if run.is_running() {
        log::warn!("Projectile still airborne after {MAX_FLIGHT_S} s, stopping");
    }
    Ok(run)
}

fn report_projectile(run: &ProjectileRun) {
    println!(
        "\nCannon angle: {:.1} deg, launch speed: {:.1} m/s, target distance: {:.1} m",
        run.cannon_angle_deg(),
        run.launch_speed(),
        run.target_distance()
    );
    println!("Flight time: {:.4} s", run.projectile().time);
    println!("Max height: {:.4} m", run.max_height());
    println!("Total distance: {:.4} m", run.total_distance());
    println!("Predicted range: {:.4} m", run.predicted_range());
    match run.score() {
        Some(result) => {
            println!("Distance from target: {:.4} m", run.distance_from_target());
            let verdict = if result.hit { "Target Hit" } else { "Target Missed" };
            println!("{verdict}, Your point {:.2}", result.points);
        }
        None => println!("Projectile did not land."),
    }
}

fn report_refraction(run: &RefractionRun) {
    println!(
        "\nIncident angle: {:.2} deg, n1 = {:.3}, n2 = {:.3}",
        run.incident_angle_deg(),
        run.n1(),
        run.n2()
    );
    if run.is_total_internal_reflection() {
        println!(
            "Total internal reflection, reflection angle: {:.2} deg",
            run.reflection_angle_deg()
        );
    } else {
        println!("Angle of refraction: {:.2} deg", run.refraction_angle_deg());
    }
    let critical = run.critical_angle_deg();
    if run.n1() > run.n2() {
        println!("Critical angle: {critical:.2} deg");
    } else {
        println!("Critical angle: none (reported as {NO_CRITICAL_ANGLE_DEG:.0} deg)");
    }
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} projectile [<angle_deg> <speed> <target_distance>] [--step <s>] [--plot <file.svg>]");
    println!("  {program} refraction <incident_deg> <n1> <n2> [--plot <file.svg>]");
    println!("  {program} --help");
    println!();
    println!("Examples:");
    println!("  {program} projectile");
    println!("  {program} projectile 45 20 15 --plot shot.svg");
    println!("  {program} refraction 30 1.0 1.33");
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("physics_visualizer", String::as_str);

    match parse_command(&args)? {
        Command::Help => print_usage(program),
        Command::Projectile {
            inputs,
            step_s,
            plot: plot_path,
        } => {
            let inputs = match inputs {
                Some(inputs) => inputs,
                None => get_projectile_from_user()?,
            };
            let run = simulate_projectile(inputs, step_s)?;
            report_projectile(&run);
            if let Some(path) = plot_path {
                plot::export_trajectory(
                    &path,
                    run.path_points(),
                    run.projectile().start_position,
                    run.target().x,
                )?;
                log::info!("Trajectory written to {}", path.display());
            }
        }
        Command::Refraction {
            inputs,
            plot: plot_path,
        } => {
            let mut run = RefractionRun::new(inputs);
            run.recompute()?;
            report_refraction(&run);
            if let Some(path) = plot_path {
                plot::export_ray_diagram(&path, &run.segments())?;
                log::info!("Ray diagram written to {}", path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        print_usage("cargo run --bin physics_visualizer --");
        std::process::exit(1);
    }
}
