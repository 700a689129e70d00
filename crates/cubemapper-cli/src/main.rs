use clap::Parser;
use cubemapper_cli::{ensure_parent_dir, face_output_path, parse_sample_mode};
use cubemapper_core::{GpuContext, RenderOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cubemapper")]
#[command(version, about = "Equirectangular panorama to cubemap converter", long_about = None)]
struct Cli {
    /// Input equirectangular image path
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output cubemap image path; face suffixes like "_neg_x" or "_pos_y"
    /// are appended to the file name
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Edge size of the output cubemap faces in pixels
    #[arg(short, long, value_name = "PIXELS",
          value_parser = clap::value_parser!(u32).range(1..=16384))]
    size: u32,

    /// Sampling mode: "color" or "normal_map"
    #[arg(long, value_name = "MODE")]
    mode: Option<String>,

    /// Multisample level; the sampling grid is a square with a width of
    /// (level * 2 + 1). Use -1 to derive the level from the in/out texture
    /// size ratio
    #[arg(long, value_name = "LEVEL",
          value_parser = clap::value_parser!(i32).range(-1..=100))]
    multisample: Option<i32>,

    /// Print extra diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    cubemapper_core::config::set_verbose(cli.verbose);
    cubemapper_core::config::log_config_usage();

    // Acquire the GPU for the lifetime of the process, before anything
    // argument-dependent can run
    let ctx = timed_step("Initializing GPU...", || {
        GpuContext::new().map_err(|e| e.to_string())
    })?;
    let info = ctx.adapter_info();
    println!("  Device: {} ({:?}, {:?})", info.name, info.device_type, info.backend);

    let defaults = &cubemapper_core::config::config_handle().config.defaults;
    let mode = match cli.mode.as_deref() {
        Some(name) => parse_sample_mode(name)?,
        None => defaults.mode,
    };
    let multisample = cli.multisample.unwrap_or(defaults.multisample);

    let decoded = timed_step("Loading equirec image...", || {
        cubemapper_core::decoders::decode_image(&cli.input)
    })?;
    println!(
        "  Image: {}x{}, {} channels",
        decoded.width, decoded.height, decoded.channels
    );

    let level = cubemapper_core::resolve_multisample_level(
        multisample,
        decoded.width,
        decoded.height,
        cli.size,
    );
    println!("Multisample level: {}", level);

    ensure_parent_dir(&cli.output)?;

    let options = RenderOptions {
        cubemap_size: cli.size,
        mode,
        multisample,
    };

    println!("Rendering cubemap faces...");
    let started = Instant::now();
    cubemapper_core::render_cubemap(&ctx, &decoded, &options, |face, image| {
        let path = face_output_path(&cli.output, face)?;
        cubemapper_core::exporters::export_face(&image, &path)?;
        println!(
            "  [{}/6] {} -> {}",
            face.index() + 1,
            face.suffix(),
            path.display()
        );
        Ok(())
    })?;

    println!("Done! 6 faces written in {:.2}s", started.elapsed().as_secs_f64());
    Ok(())
}

/// Run a step with its timing printed on one line.
fn timed_step<T>(label: &str, f: impl FnOnce() -> Result<T, String>) -> Result<T, String> {
    print!("{}", label);
    std::io::stdout().flush().ok();
    let start = Instant::now();
    let value = f()?;
    println!(" {:.2}s", start.elapsed().as_secs_f64());
    Ok(value)
}
