use clap::{Parser, Subcommand};
use fc_case::{Case, CaseResult, Directory, FoamConfig, Toolchain};
use fc_dict::{DictFile, Node};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "foamcase")]
#[command(about = "foamcase - Inspect and drive OpenFOAM case directories", long_about = None)]
struct Cli {
    /// Tool configuration YAML (executable names, function-entry handling)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the case directories and their files
    Show {
        /// Path to the case directory
        case_path: PathBuf,
    },
    /// List the top-level keywords of a dictionary file
    Keys {
        /// Path to the dictionary file
        file: PathBuf,
    },
    /// Read an entry (or the whole file) from a dictionary file
    Get {
        /// Path to the dictionary file
        file: PathBuf,
        /// Dotted entry path (e.g., boundaryField.movingWall.type)
        entry: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write an entry in a dictionary file
    Set {
        /// Path to the dictionary file
        file: PathBuf,
        /// Dotted entry path
        entry: String,
        /// New value, written verbatim
        value: String,
    },
    /// Remove an entry from a dictionary file
    Delete {
        /// Path to the dictionary file
        file: PathBuf,
        /// Dotted entry path
        entry: String,
    },
    /// List the time directories of a case
    Times {
        /// Path to the case directory
        case_path: PathBuf,
    },
    /// Generate the mesh with blockMesh
    Mesh {
        /// Path to the case directory
        case_path: PathBuf,
    },
    /// Initialise fields with setFields
    Fields {
        /// Path to the case directory
        case_path: PathBuf,
    },
    /// Run the solver named in controlDict
    Run {
        /// Path to the case directory
        case_path: PathBuf,
    },
    /// Report whether the latest time reached endTime
    Finished {
        /// Path to the case directory
        case_path: PathBuf,
    },
    /// Remove all time directories except the initial state
    Clean {
        /// Path to the case directory
        case_path: PathBuf,
    },
    /// Copy a template case with foamCloneCase
    Clone {
        /// Path to the template case
        template: PathBuf,
        /// Destination directory
        destination: PathBuf,
        /// Replace an existing destination
        #[arg(long)]
        overwrite: bool,
    },
}

fn main() -> CaseResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => FoamConfig::load_yaml(path)?,
        None => FoamConfig::default(),
    };
    if FoamConfig::installation().is_none() {
        tracing::warn!("no OpenFOAM environment detected; solver tools must be on PATH");
    }
    let toolchain = Toolchain::system(config);

    match cli.command {
        Commands::Show { case_path } => cmd_show(&case_path, toolchain),
        Commands::Keys { file } => cmd_keys(&file, &toolchain),
        Commands::Get { file, entry, json } => cmd_get(&file, entry.as_deref(), json, &toolchain),
        Commands::Set { file, entry, value } => cmd_set(&file, &entry, &value, &toolchain),
        Commands::Delete { file, entry } => cmd_delete(&file, &entry, &toolchain),
        Commands::Times { case_path } => cmd_times(&case_path, toolchain),
        Commands::Mesh { case_path } => cmd_mesh(&case_path, toolchain),
        Commands::Fields { case_path } => cmd_fields(&case_path, toolchain),
        Commands::Run { case_path } => cmd_run(&case_path, toolchain),
        Commands::Finished { case_path } => cmd_finished(&case_path, toolchain),
        Commands::Clean { case_path } => cmd_clean(&case_path, toolchain),
        Commands::Clone {
            template,
            destination,
            overwrite,
        } => cmd_clone(&template, &destination, overwrite, toolchain),
    }
}

fn open_file(path: &Path, toolchain: &Toolchain) -> CaseResult<DictFile> {
    Ok(DictFile::open(path, toolchain.tool.clone())?)
}

fn cmd_show(case_path: &Path, toolchain: Toolchain) -> CaseResult<()> {
    let case = Case::open(case_path, toolchain)?;
    println!("Case: {} ({})", case.name(), case.path().display());

    match case.initial_state() {
        Some(dir) => print_directory("Initial state", dir),
        None => println!("\nInitial state: none"),
    }
    print_directory("Constant", case.constant());
    print_directory::<DictFile>("System", case.system());
    Ok(())
}

fn print_directory<F>(label: &str, dir: &Directory<F>) {
    println!("\n{} ({}):", label, dir.path().display());
    if dir.is_empty() {
        println!("  (no files)");
    }
    for name in dir.names() {
        println!("  {}", name);
    }
}

fn cmd_keys(file: &Path, toolchain: &Toolchain) -> CaseResult<()> {
    let file = open_file(file, toolchain)?;
    for key in file.keys()? {
        println!("{}", key);
    }
    Ok(())
}

fn cmd_get(file: &Path, entry: Option<&str>, json: bool, toolchain: &Toolchain) -> CaseResult<()> {
    let file = open_file(file, toolchain)?;
    let node = match entry {
        Some(entry) => file.get(entry)?,
        None => Node::Dict(file.read()?),
    };

    if json {
        let text = serde_json::to_string_pretty(&node).map_err(std::io::Error::from)?;
        println!("{}", text);
    } else {
        println!("{}", node);
    }
    Ok(())
}

fn cmd_set(file: &Path, entry: &str, value: &str, toolchain: &Toolchain) -> CaseResult<()> {
    let mut file = open_file(file, toolchain)?;
    file.set(entry, value)?;
    println!("✓ {}: {} = {}", file.name(), entry, value);
    Ok(())
}

fn cmd_delete(file: &Path, entry: &str, toolchain: &Toolchain) -> CaseResult<()> {
    let mut file = open_file(file, toolchain)?;
    file.delete(entry)?;
    println!("✓ {}: removed {}", file.name(), entry);
    Ok(())
}

fn cmd_times(case_path: &Path, toolchain: Toolchain) -> CaseResult<()> {
    let case = Case::open(case_path, toolchain)?;
    let times = case.list_times()?;

    if times.is_empty() {
        println!("No time directories found in case: {}", case.name());
    } else {
        println!("Time directories in case '{}':", case.name());
        for t in times {
            println!("  {}", t);
        }
    }
    Ok(())
}

fn cmd_mesh(case_path: &Path, toolchain: Toolchain) -> CaseResult<()> {
    let case = Case::open(case_path, toolchain)?;
    println!("Generating mesh for case: {}", case.name());
    case.block_mesh()?;
    println!("✓ Mesh generated");
    Ok(())
}

fn cmd_fields(case_path: &Path, toolchain: Toolchain) -> CaseResult<()> {
    let case = Case::open(case_path, toolchain)?;
    println!("Initialising fields for case: {}", case.name());
    case.set_fields()?;
    println!("✓ Fields initialised");
    Ok(())
}

fn cmd_run(case_path: &Path, toolchain: Toolchain) -> CaseResult<()> {
    let case = Case::open(case_path, toolchain)?;
    let application = case.system().control_dict().value("application")?;
    println!("Running {} for case: {}", application, case.name());

    let started = Instant::now();
    case.run_application()?;
    println!(
        "✓ Solver finished in {:.1}s",
        started.elapsed().as_secs_f64()
    );

    if let Some(latest) = case.latest_time()? {
        println!("  Latest time: {}", latest);
    }
    Ok(())
}

fn cmd_finished(case_path: &Path, toolchain: Toolchain) -> CaseResult<()> {
    let case = Case::open(case_path, toolchain)?;
    if case.is_finished()? {
        println!("✓ Case '{}' reached endTime", case.name());
    } else {
        println!("Case '{}' has not reached endTime", case.name());
    }
    Ok(())
}

fn cmd_clean(case_path: &Path, toolchain: Toolchain) -> CaseResult<()> {
    let case = Case::open(case_path, toolchain)?;
    case.remove_time_dirs()?;
    println!("✓ Removed time directories from case: {}", case.name());
    Ok(())
}

fn cmd_clone(
    template: &Path,
    destination: &Path,
    overwrite: bool,
    toolchain: Toolchain,
) -> CaseResult<()> {
    let template = Case::open(template, toolchain)?;
    println!(
        "Cloning case '{}' to {}",
        template.name(),
        destination.display()
    );
    let clone = Case::clone_from_template(&template, destination, overwrite)?;
    println!("✓ Cloned case: {}", clone.path().display());
    Ok(())
}
