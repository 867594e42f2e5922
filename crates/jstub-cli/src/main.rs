use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jstub_archive::{Archive, ArchiveKind, ClassEntry};
use jstub_classfile::{try_generate, ClassDescriptor, VirtualSource};
use jstub_config::{JstubConfig, StubFilter};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jstub", version, about = "Java stub sources from compiled classes")]
struct Cli {
    /// Path to a `jstub.toml` (defaults to discovery in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate stubs for class files, class directories or JARs
    Stub(StubArgs),
    /// Print the decoded metadata of a single class file
    Describe(DescribeArgs),
}

#[derive(Args)]
struct StubArgs {
    /// `.class` files, exploded class directories or JARs
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Write `<package path>/<Class>.java` files under this directory
    #[arg(long)]
    out: Option<PathBuf>,

    /// Emit JSON suitable for tooling
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DescribeArgs {
    class_file: PathBuf,

    /// Emit JSON suitable for tooling
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Stub(args) => {
            let filter = config.stubs.filter()?;
            let report = generate_stubs(&args.paths, &filter, args.out.as_deref())?;
            if args.json {
                print_json(&report.stubs)?;
            } else if args.out.is_some() {
                for stub in &report.stubs {
                    if let Some(written) = &stub.written {
                        println!("{}", written.display());
                    }
                }
            } else {
                for stub in &report.stubs {
                    println!("{}", stub.text);
                }
            }
            tracing::info!(
                target: "jstub.cli",
                generated = report.stubs.len(),
                failed = report.failed,
                skipped = report.skipped,
                "stub generation finished"
            );
            Ok(if report.failed > 0 { 1 } else { 0 })
        }
        Command::Describe(args) => {
            let bytes = std::fs::read(&args.class_file)
                .with_context(|| format!("failed to read {}", args.class_file.display()))?;
            let (class, _) = try_generate(&bytes)
                .with_context(|| format!("failed to parse {}", args.class_file.display()))?;
            if args.json {
                print_json(&class)?;
            } else {
                print_description(&class);
            }
            Ok(0)
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<JstubConfig> {
    let (config, source, diagnostics) = match explicit {
        Some(path) => {
            let (config, diagnostics) = JstubConfig::load_from_path_with_diagnostics(path)?;
            (config, Some(path.to_path_buf()), diagnostics)
        }
        None => {
            let cwd = std::env::current_dir().context("failed to determine current directory")?;
            jstub_config::load_for_dir(&cwd)?
        }
    };

    jstub_config::init_tracing(&config.logging);

    if let Some(source) = &source {
        tracing::debug!(target: "jstub.cli", path = %source.display(), "loaded config");
    }
    for key in &diagnostics.unknown_keys {
        tracing::warn!(target: "jstub.cli", key = %key, "unknown config key");
    }
    for warning in &diagnostics.warnings {
        tracing::warn!(target: "jstub.cli", "{warning}");
    }

    Ok(config)
}

#[derive(Debug, Serialize)]
struct StubRecord {
    /// Where the class bytes came from (`lib.jar!/com/example/Foo.class`).
    path: String,
    package: String,
    class: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    written: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct StubReport {
    stubs: Vec<StubRecord>,
    failed: usize,
    skipped: usize,
}

fn generate_stubs(
    paths: &[PathBuf],
    filter: &StubFilter,
    out: Option<&Path>,
) -> Result<StubReport> {
    let mut report = StubReport::default();

    for input in paths {
        let archive = Archive::new(input);
        let entries = archive
            .class_entries()
            .with_context(|| format!("failed to read classes from {}", input.display()))?;

        for entry in entries {
            let origin = entry_origin(&archive, &entry);
            let (class, text) = match try_generate(&entry.bytes) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::warn!(
                        target: "jstub.cli",
                        path = %origin,
                        error = %err,
                        "failed to parse classfile; skipping"
                    );
                    report.failed += 1;
                    continue;
                }
            };

            if !filter.allows(&class.internal_name) {
                tracing::debug!(
                    target: "jstub.cli",
                    class = %class.internal_name,
                    "excluded by config"
                );
                report.skipped += 1;
                continue;
            }

            let source = VirtualSource {
                package_name: class.package_name().unwrap_or_default(),
                class_name: class.simple_name().to_string(),
                text,
            };
            let written = match out {
                Some(out) => Some(write_stub(out, &source)?),
                None => None,
            };
            report.stubs.push(StubRecord {
                path: origin,
                package: source.package_name,
                class: source.class_name,
                text: source.text,
                written,
            });
        }
    }

    Ok(report)
}

fn entry_origin(archive: &Archive, entry: &ClassEntry) -> String {
    match archive.kind() {
        ArchiveKind::ClassFile => archive.path().display().to_string(),
        ArchiveKind::ClassDir => archive.path().join(&entry.name).display().to_string(),
        ArchiveKind::Jar => format!("{}!/{}", archive.path().display(), entry.name),
    }
}

fn write_stub(out: &Path, source: &VirtualSource) -> Result<PathBuf> {
    let path = out.join(source.relative_path());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, &source.text)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn print_description(class: &ClassDescriptor) {
    println!("class: {}", class.binary_name());
    println!("  kind: {}", class.kind().keyword());
    println!("  access: {}", class.access.modifiers().join(" "));
    if let Some(super_class) = &class.super_class {
        println!("  super: {super_class}");
    }
    for interface in &class.interfaces {
        println!("  interface: {interface}");
    }
    println!("fields: {}", class.fields.len());
    for field in &class.fields {
        println!("  {} {}", field.name, field.descriptor);
    }
    println!("methods: {}", class.methods.len());
    for method in &class.methods {
        println!("  {}{}", method.name, method.descriptor);
    }
}
