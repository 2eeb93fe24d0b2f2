use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Workspace crates and the workspace crates each may depend on.
const LAYERS: &[(&str, &[&str])] = &[
    ("warband-domain", &[]),
    ("warband-shared", &["warband-domain"]),
    ("warband-engine", &["warband-domain", "warband-shared"]),
    ("warband-client", &["warband-domain", "warband-shared"]),
];

/// Runtime and transport crates the pure crates must not pull in.
const PURE_CRATES: &[&str] = &["warband-domain", "warband-shared"];
const IO_DEPENDENCIES: &[&str] = &["axum", "tokio", "reqwest", "tower", "tower-http"];

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    /// `null` for normal dependencies, "dev" or "build" otherwise
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = check_layers(&metadata.packages);
    for package in metadata
        .packages
        .iter()
        .filter(|p| PURE_CRATES.contains(&p.name.as_str()))
    {
        let src = package
            .manifest_path
            .parent()
            .map(|dir| dir.join("src"))
            .context("manifest has no parent directory")?;
        violations.extend(scan_imports(&package.name, &src)?);
    }

    if violations.is_empty() {
        println!("arch-check passed ({} crates)", metadata.packages.len());
        Ok(())
    } else {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        anyhow::bail!("arch-check found {} violation(s)", violations.len())
    }
}

/// Dependency edges that break the layering, normal dependencies only.
fn check_layers(packages: &[Package]) -> Vec<String> {
    let allowed: HashMap<&str, &[&str]> = LAYERS.iter().copied().collect();
    let mut violations = Vec::new();

    for package in packages {
        let Some(allowed_internal) = allowed.get(package.name.as_str()) else {
            continue;
        };
        let pure = PURE_CRATES.contains(&package.name.as_str());

        for dep in package.dependencies.iter().filter(|d| d.kind.is_none()) {
            let internal = allowed.contains_key(dep.name.as_str());
            if internal && !allowed_internal.contains(&dep.name.as_str()) {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
            if pure && IO_DEPENDENCIES.contains(&dep.name.as_str()) {
                violations.push(format!(
                    "{} must stay free of I/O crates but depends on {}",
                    package.name, dep.name
                ));
            }
        }
    }
    violations
}

/// `use` statements in non-test code that reach for I/O crates.
fn scan_imports(crate_name: &str, src: &Path) -> anyhow::Result<Vec<String>> {
    let pattern = regex_lite::Regex::new(r"^\s*use\s+(axum|tokio|reqwest|tower|tower_http)\b")
        .context("compiling import pattern")?;
    let mut violations = Vec::new();

    for file in rust_files(src)? {
        let contents = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        // Stop at the test module; tests may use anything.
        let production = contents
            .split("#[cfg(test)]")
            .next()
            .unwrap_or_default();
        for (line_no, line) in production.lines().enumerate() {
            if pattern.is_match(line) {
                violations.push(format!(
                    "{crate_name}: {}:{} imports an I/O crate",
                    file.display(),
                    line_no + 1
                ));
            }
        }
    }
    Ok(violations)
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in
            std::fs::read_dir(&dir).with_context(|| format!("listing {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
