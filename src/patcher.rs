use std::{fmt::Display, path::PathBuf};

use compact_str::CompactString;
use console::style;
use nodejs_semver::{Range, Version};
use serde_json::Value;

use crate::{error::PatchError, log, manifest::{manifest_path, Manifest, Section}, targets::{TargetPair, Targets}, CliOpts};

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub section: Section,
    pub package: CompactString,
    pub previous: Value,
    pub version: Version,
}

impl Change {
    pub fn detailed(&self) -> String {
        format!("{}.{}: {} -> {}", self.section, self.package, self.previous, self.version)
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.package, self.version)
    }
}

#[derive(Debug, PartialEq)]
pub enum PatchOutcome {
    Skipped { path: PathBuf },
    Patched { changes: Vec<Change>, written: bool },
    NoPatchNeeded,
}

impl Display for PatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchOutcome::Skipped { path } => write!(f,
                "Next package.json not found at {}; {} patch.", path.display(), style("skipping").yellow()),
            PatchOutcome::Patched { changes, written } => {
                if *written {
                    write!(f, "{} Next dependencies: ", style("Patched").green())?;
                } else {
                    write!(f, "{} Next dependencies (dry run, nothing written): ", style("Would patch").cyan())?;
                }

                for (i, change) in changes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{change}")?;
                }

                Ok(())
            },
            PatchOutcome::NoPatchNeeded =>
                f.write_str("No patch needed; Next already uses patched versions or does not declare them."),
        }
    }
}

pub fn patch(opts: &CliOpts, targets: &Targets) -> Result<PatchOutcome, PatchError> {
    let path = manifest_path(&opts.project_dir);

    if !path.exists() {
        return Ok(PatchOutcome::Skipped { path })
    }

    let mut manifest = Manifest::load(&path)?;

    if opts.verbose {
        match manifest.package() {
            Some((name, version)) => log(format!("checking {} targets against {name}@{version}", targets.len())),
            None => log(format!("checking {} targets against {}", targets.len(), path.display())),
        }
    }

    let changes = apply(opts, &mut manifest, targets);

    if changes.is_empty() {
        return Ok(PatchOutcome::NoPatchNeeded)
    }

    if opts.verbose {
        for change in &changes {
            log(change.detailed());
        }
    }

    if opts.dry_run {
        return Ok(PatchOutcome::Patched { changes, written: false })
    }

    manifest.write(&path)
        .map_err(|e| PatchError::WritingManifest(path.clone(), e))?;

    Ok(PatchOutcome::Patched { changes, written: true })
}

/// Rewrites every declared target whose specifier differs from the pinned version.
/// Keys are only ever overwritten, never inserted or removed.
pub fn apply(opts: &CliOpts, manifest: &mut Manifest, targets: &Targets) -> Vec<Change> {
    let mut changes = Vec::new();

    for section in Section::ALL {
        let Some(deps) = manifest.section_mut(section) else {
            if opts.verbose {
                log(format!("{section}: not present"));
            }

            continue
        };

        for target in targets.iter() {
            let Some(current) = deps.get_mut(target.package.as_str()) else {
                if opts.verbose {
                    log(format!("{section}: {} not declared", target.package));
                }

                continue
            };

            if !is_declared(current) {
                if opts.verbose {
                    log(format!("{section}: {} has an empty specifier", target.package));
                }

                continue
            }

            let desired = target.version.to_string();

            if current.as_str() == Some(desired.as_str()) {
                if opts.verbose {
                    log(format!("{section}: {} already at {desired}", target.package));
                }

                continue
            }

            if opts.verbose {
                log(format!("{section}: {}", describe_previous(current, target)));
            }

            let previous = std::mem::replace(current, Value::String(desired));

            changes.push(Change {
                section,
                package: target.package.clone(),
                previous,
                version: target.version.clone(),
            });
        }
    }

    changes
}

/// `null`, `false`, `0` and `""` leave an entry alone, like any other falsy value.
fn is_declared(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn describe_previous(current: &Value, target: &TargetPair) -> String {
    let Some(spec) = current.as_str() else {
        return format!("{} has non-string specifier {current}", target.package)
    };

    match Range::parse(spec) {
        Ok(range) if range.satisfies(&target.version) =>
            format!("{} range {spec} already admits {}", target.package, target.version),
        Ok(_) =>
            format!("{} range {spec} excludes {}", target.package, target.version),
        Err(_) =>
            format!("{} specifier {spec} is not a version range", target.package),
    }
}
