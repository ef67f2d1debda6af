//! Concurrent conversion of planned fonts, one worker task per output folder.
//!
//! Output names are reserved with a check-then-write probe, which is only
//! safe with a single writer per directory. Plans are grouped by the folder
//! their family resolves to ([`folder_key`]), and each group runs
//! sequentially on one task, so no two workers ever reserve in the same
//! output directory. The archive directory is shared by all groups; moves
//! into it go through one lock.

use std::{
    fs::{create_dir_all, remove_file},
    io,
    path::{Path, PathBuf},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    thread::available_parallelism,
};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info, warn};
use rayon::{ThreadPoolBuilder, prelude::*};

use crate::{
    config::RESERVED_CORES,
    error::{self, ConvertError},
    io::move_file,
    layout::{DirectoryLayout, folder_key},
    plan::ConversionPlan,
    reserve::{reserve_destination_path, reserve_output_path},
    transform::FontTransform,
};

/// A source that did not make it into the library.
#[derive(Debug)]
pub struct Failure {
    pub source: PathBuf,
    pub error: ConvertError,
}

/// Terminal state of one plan.
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted(PathBuf),
    Failed(Failure),
}

/// Everything a run produced. Ordering across families is unspecified.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub successes: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl ConversionReport {
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: ConversionOutcome) {
        match outcome {
            ConversionOutcome::Converted(path) => self.successes.push(path),
            ConversionOutcome::Failed(failure) => self.failures.push(failure),
        }
    }
}

impl FromIterator<ConversionOutcome> for ConversionReport {
    fn from_iter<I: IntoIterator<Item = ConversionOutcome>>(iter: I) -> Self {
        let mut report = Self::default();
        for outcome in iter {
            report.record(outcome);
        }
        report
    }
}

/// Default pool size: all cores but [`RESERVED_CORES`], at least one.
pub fn default_jobs() -> usize {
    available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(RESERVED_CORES)
        .max(1)
}

/// Plans grouped by output folder key: groups in first-seen order, plans in
/// input order. Families that alias one folder land in one group.
pub fn group_by_folder(plans: &[ConversionPlan]) -> IndexMap<String, Vec<&ConversionPlan>> {
    let mut groups: IndexMap<String, Vec<&ConversionPlan>> = IndexMap::new();
    for plan in plans {
        groups.entry(folder_key(&plan.family)).or_default().push(plan);
    }
    groups
}

struct RunState<'a> {
    layout: &'a DirectoryLayout,
    archive_lock: Mutex<()>,
    done: AtomicUsize,
    total: usize,
}

/// Runs plans through a [`FontTransform`] and archives converted sources.
#[derive(Debug, Clone)]
pub struct Converter<T> {
    transform: T,
    jobs: Option<usize>,
}

impl<T: FontTransform> Converter<T> {
    pub fn new(transform: T) -> Self {
        Self { transform, jobs: None }
    }

    /// Upper bound on concurrent folder tasks; defaults to [`default_jobs`].
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Pool size for a run over `groups` folder groups.
    pub fn worker_count(&self, groups: usize) -> usize {
        self.jobs.unwrap_or_else(default_jobs).min(groups).max(1)
    }

    /// Convert every plan. Per-item problems end up in the report's failures;
    /// only setup problems (directories, thread pool) return an error.
    pub fn convert(
        &self,
        layout: &DirectoryLayout,
        plans: &[ConversionPlan],
    ) -> Result<ConversionReport> {
        layout.ensure()?;

        let groups: Vec<_> = group_by_folder(plans).into_iter().collect();
        if groups.is_empty() {
            return Ok(ConversionReport::default());
        }

        let workers = self.worker_count(groups.len());
        debug!("converting {} fonts in {} folders on {workers} workers", plans.len(), groups.len());
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fontshelf-convert-{i}"))
            .build()
            .context("Failed to build worker pool")?;

        let state = RunState {
            layout,
            archive_lock: Mutex::new(()),
            done: AtomicUsize::new(0),
            total: plans.len(),
        };

        // Each group task hands back its own outcomes; they are merged here
        // once every task has finished.
        let per_group: Vec<Vec<ConversionOutcome>> = pool.install(|| {
            groups
                .into_par_iter()
                .map(|(key, plans)| self.convert_group(&state, &key, &plans))
                .collect()
        });

        Ok(per_group.into_iter().flatten().collect())
    }

    fn convert_group(
        &self,
        state: &RunState<'_>,
        key: &str,
        plans: &[&ConversionPlan],
    ) -> Vec<ConversionOutcome> {
        debug!("folder {key:?}: {} fonts", plans.len());
        plans
            .iter()
            .map(|plan| {
                let outcome = self.convert_one(state, plan);
                let done = state.done.fetch_add(1, Ordering::Relaxed) + 1;
                match &outcome {
                    ConversionOutcome::Converted(output) => info!(
                        "[{done}/{}] {} -> {}",
                        state.total,
                        plan.source_name,
                        output.display()
                    ),
                    ConversionOutcome::Failed(failure) => warn!(
                        "[{done}/{}] {} failed ({}): {}",
                        state.total,
                        plan.source_name,
                        failure.error.kind(),
                        failure.error
                    ),
                }
                outcome
            })
            .collect()
    }

    fn convert_one(&self, state: &RunState<'_>, plan: &ConversionPlan) -> ConversionOutcome {
        let source = state.layout.input_path(&plan.source_name);
        match self.try_convert(state, plan, &source) {
            Ok(output) => ConversionOutcome::Converted(output),
            Err(error) => ConversionOutcome::Failed(Failure { source, error }),
        }
    }

    fn try_convert(
        &self,
        state: &RunState<'_>,
        plan: &ConversionPlan,
        source: &Path,
    ) -> error::Result<PathBuf> {
        if !source.exists() {
            return Err(ConvertError::SourceMissing);
        }

        let family_dir = state.layout.family_dir(&plan.family);
        create_dir_all(&family_dir).map_err(|e| {
            ConvertError::io(format!("create directory {}", family_dir.display()), e)
        })?;

        let output = reserve_output_path(&family_dir, &plan.output_name);
        debug!("{}: reserved {}", plan.source_name, output.display());

        if let Err(err) = self.transform.transform(source, &output) {
            discard_partial(&output);
            return Err(ConvertError::subset(&err));
        }

        match archive_source(source, &state.layout.archive_dir, &state.archive_lock) {
            Ok(destination) => {
                debug!("{}: archived to {}", plan.source_name, destination.display());
                Ok(output)
            }
            Err(err) => Err(ConvertError::Archive { output, source: err }),
        }
    }
}

/// Remove whatever a failed transform left at the reserved path.
fn discard_partial(output: &Path) {
    if output.exists()
        && let Err(err) = remove_file(output)
    {
        warn!("could not remove partial output {}: {err}", output.display());
    }
}

fn archive_source(source: &Path, archive_dir: &Path, lock: &Mutex<()>) -> io::Result<PathBuf> {
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
    let destination = reserve_destination_path(source, archive_dir);
    move_file(source, &destination)?;
    Ok(destination)
}
