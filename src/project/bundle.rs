//! Bundle: build one stored index per dependency gem.

use std::path::PathBuf;

use tracing::{info, warn};

use super::{IndexHost, ProjectError, RegistryStore};

/// A resolved gem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemSpec {
    pub name: String,
    pub version: String,
    /// Root of the installed gem sources.
    pub full_gem_path: PathBuf,
}

impl GemSpec {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        full_gem_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            full_gem_path: full_gem_path.into(),
        }
    }

    /// `name-version`.
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// Store key of this gem's index.
    pub fn index_key(&self) -> String {
        self.full_name()
    }
}

/// Maps requested gem names to installed gems.
pub trait DependencyResolver {
    fn resolve(&self, name: &str) -> Option<GemSpec>;

    /// Every gem of the bundle, used when no names are requested.
    fn all(&self) -> Vec<GemSpec>;
}

/// Per-gem outcome of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GemOutcome {
    Built { key: String, objects: usize },
    Skipped { key: String },
    Unresolved { name: String },
    MissingSources { key: String },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Bundle {
    /// Rebuild indexes that already exist in the store.
    pub rebuild: bool,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(mut self, rebuild: bool) -> Self {
        self.rebuild = rebuild;
        self
    }

    /// Index every requested gem (the whole bundle when `gems` is empty).
    ///
    /// Gems that cannot be resolved or have no sources are reported and
    /// skipped; only store and registry failures abort.
    pub fn build<R, S>(
        &self,
        gems: &[&str],
        resolver: &R,
        store: &mut S,
    ) -> Result<Vec<GemOutcome>, ProjectError>
    where
        R: DependencyResolver + ?Sized,
        S: RegistryStore + ?Sized,
    {
        let mut outcomes = Vec::new();
        for spec in resolve_specs(gems, resolver, &mut outcomes) {
            let key = spec.index_key();
            if store.contains(&key) && !self.rebuild {
                warn!(gem = %spec.name, key = %key, "index already exists");
                outcomes.push(GemOutcome::Skipped { key });
                continue;
            }
            if !spec.full_gem_path.is_dir() {
                warn!(gem = %spec.name, path = %spec.full_gem_path.display(), "gem sources not found");
                outcomes.push(GemOutcome::MissingSources { key });
                continue;
            }

            info!(gem = %spec.full_name(), key = %key, "building index for gem");
            let mut host = IndexHost::new();
            host.load_paths([&spec.full_gem_path])?;
            store.save(&key, host.registry())?;
            outcomes.push(GemOutcome::Built {
                key,
                objects: host.registry().len(),
            });
        }
        Ok(outcomes)
    }

    /// `(name, key)` for every requested gem, without building anything.
    pub fn list<R>(&self, gems: &[&str], resolver: &R) -> Vec<(String, String)>
    where
        R: DependencyResolver + ?Sized,
    {
        resolve_specs(gems, resolver, &mut Vec::new())
            .into_iter()
            .map(|spec| {
                let key = spec.index_key();
                (spec.name, key)
            })
            .collect()
    }
}

fn resolve_specs<R>(gems: &[&str], resolver: &R, outcomes: &mut Vec<GemOutcome>) -> Vec<GemSpec>
where
    R: DependencyResolver + ?Sized,
{
    if gems.is_empty() {
        return resolver.all();
    }
    let mut specs = Vec::new();
    for &name in gems {
        match resolver.resolve(name) {
            Some(spec) => specs.push(spec),
            None => {
                warn!(gem = name, "could not be found in the bundle");
                outcomes.push(GemOutcome::Unresolved {
                    name: name.to_string(),
                });
            }
        }
    }
    specs
}
