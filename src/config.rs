//! Raw filter configuration and its normalization into the rule set the
//! filtering passes consume.
//!
//! Raw fields are `Option` throughout: an absent field turns the
//! corresponding pass into a no-op, while a present-but-empty field runs the
//! pass against nothing. The distinction is preserved all the way into
//! [`RuleSet`].

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::FilterError;
use crate::core::types::TypeExpr;
use crate::matching::TypeMatcher;

pub const CONFIG_FILE_NAME: &str = ".bindfilter.toml";

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub types: TypesConfig,
}

/// The `[filter]` section: user-declared filtering rules, still in surface
/// form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Types to filter out, either globally or per class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skiptypes: Option<RawSkipTypes>,

    /// Method name prefixes to remove, keyed by class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipmethods: Option<BTreeMap<String, Vec<String>>>,

    /// Attribute names to remove, keyed by class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipattrs: Option<BTreeMap<String, Vec<String>>>,

    /// Method names to keep exclusively, keyed by class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includemethods: Option<BTreeMap<String, Vec<String>>>,

    /// Remove anything whose types cannot be canonicalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipauto: Option<bool>,
}

/// `skiptypes` accepts a sequence (applied to every class) or a mapping
/// (applied per class). The shape is inspected exactly once, during
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSkipTypes {
    Global(Vec<TypeExpr>),
    PerClass(BTreeMap<String, Vec<TypeExpr>>),
}

/// The `[types]` section: the type universe for the table-backed
/// canonicalizer used by the auto-skip pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypesConfig {
    /// Extra known scalar type names
    #[serde(default)]
    pub known: Vec<String>,
    /// Extra known template heads
    #[serde(default)]
    pub templates: Vec<String>,
    /// Aliases resolved during canonicalization, e.g. `float = "float64"`
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl FilterConfig {
    /// Compile every raw type value into a matcher and produce the
    /// normalized rule set. This must fully succeed before any filtering
    /// pass runs; a single malformed pattern aborts the run.
    pub fn normalize(&self) -> Result<RuleSet, FilterError> {
        let skip_types = match &self.skiptypes {
            None => None,
            Some(RawSkipTypes::Global(exprs)) => Some(SkipTypes::Global(compile(exprs)?)),
            Some(RawSkipTypes::PerClass(by_class)) => {
                let mut compiled = BTreeMap::new();
                for (class, exprs) in by_class {
                    compiled.insert(class.clone(), compile(exprs)?);
                }
                Some(SkipTypes::PerClass(compiled))
            }
        };
        let include_methods = self.includemethods.as_ref().map(|by_class| {
            by_class
                .iter()
                .map(|(class, names)| (class.clone(), names.iter().cloned().collect()))
                .collect()
        });
        Ok(RuleSet {
            skip_types,
            skip_methods: self.skipmethods.clone(),
            skip_attrs: self.skipattrs.clone(),
            include_methods,
            skip_auto: self.skipauto.unwrap_or(false),
        })
    }
}

fn compile(exprs: &[TypeExpr]) -> Result<Vec<TypeMatcher>, FilterError> {
    exprs.iter().map(TypeMatcher::from_expr).collect()
}

/// Normalized, validated rules. `None` fields make the corresponding pass a
/// no-op.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub skip_types: Option<SkipTypes>,
    pub skip_methods: Option<BTreeMap<String, Vec<String>>>,
    pub skip_attrs: Option<BTreeMap<String, Vec<String>>>,
    pub include_methods: Option<BTreeMap<String, BTreeSet<String>>>,
    pub skip_auto: bool,
}

/// Compiled skip-type rules. Global and per-class forms are mutually
/// exclusive by construction.
#[derive(Debug, Clone)]
pub enum SkipTypes {
    Global(Vec<TypeMatcher>),
    PerClass(BTreeMap<String, Vec<TypeMatcher>>),
}

/// Read and parse a configuration file. A file that exists but cannot be
/// parsed is a hard error; emitting an unfiltered registry because a broken
/// config was silently ignored would defeat the tool.
pub fn load_from(path: &Path) -> Result<Config, FilterError> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    toml::from_str(&contents)
        .map_err(|e| FilterError::Config(format!("failed to parse {}: {}", path.display(), e)))
}

/// Search the current directory and its ancestors for a config file.
pub fn discover() -> Option<PathBuf> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("failed to get current directory: {}", e);
            return None;
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the discovered config, falling back to defaults (every pass a
/// no-op) when none exists.
pub fn load() -> Result<Config, FilterError> {
    match discover() {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            load_from(&path)
        }
        None => {
            log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            Ok(Config::default())
        }
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}
