// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod filters;
pub mod io;
pub mod matching;
pub mod resolve;

// Re-export commonly used types
pub use crate::core::errors::{FilterError, UnknownType};
pub use crate::core::types::{Qualifier, TypeDescriptor, TypeExpr};
pub use crate::core::{ClassDesc, DescEntry, FuncDesc, MethodSig, Param, Registry};

pub use crate::config::{Config, FilterConfig, RawSkipTypes, RuleSet, SkipTypes, TypesConfig};
pub use crate::filters::apply_filters;
pub use crate::matching::{MatchMode, TypeMatcher};
pub use crate::resolve::{Canonicalize, KnownTypeResolver};
