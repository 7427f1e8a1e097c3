/*!
 * Layered glob pattern rules for path filtering
 *
 * Compiles the default exclude table plus user-supplied globs into a pure
 * decision function over relative paths. Default excludes always win; in
 * exclude mode user globs subtract from an include-everything baseline, in
 * include mode they define the only included files.
 */

use glob_match::glob_match;
use once_cell::sync::Lazy;

use crate::config::{IngestConfig, PatternMode};
use crate::error::{DigestError, Result};

/// Default patterns excluded from every ingestion
///
/// Immutable table injected into every matcher at construction, so concurrent
/// calls cannot observe one caller's customization.
pub static DEFAULT_EXCLUDES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // OS files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Dependencies
        "node_modules",
        "bower_components",
        "vendor",
        "package-lock.json",
        "yarn.lock",
        // Build output
        "dist",
        "build",
        "out",
        "*.min.js",
        "*.min.css",
        // Python
        "__pycache__",
        ".pytest_cache",
        "venv",
        ".venv",
        "*.pyc",
        "*.pyo",
        "*.egg-info",
        // Rust
        "target",
        "Cargo.lock",
        // IDEs
        ".idea",
        ".vscode",
        "*.swp",
        "*.swo",
        // Caches
        ".cache",
        ".sass-cache",
        ".eslintcache",
        // JVM
        "*.class",
        "*.jar",
        ".gradle",
        // Binary blobs and archives
        "*.sqlite",
        "*.sqlite3",
        "*.db",
        "*.zip",
        "*.tar.gz",
        "*.tgz",
        "*.rar",
        "*.so",
        "*.dylib",
        "*.dll",
        "*.exe",
    ]
});

/// Origin of a compiled rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    /// Built-in default exclude
    Default,
    /// Supplied by the caller
    User,
}

/// Why a path was excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludeReason {
    /// Matched a built-in default exclude
    DefaultPattern,
    /// Matched a user exclude glob
    UserPattern,
    /// No user include glob matched
    NotIncluded,
}

impl ExcludeReason {
    /// Human-readable reason recorded on the node
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultPattern => "default pattern",
            Self::UserPattern => "exclude pattern",
            Self::NotIncluded => "not matched by include patterns",
        }
    }
}

/// Outcome of a pattern decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the entry
    Include,
    /// Filter the entry out
    Exclude(ExcludeReason),
}

impl Decision {
    /// Whether the decision keeps the entry
    pub fn is_include(&self) -> bool {
        matches!(self, Self::Include)
    }
}

/// One compiled glob rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Normalized glob
    pub glob: String,
    /// Where the rule came from
    pub source: RuleSource,
    /// Trailing `/` in the original pattern: matches directories only
    dir_only: bool,
}

impl PatternRule {
    fn compile(pattern: &str, source: RuleSource) -> Result<Self> {
        let raw = pattern.trim().replace('\\', "/");
        let dir_only = raw.ends_with('/');

        // Drop `.`/`..` components so no pattern can reach outside the root.
        let components: Vec<&str> = raw
            .split('/')
            .filter(|c| !c.is_empty() && *c != "." && *c != "..")
            .collect();
        let glob = components.join("/");

        if glob.is_empty() {
            return Err(DigestError::PatternSyntax {
                pattern: pattern.to_string(),
                reason: "empty after normalization".to_string(),
            });
        }

        Ok(Self {
            glob,
            source,
            dir_only,
        })
    }

    /// Match against the full relative path or the bare file name
    fn matches(&self, relative_path: &str, name: &str, is_directory: bool) -> bool {
        if self.dir_only && !is_directory {
            return false;
        }
        glob_match(&self.glob, relative_path) || glob_match(&self.glob, name)
    }
}

/// Compiled include/exclude rule set with a pure decision function
pub struct PatternMatcher {
    mode: PatternMode,
    defaults: Vec<PatternRule>,
    user: Vec<PatternRule>,
}

impl PatternMatcher {
    /// Compile the default table plus the configured user globs
    ///
    /// Fails with [`DigestError::PatternSyntax`] before any traversal starts.
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let defaults = DEFAULT_EXCLUDES
            .iter()
            .map(|p| PatternRule::compile(p, RuleSource::Default))
            .collect::<Result<Vec<_>>>()?;

        let user = config
            .patterns
            .iter()
            .map(|p| PatternRule::compile(p, RuleSource::User))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            mode: config.pattern_mode,
            defaults,
            user,
        })
    }

    /// Decide whether a relative path is kept
    ///
    /// The root itself (`.` or empty) is never excluded. Directories in
    /// include mode are kept for traversal so nested matches can still be
    /// found; files and symlinks need a positive match.
    pub fn decide(&self, relative_path: &str, is_directory: bool) -> Decision {
        if relative_path.is_empty() || relative_path == "." {
            return Decision::Include;
        }

        let name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or(relative_path);

        if self
            .defaults
            .iter()
            .any(|r| r.matches(relative_path, name, is_directory))
        {
            return Decision::Exclude(ExcludeReason::DefaultPattern);
        }

        let user_match = self
            .user
            .iter()
            .any(|r| r.matches(relative_path, name, is_directory));

        match self.mode {
            PatternMode::Exclude => {
                if user_match {
                    Decision::Exclude(ExcludeReason::UserPattern)
                } else {
                    Decision::Include
                }
            }
            PatternMode::Include => {
                if is_directory || user_match {
                    Decision::Include
                } else {
                    Decision::Exclude(ExcludeReason::NotIncluded)
                }
            }
        }
    }
}
