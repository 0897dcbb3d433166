//! Error handling for splicetree
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`GuideError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with suggestions for CLI users
//!
//! # Propagation Policy
//!
//! Only [`GuideError::InvalidRoot`] is ever returned by the tree builder. The
//! other domain variants ([`GuideError::UnresolvedIngredient`],
//! [`GuideError::CyclicReference`], [`GuideError::PersistenceCorrupt`],
//! [`GuideError::DegenerateLayout`]) describe conditions that are absorbed
//! locally and represented as data: a placeholder node, an empty completion
//! set, a skipped layout pass. They exist so those conditions can be logged
//! and reported (for example by `splicetree check`) with one vocabulary.
//!
//! # Examples
//!
//! ```rust,no_run
//! use splicetree::core::{GuideError, ErrorContext, user_friendly_error};
//!
//! let error = GuideError::ItemNotFound { query: "Rainbow Seed".to_string() };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Run 'splicetree list' to see the available items");
//! context.display();
//!
//! let friendly = user_friendly_error(anyhow::anyhow!("plain failure"));
//! println!("{friendly}");
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for splicetree operations.
///
/// # Error Categories
///
/// ## Tree materialization
/// - [`InvalidRoot`] - the builder was handed no root record (fatal)
/// - [`UnresolvedIngredient`] - an ingredient name has no record (non-fatal)
/// - [`CyclicReference`] - an ingredient repeats on its own descent path (non-fatal)
///
/// ## State and layout
/// - [`PersistenceCorrupt`] - a stored completion payload could not be decoded (non-fatal)
/// - [`DegenerateLayout`] - a fit was requested before layout produced real sizes (non-fatal)
///
/// ## Dataset and configuration
/// - [`ItemNotFound`] - a user-supplied id or name matched no item
/// - [`DatasetParseError`] - the dataset file is not a valid item list
/// - [`ConfigError`] - the configuration file is unusable
///
/// [`InvalidRoot`]: GuideError::InvalidRoot
/// [`UnresolvedIngredient`]: GuideError::UnresolvedIngredient
/// [`CyclicReference`]: GuideError::CyclicReference
/// [`PersistenceCorrupt`]: GuideError::PersistenceCorrupt
/// [`DegenerateLayout`]: GuideError::DegenerateLayout
/// [`ItemNotFound`]: GuideError::ItemNotFound
/// [`DatasetParseError`]: GuideError::DatasetParseError
/// [`ConfigError`]: GuideError::ConfigError
#[derive(Error, Debug)]
pub enum GuideError {
    /// The tree builder was called without a root record.
    ///
    /// This is the only condition under which tree construction fails. It
    /// usually means the caller resolved a root id against an index that
    /// does not contain it.
    #[error("Invalid root: {reason}")]
    InvalidRoot {
        /// Why the root could not be used
        reason: String,
    },

    /// An ingredient name has no matching item record.
    #[error("Ingredient '{ingredient}' of '{parent}' has no matching item")]
    UnresolvedIngredient {
        /// Name of the item whose recipe references the ingredient
        parent: String,
        /// The ingredient name that did not resolve
        ingredient: String,
    },

    /// An ingredient refers back to an item already expanded on its path.
    #[error("Cyclic recipe reference: {chain}")]
    CyclicReference {
        /// Human-readable chain, e.g. `A → B → A`
        chain: String,
    },

    /// A persisted state payload could not be decoded.
    #[error("Stored state under '{key}' is corrupt: {reason}")]
    PersistenceCorrupt {
        /// Storage key of the payload
        key: String,
        /// Decoder message
        reason: String,
    },

    /// A fit was requested while a container or content dimension was zero.
    #[error("Layout is degenerate: container {container}, content {content}")]
    DegenerateLayout {
        /// Container size at the time of the request
        container: String,
        /// Content size at the time of the request
        content: String,
    },

    /// No item matched a user-supplied id or name.
    #[error("Item '{query}' not found")]
    ItemNotFound {
        /// The id or name that was looked up
        query: String,
    },

    /// The dataset file could not be parsed as a list of items.
    #[error("Invalid dataset in {file}")]
    DatasetParseError {
        /// Path of the dataset file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for GuideError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidRoot {
                reason,
            } => Self::InvalidRoot {
                reason: reason.clone(),
            },
            Self::UnresolvedIngredient {
                parent,
                ingredient,
            } => Self::UnresolvedIngredient {
                parent: parent.clone(),
                ingredient: ingredient.clone(),
            },
            Self::CyclicReference {
                chain,
            } => Self::CyclicReference {
                chain: chain.clone(),
            },
            Self::PersistenceCorrupt {
                key,
                reason,
            } => Self::PersistenceCorrupt {
                key: key.clone(),
                reason: reason.clone(),
            },
            Self::DegenerateLayout {
                container,
                content,
            } => Self::DegenerateLayout {
                container: container.clone(),
                content: content.clone(),
            },
            Self::ItemNotFound {
                query,
            } => Self::ItemNotFound {
                query: query.clone(),
            },
            Self::DatasetParseError {
                file,
                reason,
            } => Self::DatasetParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show the main message in red, optional details in
/// yellow and an optional suggestion in green.
///
/// ```rust,no_run
/// use splicetree::core::{GuideError, ErrorContext};
///
/// let context = ErrorContext::new(GuideError::ConfigError { message: "bad ratio".into() })
///     .with_details("fit_ratio must be in (0, 1]")
///     .with_suggestion("Edit ~/.splicetree/config.toml");
/// println!("{context}");
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: GuideError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`GuideError`].
    #[must_use]
    pub const fn new(error: GuideError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`GuideError`] variants get tailored suggestions; an [`ErrorContext`]
/// already attached to the chain is reused as-is; common I/O and parse
/// failures are mapped to the closest variant.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(guide_error) = error.downcast_ref::<GuideError>() {
        return match guide_error {
            GuideError::TomlError(toml_error) => toml_error_context(toml_error),
            GuideError::IoError(io_error) => io_error_context(io_error).unwrap_or_else(|| {
                ErrorContext::new(GuideError::Other {
                    message: format!("{error:#}"),
                })
            }),
            _ => create_error_context(guide_error.clone()),
        };
    }

    if let Some(context) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: context.error.clone(),
            suggestion: context.suggestion.clone(),
            details: context.details.clone(),
        };
    }

    if let Some(context) = error.downcast_ref::<std::io::Error>().and_then(io_error_context) {
        return context;
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return toml_error_context(toml_error);
    }

    ErrorContext::new(GuideError::Other {
        message: format!("{error:#}"),
    })
}

fn io_error_context(io_error: &std::io::Error) -> Option<ErrorContext> {
    match io_error.kind() {
        std::io::ErrorKind::PermissionDenied => Some(
            ErrorContext::new(GuideError::Other {
                message: format!("Permission denied: {io_error}"),
            })
            .with_suggestion("Check ownership of the state directory and dataset file"),
        ),
        std::io::ErrorKind::NotFound => Some(
            ErrorContext::new(GuideError::Other {
                message: format!("File not found: {io_error}"),
            })
            .with_suggestion("Pass --dataset <file> or set `dataset` in ~/.splicetree/config.toml"),
        ),
        _ => None,
    }
}

fn toml_error_context(toml_error: &toml::de::Error) -> ErrorContext {
    ErrorContext::new(GuideError::ConfigError {
        message: toml_error.to_string(),
    })
    .with_suggestion("Check the TOML syntax of your splicetree config file")
}

fn create_error_context(error: GuideError) -> ErrorContext {
    match &error {
        GuideError::InvalidRoot {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pick a root item id from 'splicetree list'"),
        GuideError::ItemNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'splicetree list' to see items that have splicing recipes"),
        GuideError::DatasetParseError {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion(
                    "The dataset must be a JSON array of {id, name, recipe|splicing, image} objects",
                )
        }
        GuideError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check ~/.splicetree/config.toml or the file passed with --config"),
        GuideError::PersistenceCorrupt {
            ..
        } => ErrorContext::new(error)
            .with_details("Corrupt state is treated as empty; no progress was lost by this run")
            .with_suggestion("Run 'splicetree reset <root>' to rewrite the stored state"),
        _ => ErrorContext::new(error),
    }
}
