//! Centralized error handling for climlib
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`ClimlibError`]. Foreign errors (netcdf, XML, HTTP, JSON, TOML) are wrapped so
//! callers can still reach the underlying cause through `source()`.

use std::fmt;

/// Main error type for climlib operations
#[derive(Debug)]
pub enum ClimlibError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Malformed CDML / XML documents
    XmlError(quick_xml::Error),

    /// Transport or status errors talking to an ESGF node
    HttpError(reqwest::Error),

    /// Malformed JSON payloads
    JsonError(serde_json::Error),

    /// Configuration file could not be parsed
    ConfigError(toml::de::Error),

    /// Archive search pattern could not be compiled
    PatternError(glob::PatternError),

    /// A `creation_date` attribute that is neither ISO nor textual
    InvalidDate { value: String },

    /// Archive file name does not follow the dotted CMIP layout
    InvalidFileName { path: String, reason: String },

    /// Version component is neither `latest` nor `v<digits>`
    InvalidVersion { version: String },

    /// Unknown trimming criterion name
    UnknownCriterion { name: String },

    /// File extension not handled by the metadata reader
    UnsupportedFormat { path: String },

    /// An archive search was requested without any constraint
    MissingSearchCriteria,

    /// A remote response lacked a required field
    MissingField { context: String, field: String },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Generic error for ad-hoc messages
    Generic(String),
}

impl fmt::Display for ClimlibError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClimlibError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            ClimlibError::IoError(e) => write!(f, "I/O error: {}", e),
            ClimlibError::XmlError(e) => write!(f, "XML error: {}", e),
            ClimlibError::HttpError(e) => write!(f, "HTTP error: {}", e),
            ClimlibError::JsonError(e) => write!(f, "JSON error: {}", e),
            ClimlibError::ConfigError(e) => write!(f, "Configuration error: {}", e),
            ClimlibError::PatternError(e) => write!(f, "Invalid search pattern: {}", e),
            ClimlibError::InvalidDate { value } => {
                write!(f, "Unrecognised creation date '{}'", value)
            }
            ClimlibError::InvalidFileName { path, reason } => {
                write!(f, "Invalid archive file name '{}': {}", path, reason)
            }
            ClimlibError::InvalidVersion { version } => {
                write!(f, "Invalid version string '{}'", version)
            }
            ClimlibError::UnknownCriterion { name } => write!(
                f,
                "Unknown selection criterion '{}' (expected cdate, ver, tpoints or publish)",
                name
            ),
            ClimlibError::UnsupportedFormat { path } => {
                write!(f, "Unsupported file format for '{}' (expected .xml or .nc)", path)
            }
            ClimlibError::MissingSearchCriteria => write!(
                f,
                "No search criteria provided. Provide search constraints, such as: \
                 mip_era, activity, experiment, realm, frequency, variable, model, realization"
            ),
            ClimlibError::MissingField { context, field } => {
                write!(f, "Field '{}' missing from {}", field, context)
            }
            ClimlibError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            ClimlibError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ClimlibError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClimlibError::NetCDFError(e) => Some(e),
            ClimlibError::IoError(e) => Some(e),
            ClimlibError::XmlError(e) => Some(e),
            ClimlibError::HttpError(e) => Some(e),
            ClimlibError::JsonError(e) => Some(e),
            ClimlibError::ConfigError(e) => Some(e),
            ClimlibError::PatternError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for ClimlibError {
    fn from(error: netcdf::Error) -> Self {
        ClimlibError::NetCDFError(error)
    }
}

impl From<std::io::Error> for ClimlibError {
    fn from(error: std::io::Error) -> Self {
        ClimlibError::IoError(error)
    }
}

impl From<quick_xml::Error> for ClimlibError {
    fn from(error: quick_xml::Error) -> Self {
        ClimlibError::XmlError(error)
    }
}

impl From<quick_xml::events::attributes::AttrError> for ClimlibError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        ClimlibError::XmlError(quick_xml::Error::from(error))
    }
}

impl From<reqwest::Error> for ClimlibError {
    fn from(error: reqwest::Error) -> Self {
        ClimlibError::HttpError(error)
    }
}

impl From<serde_json::Error> for ClimlibError {
    fn from(error: serde_json::Error) -> Self {
        ClimlibError::JsonError(error)
    }
}

impl From<toml::de::Error> for ClimlibError {
    fn from(error: toml::de::Error) -> Self {
        ClimlibError::ConfigError(error)
    }
}

impl From<glob::PatternError> for ClimlibError {
    fn from(error: glob::PatternError) -> Self {
        ClimlibError::PatternError(error)
    }
}

impl From<glob::GlobError> for ClimlibError {
    fn from(error: glob::GlobError) -> Self {
        ClimlibError::IoError(error.into_error())
    }
}

impl From<String> for ClimlibError {
    fn from(error: String) -> Self {
        ClimlibError::Generic(error)
    }
}

impl From<&str> for ClimlibError {
    fn from(error: &str) -> Self {
        ClimlibError::Generic(error.to_string())
    }
}

/// Result type alias for climlib operations
pub type Result<T> = std::result::Result<T, ClimlibError>;
