//! Error types for the Edo time library.

use core::fmt;

use chrono::NaiveDate;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while computing Edo time observations.
///
/// The astronomical fields of an [`EdoTimeData`](crate::EdoTimeData) only fail on invalid input
/// (coordinates, time zone). [`Error::DataRange`] and [`Error::NotFound`] are reported per
/// field for the table-backed values, so the rest of the aggregate stays usable.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid solar altitude for a twilight threshold.
    InvalidAltitude {
        /// The invalid altitude value provided.
        value: f64,
    },
    /// The time zone identifier could not be resolved.
    UnknownTimeZone {
        /// The identifier as supplied by the caller.
        zone: String,
    },
    /// A civil date or time that cannot be represented.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// Moon-age query outside the tabulated new-moon coverage.
    DataRange {
        /// Human-readable reason, naming which side of the coverage was exceeded.
        reason: String,
    },
    /// Civil date absent from the lunar calendar table.
    NotFound {
        /// The civil date that was looked up.
        date: NaiveDate,
        /// Human-readable reason (before coverage, after coverage, or a gap).
        reason: String,
    },
    /// A reference dataset could not be parsed.
    Dataset {
        /// 1-based record number in the dataset, `0` when the dataset as a whole is unusable.
        line: u64,
        /// Description of the problem.
        message: String,
    },
    /// A configuration document could not be read or parsed.
    Config {
        /// Description of the problem.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidAltitude { value } => {
                write!(
                    f,
                    "invalid solar altitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::UnknownTimeZone { zone } => write!(f, "unknown time zone '{zone}'"),
            Self::InvalidDateTime { message } => write!(f, "invalid date/time: {message}"),
            Self::DataRange { reason } => write!(f, "outside new-moon data range: {reason}"),
            Self::NotFound { date, reason } => {
                write!(f, "no lunar calendar entry for {date}: {reason}")
            }
            Self::Dataset { line, message } => {
                if *line == 0 {
                    write!(f, "invalid reference dataset: {message}")
                } else {
                    write!(f, "invalid reference dataset at record {line}: {message}")
                }
            }
            Self::Config { message } => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid altitude error.
    #[must_use]
    pub const fn invalid_altitude(value: f64) -> Self {
        Self::InvalidAltitude { value }
    }

    /// Creates an unknown time zone error.
    #[must_use]
    pub fn unknown_time_zone(zone: impl Into<String>) -> Self {
        Self::UnknownTimeZone { zone: zone.into() }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates a data range error.
    #[must_use]
    pub fn data_range(reason: impl Into<String>) -> Self {
        Self::DataRange {
            reason: reason.into(),
        }
    }

    /// Creates a not-found error for a civil date.
    #[must_use]
    pub fn not_found(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self::NotFound {
            date,
            reason: reason.into(),
        }
    }

    /// Creates a dataset error.
    #[must_use]
    pub fn dataset(line: u64, message: impl Into<String>) -> Self {
        Self::Dataset {
            line,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Human-readable reason for table-backed failures, or the full message otherwise.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::DataRange { reason } | Self::NotFound { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates a solar altitude threshold.
///
/// # Errors
/// Returns `InvalidAltitude` if the altitude is outside -90 to +90 degrees.
pub fn check_altitude(altitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&altitude) {
        return Err(Error::invalid_altitude(altitude));
    }
    Ok(())
}
