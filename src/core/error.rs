use thiserror::Error;

/// Errors that can occur while building, serializing or encoding a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FatturaError {
    /// `build()` was called before the transmission data was set.
    #[error("builder error: transmission data (DatiTrasmissione) is not set")]
    MissingTransmission,

    /// `build()` was called before the sender was set.
    #[error("builder error: sender (CedentePrestatore) is not set")]
    MissingSender,

    /// `build()` was called before the recipient was set.
    #[error("builder error: recipient (CessionarioCommittente) is not set")]
    MissingRecipient,

    /// `build()` found no complete body (general data + goods/services).
    #[error("builder error: document has no body (FatturaElettronicaBody)")]
    MissingBody,

    /// A code string is not part of its closed catalog.
    #[error("unknown {catalog} code '{code}'")]
    UnknownCode {
        catalog: &'static str,
        code: String,
    },

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Base64 payload encoding or decoding error.
    #[error("payload error: {0}")]
    Payload(String),
}

/// Stable machine-readable code attached to every validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum IssueCode {
    Required,
    MaxLength,
    InvalidEnum,
    InvalidLength,
    InvalidCurrency,
    EmptyArray,
    MissingPec,
    MissingFiscalId,
    InvalidCountryCode,
    InvalidPiva,
    InvalidCf,
    MissingAnagraficData,
    ConflictingAnagraficData,
    InvalidCap,
    InvalidDateFormat,
    InvalidDate,
    InvalidDateRange,
    InvalidValue,
    DuplicateLineNumber,
    RequiredWhenZeroVat,
    MissingReference,
    TotalMismatch,
    TaxMismatch,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::MaxLength => "MAX_LENGTH",
            Self::InvalidEnum => "INVALID_ENUM",
            Self::InvalidLength => "INVALID_LENGTH",
            Self::InvalidCurrency => "INVALID_CURRENCY",
            Self::EmptyArray => "EMPTY_ARRAY",
            Self::MissingPec => "MISSING_PEC",
            Self::MissingFiscalId => "MISSING_FISCAL_ID",
            Self::InvalidCountryCode => "INVALID_COUNTRY_CODE",
            Self::InvalidPiva => "INVALID_PIVA",
            Self::InvalidCf => "INVALID_CF",
            Self::MissingAnagraficData => "MISSING_ANAGRAFIC_DATA",
            Self::ConflictingAnagraficData => "CONFLICTING_ANAGRAFIC_DATA",
            Self::InvalidCap => "INVALID_CAP",
            Self::InvalidDateFormat => "INVALID_DATE_FORMAT",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::InvalidValue => "INVALID_VALUE",
            Self::DuplicateLineNumber => "DUPLICATE_LINE_NUMBER",
            Self::RequiredWhenZeroVat => "REQUIRED_WHEN_ZERO_VAT",
            Self::MissingReference => "MISSING_REFERENCE",
            Self::TotalMismatch => "TOTAL_MISMATCH",
            Self::TaxMismatch => "TAX_MISMATCH",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding with field path, message and code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, indexed for list elements
    /// (e.g. "bodies[0].goods_services.lines[1].number").
    pub path: String,
    /// Human-readable description.
    pub message: String,
    /// Stable machine code.
    pub code: IssueCode,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>, code: IssueCode) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code,
        }
    }
}
