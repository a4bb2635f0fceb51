use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Unreadable results file, malformed JSON or a bad label token.
    Input,
    /// Bad endpoint URL, timeout or HTTP client settings.
    Config,
    /// A label set would contain the same name twice.
    DuplicateLabelName,
    /// Protobuf or snappy failure.
    Encoding,
    /// The upload did not succeed.
    Transmission,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ErrorKind::Input => "input error",
            ErrorKind::Config => "configuration error",
            ErrorKind::DuplicateLabelName => "duplicate label name",
            ErrorKind::Encoding => "encoding error",
            ErrorKind::Transmission => "transmission error",
        };
        write!(f, "{}", s)
    }
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    recoverable: bool,
    source: Option<Box<dyn error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            recoverable: false,
            source: None,
        }
    }

    pub fn with_source<E>(kind: ErrorKind, message: &str, err: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            recoverable: false,
            source: Some(Box::new(err)),
        }
    }

    pub fn input(message: &str) -> Self {
        Self::new(ErrorKind::Input, message)
    }

    pub fn config(message: &str) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn transmission(message: &str) -> Self {
        Self::new(ErrorKind::Transmission, message)
    }

    pub fn duplicate_label(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateLabelName,
            &format!("label name '{}' occurs more than once", name),
        )
    }

    /// Marks a transmission failure as worth another attempt.
    pub fn recoverable(mut self) -> Self {
        self.recoverable = true;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_recoverable(&self) -> bool {
        self.recoverable
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}. Source error: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl<E: error::Error + Send + Sync + 'static> From<(ErrorKind, &str, E)> for Error {
    fn from((kind, message, err): (ErrorKind, &str, E)) -> Self {
        Self::with_source(kind, message, err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
