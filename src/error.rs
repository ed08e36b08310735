/// Machine-readable failure category.
///
/// The fitting code distinguishes "bad input shape" problems (ordering,
/// sample size, non-positive counts on a log path) from optimizer
/// non-convergence, so callers can report them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad CLI/config settings (invalid alpha, horizon, etc.).
    InvalidConfig,
    /// Dates out of order, or a "future" date inside the known range.
    InvalidOrder,
    /// Fewer observations than the model has parameters.
    InsufficientData,
    /// Nonlinear optimizer exhausted its iteration budget.
    Convergence,
    /// Input undefined for the requested operation (e.g. log of count <= 0).
    DegenerateInput,
    /// Non-finite values or a singular system encountered mid-computation.
    Numeric,
}

impl ErrorKind {
    /// Process exit code used by the `growth` binary.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidConfig => 2,
            ErrorKind::InvalidOrder => 3,
            ErrorKind::InsufficientData => 4,
            ErrorKind::Convergence => 5,
            ErrorKind::DegenerateInput => 6,
            ErrorKind::Numeric => 7,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
