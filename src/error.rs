//! When constructing, parsing or growing a number goes wrong.

use crate::lib::*;

/// This type represents all possible errors that can occur when constructing,
/// parsing or mutating a `BigInt` or `BigRational`.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible. A
    /// larger `Error` type was substantially slower due to all the functions
    /// that pass around `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `hugenum::Error`.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// One-based column at which the error was detected in the input text.
    ///
    /// Errors that are not caused by a specific character of the input, such
    /// as an empty digit run at the end of the string or an allocation
    /// failure, report column 0.
    pub fn column(&self) -> usize {
        self.err.column
    }

    /// Specifies the cause of this error.
    pub fn code(&self) -> &ErrorCode {
        &self.err.code
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Format` - text that is not a well-formed number
    /// - `Category::Value` - a float that has no exact finite value
    /// - `Category::DivideByZero` - a zero denominator or divisor
    /// - `Category::OutOfMemory` - the allocator refused a limb buffer
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::InvalidDigit(_)
            | ErrorCode::EmptyDigits
            | ErrorCode::ConflictingPrefix(_)
            | ErrorCode::RadixOutOfRange(_)
            | ErrorCode::MissingSeparator
            | ErrorCode::DuplicateSeparator
            | ErrorCode::SeparatorAtBoundary
            | ErrorCode::ZeroDenominator => Category::Format,
            ErrorCode::NonFiniteFloat => Category::Value,
            ErrorCode::DivisionByZero => Category::DivideByZero,
            ErrorCode::AllocationFailed(_) => Category::OutOfMemory,
        }
    }

    /// Returns true if this error was caused by text that is not a
    /// well-formed number.
    pub fn is_format(&self) -> bool {
        self.classify() == Category::Format
    }

    /// Returns true if this error was caused by a NaN or infinite float.
    pub fn is_value(&self) -> bool {
        self.classify() == Category::Value
    }

    /// Returns true if this error was caused by a zero denominator or divisor
    /// outside of text parsing.
    pub fn is_divide_by_zero(&self) -> bool {
        self.classify() == Category::DivideByZero
    }

    /// Returns true if this error was caused by the allocator being unable to
    /// provide a limb buffer.
    pub fn is_out_of_memory(&self) -> bool {
        self.classify() == Category::OutOfMemory
    }
}

/// Categorizes the cause of a `hugenum::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The input text is not a well-formed number in the requested base.
    Format,

    /// A floating point source was NaN or infinite.
    Value,

    /// A rational was given a zero denominator, or a division had a zero
    /// divisor.
    DivideByZero,

    /// The platform allocator could not satisfy a limb buffer request.
    OutOfMemory,
}

struct ErrorImpl {
    code: ErrorCode,
    column: usize,
}

/// This type describes all possible errors that can occur when constructing,
/// parsing or mutating numbers.
#[derive(Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// Character that is not a digit of the active base.
    InvalidDigit(char),

    /// No digits where at least one was required.
    EmptyDigits,

    /// A base prefix such as `0x` that contradicts the requested base.
    ConflictingPrefix(u32),

    /// Requested base is not within 2 through 36.
    RadixOutOfRange(u32),

    /// Rational text without a `/` separator.
    MissingSeparator,

    /// Rational text with more than one `/` separator.
    DuplicateSeparator,

    /// Rational text starting or ending with its `/` separator.
    SeparatorAtBoundary,

    /// Rational text whose denominator is zero.
    ZeroDenominator,

    /// Float source that is NaN or infinite.
    NonFiniteFloat,

    /// Zero denominator or divisor given as a number.
    DivisionByZero,

    /// Allocation of the given number of limbs failed.
    AllocationFailed(usize),
}

impl Error {
    #[cold]
    pub(crate) fn syntax(code: ErrorCode, column: usize) -> Self {
        Error {
            err: Box::new(ErrorImpl { code, column }),
        }
    }

    #[cold]
    pub(crate) fn new(code: ErrorCode) -> Self {
        Error::syntax(code, 0)
    }

    #[cold]
    pub(crate) fn out_of_memory(limbs: usize) -> Self {
        Error::new(ErrorCode::AllocationFailed(limbs))
    }

    /// Shift the reported column by `offset` characters, for errors raised
    /// while parsing a substring of the caller's input.
    #[cold]
    pub(crate) fn offset_column(mut self, offset: usize) -> Self {
        if self.err.column != 0 {
            self.err.column += offset;
        }
        self
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorCode::InvalidDigit(c) => write!(f, "invalid digit {:?}", c),
            ErrorCode::EmptyDigits => f.write_str("expected at least one digit"),
            ErrorCode::ConflictingPrefix(radix) => {
                write!(f, "base prefix conflicts with requested base {}", radix)
            }
            ErrorCode::RadixOutOfRange(radix) => {
                write!(f, "base {} is out of range, expected 2 through 36", radix)
            }
            ErrorCode::MissingSeparator => f.write_str("expected `/` between numerator and denominator"),
            ErrorCode::DuplicateSeparator => f.write_str("more than one `/` separator"),
            ErrorCode::SeparatorAtBoundary => f.write_str("`/` separator without a numerator or denominator"),
            ErrorCode::ZeroDenominator => f.write_str("denominator is zero"),
            ErrorCode::NonFiniteFloat => f.write_str("cannot convert NaN or infinity"),
            ErrorCode::DivisionByZero => f.write_str("division by zero"),
            ErrorCode::AllocationFailed(limbs) => {
                write!(f, "failed to allocate a buffer of {} limbs", limbs)
            }
        }
    }
}

impl Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorCode::InvalidDigit(c) => f.debug_tuple("InvalidDigit").field(&c).finish(),
            ErrorCode::EmptyDigits => f.write_str("EmptyDigits"),
            ErrorCode::ConflictingPrefix(radix) => {
                f.debug_tuple("ConflictingPrefix").field(&radix).finish()
            }
            ErrorCode::RadixOutOfRange(radix) => {
                f.debug_tuple("RadixOutOfRange").field(&radix).finish()
            }
            ErrorCode::MissingSeparator => f.write_str("MissingSeparator"),
            ErrorCode::DuplicateSeparator => f.write_str("DuplicateSeparator"),
            ErrorCode::SeparatorAtBoundary => f.write_str("SeparatorAtBoundary"),
            ErrorCode::ZeroDenominator => f.write_str("ZeroDenominator"),
            ErrorCode::NonFiniteFloat => f.write_str("NonFiniteFloat"),
            ErrorCode::DivisionByZero => f.write_str("DivisionByZero"),
            ErrorCode::AllocationFailed(limbs) => {
                f.debug_tuple("AllocationFailed").field(&limbs).finish()
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.column == 0 {
            Display::fmt(&self.code, f)
        } else {
            write!(f, "{} at column {}", self.code, self.column)
        }
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error({:?}, column: {})",
            self.err.code.to_string(),
            self.err.column
        )
    }
}
