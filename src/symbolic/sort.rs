//! Variable sorts: a number domain plus an optional sign refinement.

use std::fmt;
use std::str::FromStr;

/// Number domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Integers.
    Int,
    /// Rationals.
    Rat,
    /// Reals.
    Real,
    /// Truth values.
    Bool,
}

/// Sign refinement attached to a numeric sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// No sign information.
    Any,
    /// Strictly positive.
    Positive,
    /// Zero or positive.
    Nonnegative,
    /// Anything but zero.
    Nonzero,
}

impl Sign {
    /// Combines two refinements into the strongest one implied by both.
    #[must_use]
    pub const fn meet(self, other: Self) -> Self {
        match (self, other) {
            (Self::Any, sign) | (sign, Self::Any) => sign,
            (Self::Positive, _)
            | (_, Self::Positive)
            | (Self::Nonnegative, Self::Nonzero)
            | (Self::Nonzero, Self::Nonnegative) => Self::Positive,
            (Self::Nonnegative, Self::Nonnegative) => Self::Nonnegative,
            (Self::Nonzero, Self::Nonzero) => Self::Nonzero,
        }
    }

    /// Returns `true` if every value satisfying `self` satisfies `other`.
    #[must_use]
    pub const fn implies(self, other: Self) -> bool {
        matches!(
            (self, other),
            (_, Self::Any)
                | (Self::Positive, _)
                | (Self::Nonnegative, Self::Nonnegative)
                | (Self::Nonzero, Self::Nonzero)
        )
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Positive => "pos_",
            Self::Nonnegative => "nonneg_",
            Self::Nonzero => "nonzero_",
        }
    }
}

/// The sort of a declared variable, e.g. `real` or `pos_int`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort {
    domain: Domain,
    sign: Sign,
}

impl Sort {
    /// Integers.
    pub const INT: Self = Self::plain(Domain::Int);
    /// Rationals.
    pub const RAT: Self = Self::plain(Domain::Rat);
    /// Reals.
    pub const REAL: Self = Self::plain(Domain::Real);
    /// Truth values.
    pub const BOOL: Self = Self::plain(Domain::Bool);

    const fn plain(domain: Domain) -> Self {
        Self {
            domain,
            sign: Sign::Any,
        }
    }

    const fn with_sign(self, sign: Sign) -> Self {
        Self {
            domain: self.domain,
            sign,
        }
    }

    /// Returns the number domain.
    #[must_use]
    pub const fn domain(self) -> Domain {
        self.domain
    }

    /// Returns the sign refinement.
    #[must_use]
    pub const fn sign(self) -> Sign {
        self.sign
    }

    /// Returns this sort further restricted by `sign`, or `None` for `bool`.
    #[must_use]
    pub const fn refined(self, sign: Sign) -> Option<Self> {
        match self.domain {
            Domain::Bool => None,
            Domain::Int | Domain::Rat | Domain::Real => Some(Self {
                domain: self.domain,
                sign: self.sign.meet(sign),
            }),
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domain = match self.domain {
            Domain::Int => "int",
            Domain::Rat => "rat",
            Domain::Real => "real",
            Domain::Bool => "bool",
        };
        write!(f, "{}{domain}", self.sign.prefix())
    }
}

/// Error for a sort name that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort '{0}'")]
pub struct UnknownSort(pub String);

impl FromStr for Sort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownSort(s.to_owned());
        let (sign, rest) = [
            ("pos_", Sign::Positive),
            ("nonneg_", Sign::Nonnegative),
            ("nonzero_", Sign::Nonzero),
        ]
        .into_iter()
        .find_map(|(prefix, sign)| s.strip_prefix(prefix).map(|rest| (sign, rest)))
        .unwrap_or((Sign::Any, s));
        let plain = match rest {
            "int" => Self::INT,
            "nat" if sign == Sign::Any => return Ok(Self::INT.with_sign(Sign::Nonnegative)),
            "rat" => Self::RAT,
            "real" => Self::REAL,
            "bool" if sign == Sign::Any => return Ok(Self::BOOL),
            _ => return Err(unknown()),
        };
        Ok(plain.with_sign(sign))
    }
}
