use crate::Result;

/// Outcome of a fleet-store lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<T> {
    /// The ship was found and a record is available.
    Found(T),

    /// No record exists for the requested IMO number.
    NotFound,
}

impl<T> LookupResult<T> {
    /// Returns `true` if the result is `Found`.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts this result into a standard `Result`, mapping `NotFound` to an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is `NotFound`.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Found(record) => Ok(record),
            Self::NotFound => Err(ohno::app_err!("ship not found")),
        }
    }

    /// Converts this result into an `Option`, returning `Some` only for `Found`.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound => None,
        }
    }

    /// Map the contained record, preserving `NotFound`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LookupResult<U> {
        match self {
            Self::Found(record) => LookupResult::Found(f(record)),
            Self::NotFound => LookupResult::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_adapters() {
        let result = LookupResult::Found(7);
        assert!(result.is_found());
        assert_eq!(result.clone().ok(), Some(7));
        assert_eq!(result.map(|v| v + 1).into_result().unwrap(), 8);
    }

    #[test]
    fn test_not_found_adapters() {
        let result: LookupResult<i32> = LookupResult::NotFound;
        assert!(!result.is_found());
        assert_eq!(result.clone().ok(), None);
        assert!(result.into_result().is_err());
    }
}
