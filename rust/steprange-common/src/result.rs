pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

/// Fails with [`ErrorKind::LimitExceeded`](crate::error::ErrorKind::LimitExceeded)
/// when `actual > limit`.
#[inline]
pub fn verify_limit(what: &str, limit: u64, actual: u64) -> Result<()> {
    if actual <= limit {
        Ok(())
    } else {
        limit_exceeded(what, limit, actual)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn limit_exceeded(what: &str, limit: u64, actual: u64) -> Result<()> {
    Err(crate::error::Error::limit_exceeded(what, limit, actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(count: u64) -> Result<u64> {
        crate::verify_arg!(count, count > 0);
        Ok(count)
    }

    #[test]
    fn test_verify_arg_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(0).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument count: count > 0");
    }

    #[test]
    fn test_verify_limit() {
        assert!(verify_limit("sequence", 5, 5).is_ok());
        assert!(verify_limit("sequence", 5, 6).unwrap_err().is_limit_exceeded());
    }
}
