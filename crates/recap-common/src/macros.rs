//! Convenience macros for error handling and propagation

/// Equivalent to `anyhow::bail!` but for `RecapError`
///
/// This macro allows early returns with custom error messages.
///
/// # Examples
///
/// ```rust
/// use recap_common::bail;
/// use recap_common::Result;
///
/// fn check_year(year: i32) -> Result<()> {
///     if year < 2000 {
///         bail!("Year out of range: {}", year);
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::RecapError::new($msg))
    };
    ($err:expr $(,)?) => {
        return Err($crate::RecapError::new($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::RecapError::new(format!($fmt, $($arg)*)))
    };
}

/// Equivalent to `anyhow::ensure!` but for `RecapError`
///
/// This macro checks a condition and returns an error if it's false.
///
/// # Examples
///
/// ```rust
/// use recap_common::ensure;
/// use recap_common::Result;
///
/// fn validate_limit(limit: usize) -> Result<()> {
///     ensure!(limit > 0, "Top show limit must be positive, got: {}", limit);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::RecapError::new($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($crate::RecapError::new($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::RecapError::new(format!($fmt, $($arg)*)));
        }
    };
}
