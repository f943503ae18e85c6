//! Loan-amount category derivation

/// Boundary anchors for the loan-amount buckets, in thousands.
/// Derived once from the distribution quartiles of the 2012-2014 source
/// data (25th/50th/75th percentiles at 150/235/550); hard-coded rather
/// than recomputed at runtime.
pub const LOW_MAX: f64 = 150.0;
pub const MEDIUM_MAX: f64 = 235.0;
pub const HIGH_MAX: f64 = 347.0;
pub const VERY_HIGH_MAX: f64 = 550.0;
pub const EXTREME_MAX: f64 = 1000.0;

/// Bucket a loan amount into the six-way category column
pub fn loan_category(amount: f64) -> &'static str {
    if amount <= LOW_MAX {
        "low"
    } else if amount < MEDIUM_MAX {
        "medium"
    } else if amount < HIGH_MAX {
        "high"
    } else if amount < VERY_HIGH_MAX {
        "very high"
    } else if amount <= EXTREME_MAX {
        "extremely high"
    } else {
        "unbelievable"
    }
}

/// Bucket a loan amount into the coarser four-way category column,
/// collapsing everything below 347 into "normal"
pub fn merge_category(amount: f64) -> &'static str {
    if amount < HIGH_MAX {
        "normal"
    } else if amount < VERY_HIGH_MAX {
        "very high"
    } else if amount <= EXTREME_MAX {
        "extremely high"
    } else {
        "unbelievable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_category_boundaries() {
        assert_eq!(loan_category(0.0), "low");
        assert_eq!(loan_category(150.0), "low");
        assert_eq!(loan_category(150.01), "medium");
        assert_eq!(loan_category(234.99), "medium");
        assert_eq!(loan_category(235.0), "high");
        assert_eq!(loan_category(346.99), "high");
        assert_eq!(loan_category(347.0), "very high");
        assert_eq!(loan_category(549.99), "very high");
        assert_eq!(loan_category(550.0), "extremely high");
        assert_eq!(loan_category(1000.0), "extremely high");
        assert_eq!(loan_category(1000.01), "unbelievable");
    }

    #[test]
    fn test_merge_category_boundaries() {
        assert_eq!(merge_category(0.0), "normal");
        assert_eq!(merge_category(346.99), "normal");
        assert_eq!(merge_category(347.0), "very high");
        assert_eq!(merge_category(549.99), "very high");
        assert_eq!(merge_category(550.0), "extremely high");
        assert_eq!(merge_category(1000.0), "extremely high");
        assert_eq!(merge_category(1000.01), "unbelievable");
    }

    #[test]
    fn test_categories_are_total_over_f64() {
        // NaN falls through every comparison into the last bucket
        assert_eq!(loan_category(f64::NAN), "unbelievable");
        assert_eq!(merge_category(f64::NAN), "unbelievable");
        assert_eq!(loan_category(f64::INFINITY), "unbelievable");
        assert_eq!(merge_category(f64::NEG_INFINITY), "normal");
    }
}
