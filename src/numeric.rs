//! Small numeric helpers used around the sampler inputs and outputs

use crate::error::{PrepError, PrepResult};
use ndarray::{Array1, Array2, Zip};

/// Divide column `j` of `matrix` by `divisor[j]`
///
/// No other normalization is applied; a zero divisor yields infinities or NaN
/// in that column, as plain float division does.
pub fn divide_columns(matrix: &Array2<f64>, divisor: &Array1<f64>) -> PrepResult<Array2<f64>> {
    check_divisor(matrix, divisor)?;
    let mut out = matrix.to_owned();
    Zip::from(out.columns_mut())
        .and(divisor)
        .for_each(|mut column, &d| column.mapv_inplace(|v| v / d));
    Ok(out)
}

/// Same contract as [`divide_columns`], with columns processed on the rayon pool
pub fn divide_columns_parallel(matrix: &Array2<f64>, divisor: &Array1<f64>) -> PrepResult<Array2<f64>> {
    check_divisor(matrix, divisor)?;
    let mut out = matrix.to_owned();
    Zip::from(out.columns_mut())
        .and(divisor)
        .par_for_each(|mut column, &d| column.mapv_inplace(|v| v / d));
    Ok(out)
}

fn check_divisor(matrix: &Array2<f64>, divisor: &Array1<f64>) -> PrepResult<()> {
    if matrix.ncols() != divisor.len() {
        return Err(PrepError::DimensionMismatch {
            columns: matrix.ncols(),
            divisor_len: divisor.len(),
        });
    }
    Ok(())
}

/// Parse the integer between the first `[` and the first `]`
///
/// Sampler output names parameters like `ultimate_loss[2025]`; this recovers
/// the index. The enclosed text must be a plain base-10 integer (an optional
/// sign is accepted, surrounding whitespace is not).
pub fn extract_bracketed_integer(s: &str) -> PrepResult<i64> {
    let open = s
        .find('[')
        .ok_or_else(|| PrepError::Parse(format!("no '[' in '{}'", s)))?;
    let close = s
        .find(']')
        .ok_or_else(|| PrepError::Parse(format!("no ']' in '{}'", s)))?;

    if close < open {
        return Err(PrepError::Parse(format!("']' precedes '[' in '{}'", s)));
    }

    let inner = &s[open + 1..close];
    inner
        .parse::<i64>()
        .map_err(|_| PrepError::Parse(format!("'{}' in '{}' is not an integer", inner, s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_divide_columns() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let y = array![1.0, 2.0, 3.0];

        let out = divide_columns(&x, &y).unwrap();
        assert_abs_diff_eq!(out, array![[1.0, 1.0, 1.0], [4.0, 2.5, 2.0]], epsilon = 1e-12);
    }

    #[test]
    fn test_divide_columns_parallel_matches_serial() {
        let x = Array2::from_shape_fn((50, 8), |(i, j)| (i * 8 + j) as f64 + 0.5);
        let y = Array1::from_shape_fn(8, |j| (j + 1) as f64 * 1.5);

        let serial = divide_columns(&x, &y).unwrap();
        let parallel = divide_columns_parallel(&x, &y).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_divide_columns_dimension_mismatch() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![1.0, 2.0, 3.0];
        assert!(matches!(
            divide_columns(&x, &y),
            Err(PrepError::DimensionMismatch { columns: 2, divisor_len: 3 })
        ));
        assert!(divide_columns_parallel(&x, &y).is_err());
    }

    #[test]
    fn test_divide_by_zero_follows_float_division() {
        let x = array![[1.0, 0.0]];
        let y = array![0.0, 0.0];
        let out = divide_columns(&x, &y).unwrap();
        assert!(out[[0, 0]].is_infinite());
        assert!(out[[0, 1]].is_nan());
    }

    #[test]
    fn test_extract_bracketed_integer() {
        assert_eq!(extract_bracketed_integer("a[1]").unwrap(), 1);
        assert_eq!(extract_bracketed_integer("ultimate_loss[2025]").unwrap(), 2025);
        assert_eq!(extract_bracketed_integer("[7]").unwrap(), 7);
        assert_eq!(extract_bracketed_integer("beta[-3]").unwrap(), -3);
        // first pair wins
        assert_eq!(extract_bracketed_integer("x[4][5]").unwrap(), 4);
    }

    #[test]
    fn test_extract_bracketed_integer_round_trip() {
        for prefix in ["", "a", "ultimate_loss", "speedup.b_", "theta 2 "] {
            for n in [0_i64, 1, 9, 42, 2025, 123_456_789] {
                let name = format!("{}[{}]", prefix, n);
                assert_eq!(extract_bracketed_integer(&name).unwrap(), n, "{}", name);
            }
        }
    }

    #[test]
    fn test_extract_bracketed_integer_errors() {
        for bad in ["plain", "a[1", "a1]", "a]1[", "a[]", "a[x]", "a[ 3]", "a[1.5]"] {
            assert!(
                matches!(extract_bracketed_integer(bad), Err(PrepError::Parse(_))),
                "{} should fail",
                bad
            );
        }
    }
}
