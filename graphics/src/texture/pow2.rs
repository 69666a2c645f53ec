//! Power-of-two sizing for texture uploads.
//!
//! Fixed-function hardware only samples textures whose sides are powers of
//! two. Sides that are not, or that exceed the configured maximum texture
//! size, are rescaled down before upload.

/// Whether `n` is a power of two. Zero is not.
pub fn is_pow2(n: u32) -> bool {
    n.is_power_of_two()
}

/// Largest power of two not greater than `n`. `smaller_pow2(0) == 0`.
pub fn smaller_pow2(n: u32) -> u32 {
    match n {
        0 => 0,
        n => 1 << (u32::BITS - 1 - n.leading_zeros()),
    }
}

/// Whether `n` is a power of two within `limit`. A zero `limit` means no limit.
pub fn is_pow2_limit(n: u32, limit: u32) -> bool {
    if limit != 0 && n > limit {
        return false;
    }
    is_pow2(n)
}

/// Size `n` is uploaded at under `limit`.
///
/// Oversized sides clamp to `limit` itself; everything else rounds down to a
/// power of two. A zero `limit` means no limit.
pub fn smaller_pow2_limit(n: u32, limit: u32) -> u32 {
    if limit != 0 && n > limit {
        return limit;
    }
    smaller_pow2(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pow2() {
        assert!(!is_pow2(0));
        assert!(is_pow2(1));
        assert!(is_pow2(256));
        assert!(!is_pow2(300));
    }

    #[test]
    fn test_smaller_pow2() {
        assert_eq!(smaller_pow2(0), 0);
        assert_eq!(smaller_pow2(1), 1);
        assert_eq!(smaller_pow2(3), 2);
        assert_eq!(smaller_pow2(300), 256);
        assert_eq!(smaller_pow2(100), 64);
        assert_eq!(smaller_pow2(u32::MAX), 1 << 31);
    }

    #[test]
    fn test_smaller_pow2_is_idempotent() {
        for n in 1..2048 {
            let p = smaller_pow2(n);
            assert!(is_pow2(p));
            assert!(p <= n);
            assert_eq!(smaller_pow2(p), p);
        }
    }

    #[test]
    fn test_limit() {
        assert!(is_pow2_limit(512, 0));
        assert!(is_pow2_limit(512, 512));
        assert!(!is_pow2_limit(1024, 512));

        assert_eq!(smaller_pow2_limit(300, 0), 256);
        assert_eq!(smaller_pow2_limit(2048, 512), 512);
        assert_eq!(smaller_pow2_limit(300, 512), 256);
    }
}
