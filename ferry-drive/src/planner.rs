//! Chunk-size policy for outbound transfers.

/// Base constant for the chunk formula: 10 MiB
pub const CHUNK_BASE_BYTES: u64 = 10 * 1024 * 1024;

/// Compute the chunk size for a payload of `total_size` bytes.
///
/// Payloads up to 10 MiB travel as a single chunk covering the whole blob
/// (zero for an empty payload, which the driver turns into a zero-iteration
/// loop). Larger payloads use `floor(10 MiB / ln(total_size))`, so the chunk
/// shrinks as the payload grows. The formula is preserved exactly for
/// compatibility with deployed remotes and recorded fixtures; the driver
/// clamps every range to the payload end, so a plan larger than the payload
/// is harmless.
pub fn plan_chunk_size(total_size: u64) -> u64 {
    if total_size <= CHUNK_BASE_BYTES {
        return total_size;
    }
    (CHUNK_BASE_BYTES as f64 / (total_size as f64).ln()).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_or_below_threshold_is_a_single_chunk() {
        assert_eq!(plan_chunk_size(0), 0);
        assert_eq!(plan_chunk_size(1), 1);
        assert_eq!(plan_chunk_size(5 * 1024 * 1024), 5 * 1024 * 1024);
        assert_eq!(plan_chunk_size(CHUNK_BASE_BYTES), CHUNK_BASE_BYTES);
    }

    #[test]
    fn above_threshold_follows_the_log_formula() {
        for size in [
            CHUNK_BASE_BYTES + 1,
            20 * 1024 * 1024,
            100 * 1024 * 1024,
            u64::MAX / 2,
        ] {
            let expected = (CHUNK_BASE_BYTES as f64 / (size as f64).ln()).floor() as u64;
            assert_eq!(plan_chunk_size(size), expected);
            assert!(plan_chunk_size(size) > 0);
        }
    }

    #[test]
    fn chunk_shrinks_as_payload_grows() {
        let at_20m = plan_chunk_size(20 * 1024 * 1024);
        let at_100m = plan_chunk_size(100 * 1024 * 1024);
        let at_1g = plan_chunk_size(1024 * 1024 * 1024);
        assert!(at_20m > at_100m);
        assert!(at_100m > at_1g);
    }

    #[test]
    fn plan_drops_sharply_past_the_threshold() {
        // One byte over the threshold the divisor is already ln(10 MiB) ~ 16,
        // so the plan falls from 10 MiB to well under 1 MiB. Final ranges are
        // clamped by the driver, never by the planner.
        let size = CHUNK_BASE_BYTES + 1;
        let chunk = plan_chunk_size(size);
        assert!(chunk < CHUNK_BASE_BYTES / 16 + 1);
        assert!(chunk > 0);

        let hundred_mib = 100 * 1024 * 1024;
        let chunk = plan_chunk_size(hundred_mib);
        // Around 567 KiB for 100 MiB; pin the band rather than recompute the float
        assert!((500_000..650_000).contains(&chunk));
    }
}
