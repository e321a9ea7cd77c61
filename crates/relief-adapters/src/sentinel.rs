use uuid::Uuid;

use relief_ports::outbound::SentinelSource;

/// Non-negative 63-bit random tags drawn from v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSentinel;

impl SentinelSource for RandomSentinel {
    fn next_tag(&self) -> u64 {
        (Uuid::new_v4().as_u128() >> 65) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_fit_a_signed_integer() {
        for _ in 0..64 {
            assert!(RandomSentinel.next_tag() <= i64::MAX as u64);
        }
    }

    #[test]
    fn tags_vary() {
        let tags: std::collections::HashSet<u64> =
            (0..16).map(|_| RandomSentinel.next_tag()).collect();
        assert!(tags.len() > 1);
    }
}
