use std::fmt::{self, Display};

///
/// Probe struct, representation of one target interval from a probe BED file.
///
/// Coordinates follow BED conventions: zero-based start, exclusive end.
/// Catalog parsing rejects intervals whose end precedes their start, so
/// `width` never underflows on catalog-built probes.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Probe {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
}

impl Probe {
    ///
    /// Get width of the probe
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    ///
    /// The stable string key used to bucket everything downstream:
    /// `chrom_start_end`. Two probes with the same coordinates share a key,
    /// and therefore a bucket; the catalog never deduplicates.
    ///
    pub fn key(&self) -> String {
        format!("{}_{}_{}", self.chrom, self.start, self.end)
    }
}

impl Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_probe_key() {
        let probe = Probe {
            chrom: "chr7".to_string(),
            start: 140453075,
            end: 140453195,
        };
        assert_eq!(probe.key(), "chr7_140453075_140453195");
        assert_eq!(probe.width(), 120);
    }
}
