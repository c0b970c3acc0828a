use noodles::sam::alignment::RecordBuf;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record::data::field::Tag;

use crate::errors::MetricsError;

/// bwa's secondary (suboptimal) alignment score tag. Not part of the SAM
/// spec, so noodles has no predefined constant for it.
const SECONDARY_SCORE_TAG: Tag = Tag::new(b'X', b'S');

/// The per-record fields that feed the per-probe statistics, in the order
/// they are transposed into series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    InsertSize,
    ProperPair,
    Mapq,
    AlignmentScore,
    SecondaryScore,
    MateMapq,
}

impl MetricField {
    pub const ALL: [MetricField; 6] = [
        MetricField::InsertSize,
        MetricField::ProperPair,
        MetricField::Mapq,
        MetricField::AlignmentScore,
        MetricField::SecondaryScore,
        MetricField::MateMapq,
    ];

    /// The field name as it appears in output column headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricField::InsertSize => "isize",
            MetricField::ProperPair => "proper_pair",
            MetricField::Mapq => "MAPQ",
            MetricField::AlignmentScore => "AS",
            MetricField::SecondaryScore => "XS",
            MetricField::MateMapq => "MQ",
        }
    }
}

/// One alignment record reduced to the fields the reducer cares about.
///
/// `secondary_score` and `mate_mapq` are present only when the source record
/// carried the corresponding tag AND the fallback tier that matched includes
/// them; `alignment_score` is always present on a classified record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub insert_size: i64,
    pub proper_pair: i64,
    pub mapq: i64,
    pub alignment_score: i64,
    pub secondary_score: Option<i64>,
    pub mate_mapq: Option<i64>,
}

impl ClassifiedRecord {
    pub fn get(&self, field: MetricField) -> Option<i64> {
        match field {
            MetricField::InsertSize => Some(self.insert_size),
            MetricField::ProperPair => Some(self.proper_pair),
            MetricField::Mapq => Some(self.mapq),
            MetricField::AlignmentScore => Some(self.alignment_score),
            MetricField::SecondaryScore => self.secondary_score,
            MetricField::MateMapq => self.mate_mapq,
        }
    }
}

///
/// Classify one alignment record.
///
/// The fixed fields (insert size, proper-pair flag, MAPQ) are taken from
/// every record identically. Tag extraction uses a three-tier fallback,
/// attempted in strict order, first success wins:
///
/// 1. `AS` + `XS` + `MQ` all present → keep all three
/// 2. `AS` + `XS` present → keep those two (`MQ` alone is never kept)
/// 3. `AS` present → keep it alone
///
/// A record without `AS` fails with [`MetricsError::MissingAlignmentScore`];
/// callers drop it and keep going.
///
pub fn classify(record: &RecordBuf) -> Result<ClassifiedRecord, MetricsError> {
    let insert_size = i64::from(record.template_length());
    let proper_pair = i64::from(record.flags().contains(Flags::PROPERLY_SEGMENTED));
    // 255 is the SAM sentinel for unavailable mapping quality
    let mapq = record
        .mapping_quality()
        .map(|mq| i64::from(u8::from(mq)))
        .unwrap_or(255);

    let data = record.data();
    let alignment_score = data
        .get(&Tag::ALIGNMENT_SCORE)
        .and_then(|value| value.as_int());
    let secondary_score = data
        .get(&SECONDARY_SCORE_TAG)
        .and_then(|value| value.as_int());
    let mate_mapq = data
        .get(&Tag::MATE_MAPPING_QUALITY)
        .and_then(|value| value.as_int());

    let (alignment_score, secondary_score, mate_mapq) =
        match (alignment_score, secondary_score, mate_mapq) {
            (Some(score), Some(xs), Some(mq)) => (score, Some(xs), Some(mq)),
            (Some(score), Some(xs), None) => (score, Some(xs), None),
            (Some(score), None, _) => (score, None, None),
            (None, _, _) => {
                let name = record
                    .name()
                    .map(|n| String::from_utf8_lossy(n).into_owned())
                    .unwrap_or_else(|| "<unnamed>".to_string());
                return Err(MetricsError::MissingAlignmentScore(name));
            }
        };

    Ok(ClassifiedRecord {
        insert_size,
        proper_pair,
        mapq,
        alignment_score,
        secondary_score,
        mate_mapq,
    })
}

#[cfg(test)]
mod tests {
    use noodles::sam::alignment::record::MappingQuality;
    use noodles::sam::alignment::record_buf::data::field::Value;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    fn record_with_tags(tags: &[(Tag, i32)]) -> RecordBuf {
        let mut record = RecordBuf::default();
        *record.flags_mut() = Flags::SEGMENTED | Flags::PROPERLY_SEGMENTED;
        *record.template_length_mut() = 150;
        *record.mapping_quality_mut() = Some(MappingQuality::new(30).unwrap());
        for (tag, value) in tags {
            record.data_mut().insert(*tag, Value::from(*value));
        }
        record
    }

    #[rstest]
    fn test_tier_one_all_tags() {
        let record = record_with_tags(&[
            (Tag::ALIGNMENT_SCORE, 100),
            (SECONDARY_SCORE_TAG, 80),
            (Tag::MATE_MAPPING_QUALITY, 60),
        ]);
        let classified = classify(&record).unwrap();
        assert_eq!(classified.alignment_score, 100);
        assert_eq!(classified.secondary_score, Some(80));
        assert_eq!(classified.mate_mapq, Some(60));
        assert_eq!(classified.insert_size, 150);
        assert_eq!(classified.proper_pair, 1);
        assert_eq!(classified.mapq, 30);
    }

    #[rstest]
    fn test_tier_two_no_mate_mapq() {
        let record =
            record_with_tags(&[(Tag::ALIGNMENT_SCORE, 5), (SECONDARY_SCORE_TAG, 3)]);
        let classified = classify(&record).unwrap();
        assert_eq!(classified.alignment_score, 5);
        assert_eq!(classified.secondary_score, Some(3));
        // tier 2, never tier 1 or 3
        assert_eq!(classified.mate_mapq, None);
    }

    #[rstest]
    fn test_tier_three_drops_lone_mate_mapq() {
        // MQ without XS lands in tier 3: only AS survives
        let record =
            record_with_tags(&[(Tag::ALIGNMENT_SCORE, 42), (Tag::MATE_MAPPING_QUALITY, 60)]);
        let classified = classify(&record).unwrap();
        assert_eq!(classified.alignment_score, 42);
        assert_eq!(classified.secondary_score, None);
        assert_eq!(classified.mate_mapq, None);
    }

    #[rstest]
    fn test_missing_alignment_score_is_an_error() {
        let record = record_with_tags(&[(Tag::MATE_MAPPING_QUALITY, 60)]);
        let result = classify(&record);
        assert!(matches!(
            result,
            Err(MetricsError::MissingAlignmentScore(_))
        ));
    }

    #[rstest]
    fn test_negative_insert_size_is_preserved() {
        let mut record = record_with_tags(&[(Tag::ALIGNMENT_SCORE, 10)]);
        *record.template_length_mut() = -412;
        let classified = classify(&record).unwrap();
        assert_eq!(classified.insert_size, -412);
    }

    #[rstest]
    fn test_not_proper_pair() {
        let mut record = record_with_tags(&[(Tag::ALIGNMENT_SCORE, 10)]);
        *record.flags_mut() = Flags::SEGMENTED;
        let classified = classify(&record).unwrap();
        assert_eq!(classified.proper_pair, 0);
    }

    #[rstest]
    fn test_missing_mapping_quality_maps_to_255() {
        let mut record = record_with_tags(&[(Tag::ALIGNMENT_SCORE, 10)]);
        *record.mapping_quality_mut() = None;
        let classified = classify(&record).unwrap();
        assert_eq!(classified.mapq, 255);
    }
}
