use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::CatalogError;
use crate::models::Probe;
use crate::utils::get_dynamic_reader;

///
/// ProbeCatalog struct, the validated set of target intervals for one run.
///
/// Probes are kept in input order and are NOT deduplicated: a probe listed
/// twice accumulates into the same downstream bucket, which matches the
/// behavior of the upstream pipelines this crate feeds.
///
#[derive(Clone, Debug)]
pub struct ProbeCatalog {
    pub probes: Vec<Probe>,
    pub path: Option<PathBuf>,
}

impl ProbeCatalog {
    ///
    /// Parse an ordered sequence of raw BED-like lines into a catalog.
    ///
    /// Each line must split into at least three tab-separated fields; fields
    /// are whitespace-trimmed and any extra columns are ignored. The end
    /// coordinate must not precede the start. Validation happens here,
    /// upfront, so a malformed file fails before any alignment scan begins.
    ///
    pub fn from_lines<I, S>(lines: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut probes: Vec<Probe> = Vec::new();

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();
            if fields.len() < 3 || fields[..3].iter().any(|f| f.is_empty()) {
                return Err(CatalogError::MalformedInterval(line.to_string()));
            }

            let start: u32 = fields[1]
                .parse()
                .map_err(|_| CatalogError::CoordinateParseError(line.to_string()))?;
            let end: u32 = fields[2]
                .parse()
                .map_err(|_| CatalogError::CoordinateParseError(line.to_string()))?;

            // zero-width intervals are representable; inverted ones are not
            if end < start {
                return Err(CatalogError::InvertedInterval(line.to_string()));
            }

            probes.push(Probe {
                chrom: fields[0].to_string(),
                start,
                end,
            });
        }

        Ok(ProbeCatalog { probes, path: None })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Probe> {
        self.probes.iter()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl TryFrom<&Path> for ProbeCatalog {
    type Error = CatalogError;

    ///
    /// Create a new [ProbeCatalog] from a bed file on disk. Gzipped files
    /// are handled transparently.
    ///
    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| CatalogError::Io(std::io::Error::other(e.to_string())))?;

        let mut lines: Vec<String> = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }

        let mut catalog = ProbeCatalog::from_lines(&lines)?;
        if catalog.probes.is_empty() {
            return Err(CatalogError::EmptyCatalog(value.display().to_string()));
        }

        catalog.path = Some(value.to_owned());
        Ok(catalog)
    }
}

impl TryFrom<&str> for ProbeCatalog {
    type Error = CatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ProbeCatalog::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for ProbeCatalog {
    type Error = CatalogError;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        ProbeCatalog::try_from(value.as_path())
    }
}

impl From<Vec<Probe>> for ProbeCatalog {
    fn from(probes: Vec<Probe>) -> Self {
        ProbeCatalog { probes, path: None }
    }
}

impl<'a> IntoIterator for &'a ProbeCatalog {
    type Item = &'a Probe;
    type IntoIter = std::slice::Iter<'a, Probe>;

    fn into_iter(self) -> Self::IntoIter {
        self.probes.iter()
    }
}
