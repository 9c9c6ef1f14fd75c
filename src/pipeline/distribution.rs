//! Count of objects per distance bucket.
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use super::boundaries::{DistanceBoundaries, DistanceBucket};

/// Distribution of a distance column over the buckets of a [`DistanceBoundaries`] set.
///
/// Display
/// -----------------
/// * `format!("{}", d)` – one line per bucket, e.g. `Jupiter–Saturn (< 9.58 AU): 1,204`.
/// * `format!("{:#}", d)` – the same counts rendered as a table.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceDistribution {
    boundaries: DistanceBoundaries,
    counts: Vec<usize>,
    undetermined: usize,
}

impl DistanceDistribution {
    /// Tally `distances` into the buckets of `boundaries`.
    pub fn from_distances<I>(boundaries: &DistanceBoundaries, distances: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = vec![0; boundaries.len() + 1];
        let mut undetermined = 0;
        for r in distances {
            match boundaries.classify(r) {
                DistanceBucket::Below(k) => counts[k] += 1,
                DistanceBucket::Beyond => counts[boundaries.len()] += 1,
                DistanceBucket::Undetermined => undetermined += 1,
            }
        }
        Self {
            boundaries: boundaries.clone(),
            counts,
            undetermined,
        }
    }

    pub fn boundaries(&self) -> &DistanceBoundaries {
        &self.boundaries
    }

    /// Number of objects in `bucket`.
    pub fn count(&self, bucket: DistanceBucket) -> usize {
        match bucket {
            DistanceBucket::Below(k) => self.counts.get(k).copied().unwrap_or(0),
            DistanceBucket::Beyond => self.counts[self.boundaries.len()],
            DistanceBucket::Undetermined => self.undetermined,
        }
    }

    /// Number of objects whose distance is undefined.
    pub fn undetermined(&self) -> usize {
        self.undetermined
    }

    /// Number of objects with a defined distance.
    pub fn classified(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of objects, undefined distances included.
    pub fn total(&self) -> usize {
        self.classified() + self.undetermined
    }

    /// `(label, count)` pairs, innermost first, undetermined last.
    pub fn rows(&self) -> Vec<(String, usize)> {
        self.boundaries
            .buckets()
            .chain(std::iter::once(DistanceBucket::Undetermined))
            .map(|bucket| (self.boundaries.label(bucket), self.count(bucket)))
            .collect()
    }

    fn range_text(&self, bucket: DistanceBucket) -> String {
        match self.boundaries.range(bucket) {
            Some((_, upper)) if upper.is_finite() => format!("< {upper} AU"),
            Some((lower, _)) => format!(">= {lower} AU"),
            None => "r undefined".to_string(),
        }
    }

    fn render_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Bucket"),
            Cell::new("Range"),
            Cell::new("Objects"),
            Cell::new("Share"),
        ]);

        let total = self.total().max(1) as f64;
        for bucket in self
            .boundaries
            .buckets()
            .chain(std::iter::once(DistanceBucket::Undetermined))
        {
            let n = self.count(bucket);
            table.add_row(Row::from(vec![
                Cell::new(self.boundaries.label(bucket)),
                Cell::new(self.range_text(bucket)),
                Cell::new(group_thousands(n)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1} %", 100.0 * n as f64 / total))
                    .set_alignment(CellAlignment::Right),
            ]));
        }
        table.add_row(Row::from(vec![
            Cell::new("total"),
            Cell::new(""),
            Cell::new(group_thousands(self.total())).set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]));

        table.to_string()
    }
}

/// `1234567` → `1,234,567`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (k, c) in digits.chars().enumerate() {
        if k > 0 && (digits.len() - k) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for DistanceDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write!(f, "{}", self.render_table());
        }
        writeln!(f, "Objects: {}", group_thousands(self.total()))?;
        for bucket in self.boundaries.buckets() {
            writeln!(
                f,
                "  {} ({}): {}",
                self.boundaries.label(bucket),
                self.range_text(bucket),
                group_thousands(self.count(bucket))
            )?;
        }
        write!(
            f,
            "  undetermined: {}",
            group_thousands(self.undetermined)
        )
    }
}
