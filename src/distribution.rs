//! Bucketing for chart data.
//!
//! Frequency mode ranks free-text labels by how often they occur. Histogram
//! mode assigns numeric values to declared, ordered ranges. The two are
//! separate entry points and never inferred from the data.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{DistributionBucket, StudentRecord};

pub const NOT_SPECIFIED: &str = "Not Specified";

/// Width of the dynamically computed salary bins.
pub const SALARY_STEP: i64 = 10_000;

/// Upper edges of the fixed salary bands, in ascending order.
pub const SALARY_BAND_EDGES: [i64; 5] = [50_000, 75_000, 100_000, 125_000, 150_000];

/// Share of `count` in `total` as a whole percentage, rounded half up.
/// An empty population is 0%.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (count as u128 * 200 + total as u128) / (total as u128 * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Counts the labels each item contributes and returns them most frequent
/// first. Ties keep first-seen order. Truncation is up to the caller.
pub fn frequency<'a, T, F, L, S>(items: &'a [T], mut labels: F) -> Vec<DistributionBucket>
where
    F: FnMut(&'a T) -> L,
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<(String, usize)> = Vec::new();

    for item in items {
        for label in labels(item) {
            let label = label.as_ref();
            match positions.get(label) {
                Some(&position) => tallies[position].1 += 1,
                None => {
                    positions.insert(label.to_string(), tallies.len());
                    tallies.push((label.to_string(), 1));
                }
            }
        }
    }

    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    tallies
        .into_iter()
        .map(|(label, count)| DistributionBucket {
            label,
            count,
            percentage: None,
        })
        .collect()
}

/// The field value, or the "Not Specified" sentinel when it is empty.
pub fn or_not_specified(value: &str) -> &str {
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

/// Every non-empty preferred location slot counts once.
pub fn location_preferences(students: &[StudentRecord]) -> Vec<DistributionBucket> {
    frequency(students, |student| {
        student
            .preferred_locations()
            .into_iter()
            .filter(|location| !location.is_empty())
    })
}

pub fn work_mode_preferences(students: &[StudentRecord]) -> Vec<DistributionBucket> {
    frequency(students, |student| {
        [or_not_specified(&student.work_mode_preference)]
    })
}

pub fn job_search_statuses(students: &[StudentRecord]) -> Vec<DistributionBucket> {
    frequency(students, |student| {
        [or_not_specified(&student.job_search_status)]
    })
}

/// A half-open range `[start, end)`; `end == None` is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    pub label: String,
    pub start: i64,
    pub end: Option<i64>,
}

impl Bin {
    pub fn contains(&self, value: i64) -> bool {
        value >= self.start && self.end.map_or(true, |end| value < end)
    }
}

/// Contiguous, non-overlapping bins in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bins(Vec<Bin>);

impl Bins {
    /// `[0, e0), [e0, e1), ..., [e_last, inf)` from upper edges. Edges are
    /// sorted and deduplicated first, so the bins never overlap.
    pub fn from_edges(edges: &[i64]) -> Self {
        let mut edges = edges.to_vec();
        edges.sort_unstable();
        edges.dedup();

        let Some((&first, _)) = edges.split_first() else {
            return Bins(vec![Bin {
                label: "all".to_string(),
                start: 0,
                end: None,
            }]);
        };

        let mut bins = vec![Bin {
            label: format!("<{}", thousands(first)),
            start: 0,
            end: Some(first),
        }];
        for pair in edges.windows(2) {
            bins.push(Bin {
                label: format!("{}-{}", thousands(pair[0]), thousands(pair[1])),
                start: pair[0],
                end: Some(pair[1]),
            });
        }
        if let Some(&last) = edges.last() {
            bins.push(Bin {
                label: format!("{}+", thousands(last)),
                start: last,
                end: None,
            });
        }
        Bins(bins)
    }

    /// Fixed-width bins covering every positive value, starting at the
    /// width-aligned floor of the smallest one. The last bin always contains
    /// the largest value.
    pub fn uniform(values: &[i64], width: i64) -> Self {
        let width = width.max(1);
        let mut positive = values.iter().copied().filter(|value| *value > 0);
        let Some(first) = positive.next() else {
            return Bins(Vec::new());
        };
        let (min, max) = positive.fold((first, first), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

        let start = (min / width) * width;
        let end = (max / width) * width + width;
        let bins = (start..end)
            .step_by(width as usize)
            .map(|lower| Bin {
                label: format!("{}-{}", lower, lower + width),
                start: lower,
                end: Some(lower + width),
            })
            .collect();
        Bins(bins)
    }

    pub fn as_slice(&self) -> &[Bin] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn locate(&self, value: i64) -> Option<usize> {
        self.0.iter().position(|bin| bin.contains(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    /// One bucket per bin, in bin order. Percentages are of `included`.
    pub buckets: Vec<DistributionBucket>,
    pub included: usize,
    /// Values that were zero or negative.
    pub non_positive: usize,
    /// Positive values that fell outside every bin.
    pub out_of_range: usize,
}

/// Assigns each positive value to the single bin containing it.
pub fn histogram<I>(values: I, bins: &Bins) -> Histogram
where
    I: IntoIterator<Item = i64>,
{
    let mut counts = vec![0usize; bins.len()];
    let mut non_positive = 0;
    let mut out_of_range = 0;

    for value in values {
        if value <= 0 {
            non_positive += 1;
            continue;
        }
        match bins.locate(value) {
            Some(index) => counts[index] += 1,
            None => out_of_range += 1,
        }
    }

    let included = counts.iter().sum();
    let buckets = bins
        .as_slice()
        .iter()
        .zip(counts)
        .map(|(bin, count)| DistributionBucket {
            label: bin.label.clone(),
            count,
            percentage: Some(percentage(count, included)),
        })
        .collect();

    Histogram {
        buckets,
        included,
        non_positive,
        out_of_range,
    }
}

pub fn salary_values(students: &[StudentRecord]) -> Vec<i64> {
    students
        .iter()
        .map(|student| i64::try_from(student.expected_salary).unwrap_or(i64::MAX))
        .collect()
}

pub fn salary_bands(students: &[StudentRecord]) -> Histogram {
    histogram(salary_values(students), &Bins::from_edges(&SALARY_BAND_EDGES))
}

pub fn salary_distribution(students: &[StudentRecord]) -> Histogram {
    let values = salary_values(students);
    let bins = Bins::uniform(&values, SALARY_STEP);
    histogram(values, &bins)
}

fn thousands(value: i64) -> String {
    if value % 1_000 == 0 {
        format!("{}k", value / 1_000)
    } else {
        value.to_string()
    }
}
