//! Per-cluster member statistics.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::catalog::ColorRecord;
use crate::similarity::table::round_to;

/// Mean channel intensities of a cluster, rounded to one decimal.
///
/// A channel is `None` when no member has a defined value for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelMeans {
    pub r: Option<f64>,
    pub g: Option<f64>,
    pub b: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub count: usize,
    pub top_colors: Vec<String>,
    pub avg_rgb: ChannelMeans,
}

/// Summaries keyed by cluster id; every id in `[0, k)` is present.
pub type ClusterSummaries = BTreeMap<usize, ClusterSummary>;

/// Summarize `records` under `labels`.
///
/// `top_colors` names are ranked by frequency within the cluster, ties kept
/// in order of first appearance. Empty names are counted as members but
/// never listed.
pub fn summarize(
    records: &[ColorRecord],
    labels: &[usize],
    k: usize,
    top_colors: usize,
) -> ClusterSummaries {
    let mut members: Vec<Vec<&ColorRecord>> = vec![Vec::new(); k];
    for (record, &label) in records.iter().zip(labels) {
        if label < k {
            members[label].push(record);
        }
    }

    members
        .into_iter()
        .enumerate()
        .map(|(cluster, rows)| {
            let summary = ClusterSummary {
                count: rows.len(),
                top_colors: most_frequent_names(&rows, top_colors),
                avg_rgb: ChannelMeans {
                    r: channel_mean(&rows, 0),
                    g: channel_mean(&rows, 1),
                    b: channel_mean(&rows, 2),
                },
            };
            (cluster, summary)
        })
        .collect()
}

fn most_frequent_names(rows: &[&ColorRecord], limit: usize) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in rows {
        let name = record.name.as_str();
        if name.trim().is_empty() {
            continue;
        }
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    // stable: equal counts keep first-appearance order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn channel_mean(rows: &[&ColorRecord], channel: usize) -> Option<f64> {
    let (sum, count) = rows
        .iter()
        .filter_map(|record| record.channel(channel))
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(round_to(sum / count as f64, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_counts_ranks_and_averages() {
        let records = vec![
            ColorRecord::rgb("blue", 0.0, 0.0, 250.0),
            ColorRecord::rgb("navy", 0.0, 0.0, 128.0),
            ColorRecord::rgb("navy", 0.0, 1.0, 130.0),
            ColorRecord::rgb("red", 255.0, 0.0, 0.0),
        ];
        let labels = vec![0, 0, 0, 1];
        let summaries = summarize(&records, &labels, 3, 5);

        assert_eq!(summaries.len(), 3);
        let blues = &summaries[&0];
        assert_eq!(blues.count, 3);
        assert_eq!(blues.top_colors, vec!["navy", "blue"]);
        assert_eq!(blues.avg_rgb.r, Some(0.0));
        assert_eq!(blues.avg_rgb.g, Some(0.3));
        assert_eq!(blues.avg_rgb.b, Some(169.3));

        let empty = &summaries[&2];
        assert_eq!(empty.count, 0);
        assert!(empty.top_colors.is_empty());
        assert_eq!(empty.avg_rgb.r, None);
    }

    #[test]
    fn ties_keep_first_appearance() {
        let records = vec![
            ColorRecord::rgb("teal", 0.0, 128.0, 128.0),
            ColorRecord::rgb("aqua", 0.0, 255.0, 255.0),
            ColorRecord::rgb("cyan", 0.0, 255.0, 255.0),
        ];
        let summaries = summarize(&records, &[0, 0, 0], 1, 2);
        assert_eq!(summaries[&0].top_colors, vec!["teal", "aqua"]);
    }

    #[test]
    fn means_skip_missing_channels() {
        let records = vec![
            ColorRecord::new("a", Some(10.0), None, Some(1.0), ""),
            ColorRecord::new("b", Some(20.0), None, None, ""),
        ];
        let summaries = summarize(&records, &[0, 0], 1, 5);
        let means = summaries[&0].avg_rgb;
        assert_eq!(means.r, Some(15.0));
        assert_eq!(means.g, None);
        assert_eq!(means.b, Some(1.0));
    }

    #[test]
    fn halfway_means_round_to_even() {
        let records = vec![
            ColorRecord::rgb("a", 10.0, 0.0, 0.0),
            ColorRecord::rgb("b", 10.0, 0.0, 0.0),
            ColorRecord::rgb("c", 10.0, 0.0, 0.0),
            ColorRecord::rgb("d", 11.0, 0.0, 0.0),
        ];
        let summaries = summarize(&records, &[0, 0, 0, 0], 1, 5);
        assert_eq!(summaries[&0].avg_rgb.r, Some(10.2));
    }

    #[test]
    fn summaries_serialize_with_string_keys() {
        let records = vec![ColorRecord::rgb("red", 255.0, 0.0, 0.0)];
        let summaries = summarize(&records, &[0], 2, 5);
        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(json["0"]["count"], 1);
        assert_eq!(json["0"]["topColors"][0], "red");
        assert_eq!(json["0"]["avgRgb"]["r"], 255.0);
        assert!(json["1"]["avgRgb"]["g"].is_null());
    }
}
