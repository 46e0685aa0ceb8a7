use std::collections::HashMap;

use crate::models::{CycleStats, Flow, FlowPattern, PeriodLog};

const TOP_SYMPTOMS: usize = 5;

pub fn calculate_cycle_stats(logs: &[PeriodLog]) -> CycleStats {
    CycleStats {
        average_pain: average_pain(logs),
        most_common_symptoms: most_common_symptoms(logs, TOP_SYMPTOMS),
        flow_pattern: flow_pattern(logs),
    }
}

/// Mean pain rounded to one decimal, `0.0` for an empty history.
fn average_pain(logs: &[PeriodLog]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    let total: u32 = logs.iter().map(|log| u32::from(log.pain)).sum();
    let mean = f64::from(total) / logs.len() as f64;
    (mean * 10.0).round() / 10.0
}

fn most_common_symptoms(logs: &[PeriodLog], limit: usize) -> Vec<String> {
    // (symptom, count) in first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for symptom in logs.iter().flat_map(|log| log.symptoms.iter()) {
        match index.get(symptom.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(symptom.as_str(), counts.len());
                counts.push((symptom.as_str(), 1));
            }
        }
    }

    // stable, so equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(symptom, _)| symptom.to_string())
        .collect()
}

fn flow_pattern(logs: &[PeriodLog]) -> FlowPattern {
    let mut pattern = FlowPattern::default();
    for log in logs {
        match log.flow {
            Flow::Light => pattern.light += 1,
            Flow::Medium => pattern.medium += 1,
            Flow::Heavy => pattern.heavy += 1,
            Flow::Spotting => pattern.spotting += 1,
        }
    }
    pattern
}
