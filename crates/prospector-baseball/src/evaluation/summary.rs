// Narrative summary of an evaluation.

use super::report::MetricStanding;

pub fn narrative(is_prospect: bool, ranking: u32, improvement_areas: &[MetricStanding]) -> String {
    if is_prospect {
        return format!("Shows a prospect profile with a composite ranking of {ranking}%.");
    }
    if improvement_areas.is_empty() {
        return "Does not yet fit the prospect profile. Overall stats are solid but still need development."
            .to_string();
    }
    let names: Vec<&str> = improvement_areas.iter().map(|m| m.metric.as_str()).collect();
    format!(
        "Does not yet fit the prospect profile. Key areas to improve: {}.",
        names.join(", ")
    )
}
