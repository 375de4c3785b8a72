use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::thresholds::Thresholds;

use super::Rule;

pub struct RamLimitRule;

impl Rule for RamLimitRule {
    fn name(&self) -> &'static str {
        "ram_limit"
    }

    fn evaluate(&self, sample: &Sample, thresholds: &Thresholds) -> Option<String> {
        (sample.ram_percent > thresholds.ram_limit)
            .then(|| format!("🧠 RAM saturée : {:.1}%", sample.ram_percent))
    }
}
