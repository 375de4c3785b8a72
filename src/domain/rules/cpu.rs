use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::thresholds::Thresholds;

use super::Rule;

pub struct CpuLimitRule;

impl Rule for CpuLimitRule {
    fn name(&self) -> &'static str {
        "cpu_limit"
    }

    fn evaluate(&self, sample: &Sample, thresholds: &Thresholds) -> Option<String> {
        (sample.cpu_percent > thresholds.cpu_limit)
            .then(|| format!("🔥 CPU en surchauffe : {:.1}%", sample.cpu_percent))
    }
}
