use crate::models::Grade;

/// Upper bounds on average absolute divergence, ascending
const GRADE_THRESHOLDS: [(f64, Grade); 12] = [
    (0.8, Grade::A),
    (1.0, Grade::AMinus),
    (1.2, Grade::BPlus),
    (1.8, Grade::B),
    (2.0, Grade::BMinus),
    (2.2, Grade::CPlus),
    (2.8, Grade::C),
    (3.0, Grade::CMinus),
    (3.2, Grade::DPlus),
    (3.8, Grade::D),
    (4.0, Grade::DMinus),
    (4.5, Grade::F),
];

/// Grade for an average absolute divergence
///
/// The first bound the value does not exceed wins; anything past the last
/// bound is an F.
pub fn grade_for(abs_avg: f64) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(limit, _)| abs_avg <= *limit)
        .map_or(Grade::F, |(_, grade)| *grade)
}
