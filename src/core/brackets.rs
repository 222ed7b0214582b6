use super::types::{Bracket, FilingStatus};

pub const TAX_YEAR: u16 = 2024;

const SINGLE_BRACKETS: [Bracket; 7] = [
    Bracket::new(0.0, 11_600.0, 0.10),
    Bracket::new(11_601.0, 47_150.0, 0.12),
    Bracket::new(47_151.0, 100_525.0, 0.22),
    Bracket::new(100_526.0, 191_950.0, 0.24),
    Bracket::new(191_951.0, 243_725.0, 0.32),
    Bracket::new(243_726.0, 609_350.0, 0.35),
    Bracket::open(609_351.0, 0.37),
];

const MARRIED_BRACKETS: [Bracket; 7] = [
    Bracket::new(0.0, 23_200.0, 0.10),
    Bracket::new(23_201.0, 94_150.0, 0.12),
    Bracket::new(94_151.0, 201_050.0, 0.22),
    Bracket::new(201_051.0, 383_900.0, 0.24),
    Bracket::new(383_901.0, 487_450.0, 0.32),
    Bracket::new(487_451.0, 731_200.0, 0.35),
    Bracket::open(731_201.0, 0.37),
];

const STANDARD_DEDUCTION_SINGLE: f64 = 14_600.0;
const STANDARD_DEDUCTION_MARRIED: f64 = 29_200.0;

pub fn brackets_for(status: FilingStatus) -> &'static [Bracket] {
    match status {
        FilingStatus::Single => &SINGLE_BRACKETS,
        FilingStatus::Married => &MARRIED_BRACKETS,
    }
}

pub fn standard_deduction_for(status: FilingStatus) -> f64 {
    match status {
        FilingStatus::Single => STANDARD_DEDUCTION_SINGLE,
        FilingStatus::Married => STANDARD_DEDUCTION_MARRIED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUSES: [FilingStatus; 2] = [FilingStatus::Single, FilingStatus::Married];

    #[test]
    fn schedules_are_contiguous_and_ascending() {
        for status in STATUSES {
            let brackets = brackets_for(status);
            assert_eq!(brackets.len(), 7);
            assert_eq!(brackets[0].lower, 0.0);
            for pair in brackets.windows(2) {
                let upper = pair[0].upper.expect("only the top bracket is open");
                assert_eq!(pair[1].lower, upper + 1.0, "{status} gap at {upper}");
                assert!(pair[1].lower > pair[0].lower);
                assert!(pair[1].rate >= pair[0].rate);
            }
            assert!(brackets[brackets.len() - 1].upper.is_none());
        }
    }

    #[test]
    fn rates_are_fractions() {
        for status in STATUSES {
            for bracket in brackets_for(status) {
                assert!((0.0..=1.0).contains(&bracket.rate));
            }
        }
    }

    #[test]
    fn standard_deductions_match_2024_tables() {
        assert_eq!(standard_deduction_for(FilingStatus::Single), 14_600.0);
        assert_eq!(standard_deduction_for(FilingStatus::Married), 29_200.0);
    }

    #[test]
    fn married_schedule_is_wider_with_same_rates() {
        let single = brackets_for(FilingStatus::Single);
        let married = brackets_for(FilingStatus::Married);
        for (s, m) in single.iter().zip(married) {
            assert_eq!(s.rate, m.rate);
            assert!(m.width() >= s.width());
        }
    }

    #[test]
    fn width_counts_both_inclusive_bounds() {
        let first = brackets_for(FilingStatus::Single)[0];
        assert_eq!(first.width(), 11_601.0);
        let top = brackets_for(FilingStatus::Single)[6];
        assert!(top.width().is_infinite());
    }
}
