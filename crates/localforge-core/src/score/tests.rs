//! Tests for score types.

use super::*;

mod simple_score {
    use super::*;

    #[test]
    fn test_comparison() {
        let s1 = SimpleScore::of(-10);
        let s2 = SimpleScore::of(-5);

        assert!(s2 > s1);
        assert_eq!(s1.max(s2), s2);
    }

    #[test]
    fn test_arithmetic() {
        let s1 = SimpleScore::of(10);
        let s2 = SimpleScore::of(3);

        assert_eq!(s1 + s2, SimpleScore::of(13));
        assert_eq!(s1 - s2, SimpleScore::of(7));
        assert_eq!(-s1, SimpleScore::of(-10));
        assert_eq!(SimpleScore::of(-7).abs(), SimpleScore::of(7));
    }

    #[test]
    fn test_multiply_divide() {
        let score = SimpleScore::of(10);

        assert_eq!(score.multiply(2.5), SimpleScore::of(25));
        assert_eq!(score.divide(4.0), SimpleScore::of(3));
    }

    #[test]
    fn test_parse() {
        assert_eq!(SimpleScore::parse("42").unwrap(), SimpleScore::of(42));
        assert_eq!(SimpleScore::parse(" -10 ").unwrap(), SimpleScore::of(-10));
        assert!(SimpleScore::parse("ten").is_err());
    }

    #[test]
    fn test_level_numbers() {
        let score = SimpleScore::of(-5);
        assert_eq!(score.to_level_numbers(), vec![-5]);
        assert_eq!(SimpleScore::from_level_numbers(&[-5]), score);
    }
}

mod hard_soft_score {
    use super::*;

    #[test]
    fn test_hard_dominates_soft() {
        assert!(HardSoftScore::of(0, -1000) > HardSoftScore::of(-1, 0));
        assert!(HardSoftScore::of(-1, -1000) > HardSoftScore::of(-2, 0));
        assert!(HardSoftScore::of(0, -50) > HardSoftScore::of(0, -100));
    }

    #[test]
    fn test_feasibility() {
        assert!(HardSoftScore::of(0, -1000).is_feasible());
        assert!(!HardSoftScore::of(-1, 0).is_feasible());
    }

    #[test]
    fn test_arithmetic() {
        let s1 = HardSoftScore::of(-1, -100);
        let s2 = HardSoftScore::of(-1, -50);

        assert_eq!(s1 + s2, HardSoftScore::of(-2, -150));
        assert_eq!(s1 - s2, HardSoftScore::of(0, -50));
        assert_eq!(-s1, HardSoftScore::of(1, 100));
        assert_eq!(s1.abs(), HardSoftScore::of(1, 100));
    }

    #[test]
    fn test_parse_and_display() {
        let score = HardSoftScore::parse("-1hard/-100soft").unwrap();
        assert_eq!(score, HardSoftScore::of(-1, -100));
        assert_eq!(format!("{}", score), "-1hard/-100soft");
        assert_eq!(score.to_string_repr(), "-1hard/-100soft");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(HardSoftScore::parse("-1hard").is_err());
        assert!(HardSoftScore::parse("-1hard/2medium").is_err());
        assert!(HardSoftScore::parse("0hard/0soft/0soft").is_err());
    }

    #[test]
    fn test_level_numbers() {
        let score = HardSoftScore::of(-2, -50);
        assert_eq!(score.to_level_numbers(), vec![-2, -50]);
        assert_eq!(HardSoftScore::from_level_numbers(&[-2, -50]), score);
        assert_eq!(HardSoftScore::levels_count(), 2);
    }

    #[test]
    fn test_scaling_rounds_each_level() {
        let score = HardSoftScore::of(-3, -1000);
        assert_eq!(score.multiply(0.5), HardSoftScore::of(-2, -500));
        assert_eq!(score.abs().multiply(0.1), HardSoftScore::of(0, 100));
        assert_eq!(score.divide(3.0), HardSoftScore::of(-1, -333));
    }
}
