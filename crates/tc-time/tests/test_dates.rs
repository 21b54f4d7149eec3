//! Integration tests for `Date`, `WeekMask`, and offset chains.

use proptest::prelude::*;
use tc_time::date::{days_in_month, is_leap_year};
use tc_time::{apply_chain, Date, DateProvider, Month, Observance, Offset, WeekMask, Weekday};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn consecutive_serials_are_consecutive_days() {
    let mut prev = Date::MIN;
    let mut d = Date::MIN + 1;
    while d <= Date::MAX {
        let (py, pm, pd) = prev.ymd();
        let (y, m, dd) = d.ymd();
        let rolled = if pd == days_in_month(py, pm) {
            (dd == 1) && (m == pm % 12 + 1) && (y == if pm == 12 { py + 1 } else { py })
        } else {
            y == py && m == pm && dd == pd + 1
        };
        assert!(rolled, "{prev:?} -> {d:?}");
        assert_eq!(
            d.weekday().ordinal() % 7,
            (prev.weekday().ordinal() + 1) % 7,
            "weekday sequence broken at {d:?}"
        );
        prev = d;
        if d == Date::MAX {
            break;
        }
        d += 1;
    }
}

#[test]
fn leap_years() {
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2100));
    assert!(is_leap_year(2024));
    assert_eq!(Month::February.days_in(2100), 28);
}

#[test]
fn good_friday_and_whit_monday_chains() {
    let good_friday = [Offset::Feast(DateProvider::easter()), Offset::Days(-2)];
    let whit_monday = [Offset::Feast(DateProvider::easter()), Offset::Days(50)];
    assert_eq!(apply_chain(&good_friday, date(2019, 1, 1)).unwrap(), date(2019, 4, 19));
    assert_eq!(apply_chain(&whit_monday, date(2019, 1, 1)).unwrap(), date(2019, 6, 10));
}

#[test]
fn solstice_friday_via_table() {
    // Midsummer Eve (Sweden) is the Friday of the solstice week.
    let solstice = DateProvider::from_table("summer solstice", [date(2021, 6, 21), date(2022, 6, 21)]);
    let chain = [Offset::Feast(solstice), Offset::Observe(Observance::FridayOfWeek)];
    assert_eq!(apply_chain(&chain, date(2021, 1, 1)).unwrap(), date(2021, 6, 25));
    assert_eq!(apply_chain(&chain, date(2022, 1, 1)).unwrap(), date(2022, 6, 24));
}

proptest! {
    #[test]
    fn ymd_round_trip(serial in 1i32..=109_573) {
        let d = Date::from_serial(serial).unwrap();
        let (y, m, dd) = d.ymd();
        prop_assert_eq!(Date::from_ymd(y, m, dd).unwrap(), d);
        prop_assert_eq!(Date::try_from(d.to_naive_date()).unwrap(), d);
    }

    #[test]
    fn week_mask_string_round_trip(bits in 0u8..128) {
        let mask: WeekMask = Weekday::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .map(|(_, w)| *w)
            .collect();
        let parsed: WeekMask = mask.to_string().parse().unwrap();
        prop_assert_eq!(parsed, mask);
        prop_assert_eq!(mask.len(), bits.count_ones() as usize);
    }
}
