use pdf_unbooklet::layout::{booklet_page_numbers, booklet_page_pairs};
use pdf_unbooklet::*;
use std::collections::BTreeSet;

const ORDERS: [ScanOrder; 2] = [ScanOrder::CoverFirst, ScanOrder::CenterFirst];

#[test]
fn test_cover_first_eight_pages() {
    assert_eq!(
        booklet_page_pairs(8, ScanOrder::CoverFirst).unwrap(),
        vec![(8, 1), (2, 7), (6, 3), (4, 5)]
    );
}

#[test]
fn test_center_first_eight_pages() {
    assert_eq!(
        booklet_page_pairs(8, ScanOrder::CenterFirst).unwrap(),
        vec![(4, 5), (6, 3), (2, 7), (8, 1)]
    );
}

#[test]
fn test_hundred_pages() {
    assert_eq!(
        booklet_page_numbers(0, 100, ScanOrder::CoverFirst).unwrap(),
        (100, 1)
    );
    assert_eq!(
        booklet_page_numbers(3, 100, ScanOrder::CoverFirst).unwrap(),
        (4, 97)
    );
    assert_eq!(
        booklet_page_numbers(5, 100, ScanOrder::CenterFirst).unwrap(),
        (56, 45)
    );
}

#[test]
fn test_scan_orders_are_reversed() {
    // Scanning from the binder visits the same sheets in reverse
    for total_pages in (2..=40).step_by(2) {
        let mut cover_first = booklet_page_pairs(total_pages, ScanOrder::CoverFirst).unwrap();
        let center_first = booklet_page_pairs(total_pages, ScanOrder::CenterFirst).unwrap();
        cover_first.reverse();
        let as_sets = |pairs: Vec<(usize, usize)>| {
            pairs
                .into_iter()
                .map(|(l, r)| (l.min(r), l.max(r)))
                .collect::<Vec<_>>()
        };
        assert_eq!(as_sets(cover_first), as_sets(center_first));
    }
}

#[test]
fn test_single_sheet() {
    assert_eq!(
        booklet_page_numbers(0, 2, ScanOrder::CoverFirst).unwrap(),
        (2, 1)
    );
    assert_eq!(
        booklet_page_numbers(0, 2, ScanOrder::CenterFirst).unwrap(),
        (1, 2)
    );
}

#[test]
fn test_invalid_arguments() {
    for order in ORDERS {
        assert!(matches!(
            booklet_page_numbers(0, 7, order),
            Err(UnbookletError::InvalidArgument(_))
        ));
        assert!(matches!(
            booklet_page_numbers(0, 0, order),
            Err(UnbookletError::InvalidArgument(_))
        ));
        assert!(matches!(
            booklet_page_numbers(4, 8, order),
            Err(UnbookletError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_scan_order_from_binder() {
    assert_eq!(ScanOrder::from_binder(false), ScanOrder::CoverFirst);
    assert_eq!(ScanOrder::from_binder(true), ScanOrder::CenterFirst);
    assert!(ScanOrder::CenterFirst.is_from_binder());
    assert_eq!(ScanOrder::default(), ScanOrder::CoverFirst);
}

// Property tests using proptest
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn even_page_count() -> impl Strategy<Value = usize> {
        (1..=500usize).prop_map(|n| n * 2)
    }

    fn scan_order() -> impl Strategy<Value = ScanOrder> {
        prop::sample::select(ORDERS.to_vec())
    }

    proptest! {
        /// Every logical page lands on exactly one half of exactly one sheet
        #[test]
        fn every_page_assigned_exactly_once(
            total_pages in even_page_count(),
            order in scan_order()
        ) {
            let mut seen = BTreeSet::new();
            for (left, right) in booklet_page_pairs(total_pages, order).unwrap() {
                prop_assert!(seen.insert(left), "{} repeated", left);
                prop_assert!(seen.insert(right), "{} repeated", right);
            }
            prop_assert_eq!(seen, (1..=total_pages).collect::<BTreeSet<_>>());
        }

        /// Facing halves of a sheet always add up to one past the page count
        #[test]
        fn pairs_sum_to_page_count(total_pages in even_page_count(), order in scan_order()) {
            for (left, right) in booklet_page_pairs(total_pages, order).unwrap() {
                prop_assert_eq!(left + right, total_pages + 1);
            }
        }

        /// Odd page counts are always rejected
        #[test]
        fn odd_page_count_rejected(
            total_pages in (0..500usize).prop_map(|n| n * 2 + 1),
            order in scan_order()
        ) {
            prop_assert!(matches!(
                booklet_page_numbers(0, total_pages, order),
                Err(UnbookletError::InvalidArgument(_))
            ));
        }
    }
}
