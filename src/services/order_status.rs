//! Derives an order's aggregate status from the statuses of its items.
//!
//! Only the set of distinct statuses matters, so the result does not depend
//! on item order or on how many items share a status.

use std::collections::HashSet;

use crate::models::{OrderItemStatus, OrderStatus};

/// Returns `None` for an order without items, which leaves its stored status untouched.
pub fn aggregate_status<I>(statuses: I) -> Option<OrderStatus>
where
    I: IntoIterator<Item = OrderItemStatus>,
{
    use OrderItemStatus::*;

    let distinct: HashSet<OrderItemStatus> = statuses.into_iter().collect();
    if distinct.is_empty() {
        return None;
    }

    let all = |allowed: &[OrderItemStatus]| distinct.iter().all(|s| allowed.contains(s));

    let status = if all(&[Completed]) {
        OrderStatus::Delivered
    } else if all(&[Shipped, Completed]) {
        OrderStatus::Shipped
    } else if all(&[Waiting]) {
        OrderStatus::Pending
    } else if all(&[Confirmed, Waiting]) {
        OrderStatus::Confirmed
    } else if all(&[Canceled]) {
        OrderStatus::Canceled
    } else {
        OrderStatus::Processing
    };

    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItemStatus::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[Completed, Completed], OrderStatus::Delivered)]
    #[case(&[Completed], OrderStatus::Delivered)]
    #[case(&[Shipped, Completed], OrderStatus::Shipped)]
    #[case(&[Shipped], OrderStatus::Shipped)]
    #[case(&[Waiting, Confirmed], OrderStatus::Confirmed)]
    #[case(&[Confirmed, Confirmed], OrderStatus::Confirmed)]
    #[case(&[Waiting, Waiting], OrderStatus::Pending)]
    #[case(&[Waiting], OrderStatus::Pending)]
    #[case(&[Canceled, Canceled], OrderStatus::Canceled)]
    #[case(&[Waiting, Shipped], OrderStatus::Processing)]
    #[case(&[Confirmed, Shipped], OrderStatus::Processing)]
    #[case(&[Completed, Canceled], OrderStatus::Processing)]
    #[case(&[Waiting, Canceled], OrderStatus::Processing)]
    fn maps_item_statuses(#[case] items: &[OrderItemStatus], #[case] expected: OrderStatus) {
        assert_eq!(aggregate_status(items.iter().copied()), Some(expected));
    }

    #[test]
    fn empty_order_has_no_derived_status() {
        assert_eq!(aggregate_status(Vec::new()), None);
    }

    #[test]
    fn result_ignores_item_order_and_multiplicity() {
        let mut combos = Vec::new();
        for a in OrderItemStatus::ALL {
            for b in OrderItemStatus::ALL {
                for c in OrderItemStatus::ALL {
                    combos.push([a, b, c]);
                }
            }
        }

        for [a, b, c] in combos {
            let forward = aggregate_status([a, b, c]);
            assert!(forward.is_some());
            assert_eq!(forward, aggregate_status([c, b, a]));
            assert_eq!(forward, aggregate_status([b, c, a, a, c]));
        }
    }
}
