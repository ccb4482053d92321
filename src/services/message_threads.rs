use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Message, MessageThread};

/// Groups a seller's product messages into one thread per (product, buyer),
/// newest thread first.
pub fn seller_threads(
    seller_id: Uuid,
    messages: &[Message],
    seller_products: &HashMap<i32, String>,
) -> Vec<MessageThread> {
    let mut threads: HashMap<(i32, Uuid), MessageThread> = HashMap::new();

    for message in messages {
        let Some(product_id) = message.product_id else {
            continue;
        };
        let Some(product_name) = seller_products.get(&product_id) else {
            continue;
        };

        let buyer_id = if message.sender_id == seller_id {
            message.receiver_id
        } else if message.receiver_id == seller_id {
            message.sender_id
        } else {
            continue;
        };

        threads
            .entry((product_id, buyer_id))
            .and_modify(|thread| {
                if message.sent_at >= thread.last_date {
                    thread.last_date = message.sent_at;
                    thread.last_message = message.content.clone();
                }
            })
            .or_insert_with(|| MessageThread {
                product_id,
                product_name: product_name.clone(),
                buyer_id,
                last_message: message.content.clone(),
                last_date: message.sent_at,
            });
    }

    let mut threads: Vec<MessageThread> = threads.into_values().collect();
    threads.sort_by(|a, b| b.last_date.cmp(&a.last_date));
    threads
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn message(id: i32, from: Uuid, to: Uuid, product_id: Option<i32>, minute: i64) -> Message {
        Message {
            id,
            sender_id: from,
            receiver_id: to,
            content: format!("message {}", id),
            sent_at: Utc.with_ymd_and_hms(2025, 4, 16, 12, 0, 0).unwrap() + Duration::minutes(minute),
            is_read: false,
            product_id,
            product_name: None,
        }
    }

    #[test]
    fn one_thread_per_product_and_buyer_with_latest_message() {
        let seller = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let products = HashMap::from([(1, "Lamp".to_string()), (2, "Desk".to_string())]);

        let messages = vec![
            message(1, alice, seller, Some(1), 0),
            message(2, seller, alice, Some(1), 5),
            message(3, bob, seller, Some(1), 1),
            message(4, alice, seller, Some(2), 10),
        ];

        let threads = seller_threads(seller, &messages, &products);

        assert_eq!(threads.len(), 3);
        assert_eq!(threads[0].product_name, "Desk");
        assert_eq!(threads[0].last_message, "message 4");
        assert_eq!(threads[1].buyer_id, alice);
        assert_eq!(threads[1].product_id, 1);
        assert_eq!(threads[1].last_message, "message 2");
        assert_eq!(threads[2].buyer_id, bob);
    }

    #[test]
    fn skips_unscoped_and_foreign_product_messages() {
        let seller = Uuid::new_v4();
        let buyer = Uuid::new_v4();
        let products = HashMap::from([(1, "Lamp".to_string())]);

        let messages = vec![
            message(1, buyer, seller, None, 0),
            message(2, buyer, seller, Some(99), 1),
            message(3, buyer, Uuid::new_v4(), Some(1), 2),
        ];

        assert!(seller_threads(seller, &messages, &products).is_empty());
    }
}
