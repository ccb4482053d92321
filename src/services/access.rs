//! Role and ownership predicates checked before each mutation.

use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{Order, OrderItem, OrderItemStatus, Principal, Product, UserCategory, UserRole},
};

pub fn require_role(principal: &Principal, role: UserRole) -> Result<()> {
    if principal.role != role {
        return Err(AppError::Forbidden(format!("{} access required", role)));
    }
    Ok(())
}

pub fn ensure_self(principal: &Principal, user_id: Uuid) -> Result<()> {
    if principal.id != user_id {
        return Err(AppError::Forbidden(
            "You can only act on your own account".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_product_owner(principal: &Principal, product: &Product) -> Result<()> {
    if product.seller_id != principal.id {
        return Err(AppError::Forbidden(
            "Product belongs to another seller".to_string(),
        ));
    }
    Ok(())
}

/// The seller must operate in the category through a user-category link.
pub fn ensure_category_link(
    principal: &Principal,
    links: &[UserCategory],
    category_id: i32,
) -> Result<()> {
    let linked = links
        .iter()
        .any(|link| link.user_id == principal.id && link.category_id == category_id);

    if !linked {
        return Err(AppError::Forbidden(
            "Category is not linked to this seller".to_string(),
        ));
    }
    Ok(())
}

/// A cart item may only be removed by its buyer while it is still unordered.
pub fn ensure_cart_item_owner<'a>(
    principal: &Principal,
    item: Option<&'a OrderItem>,
) -> Result<&'a OrderItem> {
    match item {
        Some(item) if item.user_id == principal.id && item.in_cart() => Ok(item),
        _ => Err(AppError::Forbidden(
            "Item is not in your cart".to_string(),
        )),
    }
}

pub fn ensure_item_seller<'a>(
    principal: &Principal,
    item: Option<&'a OrderItem>,
) -> Result<&'a OrderItem> {
    match item {
        Some(item) if item.seller_id == principal.id => Ok(item),
        _ => Err(AppError::Forbidden(
            "Item belongs to another seller".to_string(),
        )),
    }
}

pub fn ensure_order_buyer(principal: &Principal, order: &Order) -> Result<()> {
    if order.buyer_id != principal.id {
        return Err(AppError::Forbidden(
            "Order belongs to another buyer".to_string(),
        ));
    }
    Ok(())
}

/// True when the buyer has an ordered item for the product that reached a final status.
pub fn can_review(buyer_id: Uuid, product_id: i32, items: &[OrderItem]) -> bool {
    items.iter().any(|item| {
        item.user_id == buyer_id
            && item.product_id == product_id
            && !item.in_cart()
            && matches!(
                item.status,
                OrderItemStatus::Completed | OrderItemStatus::Canceled
            )
    })
}

pub fn ensure_chat_participant(principal: &Principal, buyer_id: Uuid, seller_id: Uuid) -> Result<()> {
    if principal.id != buyer_id && principal.id != seller_id {
        return Err(AppError::Forbidden(
            "You are not part of this conversation".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn principal(role: UserRole) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            username: "someone".to_string(),
            role,
        }
    }

    fn item(user_id: Uuid, seller_id: Uuid, order_id: Option<i32>) -> OrderItem {
        OrderItem {
            id: 1,
            order_id,
            product_id: 5,
            quantity: 1,
            price: Decimal::ONE,
            product_name: "Mug".to_string(),
            product_image: None,
            user_id,
            seller_id,
            status: OrderItemStatus::Waiting,
        }
    }

    fn product(seller_id: Uuid) -> Product {
        Product {
            id: 5,
            name: "Mug".to_string(),
            description: String::new(),
            price: Decimal::ONE,
            category_id: 1,
            seller_id,
            created_at: Utc::now(),
            is_available: true,
            image_data: None,
        }
    }

    #[test]
    fn role_gate_rejects_wrong_role() {
        let buyer = principal(UserRole::Buyer);
        assert!(require_role(&buyer, UserRole::Buyer).is_ok());
        assert!(matches!(
            require_role(&buyer, UserRole::Seller),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn product_owner_check() {
        let seller = principal(UserRole::Seller);
        assert!(ensure_product_owner(&seller, &product(seller.id)).is_ok());
        assert!(ensure_product_owner(&seller, &product(Uuid::new_v4())).is_err());
    }

    #[test]
    fn category_link_must_match_seller_and_category() {
        let seller = principal(UserRole::Seller);
        let links = vec![
            UserCategory {
                user_id: seller.id,
                category_id: 3,
            },
            UserCategory {
                user_id: Uuid::new_v4(),
                category_id: 4,
            },
        ];

        assert!(ensure_category_link(&seller, &links, 3).is_ok());
        assert!(ensure_category_link(&seller, &links, 4).is_err());
        assert!(ensure_category_link(&seller, &[], 3).is_err());
    }

    #[test]
    fn cart_removal_guard() {
        let buyer = principal(UserRole::Buyer);
        let seller = Uuid::new_v4();

        let own_cart_item = item(buyer.id, seller, None);
        let ordered_item = item(buyer.id, seller, Some(9));
        let foreign_item = item(Uuid::new_v4(), seller, None);

        assert!(ensure_cart_item_owner(&buyer, Some(&own_cart_item)).is_ok());
        assert!(matches!(
            ensure_cart_item_owner(&buyer, Some(&ordered_item)),
            Err(AppError::Forbidden(_))
        ));
        assert!(ensure_cart_item_owner(&buyer, Some(&foreign_item)).is_err());
        assert!(ensure_cart_item_owner(&buyer, None).is_err());
    }

    #[test]
    fn only_the_items_seller_may_change_it() {
        let seller = principal(UserRole::Seller);
        let own = item(Uuid::new_v4(), seller.id, Some(1));
        let other = item(Uuid::new_v4(), Uuid::new_v4(), Some(1));

        assert!(ensure_item_seller(&seller, Some(&own)).is_ok());
        assert!(ensure_item_seller(&seller, Some(&other)).is_err());
        assert!(ensure_item_seller(&seller, None).is_err());
    }

    #[test]
    fn review_eligibility_requires_final_status_for_that_product() {
        let buyer = Uuid::new_v4();
        let seller = Uuid::new_v4();

        let mut completed = item(buyer, seller, Some(1));
        completed.status = OrderItemStatus::Completed;
        let mut canceled = item(buyer, seller, Some(2));
        canceled.status = OrderItemStatus::Canceled;
        let mut shipped = item(buyer, seller, Some(3));
        shipped.status = OrderItemStatus::Shipped;
        let mut someone_elses = item(Uuid::new_v4(), seller, Some(4));
        someone_elses.status = OrderItemStatus::Completed;

        assert!(can_review(buyer, 5, &[completed.clone()]));
        assert!(can_review(buyer, 5, &[shipped.clone(), canceled]));
        assert!(!can_review(buyer, 5, &[shipped]));
        assert!(!can_review(buyer, 6, &[completed]));
        assert!(!can_review(buyer, 5, &[someone_elses]));

        let mut unordered = item(buyer, seller, None);
        unordered.status = OrderItemStatus::Completed;
        assert!(!can_review(buyer, 5, &[unordered]));
        assert!(!can_review(buyer, 5, &[]));
    }

    #[test]
    fn chat_is_visible_to_participants_only() {
        let buyer = principal(UserRole::Buyer);
        let seller = Uuid::new_v4();

        assert!(ensure_chat_participant(&buyer, buyer.id, seller).is_ok());
        assert!(ensure_chat_participant(&buyer, Uuid::new_v4(), seller).is_err());
    }
}
