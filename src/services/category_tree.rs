use std::collections::HashMap;

use crate::{
    error::{AppError, Result},
    models::CategoryUsage,
};

/// Whether re-parenting `category_id` under `new_parent` would close a loop.
///
/// `parents` maps every known category to its current parent. The walk is
/// bounded by the map size so an already-corrupted tree cannot spin forever.
pub fn would_create_cycle(
    category_id: i32,
    new_parent: Option<i32>,
    parents: &HashMap<i32, Option<i32>>,
) -> bool {
    let mut current = new_parent;
    let mut steps = 0;

    while let Some(id) = current {
        if id == category_id {
            return true;
        }
        if steps > parents.len() {
            return true;
        }
        steps += 1;
        current = parents.get(&id).copied().flatten();
    }

    false
}

pub fn ensure_deletable(usage: CategoryUsage) -> Result<()> {
    if usage.product_count > 0 || usage.subcategory_count > 0 {
        return Err(AppError::InvalidState(
            "Cannot delete a category that has products or subcategories".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 -> 2 -> 3, 4 standalone
    fn tree() -> HashMap<i32, Option<i32>> {
        HashMap::from([(1, None), (2, Some(1)), (3, Some(2)), (4, None)])
    }

    #[test]
    fn detaching_or_moving_sideways_is_fine() {
        let parents = tree();
        assert!(!would_create_cycle(3, None, &parents));
        assert!(!would_create_cycle(3, Some(4), &parents));
        assert!(!would_create_cycle(4, Some(3), &parents));
    }

    #[test]
    fn rejects_self_parent() {
        assert!(would_create_cycle(2, Some(2), &tree()));
    }

    #[test]
    fn rejects_descendant_parent() {
        let parents = tree();
        assert!(would_create_cycle(1, Some(3), &parents));
        assert!(would_create_cycle(2, Some(3), &parents));
    }

    #[test]
    fn stops_on_existing_loop() {
        let parents = HashMap::from([(1, Some(2)), (2, Some(1)), (5, None)]);
        assert!(would_create_cycle(5, Some(1), &parents));
    }

    #[test]
    fn new_category_under_existing_parent() {
        // id 0 stands for a category that does not exist yet
        assert!(!would_create_cycle(0, Some(3), &tree()));
    }

    #[test]
    fn delete_guard() {
        assert!(ensure_deletable(CategoryUsage::default()).is_ok());
        assert!(matches!(
            ensure_deletable(CategoryUsage {
                product_count: 1,
                subcategory_count: 0
            }),
            Err(AppError::InvalidState(_))
        ));
        assert!(
            ensure_deletable(CategoryUsage {
                product_count: 0,
                subcategory_count: 2
            })
            .is_err()
        );
    }
}
