//! Integration tests for shopping list editing and cost estimation.

use pricemate_core::estimator;
use pricemate_core::shopping_list::{ShoppingList, ShoppingListError};
use pricemate_core::{ItemCategory, NewShoppingItem, Price};
use rust_decimal::Decimal;

fn price(cents: i64) -> Price {
    Price::from_cents(cents).unwrap()
}

fn weekly_list() -> ShoppingList {
    let mut list = ShoppingList::new();
    list.add(
        NewShoppingItem::new("Milk 2L", 2)
            .with_target_price(price(300))
            .with_category(ItemCategory::Dairy),
    )
    .unwrap();
    list.add(NewShoppingItem::new("Sourdough", 1).with_category(ItemCategory::Bakery))
        .unwrap();
    list.add(
        NewShoppingItem::new("Bananas", 6)
            .with_target_price(price(25))
            .with_category(ItemCategory::Produce),
    )
    .unwrap();
    list
}

#[test]
fn test_list_keeps_insertion_order_through_edits() {
    let mut list = weekly_list();
    let bread = list.items().get(1).unwrap().clone();

    let mut renamed = bread.clone();
    renamed.name = "Rye Bread".to_string();
    list.update(renamed).unwrap();
    let names: Vec<&str> = list.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Milk 2L", "Rye Bread", "Bananas"]);

    list.remove(bread.id).unwrap();
    let names: Vec<&str> = list.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Milk 2L", "Bananas"]);
}

#[test]
fn test_list_rejects_invalid_items() {
    let mut list = weekly_list();
    assert_eq!(
        list.add(NewShoppingItem::new("Eggs", 0)),
        Err(ShoppingListError::ZeroQuantity)
    );
    assert_eq!(
        list.add(NewShoppingItem::new("   ", 1)),
        Err(ShoppingListError::EmptyName)
    );
    assert_eq!(list.len(), 3);
}

#[test]
fn test_estimate_progress_and_total() {
    let mut list = weekly_list();
    let milk_id = list.items().first().unwrap().id;
    assert!(list.toggle(milk_id).unwrap());

    let summary = estimator::summarize(list.items(), price(499));
    assert_eq!(summary.total_items, 9);
    assert_eq!(summary.checked_items, 2);
    assert_eq!(summary.percent_complete(), 22);
    // 2 x 3.00 + 1 x 4.99 (fallback) + 6 x 0.25
    assert_eq!(summary.estimated_total, Decimal::new(1249, 2));
}

#[test]
fn test_estimate_by_category() {
    let list = weekly_list();
    let dairy: Vec<_> = estimator::filter_by_category(list.items(), ItemCategory::Dairy)
        .cloned()
        .collect();
    assert_eq!(dairy.len(), 1);
    assert_eq!(
        estimator::estimated_total(&dairy, price(499)),
        Decimal::new(600, 2)
    );

    let breakdown = estimator::category_breakdown(list.items());
    let categories: Vec<ItemCategory> = breakdown.iter().map(|c| c.category).collect();
    assert_eq!(
        categories,
        [ItemCategory::Produce, ItemCategory::Dairy, ItemCategory::Bakery]
    );
}

#[test]
fn test_clear_checked_then_estimate() {
    let mut list = weekly_list();
    let ids: Vec<_> = list.items().iter().map(|i| i.id).collect();
    for id in ids.iter().take(2) {
        list.toggle(*id).unwrap();
    }
    assert_eq!(list.clear_checked(), 2);

    let summary = estimator::summarize(list.items(), price(499));
    assert_eq!(summary.total_items, 6);
    assert_eq!(summary.estimated_total, Decimal::new(150, 2));
}

#[test]
fn test_list_file_validation() {
    let json = r#"[
        { "name": "Milk 2L", "quantity": 2, "target_price": "3.00", "category": "dairy" },
        { "name": "Apples", "quantity": 4, "category": "produce", "is_checked": true }
    ]"#;
    let list: ShoppingList = serde_json::from_str(json).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(estimator::checked_item_count(list.items()), 4);

    let bad = r#"[{ "name": "Milk", "quantity": 0 }]"#;
    assert!(serde_json::from_str::<ShoppingList>(bad).is_err());

    let absurd = r#"[{ "name": "Caviar", "quantity": 2, "target_price": "79228162514264337593543950335" }]"#;
    assert!(serde_json::from_str::<ShoppingList>(absurd).is_err());
}
