use criterion::{criterion_group, criterion_main, Criterion};
use recipe_client::models::Recipe;
use recipe_client::services::{Catalog, CatalogFilter};
use serde_json::json;
use std::hint::black_box;

const CATEGORIES: [&str; 5] = ["Breakfast", "Lunch", "Dinner", "Dessert", "Snack"];
const TAGS: [&str; 6] = ["Vegan", "Spicy", "Sweet", "Quick", "Vegetarian", "Gluten Free"];

/// Synthetic catalog roughly the size of a busy household's collection.
fn build_catalog(count: u64) -> Catalog {
    let recipes: Vec<Recipe> = (0..count)
        .map(|i| {
            serde_json::from_value(json!({
                "RecipeID": i,
                "RecipeName": format!("Recipe {} with {}", i, TAGS[i as usize % TAGS.len()]),
                "Categories": [CATEGORIES[i as usize % CATEGORIES.len()]],
                "Tags": [TAGS[i as usize % TAGS.len()], TAGS[(i as usize + 1) % TAGS.len()]],
                "Ingredients": "[\"flour\",\"water\",\"salt\"]",
            }))
            .expect("Failed to build recipe")
        })
        .collect();

    Catalog::new(
        recipes,
        CATEGORIES.iter().map(|s| s.to_string()).collect(),
        TAGS.iter().map(|s| s.to_string()).collect(),
    )
}

fn benchmark_catalog_filter(c: &mut Criterion) {
    let catalog = build_catalog(2_000);

    let mut group = c.benchmark_group("catalog");

    group.bench_function("search_name", |b| {
        b.iter(|| catalog.search(black_box("spicy")))
    });

    let filter = CatalogFilter {
        query: "recipe 1".to_string(),
        category: "Dinner".to_string(),
        tag: "Quick".to_string(),
    };
    group.bench_function("filter_combined", |b| {
        b.iter(|| catalog.filter(black_box(&filter)))
    });

    group.bench_function("group_by_letter", |b| b.iter(|| catalog.grouped()));

    group.finish();
}

criterion_group!(benches, benchmark_catalog_filter);
criterion_main!(benches);
