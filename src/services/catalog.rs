// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local search and filtering over a fetched recipe list.

use crate::models::Recipe;
use std::collections::BTreeMap;

/// Group label shared by all recipes whose name starts with a digit.
pub const DIGIT_GROUP: &str = "0-9";

/// Catalog filter criteria. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: String,
    pub category: String,
    pub tag: String,
}

impl CatalogFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !recipe.name.to_lowercase().contains(&query) {
            return false;
        }
        if !self.category.is_empty() && !recipe.categories.contains(&self.category) {
            return false;
        }
        if !self.tag.is_empty() && !recipe.tags.contains(&self.tag) {
            return false;
        }
        true
    }
}

/// Recipe list with the category and tag vocabularies used to filter it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    categories: Vec<String>,
    tags: Vec<String>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>, categories: Vec<String>, tags: Vec<String>) -> Self {
        Self {
            recipes,
            categories,
            tags,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Case-insensitive substring search on recipe names.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        self.filter(&CatalogFilter {
            query: query.to_string(),
            ..Default::default()
        })
    }

    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Recipes grouped by the uppercase first letter of their name.
    pub fn grouped(&self) -> BTreeMap<String, Vec<&Recipe>> {
        let mut groups: BTreeMap<String, Vec<&Recipe>> = BTreeMap::new();
        for recipe in &self.recipes {
            groups.entry(group_label(&recipe.name)).or_default().push(recipe);
        }
        groups
    }

    /// Record a category created during this session.
    pub fn add_category(&mut self, name: &str) -> bool {
        push_unique(&mut self.categories, name)
    }

    /// Record a tag created during this session.
    pub fn add_tag(&mut self, name: &str) -> bool {
        push_unique(&mut self.tags, name)
    }

    pub fn remove_recipe(&mut self, recipe_id: u64) -> Option<Recipe> {
        let idx = self.recipes.iter().position(|r| r.id == recipe_id)?;
        Some(self.recipes.remove(idx))
    }
}

fn group_label(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => DIGIT_GROUP.to_string(),
        Some(c) => c.to_uppercase().collect(),
        None => String::new(),
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || list.iter().any(|n| n == name) {
        return false;
    }
    list.push(name.to_string());
    true
}
