// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe, category, tag, and favorites endpoints.

use crate::error::{ClientError, Result};
use crate::models::{Category, Recipe, RecipeDraft, Tag};
use crate::services::api::ApiClient;
use crate::services::catalog::Catalog;
use crate::services::favorites::FavoritesApi;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteBody {
    recipe_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteIds {
    #[serde(default)]
    recipe_ids: Vec<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCategory<'a> {
    category_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewTag<'a> {
    tag_name: &'a str,
}

/// Recipe operations over the shared request client.
#[derive(Clone)]
pub struct RecipeService {
    api: ApiClient,
}

impl RecipeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let recipes: Option<Vec<Recipe>> = self.api.get_json("/data/recipes").await?;
        Ok(recipes.unwrap_or_default())
    }

    pub async fn get_recipe(&self, recipe_id: u64) -> Result<Recipe> {
        self.api
            .get_json(&format!("/data/recipe/{}", recipe_id))
            .await
    }

    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<()> {
        let form = build_form(draft)?;
        self.api.post_multipart("/data/recipe", form).await?;
        tracing::info!(name = %draft.name, "Recipe created");
        Ok(())
    }

    pub async fn update_recipe(&self, recipe_id: u64, draft: &RecipeDraft) -> Result<()> {
        let form = build_form(draft)?;
        self.api
            .put_multipart(&format!("/data/recipe/edit/{}", recipe_id), form)
            .await?;
        tracing::info!(recipe_id, "Recipe updated");
        Ok(())
    }

    pub async fn delete_recipe(&self, recipe_id: u64) -> Result<()> {
        self.api
            .delete::<()>(&format!("/data/recipe/{}", recipe_id), None)
            .await?;
        tracing::info!(recipe_id, "Recipe deleted");
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<String>> {
        let categories: Option<Vec<Category>> = self.api.get_json("/data/categories").await?;
        Ok(categories
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    pub async fn list_tags(&self) -> Result<Vec<String>> {
        let tags: Option<Vec<Tag>> = self.api.get_json("/data/tags").await?;
        Ok(tags.unwrap_or_default().into_iter().map(|t| t.name).collect())
    }

    /// Create a category unless it is blank or already in `known`.
    pub async fn add_category(&self, name: &str, known: &[String]) -> Result<String> {
        let name = new_label(name, known, "category")?;
        self.api
            .post_unit("/data/categories", &NewCategory { category_name: &name })
            .await?;
        Ok(name)
    }

    /// Create a tag unless it is blank or already in `known`.
    pub async fn add_tag(&self, name: &str, known: &[String]) -> Result<String> {
        let name = new_label(name, known, "tag")?;
        self.api
            .post_unit("/data/tags", &NewTag { tag_name: &name })
            .await?;
        Ok(name)
    }

    /// Full recipes in the user's favorites list.
    pub async fn list_favorites(&self) -> Result<Vec<Recipe>> {
        let recipes: Option<Vec<Recipe>> = self.api.get_json("/data/userfavorites").await?;
        Ok(recipes.unwrap_or_default())
    }

    /// Fetch recipes, categories, and tags for the catalog view.
    pub async fn load_catalog(&self) -> Result<Catalog> {
        let (recipes, categories, tags) = tokio::try_join!(
            self.list_recipes(),
            self.list_categories(),
            self.list_tags()
        )?;
        tracing::debug!(count = recipes.len(), "Catalog loaded");
        Ok(Catalog::new(recipes, categories, tags))
    }
}

impl FavoritesApi for RecipeService {
    async fn favorite_ids(&self) -> Result<Vec<u64>> {
        let ids: Option<FavoriteIds> = self.api.get_json("/data/userfavorites/ids").await?;
        Ok(ids.map(|i| i.recipe_ids).unwrap_or_default())
    }

    async fn add_favorite(&self, recipe_id: u64) -> Result<()> {
        self.api
            .post_unit("/data/favorites", &FavoriteBody { recipe_id })
            .await
    }

    async fn remove_favorite(&self, recipe_id: u64) -> Result<()> {
        self.api
            .delete("/data/favorites", Some(&FavoriteBody { recipe_id }))
            .await
    }
}

fn new_label(name: &str, known: &[String], kind: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::Validation(format!("The {} name is empty", kind)));
    }
    if known.iter().any(|k| k == name) {
        return Err(ClientError::Validation(format!(
            "The {} \"{}\" already exists",
            kind, name
        )));
    }
    Ok(name.to_string())
}

/// Validate a draft and encode it as multipart form data.
fn build_form(draft: &RecipeDraft) -> Result<multipart::Form> {
    draft.validate()?;

    let fields = draft
        .form_fields()
        .map_err(|e| ClientError::Internal(anyhow::anyhow!("Failed to encode draft: {}", e)))?;

    let mut form = multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }

    if let Some(image) = &draft.image {
        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ClientError::Validation(format!("Invalid image type: {}", e)))?;
        form = form.part("image", part);
    }

    Ok(form)
}
