// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recipe model for the API and the edit form.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Largest accepted image upload (6 MiB, exclusive).
pub const MAX_IMAGE_BYTES: usize = 6 * 1024 * 1024;

/// Recipe record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "RecipeID")]
    pub id: u64,
    #[serde(rename = "RecipeName")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Ingredients", default, deserialize_with = "json_list")]
    pub ingredients: Vec<String>,
    #[serde(rename = "Instructions", default, deserialize_with = "json_list")]
    pub instructions: Vec<Instruction>,
    #[serde(rename = "Categories", default, deserialize_with = "json_list")]
    pub categories: Vec<String>,
    #[serde(rename = "Tags", default, deserialize_with = "json_list")]
    pub tags: Vec<String>,
    #[serde(rename = "Servings", default)]
    pub servings: Option<u32>,
    /// Minutes
    #[serde(rename = "PrepTime", default)]
    pub prep_time: Option<u32>,
    /// Minutes
    #[serde(rename = "CookTime", default)]
    pub cook_time: Option<u32>,
    /// Minutes
    #[serde(rename = "TotalTime", default)]
    pub total_time: Option<u32>,
    /// Server-relative path, e.g. `/uploads/123.png`
    #[serde(rename = "ImagePath", default)]
    pub image_path: Option<String>,
}

/// One preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    #[serde(default)]
    pub step_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(rename = "CategoryName")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    #[serde(rename = "TagName")]
    pub name: String,
}

/// Accept a list either as a JSON array or as a string holding a JSON array.
///
/// Anything unparsable (including `null`) becomes an empty list.
fn json_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::String(s) => serde_json::from_str(&s),
        serde_json::Value::Null => return Ok(Vec::new()),
        other => serde_json::from_value(other),
    };
    Ok(parsed.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unparsable recipe list field, using empty list");
        Vec::new()
    }))
}

/// An image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Struct-level check of the optional upload.
fn validate_image(draft: &RecipeDraft) -> Result<(), ValidationError> {
    let Some(image) = &draft.image else {
        return Ok(());
    };
    if !image.mime_type.starts_with("image/") {
        return Err(ValidationError::new("image_type")
            .with_message("You can only upload image files!".into()));
    }
    if image.bytes.len() >= MAX_IMAGE_BYTES {
        return Err(ValidationError::new("image_size")
            .with_message("Image must be smaller than 6MB!".into()));
    }
    Ok(())
}

// Signature follows the field type, as the derive passes `&String`.
#[allow(clippy::ptr_arg)]
fn validate_not_blank(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Recipe name is required".into()));
    }
    Ok(())
}

/// Editable recipe, submitted as multipart form data.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "validate_image"))]
pub struct RecipeDraft {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<Instruction>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub servings: Option<u32>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub total_time: Option<u32>,
    pub image: Option<ImageUpload>,
}

impl RecipeDraft {
    /// Start an edit from an existing recipe. The stored image is kept
    /// server-side unless a new upload replaces it.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            categories: recipe.categories.clone(),
            tags: recipe.tags.clone(),
            servings: recipe.servings,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            image: None,
        }
    }

    /// Text fields of the multipart body, in submission order.
    ///
    /// List fields are JSON encoded; absent numbers are omitted.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        let mut fields = vec![
            ("recipeName", self.name.clone()),
            ("Description", self.description.clone()),
            ("ingredients", serde_json::to_string(&self.ingredients)?),
            ("instructions", serde_json::to_string(&self.instructions)?),
            ("categories", serde_json::to_string(&self.categories)?),
            ("tags", serde_json::to_string(&self.tags)?),
        ];
        let numbers = [
            ("servings", self.servings),
            ("totalTime", self.total_time),
            ("cookTime", self.cook_time),
            ("prepTime", self.prep_time),
        ];
        for (name, value) in numbers {
            if let Some(v) = value {
                fields.push((name, v.to_string()));
            }
        }
        Ok(fields)
    }

    /// Append a blank ingredient row.
    pub fn add_ingredient(&mut self) {
        self.ingredients.push(String::new());
    }

    /// Append an instruction step named after its position.
    pub fn add_instruction(&mut self) {
        let step_name = format!("Step {}", self.instructions.len() + 1);
        self.instructions.push(Instruction {
            step_name,
            description: String::new(),
            note: None,
        });
    }

    /// Move an ingredient from one position to another.
    pub fn move_ingredient(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.ingredients, from, to)
    }

    /// Move an instruction step from one position to another.
    pub fn move_instruction(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.instructions, from, to)
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_accepts_stringified_lists() {
        let recipe: Recipe = serde_json::from_value(json!({
            "RecipeID": 7,
            "RecipeName": "Dal",
            "Ingredients": "[\"lentils\",\"salt\"]",
            "Instructions": [{"stepName": "Step 1", "description": "Boil"}],
            "Categories": "[\"Dinner\"]",
            "Tags": null,
            "PrepTime": 10
        }))
        .unwrap();

        assert_eq!(recipe.ingredients, vec!["lentils", "salt"]);
        assert_eq!(recipe.instructions[0].description, "Boil");
        assert_eq!(recipe.instructions[0].note, None);
        assert_eq!(recipe.categories, vec!["Dinner"]);
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.prep_time, Some(10));
        assert_eq!(recipe.cook_time, None);
    }

    #[test]
    fn test_recipe_malformed_list_becomes_empty() {
        let recipe: Recipe = serde_json::from_value(json!({
            "RecipeID": 1,
            "RecipeName": "Toast",
            "Ingredients": "[bread",
        }))
        .unwrap();
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
    }

    #[test]
    fn test_draft_form_fields_omit_absent_numbers() {
        let draft = RecipeDraft {
            name: "Soup".into(),
            ingredients: vec!["water".into()],
            servings: Some(2),
            ..Default::default()
        };
        let fields = draft.form_fields().unwrap();

        assert!(fields.contains(&("recipeName", "Soup".to_string())));
        assert!(fields.contains(&("ingredients", "[\"water\"]".to_string())));
        assert!(fields.contains(&("servings", "2".to_string())));
        assert!(!fields.iter().any(|(name, _)| *name == "cookTime"));
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = RecipeDraft::default();
        assert!(draft.validate().is_err());

        draft.name = "Pancakes".into();
        assert!(draft.validate().is_ok());

        draft.image = Some(ImageUpload {
            file_name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            bytes: vec![1, 2, 3],
        });
        let err = crate::error::ClientError::from(draft.validate().unwrap_err());
        assert_eq!(err.user_message(), "You can only upload image files!");

        draft.image = Some(ImageUpload {
            file_name: "big.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![0; MAX_IMAGE_BYTES],
        });
        let err = crate::error::ClientError::from(draft.validate().unwrap_err());
        assert_eq!(err.user_message(), "Image must be smaller than 6MB!");

        draft.image = Some(ImageUpload {
            file_name: "ok.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![0; 16],
        });
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_reorder_and_step_names() {
        let mut draft = RecipeDraft::default();
        draft.add_instruction();
        draft.add_instruction();
        assert_eq!(draft.instructions[1].step_name, "Step 2");

        draft.ingredients = vec!["a".into(), "b".into(), "c".into()];
        assert!(draft.move_ingredient(0, 2));
        assert_eq!(draft.ingredients, vec!["b", "c", "a"]);
        assert!(!draft.move_ingredient(5, 0));
    }
}
