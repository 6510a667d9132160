// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models exchanged with the recipe API.

pub mod recipe;
pub mod user;

pub use recipe::{Category, ImageUpload, Instruction, Recipe, RecipeDraft, Tag};
pub use user::{LoginRequest, LoginResponse, UserEmail};
