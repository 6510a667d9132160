// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session lifecycle, flows, and API operations.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod otp;
pub mod password;
pub mod recipes;
pub mod session;
pub mod token_store;

pub use api::ApiClient;
pub use auth::AuthService;
pub use catalog::{Catalog, CatalogFilter};
pub use favorites::{FavoriteToggle, FavoritesApi};
pub use otp::{OtpApi, OtpFlow, OtpPurpose, OtpStep};
pub use recipes::RecipeService;
pub use session::{SessionContext, SessionState};
pub use token_store::TokenStore;
