// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (route protection).

pub mod auth;

pub use auth::{require_session, Guarded, RouteGuard};
