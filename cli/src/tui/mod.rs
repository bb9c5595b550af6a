// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod app_store;
mod component;
mod component_form;
mod component_page;
mod day_editor;
mod dispatcher;
mod grid_view;
mod settings;

pub use app::run_year_progress;
