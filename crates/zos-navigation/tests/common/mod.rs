//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use zos_navigation::{
    BottomSheetOptions, DialogOptions, KeyType, NavigationKey, Navigator, NavigatorConfig,
    NodeKind, TransitionPair,
};

pub const HOME: KeyType = KeyType::new("Home");
pub const DETAIL: KeyType = KeyType::new("Detail");
pub const CONFIRM: KeyType = KeyType::new("Confirm");
pub const FILTERS: KeyType = KeyType::new("Filters");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Detail(u32),
    Confirm(String),
    Filters,
}

impl NavigationKey for Route {
    fn key_type(&self) -> KeyType {
        match self {
            Route::Home => HOME,
            Route::Detail(_) => DETAIL,
            Route::Confirm(_) => CONFIRM,
            Route::Filters => FILTERS,
        }
    }
}

pub fn slide() -> TransitionPair {
    TransitionPair::horizontal_slide(300.0)
}

pub fn config() -> Rc<NavigatorConfig<Route>> {
    NavigatorConfig::builder()
        .screen(HOME)
        .screen(DETAIL)
        .dialog(CONFIRM, DialogOptions::default())
        .bottom_sheet(FILTERS, BottomSheetOptions::default())
        .node_transition_pair(NodeKind::Screen, slide())
        .build()
}

pub fn keys(navigator: &Navigator<Route>) -> Vec<Route> {
    navigator
        .backstack()
        .iter()
        .map(|entry| entry.navigation_key.clone())
        .collect()
}
