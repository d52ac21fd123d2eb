//! Screen reducer: maps user interactions onto modal view state and store
//! transitions.

use client_core::{CatalogStore, Transition};
use shared::domain::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ProductId),
}

impl ModalState {
    pub fn selected(&self) -> Option<ProductId> {
        match self {
            ModalState::Closed => None,
            ModalState::Open(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    OpenProduct(ProductId),
    Increment,
    Decrement,
    AddToCart,
    Close,
}

/// Applies `action` and returns the store transition it caused, if any.
/// Stepper and cart actions with a closed modal do nothing. An open modal
/// is left only through `Close` or `AddToCart`.
pub fn reduce(
    modal: &mut ModalState,
    store: &mut CatalogStore,
    action: ScreenAction,
) -> Option<Transition> {
    match (action, *modal) {
        (ScreenAction::OpenProduct(id), ModalState::Closed) => {
            *modal = ModalState::Open(id);
            None
        }
        (ScreenAction::OpenProduct(_), ModalState::Open(_)) => None,
        (ScreenAction::Close, _) => {
            *modal = ModalState::Closed;
            None
        }
        (ScreenAction::Increment, ModalState::Open(id)) => Some(store.increment_quantity(id)),
        (ScreenAction::Decrement, ModalState::Open(id)) => Some(store.decrement_quantity(id)),
        (ScreenAction::AddToCart, ModalState::Open(id)) => {
            *modal = ModalState::Closed;
            Some(store.add_to_cart(id))
        }
        (_, ModalState::Closed) => None,
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
