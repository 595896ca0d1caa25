//! Command handlers for the Restaurant context.
//!
//! Each handler validates the submitted fields, verifies the references the
//! aggregate declares, and only then touches the store. Menus and menu items
//! reference sibling aggregates, so their verifier is handed a client backed
//! by this service's own repository.

use sabor_core::client::RemoteEntityClient;
use sabor_core::clock::Clock;
use sabor_core::command::Command;
use sabor_core::error::DomainError;
use sabor_core::record::Record;
use sabor_core::repository::Repository;
use sabor_core::service::{load_existing, remove_existing, save_new, save_revision};
use sabor_core::verifier::ReferenceVerifier;
use tracing::info;

use crate::domain::aggregates::{Menu, MenuItem, Restaurant};
use crate::domain::commands::{
    CreateMenu, CreateMenuItem, CreateRestaurant, DeleteMenu, DeleteMenuItem, DeleteRestaurant,
    UpdateMenu, UpdateMenuItem, UpdateRestaurant,
};

/// Lookup of restaurants, as seen by the menu handlers.
pub type RestaurantLookup = dyn RemoteEntityClient<Entity = Record<Restaurant>>;

/// Lookup of menus, as seen by the menu item handlers.
pub type MenuLookup = dyn RemoteEntityClient<Entity = Record<Menu>>;

/// Handles the `CreateRestaurant` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields, or
/// `DomainError::OperationFailed` if the store rejects the insert.
pub async fn handle_create_restaurant(
    command: &CreateRestaurant,
    clock: &dyn Clock,
    repo: &dyn Repository<Restaurant>,
) -> Result<Record<Restaurant>, DomainError> {
    command.input.validate()?;
    let record = save_new(repo, command.input.clone(), clock.now()).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        restaurant_id = record.id,
        "restaurant created"
    );
    Ok(record)
}

/// Handles the `UpdateRestaurant` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::NotFound` if the restaurant does not exist, or
/// `DomainError::OperationFailed` if the store rejects the update.
pub async fn handle_update_restaurant(
    command: &UpdateRestaurant,
    clock: &dyn Clock,
    repo: &dyn Repository<Restaurant>,
) -> Result<Record<Restaurant>, DomainError> {
    command.input.validate()?;
    let existing = load_existing(repo, command.restaurant_id).await?;
    let revised = Restaurant::overlay(&existing, command.input.clone(), clock.now());
    let record = save_revision(repo, &revised).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        restaurant_id = record.id,
        "restaurant updated"
    );
    Ok(record)
}

/// Handles the `DeleteRestaurant` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the restaurant does not exist, or
/// `DomainError::OperationFailed` if the store fails to delete it.
pub async fn handle_delete_restaurant(
    command: &DeleteRestaurant,
    repo: &dyn Repository<Restaurant>,
) -> Result<(), DomainError> {
    remove_existing(repo, command.restaurant_id).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        restaurant_id = command.restaurant_id,
        "restaurant deleted"
    );
    Ok(())
}

/// Handles the `CreateMenu` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::InvalidReference` if the restaurant does not exist,
/// `DomainError::DependencyUnavailable` if it could not be checked, or
/// `DomainError::OperationFailed` if the store rejects the insert.
pub async fn handle_create_menu(
    command: &CreateMenu,
    clock: &dyn Clock,
    repo: &dyn Repository<Menu>,
    restaurants: &RestaurantLookup,
) -> Result<Record<Menu>, DomainError> {
    command.input.validate()?;
    verify_menu(&command.input, restaurants).await?;
    let record = save_new(repo, command.input.clone(), clock.now()).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        menu_id = record.id,
        restaurant_id = record.fields.restaurant_id,
        "menu created"
    );
    Ok(record)
}

/// Handles the `UpdateMenu` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::NotFound` if the menu does not exist,
/// `DomainError::InvalidReference` or `DomainError::DependencyUnavailable`
/// if the restaurant check fails, or `DomainError::OperationFailed` if the
/// store rejects the update.
pub async fn handle_update_menu(
    command: &UpdateMenu,
    clock: &dyn Clock,
    repo: &dyn Repository<Menu>,
    restaurants: &RestaurantLookup,
) -> Result<Record<Menu>, DomainError> {
    command.input.validate()?;
    let existing = load_existing(repo, command.menu_id).await?;
    verify_menu(&command.input, restaurants).await?;
    let revised = Menu::overlay(&existing, command.input.clone(), clock.now());
    let record = save_revision(repo, &revised).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        menu_id = record.id,
        "menu updated"
    );
    Ok(record)
}

/// Handles the `DeleteMenu` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the menu does not exist, or
/// `DomainError::OperationFailed` if the store fails to delete it.
pub async fn handle_delete_menu(
    command: &DeleteMenu,
    repo: &dyn Repository<Menu>,
) -> Result<(), DomainError> {
    remove_existing(repo, command.menu_id).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        menu_id = command.menu_id,
        "menu deleted"
    );
    Ok(())
}

/// Handles the `CreateMenuItem` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::InvalidReference` if the menu does not exist,
/// `DomainError::DependencyUnavailable` if it could not be checked, or
/// `DomainError::OperationFailed` if the store rejects the insert.
pub async fn handle_create_menu_item(
    command: &CreateMenuItem,
    clock: &dyn Clock,
    repo: &dyn Repository<MenuItem>,
    menus: &MenuLookup,
) -> Result<Record<MenuItem>, DomainError> {
    command.input.validate()?;
    verify_menu_item(&command.input, menus).await?;
    let record = save_new(repo, command.input.clone(), clock.now()).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        menu_item_id = record.id,
        menu_id = record.fields.menu_id,
        "menu item created"
    );
    Ok(record)
}

/// Handles the `UpdateMenuItem` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::NotFound` if the item does not exist,
/// `DomainError::InvalidReference` or `DomainError::DependencyUnavailable`
/// if the menu check fails, or `DomainError::OperationFailed` if the store
/// rejects the update.
pub async fn handle_update_menu_item(
    command: &UpdateMenuItem,
    clock: &dyn Clock,
    repo: &dyn Repository<MenuItem>,
    menus: &MenuLookup,
) -> Result<Record<MenuItem>, DomainError> {
    command.input.validate()?;
    let existing = load_existing(repo, command.menu_item_id).await?;
    verify_menu_item(&command.input, menus).await?;
    let revised = MenuItem::overlay(&existing, command.input.clone(), clock.now());
    let record = save_revision(repo, &revised).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        menu_item_id = record.id,
        "menu item updated"
    );
    Ok(record)
}

/// Handles the `DeleteMenuItem` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the item does not exist, or
/// `DomainError::OperationFailed` if the store fails to delete it.
pub async fn handle_delete_menu_item(
    command: &DeleteMenuItem,
    repo: &dyn Repository<MenuItem>,
) -> Result<(), DomainError> {
    remove_existing(repo, command.menu_item_id).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        menu_item_id = command.menu_item_id,
        "menu item deleted"
    );
    Ok(())
}

async fn verify_menu(menu: &Menu, restaurants: &RestaurantLookup) -> Result<(), DomainError> {
    ReferenceVerifier::new()
        .single("restaurant_id", restaurants, menu.restaurant_id)
        .verify()
        .await
        .into_result()
}

async fn verify_menu_item(item: &MenuItem, menus: &MenuLookup) -> Result<(), DomainError> {
    ReferenceVerifier::new()
        .single("menu_id", menus, item.menu_id)
        .verify()
        .await
        .into_result()
}
