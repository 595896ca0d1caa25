//! Commands for the Restaurant context.

use sabor_core::EntityId;
use sabor_core::command::Command;
use uuid::Uuid;

use crate::domain::aggregates::{Menu, MenuItem, Restaurant};

/// Command to register a new restaurant.
#[derive(Debug, Clone)]
pub struct CreateRestaurant {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitted restaurant fields.
    pub input: Restaurant,
}

impl Command for CreateRestaurant {
    fn command_type(&self) -> &'static str {
        "restaurant.create_restaurant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the fields of an existing restaurant.
#[derive(Debug, Clone)]
pub struct UpdateRestaurant {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The restaurant identifier.
    pub restaurant_id: EntityId,
    /// The submitted restaurant fields.
    pub input: Restaurant,
}

impl Command for UpdateRestaurant {
    fn command_type(&self) -> &'static str {
        "restaurant.update_restaurant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a restaurant.
#[derive(Debug, Clone)]
pub struct DeleteRestaurant {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The restaurant identifier.
    pub restaurant_id: EntityId,
}

impl Command for DeleteRestaurant {
    fn command_type(&self) -> &'static str {
        "restaurant.delete_restaurant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to register a new menu.
#[derive(Debug, Clone)]
pub struct CreateMenu {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitted menu fields.
    pub input: Menu,
}

impl Command for CreateMenu {
    fn command_type(&self) -> &'static str {
        "restaurant.create_menu"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the fields of an existing menu.
#[derive(Debug, Clone)]
pub struct UpdateMenu {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The menu identifier.
    pub menu_id: EntityId,
    /// The submitted menu fields.
    pub input: Menu,
}

impl Command for UpdateMenu {
    fn command_type(&self) -> &'static str {
        "restaurant.update_menu"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a menu.
#[derive(Debug, Clone)]
pub struct DeleteMenu {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The menu identifier.
    pub menu_id: EntityId,
}

impl Command for DeleteMenu {
    fn command_type(&self) -> &'static str {
        "restaurant.delete_menu"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to register a new menu item.
#[derive(Debug, Clone)]
pub struct CreateMenuItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitted menu item fields.
    pub input: MenuItem,
}

impl Command for CreateMenuItem {
    fn command_type(&self) -> &'static str {
        "restaurant.create_menu_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the fields of an existing menu item.
#[derive(Debug, Clone)]
pub struct UpdateMenuItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The menu item identifier.
    pub menu_item_id: EntityId,
    /// The submitted menu item fields.
    pub input: MenuItem,
}

impl Command for UpdateMenuItem {
    fn command_type(&self) -> &'static str {
        "restaurant.update_menu_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a menu item.
#[derive(Debug, Clone)]
pub struct DeleteMenuItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The menu item identifier.
    pub menu_item_id: EntityId,
}

impl Command for DeleteMenuItem {
    fn command_type(&self) -> &'static str {
        "restaurant.delete_menu_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
